use enum_iterator::all;
use itertools::Itertools;
use tracing::trace;

use super::CardExchangeStrategy;
use crate::bid::Bid;
use crate::card::{by_rank, Rank, Suit};
use crate::card_list::CardList;
use crate::hand::Hand;
use crate::seat::Seat;
use crate::{PLAYERS, WIDOW_SIZE};

/// Highest rank thrown away while working round the suits in no-trump.
const LOW_CARD: Rank = Rank::Ten;

/// Voids short side suits under a trump contract; trims low cards evenly
/// across suits in no-trump.
#[derive(Debug, Default, Clone)]
pub struct AdvancedExchange;

impl AdvancedExchange {
    pub fn new() -> Self {
        Self
    }

    fn discard_with_trump(hand: &Hand, trump: Suit) -> CardList {
        let mut discards = CardList::new();
        let side_suits = all::<Suit>()
            .filter(|suit| *suit != trump)
            .map(|suit| hand.cards_of(suit, Some(trump)))
            .filter(|cards| !cards.is_empty())
            .sorted_by_key(CardList::len);
        for cards in side_suits {
            let remaining = WIDOW_SIZE - discards.len();
            if remaining == 0 {
                break;
            }
            if cards.len() <= remaining {
                discards.extend(cards);
            } else {
                discards.extend(cards.sorted_by(by_rank).iter().take(remaining));
            }
        }
        let trumps = hand.trump_cards(trump).sorted_by(|a, b| a.cmp_by_suit(b, Some(trump)));
        let remaining = WIDOW_SIZE - discards.len();
        discards.extend(trumps.iter().take(remaining));
        discards
    }

    fn discard_without_trump(hand: &Hand) -> CardList {
        let mut suits: Vec<CardList> = all::<Suit>()
            .map(|suit| hand.cards_of(suit, None).sorted_by(by_rank))
            .collect();
        let mut discards = CardList::new();
        while discards.len() < WIDOW_SIZE {
            let before = discards.len();
            for cards in suits.iter_mut() {
                if discards.len() == WIDOW_SIZE {
                    break;
                }
                match cards.first() {
                    Some(lowest) if lowest.rank().map_or(false, |rank| rank <= LOW_CARD) => {
                        cards.remove(lowest);
                        discards.add(lowest);
                    }
                    _ => {}
                }
            }
            if discards.len() == before {
                break;
            }
        }
        let mut rest = hand.cards().clone();
        rest.remove_all(&discards);
        let rest = rest.sorted_by(by_rank);
        let remaining = WIDOW_SIZE - discards.len();
        discards.extend(rest.iter().take(remaining));
        discards
    }
}

impl CardExchangeStrategy for AdvancedExchange {
    fn select_cards_to_discard(
        &mut self,
        bids: &[Bid; PLAYERS],
        holder: Seat,
        hand: &Hand,
    ) -> CardList {
        let trump = Bid::max(bids.iter().copied()).suit().unwrap_or(None);
        let discards = match trump {
            Some(trump) => Self::discard_with_trump(hand, trump),
            None => Self::discard_without_trump(hand),
        };
        trace!(%holder, %discards, "advanced discard");
        discards
    }
}


#[cfg(test)]
fn hand(s: &str) -> Hand {
    Hand::from(s.parse::<CardList>().unwrap())
}

#[cfg(test)]
fn list(s: &str) -> CardList {
    s.parse().unwrap()
}

#[cfg(test)]
fn discard(contract: &str, cards: &str) -> CardList {
    let bids = [contract.parse::<Bid>().unwrap(), Bid::Pass, Bid::Pass, Bid::Pass];
    AdvancedExchange::new().select_cards_to_discard(&bids, Seat::North, &hand(cards))
}

#[test]
fn test_voids_the_shortest_side_suits() {
    // clubs: 2, diamonds: 3, hearts: 4
    let discards = discard("8 SPADES", "HJ JS JC AS KS QS TS AC 4C KD 9D 5D AH QH 7H 6H");
    assert_eq!(discards, list("AC 4C KD 9D 5D 6H"));
}

#[test]
fn test_trims_a_long_suit_from_the_bottom() {
    let discards = discard("7 HEARTS", "JH JD AH KH QH TH 9H 8H 7H 6S AS 9S 8S 7S 5S 4S");
    assert_eq!(discards, list("4S 5S 6S 7S 8S 9S"));
}

#[test]
fn test_discards_trump_only_when_forced() {
    let discards = discard("10 CLUBS", "HJ LJ JC JS AC KC QC TC 9C 8C 7C 6C 5C 4C AD KD");
    assert_eq!(discards, list("AD KD 4C 5C 6C 7C"));
}

#[test]
fn test_no_trump_works_round_the_suits() {
    let discards = discard("6 NO TRUMP", "HJ AS KS 4S 5S AC 6C 7C AD 8D 9D AH TH 5H KH QC");
    assert_eq!(discards, list("4S 6C 8D 5H 5S 7C"));
}

#[test]
fn test_no_trump_falls_back_to_the_lowest_cards() {
    let discards = discard("6 NO TRUMP", "HJ LJ AS KS QS JS AC KC QC AD KD QD AH KH QH 9H");
    assert_eq!(discards, list("9H JS QS QC QD QH"));
}
