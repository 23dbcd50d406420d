use enum_iterator::all;
use tracing::trace;

use super::BiddingStrategy;
use crate::bid::{Bid, MAX_TRICKS, MIN_TRICKS};
use crate::card::{Card, Joker, Rank, Suit};
use crate::card_list::CardList;
use crate::deck::full_deck;
use crate::hand::Hand;
use crate::seat::Seat;
use crate::PLAYERS;

const MIN_HAND_SCORE: u32 = 10;
const MIN_NO_TRUMP_SCORE: u32 = 18;

fn card_score(card: Card) -> u32 {
    match card {
        Card::Joker(Joker::Low) => 5,
        Card::Joker(Joker::High) => 6,
        Card::Suited(Rank::Jack, _) => 1,
        Card::Suited(Rank::Queen, _) => 2,
        Card::Suited(Rank::King, _) => 3,
        Card::Suited(Rank::Ace, _) => 4,
        Card::Suited(..) => 0,
    }
}

fn score(cards: &CardList) -> u32 {
    cards.iter().map(card_score).sum()
}

fn scoring_cards(cards: &CardList) -> usize {
    cards.iter().filter(|card| card_score(*card) > 0).count()
}

/// Cards outside the hand that would outrank the hand's cards with `trump`
/// as trump, counted once per hand card.
fn beatable(hand: &Hand, unseen: &CardList, trump: Suit) -> usize {
    hand.iter()
        .map(|mine| {
            unseen
                .iter()
                .filter(|theirs| theirs.cmp_by_suit(&mine, Some(trump)).is_gt())
                .count()
        })
        .sum()
}

/// Bids no-trump on strong balanced hands; otherwise picks the trump under
/// which the fewest outstanding cards beat the hand.
#[derive(Debug, Default, Clone)]
pub struct AdvancedBidding;

impl AdvancedBidding {
    pub fn new() -> Self {
        Self
    }

    fn should_bid_no_trump(hand: &Hand) -> bool {
        score(hand) >= MIN_NO_TRUMP_SCORE
            && all::<Suit>().all(|suit| scoring_cards(&hand.cards_of(suit, None)) > 0)
    }

    fn strongest_suit(hand: &Hand) -> Suit {
        let mut unseen = full_deck();
        unseen.remove_all(hand);
        all::<Suit>()
            .min_by_key(|trump| beatable(hand, &unseen, *trump))
            .unwrap_or(Suit::Spades)
    }

    fn proposal(hand: &Hand) -> Bid {
        if score(hand) < MIN_HAND_SCORE {
            return Bid::Pass;
        }
        let (tricks, trump) = if Self::should_bid_no_trump(hand) {
            (scoring_cards(hand) + 1, None)
        } else {
            let trump = Self::strongest_suit(hand);
            (hand.trump_cards(trump).len() + 1, Some(trump))
        };
        if tricks < MIN_TRICKS as usize {
            return Bid::Pass;
        }
        let tricks = tricks.min(MAX_TRICKS as usize) as u8;
        Bid::new(tricks, trump).unwrap_or(Bid::Pass)
    }
}

impl BiddingStrategy for AdvancedBidding {
    fn select_bid(&mut self, previous: &[Option<Bid>; PLAYERS], seat: Seat, hand: &Hand) -> Bid {
        let bid = Self::proposal(hand);
        trace!(%seat, %bid, "advanced bid");
        if bid > Bid::max_made(previous) {
            bid
        } else {
            Bid::Pass
        }
    }
}


#[cfg(test)]
fn hand(s: &str) -> Hand {
    Hand::from(s.parse::<CardList>().unwrap())
}

#[cfg(test)]
fn bid(s: &str) -> Bid {
    s.parse().unwrap()
}

#[test]
fn test_low_scoring_hand_passes() {
    let weak = hand("4S 5S 6C 7C 8D 9D 4H 5H AH 7S");
    assert_eq!(AdvancedBidding::proposal(&weak), Bid::Pass);
}

#[test]
fn test_long_trump_suit_sets_the_contract() {
    let spades = hand("HJ JS JC AS KS QS 9S 8S 4D 5H");
    assert_eq!(AdvancedBidding::strongest_suit(&spades), Suit::Spades);
    assert_eq!(AdvancedBidding::proposal(&spades), bid("9 SPADES"));
}

#[test]
fn test_balanced_honours_bid_no_trump() {
    let balanced = hand("HJ AS KS AC 6C AD QD AH 4H 5C");
    assert_eq!(AdvancedBidding::proposal(&balanced), bid("8 NO TRUMP"));
}

#[test]
fn test_short_trump_passes() {
    let short = hand("AS KS 4S AC KC 6C AD 7D 8H 9H");
    assert_eq!(AdvancedBidding::proposal(&short), Bid::Pass);
}

#[test]
fn test_does_not_bid_under_the_maximum() {
    let spades = hand("HJ JS JC AS KS QS 9S 8S 4D 5H");
    let previous = [Some(bid("10 NO TRUMP")), None, None, None];
    let mut strategy = AdvancedBidding::new();
    assert_eq!(strategy.select_bid(&previous, Seat::East, &spades), Bid::Pass);
    assert_eq!(strategy.select_bid(&[None; 4], Seat::East, &spades), bid("9 SPADES"));
}
