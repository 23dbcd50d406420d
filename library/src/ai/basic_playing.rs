use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{legal_cards, PlayingStrategy};
use crate::card::{by_rank, Card};
use crate::card_list::CardList;
use crate::hand::Hand;
use crate::trick::Trick;

/// Leads at random; follows by winning as cheaply as possible or else
/// throwing the lowest card.
pub struct BasicPlaying {
    rng: StdRng,
}

impl BasicPlaying {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn cheapest_winner(trick: &Trick, cards: &CardList) -> Option<Card> {
        cards
            .filter(|card| trick.would_win(card))
            .min_by(|a, b| a.cmp_by_suit(b, trick.trump()))
    }

    fn follow(trick: &Trick, playable: &CardList) -> Option<Card> {
        let trump = trick.trump();
        let winning = trick.highest()?;
        let lowest = || Hand::from(playable.clone()).select_lowest(trump);

        if winning.is_joker() || winning.is_trump(trump) {
            return Self::cheapest_winner(trick, playable).or_else(lowest);
        }

        let led = trick.suit_led().ok().flatten()?;
        let following = playable.cards_of(led, trump);
        if !following.is_empty() {
            return Self::cheapest_winner(trick, &following).or_else(|| following.min_by(by_rank));
        }
        playable
            .filter(|card| card.is_trump(trump))
            .min_by(|a, b| a.cmp_by_suit(b, trump))
            .or_else(lowest)
    }
}

impl PlayingStrategy for BasicPlaying {
    fn play(&mut self, trick: &Trick, hand: &Hand) -> Card {
        let legal = legal_cards(trick, hand);
        let choice = if trick.is_empty() {
            legal.random(&mut self.rng)
        } else {
            Self::follow(trick, &legal).or_else(|| legal.random(&mut self.rng))
        };
        choice.expect("a player with cards always has a legal play")
    }
}

#[cfg(test)]
use crate::bid::Bid;
#[cfg(test)]
use crate::card::card;
#[cfg(test)]
use crate::seat::Seat;

#[cfg(test)]
fn hand(s: &str) -> Hand {
    Hand::from(s.parse::<CardList>().unwrap())
}

#[cfg(test)]
fn trick(contract: &str, cards: &str) -> Trick {
    let mut trick = Trick::new(contract.parse::<Bid>().unwrap(), Seat::East).unwrap();
    for c in cards.split_whitespace() {
        trick.add(card(c));
    }
    trick
}

#[cfg(test)]
fn play(trick: &Trick, cards: &str) -> Card {
    BasicPlaying::new(0).play(trick, &hand(cards))
}

#[test]
fn test_leads_a_legal_card() {
    let empty = trick("6 NO TRUMP", "");
    let mut strategy = BasicPlaying::new(4);
    for _ in 0..20 {
        assert!(!strategy.play(&empty, &hand("LJ AS 4D")).is_joker());
    }
}

#[test]
fn test_wins_the_suit_led_cheaply() {
    let t = trick("7 HEARTS", "9S JS");
    assert_eq!(play(&t, "4S QS AS 4H"), card("QS"));
}

#[test]
fn test_throws_lowest_of_suit_when_it_cannot_win() {
    let t = trick("7 HEARTS", "9S AS");
    assert_eq!(play(&t, "KS 5S 4H"), card("5S"));
}

#[test]
fn test_trumps_when_void() {
    let t = trick("7 HEARTS", "9S AS");
    assert_eq!(play(&t, "KH 5H 4C JD"), card("5H"));
}

#[test]
fn test_overtrumps_cheaply() {
    let t = trick("7 HEARTS", "9S 6H");
    assert_eq!(play(&t, "4C AH 8H JD"), card("8H"));
}

#[test]
fn test_dumps_lowest_when_trump_cannot_be_beaten() {
    let t = trick("7 HEARTS", "9S HJ");
    assert_eq!(play(&t, "4C AH KD"), card("4C"));
}

#[test]
fn test_follows_a_trump_lead_with_trump() {
    let t = trick("7 HEARTS", "KH");
    assert_eq!(play(&t, "4C AH 5H LJ"), card("AH"));
    let t = trick("7 HEARTS", "JH");
    assert_eq!(play(&t, "4C AH 5H LJ"), card("LJ"));
    let t = trick("7 HEARTS", "HJ");
    assert_eq!(play(&t, "4C AH 5H"), card("5H"));
}
