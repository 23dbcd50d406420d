use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use super::{legal_cards, BiddingStrategy, CardExchangeStrategy, PlayingStrategy};
use crate::bid::{Bid, MAX_INDEX};
use crate::card::Card;
use crate::card_list::CardList;
use crate::hand::Hand;
use crate::seat::Seat;
use crate::trick::Trick;
use crate::{PLAYERS, WIDOW_SIZE};

/// Passes with a fixed probability, otherwise raises to a uniformly chosen
/// higher bid.
pub struct RandomBidding {
    rng: StdRng,
    pass_probability: f64,
}

impl RandomBidding {
    pub fn new(pass_probability: f64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pass_probability,
        }
    }
}

impl BiddingStrategy for RandomBidding {
    fn select_bid(&mut self, previous: &[Option<Bid>; PLAYERS], _seat: Seat, _hand: &Hand) -> Bid {
        if self.rng.gen_bool(self.pass_probability) {
            return Bid::Pass;
        }
        let lowest = match Bid::max_made(previous) {
            Bid::Pass => 0,
            Bid::Contract(max) if max.index() == MAX_INDEX => return Bid::Pass,
            Bid::Contract(max) => max.index() + 1,
        };
        Bid::from_index(self.rng.gen_range(lowest..=MAX_INDEX)).unwrap_or(Bid::Pass)
    }
}

pub struct RandomExchange {
    rng: StdRng,
}

impl RandomExchange {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl CardExchangeStrategy for RandomExchange {
    fn select_cards_to_discard(
        &mut self,
        _bids: &[Bid; PLAYERS],
        _holder: Seat,
        hand: &Hand,
    ) -> CardList {
        hand.iter().choose_multiple(&mut self.rng, WIDOW_SIZE).into()
    }
}

pub struct RandomPlaying {
    rng: StdRng,
}

impl RandomPlaying {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PlayingStrategy for RandomPlaying {
    fn play(&mut self, trick: &Trick, hand: &Hand) -> Card {
        legal_cards(trick, hand)
            .random(&mut self.rng)
            .expect("a player with cards always has a legal play")
    }
}

#[cfg(test)]
use crate::card::card;
#[cfg(test)]
use crate::card::Suit;

#[cfg(test)]
fn hand(s: &str) -> Hand {
    Hand::from(s.parse::<CardList>().unwrap())
}

#[test]
fn test_always_passes_at_probability_one() {
    let mut strategy = RandomBidding::new(1.0, 3);
    for _ in 0..50 {
        assert_eq!(strategy.select_bid(&[None; 4], Seat::North, &Hand::new()), Bid::Pass);
    }
}

#[test]
fn test_raises_above_the_current_maximum() {
    let mut strategy = RandomBidding::new(0.0, 11);
    let eight_clubs = Bid::new(8, Some(Suit::Clubs)).unwrap();
    let previous = [Some(eight_clubs), Some(Bid::Pass), None, None];
    for _ in 0..100 {
        let bid = strategy.select_bid(&previous, Seat::South, &Hand::new());
        assert!(bid > eight_clubs, "{bid} does not beat {eight_clubs}");
    }
}

#[test]
fn test_passes_over_ten_no_trump() {
    let mut strategy = RandomBidding::new(0.0, 5);
    let previous = [Some(Bid::new(10, None).unwrap()), None, None, None];
    assert_eq!(strategy.select_bid(&previous, Seat::East, &Hand::new()), Bid::Pass);
}

#[test]
fn test_discards_six_cards_of_the_hand() {
    let cards = hand("4S 5S 6S 7S 8S 9S TS JS QS KS AS 4C 5C 6C 7C 8C");
    let mut strategy = RandomExchange::new(9);
    let discards = strategy.select_cards_to_discard(&[Bid::Pass; 4], Seat::West, &cards);
    assert_eq!(discards.len(), 6);
    assert!(discards.iter().all(|card| cards.contains(card)));
}

#[test]
fn test_plays_a_legal_card() {
    let cards = hand("LJ 4C AH 9H");
    let mut trick = Trick::new(Bid::new(6, None).unwrap(), Seat::North).unwrap();
    let mut strategy = RandomPlaying::new(1);
    for _ in 0..20 {
        assert_ne!(strategy.play(&trick, &cards), card("LJ"));
    }
    trick.add(card("KH"));
    for _ in 0..20 {
        assert_eq!(strategy.play(&trick, &cards).suit(), Some(Suit::Hearts));
    }
}
