use rand::Rng;

use crate::card::Card;
use crate::card_list::CardList;
use crate::seat::Seat;
use crate::{HAND_SIZE, PLAYERS, WIDOW_SIZE};

pub const DECK_SIZE: usize = PLAYERS * HAND_SIZE + WIDOW_SIZE;

/// The 46-card deck in a fixed order.
pub fn full_deck() -> CardList {
    Card::all().collect()
}

pub fn shuffled<R>(rng: &mut R) -> CardList
where
    R: Rng + ?Sized,
{
    let mut deck = full_deck();
    deck.shuffle(rng);
    deck
}

/// Deals one card at a time starting with `first`, ten cards each; the
/// remaining six form the widow. Hands are indexed by seat.
pub fn dealt(deck: CardList, first: Seat) -> ([CardList; PLAYERS], CardList) {
    assert_eq!(deck.len(), DECK_SIZE, "dealing from an incomplete deck");
    let mut hands: [CardList; PLAYERS] = Default::default();
    let mut cards = deck.into_iter();
    let mut seat = first;
    for card in cards.by_ref().take(PLAYERS * HAND_SIZE) {
        hands[seat.index()].add(card);
        seat = seat.next();
    }
    (hands, cards.collect())
}

#[cfg(test)]
use enum_iterator::all;
#[cfg(test)]
use proptest::prelude::*;
#[cfg(test)]
use rand::rngs::StdRng;
#[cfg(test)]
use rand::SeedableRng;

#[test]
fn test_full_deck_has_forty_six_cards() {
    let deck = full_deck();
    assert_eq!(deck.len(), DECK_SIZE);
    assert_eq!(deck.jokers().len(), 2);
}

#[test]
fn test_first_card_goes_to_first_seat() {
    let deck = full_deck();
    let (hands, _) = dealt(deck.clone(), Seat::South);
    assert_eq!(hands[Seat::South.index()].first(), deck.first());
    assert_eq!(hands[Seat::West.index()].first(), deck.get(1));
}

#[cfg(test)]
proptest! {
    #[test]
    fn test_deal_partitions_the_deck(seed in any::<u64>(), first in 0usize..4) {
        let first = Seat::try_from(first).unwrap();
        let (hands, widow) = dealt(shuffled(&mut StdRng::seed_from_u64(seed)), first);
        prop_assert_eq!(widow.len(), WIDOW_SIZE);
        let mut seen = widow.clone();
        for seat in all::<Seat>() {
            prop_assert_eq!(hands[seat.index()].len(), HAND_SIZE);
            for card in hands[seat.index()].iter() {
                prop_assert!(seen.add(card), "{} dealt twice", card);
            }
        }
        prop_assert_eq!(seen.len(), DECK_SIZE);
    }
}
