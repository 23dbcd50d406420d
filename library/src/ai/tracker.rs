use bitvec::prelude::*;
use tracing::trace;

use crate::card::{Card, Joker, Suit, HIGH_JOKER};
use crate::card_list::CardList;
use crate::deck::full_deck;
use crate::hand::Hand;
use crate::seat::Seat;
use crate::trick::Trick;

/// What one player has learned about the others during a round: which
/// suits each seat may still hold, and which cards have not been seen.
#[derive(Debug, Clone)]
pub struct CardTracker {
    // seat * 4 + suit, set while the seat may still hold the suit
    may_hold: BitArr!(for 16, in u16, Lsb0),
    unseen: CardList,
    own_hand_removed: bool,
    plays_seen: usize,
}

impl Default for CardTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CardTracker {
    pub fn new() -> Self {
        Self {
            may_hold: bitarr![u16, Lsb0; 1; 16],
            unseen: full_deck(),
            own_hand_removed: false,
            plays_seen: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Drops the owner's own cards from the unseen pool, once per round.
    pub fn forget_own_hand(&mut self, hand: &Hand) {
        if !self.own_hand_removed {
            self.unseen.remove_all(hand);
            self.own_hand_removed = true;
        }
    }

    pub fn unseen(&self) -> &CardList {
        &self.unseen
    }

    pub fn has_history(&self) -> bool {
        self.plays_seen > 0
    }

    pub fn may_hold(&self, seat: Seat, suit: Suit) -> bool {
        self.may_hold[seat.index() * 4 + suit.index()]
    }

    fn mark_void(&mut self, seat: Seat, suit: Suit) {
        if self.may_hold(seat, suit) {
            trace!(%seat, ?suit, "void");
        }
        self.may_hold.set(seat.index() * 4 + suit.index(), false);
    }

    /// Records `card` played by `seat` onto `trick_before`. A player who does
    /// not follow the suit led is void in it for the rest of the round.
    pub fn observe(&mut self, trick_before: &Trick, seat: Seat, card: Card) {
        self.unseen.remove(card);
        self.plays_seen += 1;
        if let Ok(Some(led)) = trick_before.suit_led() {
            if card.effective_suit(trick_before.trump()) != Some(led) {
                self.mark_void(seat, led);
            }
        }
    }

    /// Whether someone still to play after `seat` could beat `card`. `led` is
    /// the suit led, or the card's own suit when it is the lead.
    pub fn can_be_beaten(
        &self,
        card: Card,
        seat: Seat,
        leader: Seat,
        trump: Option<Suit>,
        led: Option<Suit>,
    ) -> bool {
        if seat.next() == leader {
            return false;
        }
        match card.joker_value() {
            Some(Joker::High) => return false,
            Some(Joker::Low) => return self.unseen.contains(HIGH_JOKER),
            None => {}
        }
        let later: Vec<Seat> = (1..4)
            .map(|steps| seat.offset(steps))
            .take_while(|later| *later != leader)
            .collect();
        let outranks = |other: &Card| other.cmp_by_suit(&card, trump).is_gt();

        match trump {
            Some(trump) => {
                let higher_trump = self
                    .unseen
                    .iter()
                    .filter(|c| c.is_joker() || c.is_trump(Some(trump)))
                    .any(|c| outranks(&c));
                if higher_trump && later.iter().any(|s| self.may_hold(*s, trump)) {
                    return true;
                }
            }
            None => {
                if self.unseen.has_joker() {
                    return true;
                }
            }
        }

        match led {
            Some(led) if card.effective_suit(trump) == Some(led) => {
                let higher = self.unseen.cards_of(led, trump).iter().any(|c| outranks(&c));
                higher && later.iter().any(|s| self.may_hold(*s, led))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
use crate::bid::Bid;
#[cfg(test)]
use crate::card::card;
#[cfg(test)]
use crate::card::LOW_JOKER;

#[cfg(test)]
fn trick(contract: &str, leader: Seat, cards: &str) -> Trick {
    let mut trick = Trick::new(contract.parse::<Bid>().unwrap(), leader).unwrap();
    for c in cards.split_whitespace() {
        trick.add(card(c));
    }
    trick
}

#[test]
fn test_failing_to_follow_marks_a_void() {
    let mut tracker = CardTracker::new();
    let before = trick("7 HEARTS", Seat::North, "AS");
    tracker.observe(&before, Seat::East, card("4C"));
    assert!(!tracker.may_hold(Seat::East, Suit::Spades));
    assert!(tracker.may_hold(Seat::East, Suit::Clubs));
    assert!(tracker.may_hold(Seat::South, Suit::Spades));
    assert!(!tracker.unseen().contains(card("4C")));
    assert!(tracker.has_history());
}

#[test]
fn test_jokers_and_left_bower_follow_trump() {
    let mut tracker = CardTracker::new();
    let before = trick("7 HEARTS", Seat::North, "KH");
    tracker.observe(&before, Seat::East, card("LJ"));
    tracker.observe(&before, Seat::South, card("JD"));
    assert!(tracker.may_hold(Seat::East, Suit::Hearts));
    assert!(tracker.may_hold(Seat::South, Suit::Hearts));
}

#[test]
fn test_leading_says_nothing_about_voids() {
    let mut tracker = CardTracker::new();
    let empty = trick("6 NO TRUMP", Seat::West, "");
    tracker.observe(&empty, Seat::West, card("AD"));
    for suit in enum_iterator::all::<Suit>() {
        assert!(tracker.may_hold(Seat::West, suit));
    }
}

#[test]
fn test_last_card_cannot_be_beaten() {
    let tracker = CardTracker::new();
    assert!(!tracker.can_be_beaten(card("4S"), Seat::West, Seat::North, None, Some(Suit::Spades)));
}

#[test]
fn test_low_joker_is_safe_once_high_joker_is_gone() {
    let mut tracker = CardTracker::new();
    assert!(tracker.can_be_beaten(LOW_JOKER, Seat::North, Seat::North, Some(Suit::Clubs), Some(Suit::Clubs)));
    tracker.observe(&trick("6 CLUBS", Seat::North, ""), Seat::North, HIGH_JOKER);
    assert!(!tracker.can_be_beaten(LOW_JOKER, Seat::North, Seat::North, Some(Suit::Clubs), Some(Suit::Clubs)));
    assert!(!tracker.can_be_beaten(HIGH_JOKER, Seat::East, Seat::North, None, None));
}

#[test]
fn test_void_players_cannot_overtake() {
    let mut tracker = CardTracker::new();
    let hand = Hand::from("KS QS".parse::<CardList>().unwrap());
    tracker.forget_own_hand(&hand);
    // The other three seats have shown out of spades and of trump.
    for seat in [Seat::East, Seat::South, Seat::West] {
        tracker.observe(&trick("6 HEARTS", Seat::North, "4S"), seat, card("4D"));
        tracker.observe(&trick("6 HEARTS", Seat::North, "5H"), seat, card("5D"));
    }
    assert!(!tracker.can_be_beaten(card("KS"), Seat::North, Seat::North, Some(Suit::Hearts), Some(Suit::Spades)));

    let fresh = {
        let mut fresh = CardTracker::new();
        fresh.forget_own_hand(&hand);
        fresh
    };
    assert!(fresh.can_be_beaten(card("KS"), Seat::North, Seat::North, Some(Suit::Hearts), Some(Suit::Spades)));
}

#[test]
fn test_unseen_jokers_beat_everything_in_no_trump() {
    let tracker = CardTracker::new();
    assert!(tracker.can_be_beaten(card("AS"), Seat::North, Seat::North, None, Some(Suit::Spades)));
}

#[test]
fn test_reset_forgets_the_round() {
    let mut tracker = CardTracker::new();
    tracker.observe(&trick("7 HEARTS", Seat::North, "AS"), Seat::East, card("4C"));
    tracker.reset();
    assert!(tracker.may_hold(Seat::East, Suit::Spades));
    assert_eq!(tracker.unseen().len(), 46);
    assert!(!tracker.has_history());
}
