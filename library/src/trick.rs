use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::bid::{Bid, Contract};
use crate::card::{trick_order, Card, Suit};
use crate::card_list::CardList;
use crate::error::ModelError;
use crate::seat::Seat;
use crate::PLAYERS;

/// Cards played to one trick, in play order, under the round's contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    contract: Contract,
    leader: Seat,
    cards: CardList,
}

impl Trick {
    pub fn new(bid: Bid, leader: Seat) -> Result<Self, ModelError> {
        let contract = bid.contract().map_err(|_| ModelError::PassContract)?;
        Ok(Self::with_contract(contract, leader))
    }

    pub fn with_contract(contract: Contract, leader: Seat) -> Self {
        Self {
            contract,
            leader,
            cards: CardList::new(),
        }
    }

    pub fn contract(&self) -> Contract {
        self.contract
    }

    pub fn trump(&self) -> Option<Suit> {
        self.contract.trump()
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn cards(&self) -> &CardList {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == PLAYERS
    }

    pub fn add(&mut self, card: Card) -> bool {
        assert!(!self.is_complete(), "a trick holds at most four cards");
        self.cards.add(card)
    }

    /// Effective suit of the first card. `Ok(None)` when a joker was led in
    /// no-trump.
    pub fn suit_led(&self) -> Result<Option<Suit>, ModelError> {
        self.card_led()
            .map(|card| card.effective_suit(self.trump()))
            .ok_or(ModelError::EmptyTrick)
    }

    pub fn joker_led(&self) -> Result<bool, ModelError> {
        self.card_led()
            .map(|card| card.is_joker())
            .ok_or(ModelError::EmptyTrick)
    }

    pub fn card_led(&self) -> Option<Card> {
        self.cards.first()
    }

    pub fn seat_of(&self, index: usize) -> Seat {
        self.leader.offset(index)
    }

    /// The seat due to play next.
    pub fn next_seat(&self) -> Seat {
        self.leader.offset(self.cards.len())
    }

    /// The card currently taking the trick: the best joker, trump or card of
    /// the suit led.
    pub fn highest(&self) -> Option<Card> {
        let trump = self.trump();
        let led = self.card_led()?.effective_suit(trump);
        self.cards
            .iter()
            .filter(|card| {
                card.is_joker()
                    || card.is_trump(trump)
                    || (led.is_some() && card.effective_suit(trump) == led)
            })
            .max_by(trick_order(trump))
    }

    pub fn winner_index(&self) -> Option<usize> {
        let highest = self.highest()?;
        self.cards.iter().position(|card| card == highest)
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner_index().map(|index| self.seat_of(index))
    }

    /// Whether `card` would be taking the trick if it were played now.
    pub fn would_win(&self, card: Card) -> bool {
        let mut trick = self.clone();
        trick.cards.add(card);
        trick.highest() == Some(card)
    }
}

impl Display for Trick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} led by {}: {}", self.contract, self.leader, self.cards)
    }
}

#[cfg(test)]
use crate::card::card;

#[cfg(test)]
fn trick(trump: Option<Suit>, cards: &str) -> Trick {
    let mut trick = Trick::new(Bid::new(7, trump).unwrap(), Seat::North).unwrap();
    for card in cards.split_whitespace() {
        trick.add(card.parse().unwrap());
    }
    trick
}

#[test]
fn test_passing_contract_is_rejected() {
    assert_eq!(Trick::new(Bid::Pass, Seat::East), Err(ModelError::PassContract));
}

#[test]
fn test_empty_trick_has_no_lead() {
    let empty = trick(Some(Suit::Hearts), "");
    assert_eq!(empty.suit_led(), Err(ModelError::EmptyTrick));
    assert_eq!(empty.joker_led(), Err(ModelError::EmptyTrick));
    assert_eq!(empty.highest(), None);
    assert_eq!(empty.winner(), None);
    assert_eq!(empty.next_seat(), Seat::North);
}

#[test]
fn test_suit_led_is_effective() {
    assert_eq!(trick(Some(Suit::Spades), "JC").suit_led(), Ok(Some(Suit::Spades)));
    assert_eq!(trick(Some(Suit::Spades), "LJ").suit_led(), Ok(Some(Suit::Spades)));
    assert_eq!(trick(None, "LJ").suit_led(), Ok(None));
    assert_eq!(trick(None, "JC").suit_led(), Ok(Some(Suit::Clubs)));
    assert_eq!(trick(None, "LJ").joker_led(), Ok(true));
}

#[test]
fn test_highest_of_suit_led_wins_without_trump() {
    let t = trick(Some(Suit::Hearts), "TC AS QC 4D");
    assert_eq!(t.highest(), Some(card("QC")));
    assert_eq!(t.winner_index(), Some(2));
    assert_eq!(t.winner(), Some(Seat::South));
}

#[test]
fn test_trump_beats_the_suit_led() {
    let t = trick(Some(Suit::Hearts), "AC 4H KC");
    assert_eq!(t.highest(), Some(card("4H")));
    let t = trick(Some(Suit::Hearts), "AH JD KH");
    assert_eq!(t.highest(), Some(card("JD")));
    let t = trick(Some(Suit::Hearts), "JD LJ JH");
    assert_eq!(t.highest(), Some(card("LJ")));
}

#[test]
fn test_jokers_win_in_no_trump() {
    let t = trick(None, "AS LJ KS");
    assert_eq!(t.highest(), Some(card("LJ")));
    let t = trick(None, "LJ AS HJ");
    assert_eq!(t.winner_index(), Some(2));
    let t = trick(None, "LJ AS KH");
    assert_eq!(t.winner_index(), Some(0));
}

#[test]
fn test_would_win_compares_against_current_winner() {
    let t = trick(Some(Suit::Diamonds), "QS KS");
    assert!(t.would_win(card("AS")));
    assert!(!t.would_win(card("JS")));
    assert!(t.would_win(card("4D")));
    assert!(!t.would_win(card("AH")));
    assert_eq!(t.next_seat(), Seat::South);
    assert_eq!(t.seat_of(3), Seat::West);
}
