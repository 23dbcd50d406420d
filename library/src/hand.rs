use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

use crate::card::{by_rank, Card, Suit};
use crate::card_list::CardList;

/// The cards held by one player.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand(CardList);

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &CardList {
        &self.0
    }

    pub fn into_cards(self) -> CardList {
        self.0
    }

    /// Cards that may open a trick. Jokers cannot lead in no-trump unless
    /// nothing else is left.
    pub fn can_lead(&self, no_trump: bool) -> CardList {
        if no_trump {
            let non_jokers = self.non_jokers();
            if non_jokers.is_empty() {
                self.jokers()
            } else {
                non_jokers
            }
        } else {
            self.0.clone()
        }
    }

    /// Jokers and every card whose effective suit is `trump`.
    pub fn trump_cards(&self, trump: Suit) -> CardList {
        self.filter(|c| c.is_joker() || c.effective_suit(Some(trump)) == Some(trump))
    }

    pub fn non_trump_cards(&self, trump: Suit) -> CardList {
        self.filter(|c| !c.is_joker() && c.effective_suit(Some(trump)) != Some(trump))
    }

    /// The cheapest card to throw away: the lowest non-trump by rank, or the
    /// lowest trump when only trump is held.
    pub fn select_lowest(&self, trump: Option<Suit>) -> Option<Card> {
        match trump {
            Some(trump) => {
                let non_trump = self.non_trump_cards(trump);
                if non_trump.is_empty() {
                    self.min_by(|a, b| a.cmp_by_suit(b, Some(trump)))
                } else {
                    non_trump.min_by(by_rank)
                }
            }
            None => self.min_by(by_rank),
        }
    }

    /// Cards that may legally follow `led`. A player void in the suit led may
    /// play anything.
    pub fn playable_cards(&self, led: Option<Suit>, trump: Option<Suit>) -> CardList {
        let mut playable = self.filter(|c| !c.is_joker() && c.effective_suit(trump) == led);
        if trump.is_some() && led == trump {
            playable.extend(self.jokers());
        }
        if playable.is_empty() {
            self.0.clone()
        } else {
            playable
        }
    }

    /// Non-joker cards of effective suit `suit`.
    pub fn number_of_cards(&self, suit: Suit, trump: Option<Suit>) -> usize {
        self.iter()
            .filter(|c| !c.is_joker() && c.effective_suit(trump) == Some(suit))
            .count()
    }
}

impl Deref for Hand {
    type Target = CardList;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Hand {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<CardList> for Hand {
    fn from(cards: CardList) -> Self {
        Self(cards)
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
use crate::card::card;

#[cfg(test)]
fn hand(s: &str) -> Hand {
    Hand::from(s.parse::<CardList>().unwrap())
}

#[cfg(test)]
fn list(s: &str) -> CardList {
    s.parse().unwrap()
}

#[test]
fn test_jokers_lead_in_no_trump_only_when_alone() {
    assert_eq!(hand("LJ 5S HJ").can_lead(true), list("5S"));
    assert_eq!(hand("LJ HJ").can_lead(true), list("LJ HJ"));
    assert_eq!(hand("LJ 5S").can_lead(false), list("LJ 5S"));
}

#[test]
fn test_trump_cards_include_left_bower_and_jokers() {
    let cards = hand("JS JC AC 4H LJ");
    assert_eq!(cards.trump_cards(Suit::Clubs), list("JS JC AC LJ"));
    assert_eq!(cards.non_trump_cards(Suit::Clubs), list("4H"));
    assert_eq!(cards.number_of_cards(Suit::Clubs, Some(Suit::Clubs)), 3);
    assert_eq!(cards.number_of_cards(Suit::Spades, None), 1);
}

#[test]
fn test_select_lowest_prefers_non_trump() {
    assert_eq!(hand("4D AH KS").select_lowest(Some(Suit::Diamonds)), Some(card("KS")));
    assert_eq!(hand("4D AH KS").select_lowest(None), Some(card("4D")));
    assert_eq!(hand("JH 5D HJ").select_lowest(Some(Suit::Diamonds)), Some(card("5D")));
    assert_eq!(hand("JH JD LJ").select_lowest(Some(Suit::Diamonds)), Some(card("JH")));
    assert_eq!(Hand::new().select_lowest(None), None);
}

#[test]
fn test_follows_the_effective_suit_led() {
    let cards = hand("JD 5H AS LJ");
    assert_eq!(cards.playable_cards(Some(Suit::Hearts), Some(Suit::Hearts)), list("JD 5H LJ"));
    assert_eq!(cards.playable_cards(Some(Suit::Diamonds), Some(Suit::Hearts)), list("JD 5H AS LJ"));
    assert_eq!(cards.playable_cards(Some(Suit::Diamonds), None), list("JD"));
    assert_eq!(cards.playable_cards(Some(Suit::Spades), Some(Suit::Hearts)), list("AS"));
}

#[test]
fn test_void_hand_may_play_anything() {
    let cards = hand("AS KS 4C");
    assert_eq!(cards.playable_cards(Some(Suit::Hearts), Some(Suit::Diamonds)), list("AS KS 4C"));
    assert_eq!(cards.playable_cards(None, None), list("AS KS 4C"));
}

#[test]
fn test_jokers_alone_follow_a_trump_lead() {
    let cards = hand("HJ AS");
    assert_eq!(cards.playable_cards(Some(Suit::Clubs), Some(Suit::Clubs)), list("HJ"));
}
