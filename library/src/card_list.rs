use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use crate::card::{Card, Suit};
use crate::error::ModelError;

/// An ordered sequence of distinct cards.
///
/// Insertion order is kept until the list is explicitly sorted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardList(Vec<Card>);

impl CardList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `card` unless it is already present.
    pub fn add(&mut self, card: Card) -> bool {
        if self.contains(card) {
            false
        } else {
            self.0.push(card);
            true
        }
    }

    pub fn remove(&mut self, card: Card) -> bool {
        match self.0.iter().position(|c| *c == card) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_all(&mut self, cards: &CardList) {
        self.0.retain(|c| !cards.contains(*c));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<Card> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Card> {
        self.0.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Card> + ExactSizeIterator + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }

    pub fn random<R>(&self, rng: &mut R) -> Option<Card>
    where
        R: Rng + ?Sized,
    {
        self.0.choose(rng).copied()
    }

    pub fn shuffle<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.0.shuffle(rng);
    }

    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Card, &Card) -> Ordering,
    {
        self.0.sort_by(compare);
    }

    /// A sorted copy, leaving `self` untouched.
    pub fn sorted_by<F>(&self, compare: F) -> CardList
    where
        F: FnMut(&Card, &Card) -> Ordering,
    {
        Self(self.0.iter().copied().sorted_by(compare).collect())
    }

    pub fn min_by<F>(&self, mut compare: F) -> Option<Card>
    where
        F: FnMut(&Card, &Card) -> Ordering,
    {
        self.0.iter().copied().min_by(|a, b| compare(a, b))
    }

    pub fn max_by<F>(&self, mut compare: F) -> Option<Card>
    where
        F: FnMut(&Card, &Card) -> Ordering,
    {
        self.0.iter().copied().max_by(|a, b| compare(a, b))
    }

    pub fn filter<P>(&self, mut predicate: P) -> CardList
    where
        P: FnMut(Card) -> bool,
    {
        self.iter().filter(|c| predicate(*c)).collect()
    }

    /// Non-joker cards whose effective suit under `trump` is `suit`.
    pub fn cards_of(&self, suit: Suit, trump: Option<Suit>) -> CardList {
        self.filter(|c| !c.is_joker() && c.effective_suit(trump) == Some(suit))
    }

    pub fn has_suit(&self, suit: Suit, trump: Option<Suit>) -> bool {
        self.iter()
            .any(|c| !c.is_joker() && c.effective_suit(trump) == Some(suit))
    }

    pub fn jokers(&self) -> CardList {
        self.filter(|c| c.is_joker())
    }

    pub fn non_jokers(&self) -> CardList {
        self.filter(|c| !c.is_joker())
    }

    pub fn has_joker(&self) -> bool {
        self.iter().any(|c| c.is_joker())
    }

    /// Union of both lists, `self` first, duplicates dropped.
    pub fn merge(&self, other: &CardList) -> CardList {
        let mut merged = self.clone();
        merged.extend(other.iter());
        merged
    }
}

impl FromIterator<Card> for CardList {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut list = CardList::new();
        list.extend(iter);
        list
    }
}

impl Extend<Card> for CardList {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        for card in iter {
            self.add(card);
        }
    }
}

impl IntoIterator for CardList {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CardList {
    type Item = Card;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Card>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl From<Vec<Card>> for CardList {
    fn from(cards: Vec<Card>) -> Self {
        cards.into_iter().collect()
    }
}

impl Display for CardList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromStr for CardList {
    type Err = ModelError;

    /// Whitespace separated cards, e.g. `"AS TD LJ"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().map(str::parse::<Card>).collect()
    }
}

#[cfg(test)]
use crate::card::{by_rank, Rank, HIGH_JOKER, LOW_JOKER};
#[cfg(test)]
use rand::rngs::StdRng;
#[cfg(test)]
use rand::SeedableRng;

#[cfg(test)]
fn list(s: &str) -> CardList {
    s.parse().unwrap()
}

#[test]
fn test_rejects_duplicates() {
    let mut cards = list("AS KS");
    assert!(!cards.add(Card::new(Rank::Ace, Suit::Spades)));
    assert!(cards.add(LOW_JOKER));
    assert_eq!(cards.len(), 3);
    assert_eq!(list("AS AS KS").len(), 2);
}

#[test]
fn test_remove_reports_membership() {
    let mut cards = list("AS KS LJ");
    assert!(cards.remove(LOW_JOKER));
    assert!(!cards.remove(LOW_JOKER));
    assert_eq!(cards, list("AS KS"));
}

#[test]
fn test_sorted_copy_keeps_original_order() {
    let cards = list("4H HJ TC");
    let sorted = cards.sorted_by(by_rank);
    assert_eq!(sorted, list("4H TC HJ"));
    assert_eq!(cards.first(), Some(Card::new(Rank::Four, Suit::Hearts)));
    assert_eq!(cards.last(), Some(Card::new(Rank::Ten, Suit::Clubs)));
}

#[test]
fn test_empty_list_has_no_ends() {
    let cards = CardList::new();
    assert_eq!(cards.first(), None);
    assert_eq!(cards.last(), None);
    assert_eq!(cards.random(&mut StdRng::seed_from_u64(1)), None);
}

#[test]
fn test_filtering_by_effective_suit() {
    let cards = list("JC JS 5S AD LJ HJ");
    assert_eq!(cards.cards_of(Suit::Spades, Some(Suit::Spades)), list("JC JS 5S"));
    assert_eq!(cards.cards_of(Suit::Clubs, Some(Suit::Spades)), CardList::new());
    assert_eq!(cards.cards_of(Suit::Clubs, None), list("JC"));
    assert!(!cards.has_suit(Suit::Hearts, Some(Suit::Diamonds)));
    assert!(cards.has_suit(Suit::Diamonds, Some(Suit::Hearts)));
    assert_eq!(cards.jokers(), list("LJ HJ"));
    assert_eq!(cards.non_jokers().len(), 4);
    assert!(cards.has_joker());
}

#[test]
fn test_merge_is_a_union() {
    let merged = list("AS KS").merge(&list("KS HJ"));
    assert_eq!(merged, list("AS KS HJ"));
    assert!(merged.contains(HIGH_JOKER));
}

#[test]
fn test_random_draws_a_member() {
    let cards = list("AS KS QS");
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let card = cards.random(&mut rng).unwrap();
        assert!(cards.contains(card));
    }
}

#[test]
fn test_display_round_trips_through_text() {
    assert_eq!(list("AS TD LJ").to_string(), "A♠ T♦ LJ");
    assert!("AS ZZ".parse::<CardList>().is_err());
}
