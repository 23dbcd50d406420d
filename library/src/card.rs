use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::ModelError;

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Sequence, Serialize, Deserialize, Hash,
)]
pub enum Rank {
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    fn symbol(self) -> char {
        match self {
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        all::<Rank>().find(|rank| rank.symbol() == symbol)
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Suits in bid order: the discriminant is the suit's rank in the bid table.
#[derive(
    Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Sequence, Serialize, Deserialize, Hash,
)]
pub enum Suit {
    Spades,
    Clubs,
    Diamonds,
    Hearts,
}

impl Suit {
    /// The other suit of the same colour.
    pub fn converse(self) -> Suit {
        match self {
            Suit::Spades => Suit::Clubs,
            Suit::Clubs => Suit::Spades,
            Suit::Diamonds => Suit::Hearts,
            Suit::Hearts => Suit::Diamonds,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "SPADES",
            Suit::Clubs => "CLUBS",
            Suit::Diamonds => "DIAMONDS",
            Suit::Hearts => "HEARTS",
        }
    }

    fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        all::<Suit>().find(|suit| suit.letter() == letter)
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Spades => "♠",
                Suit::Clubs => "♣",
                Suit::Diamonds => "♦",
                Suit::Hearts => "♥",
            }
        )
    }
}

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Sequence, Serialize, Deserialize, Hash,
)]
pub enum Joker {
    Low,
    High,
}

/// A card of the 46-card deck.
///
/// The derived `Ord` is the rank-only order: jokers above every ranked card
/// (low below high), ranked cards by rank and then by suit.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize, Hash)]
pub enum Card {
    Suited(Rank, Suit),
    Joker(Joker),
}

pub const LOW_JOKER: Card = Card::Joker(Joker::Low);
pub const HIGH_JOKER: Card = Card::Joker(Joker::High);

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card::Suited(rank, suit)
    }

    /// Every card of the deck, suit by suit, jokers last.
    pub fn all() -> impl Iterator<Item = Card> {
        all::<Suit>()
            .flat_map(|suit| all::<Rank>().map(move |rank| Card::Suited(rank, suit)))
            .chain(all::<Joker>().map(Card::Joker))
    }

    pub fn is_joker(&self) -> bool {
        matches!(self, Card::Joker(_))
    }

    pub fn joker_value(&self) -> Option<Joker> {
        match self {
            Card::Joker(joker) => Some(*joker),
            Card::Suited(..) => None,
        }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self {
            Card::Suited(rank, _) => Some(*rank),
            Card::Joker(_) => None,
        }
    }

    /// The printed suit, ignoring any trump.
    pub fn suit(&self) -> Option<Suit> {
        match self {
            Card::Suited(_, suit) => Some(*suit),
            Card::Joker(_) => None,
        }
    }

    /// The suit this card belongs to when `trump` is the trump suit.
    ///
    /// Jokers take the trump suit (none in no-trump), and the jack of the
    /// converse suit becomes a trump.
    pub fn effective_suit(&self, trump: Option<Suit>) -> Option<Suit> {
        match (*self, trump) {
            (Card::Joker(_), trump) => trump,
            (Card::Suited(Rank::Jack, suit), Some(trump)) if suit == trump.converse() => Some(trump),
            (Card::Suited(_, suit), _) => Some(suit),
        }
    }

    pub fn is_trump(&self, trump: Option<Suit>) -> bool {
        trump.is_some() && self.effective_suit(trump) == trump
    }

    // (tier, suit, rank): off-trump suits, trump suit, bowers, jokers.
    fn suit_order_key(&self, trump: Option<Suit>) -> (u8, u8, u8) {
        match (*self, trump) {
            (Card::Joker(joker), _) => (3, 0, joker as u8),
            (Card::Suited(Rank::Jack, suit), Some(trump)) if suit == trump => (2, 1, 0),
            (Card::Suited(Rank::Jack, suit), Some(trump)) if suit == trump.converse() => (2, 0, 0),
            (Card::Suited(rank, suit), Some(trump)) if suit == trump => (1, 0, rank as u8),
            (Card::Suited(rank, suit), _) => (0, suit as u8, rank as u8),
        }
    }

    /// Suit-major order: `None` for no-trump, otherwise the trump suit ranks
    /// above the others with both bowers on top of it.
    pub fn cmp_by_suit(&self, other: &Card, trump: Option<Suit>) -> Ordering {
        self.suit_order_key(trump).cmp(&other.suit_order_key(trump))
    }
}

pub fn by_rank(a: &Card, b: &Card) -> Ordering {
    a.cmp(b)
}

pub fn by_suit_no_trump(a: &Card, b: &Card) -> Ordering {
    a.cmp_by_suit(b, None)
}

pub fn by_suit(trump: Suit) -> impl Fn(&Card, &Card) -> Ordering + Copy {
    move |a, b| a.cmp_by_suit(b, Some(trump))
}

/// The order used to decide tricks under a contract's trump.
pub fn trick_order(trump: Option<Suit>) -> impl Fn(&Card, &Card) -> Ordering + Copy {
    move |a, b| a.cmp_by_suit(b, trump)
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Suited(rank, suit) => write!(f, "{rank}{suit}"),
            Card::Joker(Joker::Low) => write!(f, "LJ"),
            Card::Joker(Joker::High) => write!(f, "HJ"),
        }
    }
}

impl FromStr for Card {
    type Err = ModelError;

    /// Parses the two-letter form: `AS`, `TD`, `4H`, `LJ`, `HJ`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ModelError::ParseCard(s.to_string());
        let mut chars = s.trim().chars();
        let (first, second) = match (chars.next(), chars.next(), chars.next()) {
            (Some(first), Some(second), None) => (first, second),
            _ => return Err(err()),
        };
        match (first, second) {
            ('L', 'J') => Ok(LOW_JOKER),
            ('H', 'J') => Ok(HIGH_JOKER),
            (rank, suit) => Ok(Card::Suited(
                Rank::from_symbol(rank).ok_or_else(err)?,
                Suit::from_letter(suit).ok_or_else(err)?,
            )),
        }
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
pub(crate) fn card(s: &str) -> Card {
    s.parse().unwrap()
}

#[cfg(test)]
pub(crate) fn any_card() -> impl Strategy<Value = Card> {
    prop::sample::select(Card::all().collect::<Vec<_>>())
}

#[cfg(test)]
pub(crate) fn any_trump() -> impl Strategy<Value = Option<Suit>> {
    prop::sample::select(vec![
        None,
        Some(Suit::Spades),
        Some(Suit::Clubs),
        Some(Suit::Diamonds),
        Some(Suit::Hearts),
    ])
}

#[test]
fn test_deck_has_forty_six_distinct_cards() {
    let mut cards: Vec<_> = Card::all().collect();
    cards.sort();
    cards.dedup();
    assert_eq!(cards.len(), 46);
}

#[test]
fn test_left_bower_and_jokers_take_the_trump_suit() {
    assert_eq!(card("JC").effective_suit(Some(Suit::Spades)), Some(Suit::Spades));
    assert_eq!(card("JS").effective_suit(Some(Suit::Clubs)), Some(Suit::Clubs));
    assert_eq!(card("JD").effective_suit(Some(Suit::Hearts)), Some(Suit::Hearts));
    assert_eq!(card("JH").effective_suit(Some(Suit::Spades)), Some(Suit::Hearts));
    assert_eq!(card("QC").effective_suit(Some(Suit::Spades)), Some(Suit::Clubs));
    assert_eq!(card("JC").effective_suit(None), Some(Suit::Clubs));
    assert_eq!(LOW_JOKER.effective_suit(Some(Suit::Diamonds)), Some(Suit::Diamonds));
    assert_eq!(HIGH_JOKER.effective_suit(None), None);
}

#[test]
fn test_rank_order_puts_jokers_on_top() {
    assert!(by_rank(&HIGH_JOKER, &LOW_JOKER).is_gt());
    assert!(by_rank(&LOW_JOKER, &card("AH")).is_gt());
    assert!(by_rank(&card("AS"), &card("KH")).is_gt());
    assert!(by_rank(&card("5H"), &card("5S")).is_gt());
    assert!(by_rank(&card("4C"), &card("TS")).is_lt());
}

#[test]
fn test_no_trump_order_is_suit_major() {
    assert!(by_suit_no_trump(&card("4H"), &card("AD")).is_gt());
    assert!(by_suit_no_trump(&card("KC"), &card("QC")).is_gt());
    assert!(by_suit_no_trump(&LOW_JOKER, &card("AH")).is_gt());
    assert!(by_suit_no_trump(&HIGH_JOKER, &LOW_JOKER).is_gt());
}

#[test]
fn test_trump_order_ranks_bowers_below_jokers() {
    let trump = Suit::Diamonds;
    let ladder = ["LJ", "JD", "JH", "AD", "KD", "4D", "AH", "4H"];
    let order = by_suit(trump);
    assert!(order(&HIGH_JOKER, &card("LJ")).is_gt());
    for pair in ladder.windows(2) {
        assert!(
            order(&card(pair[0]), &card(pair[1])).is_gt(),
            "{} should outrank {}",
            pair[0],
            pair[1]
        );
    }
    assert!(order(&card("4D"), &card("AS")).is_gt());
    assert!(order(&card("AC"), &card("AS")).is_gt());
}

#[test]
fn test_parse_and_display() {
    for card in Card::all() {
        let text = match card {
            Card::Suited(rank, suit) => format!("{}{}", rank.symbol(), suit.letter()),
            Card::Joker(Joker::Low) => "LJ".to_string(),
            Card::Joker(Joker::High) => "HJ".to_string(),
        };
        assert_eq!(text.parse::<Card>().unwrap(), card);
    }
    assert_eq!(card("TH").to_string(), "T♥");
    assert_eq!(HIGH_JOKER.to_string(), "HJ");
    assert!("1S".parse::<Card>().is_err());
    assert!("ASX".parse::<Card>().is_err());
    assert!("AX".parse::<Card>().is_err());
}

#[cfg(test)]
proptest! {
    #[test]
    fn test_suit_order_is_a_strict_total_order(a in any_card(), b in any_card(), trump in any_trump()) {
        let forward = a.cmp_by_suit(&b, trump);
        prop_assert_eq!(forward, b.cmp_by_suit(&a, trump).reverse());
        prop_assert_eq!(forward == Ordering::Equal, a == b);
    }

    #[test]
    fn test_trump_cards_outrank_everything_but_trump(a in any_card(), b in any_card(), trump in any_trump()) {
        if a.is_trump(trump) && !b.is_trump(trump) && !b.is_joker() {
            prop_assert!(a.cmp_by_suit(&b, trump).is_gt());
        }
    }
}
