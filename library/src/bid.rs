use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use crate::card::Suit;
use crate::error::ModelError;

pub const MIN_TRICKS: u8 = 6;
pub const MAX_TRICKS: u8 = 10;
/// Highest bid index: ten no-trump.
pub const MAX_INDEX: u8 = 24;

const TRUMPS: [Option<Suit>; 5] = [
    Some(Suit::Spades),
    Some(Suit::Clubs),
    Some(Suit::Diamonds),
    Some(Suit::Hearts),
    None,
];

fn suit_rank(trump: Option<Suit>) -> u8 {
    trump.map_or(4, |suit| suit as u8)
}

/// A non-passing bid: a number of tricks and a trump suit, `None` for
/// no-trump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawContract")]
pub struct Contract {
    tricks: u8,
    trump: Option<Suit>,
}

#[derive(Deserialize)]
struct RawContract {
    tricks: u8,
    trump: Option<Suit>,
}

impl TryFrom<RawContract> for Contract {
    type Error = ModelError;

    fn try_from(raw: RawContract) -> Result<Self, Self::Error> {
        Contract::new(raw.tricks, raw.trump)
    }
}

impl Contract {
    pub fn new(tricks: u8, trump: Option<Suit>) -> Result<Self, ModelError> {
        if (MIN_TRICKS..=MAX_TRICKS).contains(&tricks) {
            Ok(Self { tricks, trump })
        } else {
            Err(ModelError::TrickCount(tricks))
        }
    }

    pub fn from_index(index: u8) -> Result<Self, ModelError> {
        if index > MAX_INDEX {
            return Err(ModelError::BidIndex(index));
        }
        Ok(Self {
            tricks: MIN_TRICKS + index / 5,
            trump: TRUMPS[(index % 5) as usize],
        })
    }

    pub fn tricks(&self) -> u8 {
        self.tricks
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn is_no_trump(&self) -> bool {
        self.trump.is_none()
    }

    pub fn index(&self) -> u8 {
        (self.tricks - MIN_TRICKS) * 5 + suit_rank(self.trump)
    }

    pub fn score(&self) -> i32 {
        (self.tricks - MIN_TRICKS) as i32 * 100 + suit_rank(self.trump) as i32 * 20 + 40
    }
}

impl PartialOrd for Contract {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Contract {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.trump {
            Some(suit) => write!(f, "{} {}", self.tricks, suit.name()),
            None => write!(f, "{} NO TRUMP", self.tricks),
        }
    }
}

/// A bid is totally ordered by its index, with a pass below every contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Bid {
    #[default]
    Pass,
    Contract(Contract),
}

impl Bid {
    pub fn new(tricks: u8, trump: Option<Suit>) -> Result<Self, ModelError> {
        Contract::new(tricks, trump).map(Bid::Contract)
    }

    pub fn from_index(index: u8) -> Result<Self, ModelError> {
        Contract::from_index(index).map(Bid::Contract)
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Bid::Pass)
    }

    pub fn contract(&self) -> Result<Contract, ModelError> {
        match self {
            Bid::Contract(contract) => Ok(*contract),
            Bid::Pass => Err(ModelError::PassingBid("contract")),
        }
    }

    pub fn tricks(&self) -> Result<u8, ModelError> {
        match self {
            Bid::Contract(contract) => Ok(contract.tricks()),
            Bid::Pass => Err(ModelError::PassingBid("tricks")),
        }
    }

    /// The trump suit, `Ok(None)` for no-trump.
    pub fn suit(&self) -> Result<Option<Suit>, ModelError> {
        match self {
            Bid::Contract(contract) => Ok(contract.trump()),
            Bid::Pass => Err(ModelError::PassingBid("suit")),
        }
    }

    pub fn to_index(&self) -> Result<u8, ModelError> {
        match self {
            Bid::Contract(contract) => Ok(contract.index()),
            Bid::Pass => Err(ModelError::PassingBid("index")),
        }
    }

    pub fn score(&self) -> Result<i32, ModelError> {
        match self {
            Bid::Contract(contract) => Ok(contract.score()),
            Bid::Pass => Err(ModelError::PassingBid("score")),
        }
    }

    /// The highest of `bids`, or a pass when there are none or all passed.
    pub fn max<I>(bids: I) -> Bid
    where
        I: IntoIterator<Item = Bid>,
    {
        bids.into_iter().max().unwrap_or(Bid::Pass)
    }

    /// The highest bid among those made so far.
    pub fn max_made(bids: &[Option<Bid>]) -> Bid {
        Bid::max(bids.iter().flatten().copied())
    }
}

impl From<Contract> for Bid {
    fn from(contract: Contract) -> Self {
        Bid::Contract(contract)
    }
}

impl Display for Bid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bid::Pass => write!(f, "PASS"),
            Bid::Contract(contract) => write!(f, "{contract}"),
        }
    }
}

impl FromStr for Bid {
    type Err = ModelError;

    /// Accepts `PASS`, `7 HEARTS` or `10 NO TRUMP`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ModelError::ParseBid(s.to_string());
        let upper = s.trim().to_ascii_uppercase();
        if upper == "PASS" {
            return Ok(Bid::Pass);
        }
        let (tricks, suit) = upper.split_once(' ').ok_or_else(err)?;
        let tricks: u8 = tricks.parse().map_err(|_| err())?;
        let trump = match suit.trim() {
            "NO TRUMP" => None,
            name => Some(
                TRUMPS
                    .iter()
                    .flatten()
                    .find(|suit| suit.name() == name)
                    .copied()
                    .ok_or_else(err)?,
            ),
        };
        Bid::new(tricks, trump).map_err(|_| err())
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[test]
fn test_contract_scores() {
    assert_eq!(Bid::new(6, Some(Suit::Spades)).unwrap().score(), Ok(40));
    assert_eq!(Bid::new(6, None).unwrap().score(), Ok(120));
    assert_eq!(Bid::new(8, Some(Suit::Diamonds)).unwrap().score(), Ok(280));
    assert_eq!(Bid::new(10, Some(Suit::Hearts)).unwrap().score(), Ok(500));
    assert_eq!(Bid::new(10, None).unwrap().score(), Ok(520));
}

#[test]
fn test_deserialized_contracts_are_checked() {
    let err = serde_json::from_str::<Contract>(r#"{"tricks":3,"trump":null}"#).unwrap_err();
    assert!(err.to_string().contains("not 3"), "{err}");
    assert!(serde_json::from_str::<Contract>(r#"{"tricks":11,"trump":"Hearts"}"#).is_err());

    let bid = Bid::new(8, Some(Suit::Clubs)).unwrap();
    let json = serde_json::to_string(&bid).unwrap();
    assert_eq!(serde_json::from_str::<Bid>(&json).unwrap(), bid);
}

#[test]
fn test_pass_has_no_contract_details() {
    assert_eq!(Bid::Pass.tricks(), Err(ModelError::PassingBid("tricks")));
    assert_eq!(Bid::Pass.suit(), Err(ModelError::PassingBid("suit")));
    assert_eq!(Bid::Pass.score(), Err(ModelError::PassingBid("score")));
    assert!(Bid::Pass.to_index().is_err());
    assert!(Bid::Pass.contract().is_err());
}

#[test]
fn test_construction_is_checked() {
    assert_eq!(Bid::new(5, None), Err(ModelError::TrickCount(5)));
    assert_eq!(Bid::new(11, Some(Suit::Clubs)), Err(ModelError::TrickCount(11)));
    assert_eq!(Bid::from_index(25), Err(ModelError::BidIndex(25)));
}

#[test]
fn test_max_of_bids() {
    assert_eq!(Bid::max([Bid::Pass; 4]), Bid::Pass);
    assert_eq!(Bid::max([]), Bid::Pass);
    let seven_hearts = Bid::new(7, Some(Suit::Hearts)).unwrap();
    let seven_no_trump = Bid::new(7, None).unwrap();
    let bids = [Bid::Pass, seven_hearts, seven_no_trump, Bid::Pass];
    assert_eq!(Bid::max(bids), seven_no_trump);
    assert_eq!(Bid::max_made(&[Some(seven_hearts), None, None, None]), seven_hearts);
    assert_eq!(Bid::max_made(&[None; 4]), Bid::Pass);
}

#[test]
fn test_text_form() {
    assert_eq!(Bid::Pass.to_string(), "PASS");
    assert_eq!(Bid::new(7, Some(Suit::Hearts)).unwrap().to_string(), "7 HEARTS");
    assert_eq!(Bid::new(10, None).unwrap().to_string(), "10 NO TRUMP");
    assert_eq!("pass".parse::<Bid>(), Ok(Bid::Pass));
    assert_eq!("8 clubs".parse::<Bid>(), Bid::new(8, Some(Suit::Clubs)));
    assert_eq!("10 NO TRUMP".parse::<Bid>(), Bid::new(10, None));
    assert!("11 SPADES".parse::<Bid>().is_err());
    assert!("7 STARS".parse::<Bid>().is_err());
    assert!("SEVEN".parse::<Bid>().is_err());
}

#[cfg(test)]
proptest! {
    #[test]
    fn test_index_round_trips(index in 0u8..=MAX_INDEX) {
        let bid = Bid::from_index(index).unwrap();
        prop_assert_eq!(bid.to_index(), Ok(index));
        prop_assert_eq!(bid.to_string().parse::<Bid>(), Ok(bid));
    }

    #[test]
    fn test_order_follows_index(a in 0u8..=MAX_INDEX, b in 0u8..=MAX_INDEX) {
        let (x, y) = (Bid::from_index(a).unwrap(), Bid::from_index(b).unwrap());
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
        prop_assert!(Bid::Pass < x);
    }
}
