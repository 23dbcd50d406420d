use enum_iterator::all;
use ordered_float::NotNan;
use tracing::trace;

use super::BiddingStrategy;
use crate::bid::Bid;
use crate::card::{Card, Joker, Rank, Suit};
use crate::hand::Hand;
use crate::seat::Seat;
use crate::PLAYERS;

const LONG_SUIT: i32 = 5;
const PARTNER_BONUS: i32 = 5;
const OPPONENT_PENALTY: i32 = 3;
const BIDDABLE_CARDS: i32 = 4;
const BIDDABLE_POINTS: i32 = 8;
const TRUMP_SHARE: f64 = 0.33;

/// Lower bounds (exclusive) of the points needed for each contract size.
const BANDS: [(i32, u8); 5] = [(28, 10), (25, 9), (21, 8), (17, 7), (13, 6)];

fn rank_points(rank: Rank) -> i32 {
    match rank {
        Rank::Jack => 2,
        Rank::Queen => 1,
        Rank::King => 2,
        Rank::Ace => 3,
        _ => 0,
    }
}

fn joker_points(joker: Joker) -> i32 {
    match joker {
        Joker::Low => 4,
        Joker::High => 5,
    }
}

/// Card counts and points per suit, each suit scored as if it were trump.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SuitTally {
    cards: [i32; 4],
    points: [i32; 4],
}

impl SuitTally {
    fn new(hand: &Hand, previous: &[Option<Bid>; PLAYERS], seat: Seat) -> Self {
        let mut tally = Self::default();
        for card in hand.iter() {
            for suit in all::<Suit>() {
                let points = match card {
                    Card::Joker(joker) => joker_points(joker),
                    Card::Suited(rank, _) if card.effective_suit(Some(suit)) == Some(suit) => {
                        rank_points(rank)
                    }
                    Card::Suited(..) => continue,
                };
                tally.cards[suit.index()] += 1;
                tally.points[suit.index()] += points;
            }
        }
        for suit in all::<Suit>() {
            let i = suit.index();
            if tally.cards[i] > LONG_SUIT {
                tally.points[i] += tally.cards[i] - LONG_SUIT;
            }
        }

        let suit_bid_by = |seat: Seat| previous[seat.index()].and_then(|bid| bid.suit().ok().flatten());
        if let Some(suit) = suit_bid_by(seat.partner()) {
            tally.points[suit.index()] += PARTNER_BONUS;
        }
        for opponent in [seat.right(), seat.left()] {
            if let Some(suit) = suit_bid_by(opponent) {
                tally.points[suit.index()] -= OPPONENT_PENALTY;
            }
        }
        tally
    }

    fn points(&self, suit: Suit) -> i32 {
        self.points[suit.index()]
    }

    fn is_biddable(&self, suit: Suit) -> bool {
        self.cards[suit.index()] > BIDDABLE_CARDS && self.points(suit) > BIDDABLE_POINTS
    }

    /// Some suit is biddable and no suit's points are spread so evenly that
    /// none reaches a third of the total.
    fn trump_exists(&self) -> bool {
        if !all::<Suit>().any(|suit| self.is_biddable(suit)) {
            return false;
        }
        let sum: i32 = self.points.iter().sum();
        if sum <= 0 {
            return true;
        }
        all::<Suit>()
            .filter_map(|suit| NotNan::new(self.points(suit) as f64 / sum as f64).ok())
            .max()
            .map_or(false, |share| *share >= TRUMP_SHARE)
    }

    /// The biddable suit with the most points. Ties go to diamonds, then
    /// clubs, then hearts, then spades.
    fn best_suit(&self) -> Suit {
        let points = |suit: Suit| {
            if self.is_biddable(suit) {
                self.points(suit)
            } else {
                0
            }
        };
        let mut best = if points(Suit::Clubs) > points(Suit::Diamonds) {
            Suit::Clubs
        } else {
            Suit::Diamonds
        };
        for suit in [Suit::Hearts, Suit::Spades] {
            if points(suit) > points(best) {
                best = suit;
            }
        }
        best
    }

    /// Contract size for `trump`, with no-trump read off the average of the
    /// four suits. `None` when the hand is too weak to bid.
    fn strength(&self, trump: Option<Suit>) -> Option<u8> {
        let points = match trump {
            Some(suit) => self.points(suit),
            None => self.points.iter().sum::<i32>() / 4,
        };
        BANDS
            .iter()
            .find(|(threshold, _)| points > *threshold)
            .map(|(_, tricks)| *tricks)
    }
}

/// Scores each suit by honours, length and what partner and opponents have
/// bid, then reads the contract off a fixed table.
#[derive(Debug, Default, Clone)]
pub struct BasicBidding;

impl BasicBidding {
    pub fn new() -> Self {
        Self
    }
}

impl BiddingStrategy for BasicBidding {
    fn select_bid(&mut self, previous: &[Option<Bid>; PLAYERS], seat: Seat, hand: &Hand) -> Bid {
        let tally = SuitTally::new(hand, previous, seat);
        let trump = tally.trump_exists().then(|| tally.best_suit());
        let bid = tally
            .strength(trump)
            .and_then(|tricks| Bid::new(tricks, trump).ok())
            .unwrap_or(Bid::Pass);
        trace!(%seat, ?tally, %bid, "basic bid");
        if bid > Bid::max_made(previous) {
            bid
        } else {
            Bid::Pass
        }
    }
}

#[cfg(test)]
use crate::card_list::CardList;

#[cfg(test)]
fn hand(s: &str) -> Hand {
    Hand::from(s.parse::<CardList>().unwrap())
}

#[cfg(test)]
fn bid(s: &str) -> Option<Bid> {
    Some(s.parse().unwrap())
}

#[cfg(test)]
const STRONG_HEARTS: &str = "HJ LJ JH JD AH KH QH TH 9H 8H";

#[test]
fn test_tally_counts_bowers_in_both_red_suits() {
    let tally = SuitTally::new(&hand(STRONG_HEARTS), &[None; 4], Seat::South);
    assert_eq!(tally.cards, [2, 2, 4, 10]);
    assert_eq!(tally.points, [9, 9, 13, 24]);
    assert!(tally.is_biddable(Suit::Hearts));
    assert!(!tally.is_biddable(Suit::Diamonds));
    assert!(tally.trump_exists());
    assert_eq!(tally.best_suit(), Suit::Hearts);
}

#[test]
fn test_strong_suit_bids_from_the_table() {
    let mut strategy = BasicBidding::new();
    assert_eq!(
        strategy.select_bid(&[None; 4], Seat::South, &hand(STRONG_HEARTS)),
        "8 HEARTS".parse::<Bid>().unwrap()
    );
}

#[test]
fn test_partner_support_raises_the_bid() {
    let mut strategy = BasicBidding::new();
    let previous = [bid("6 HEARTS"), bid("PASS"), None, None];
    assert_eq!(
        strategy.select_bid(&previous, Seat::South, &hand(STRONG_HEARTS)),
        "10 HEARTS".parse::<Bid>().unwrap()
    );
}

#[test]
fn test_opponent_in_the_same_suit_lowers_the_bid() {
    let mut strategy = BasicBidding::new();
    let previous = [None, bid("6 HEARTS"), None, None];
    assert_eq!(
        strategy.select_bid(&previous, Seat::South, &hand(STRONG_HEARTS)),
        "7 HEARTS".parse::<Bid>().unwrap()
    );
}

#[test]
fn test_weak_hand_passes() {
    let mut strategy = BasicBidding::new();
    let weak = hand("4S 5S 6C 7C 8D 9D 4H 5H 6H 7S");
    assert_eq!(strategy.select_bid(&[None; 4], Seat::North, &weak), Bid::Pass);
}

#[test]
fn test_balanced_hand_bids_no_trump() {
    let mut strategy = BasicBidding::new();
    let balanced = hand("HJ LJ AS KS AC KC AD KD AH KH");
    assert_eq!(
        strategy.select_bid(&[None; 4], Seat::West, &balanced),
        "6 NO TRUMP".parse::<Bid>().unwrap()
    );
}

#[test]
fn test_does_not_bid_under_the_maximum() {
    let mut strategy = BasicBidding::new();
    let previous = [None, None, None, bid("9 CLUBS")];
    assert_eq!(
        strategy.select_bid(&previous, Seat::North, &hand(STRONG_HEARTS)),
        Bid::Pass
    );
}
