use super::CardExchangeStrategy;
use crate::bid::Bid;
use crate::card_list::CardList;
use crate::hand::Hand;
use crate::seat::Seat;
use crate::{PLAYERS, WIDOW_SIZE};

/// Throws away the six cheapest cards, one at a time.
#[derive(Debug, Default, Clone)]
pub struct BasicExchange;

impl BasicExchange {
    pub fn new() -> Self {
        Self
    }
}

impl CardExchangeStrategy for BasicExchange {
    fn select_cards_to_discard(
        &mut self,
        bids: &[Bid; PLAYERS],
        _holder: Seat,
        hand: &Hand,
    ) -> CardList {
        let trump = Bid::max(bids.iter().copied()).suit().unwrap_or(None);
        let mut remaining = hand.clone();
        let mut discards = CardList::new();
        while discards.len() < WIDOW_SIZE {
            let Some(lowest) = remaining.select_lowest(trump) else {
                break;
            };
            remaining.remove(lowest);
            discards.add(lowest);
        }
        discards
    }
}


#[cfg(test)]
fn bids(contract: &str) -> [Bid; PLAYERS] {
    [Bid::Pass, contract.parse().unwrap(), Bid::Pass, Bid::Pass]
}

#[test]
fn test_keeps_trump_and_high_cards() {
    let hand = Hand::from(
        "HJ JS JC AS KS QS 4H 5H 6D 7D 8C 9C AH KD 5S TC"
            .parse::<CardList>()
            .unwrap(),
    );
    let mut strategy = BasicExchange::new();
    let discards = strategy.select_cards_to_discard(&bids("7 SPADES"), Seat::East, &hand);
    assert_eq!(discards, "4H 5H 6D 7D 8C 9C".parse::<CardList>().unwrap());
}

#[test]
fn test_discards_by_rank_in_no_trump() {
    let hand = Hand::from(
        "LJ HJ AS AC AD AH KS KC KD KH 4S 6C 5D 9H 7S 8C"
            .parse::<CardList>()
            .unwrap(),
    );
    let mut strategy = BasicExchange::new();
    let discards = strategy.select_cards_to_discard(&bids("6 NO TRUMP"), Seat::East, &hand);
    assert_eq!(discards, "4S 5D 6C 7S 8C 9H".parse::<CardList>().unwrap());
}
