//! Robot decision making: one trait per decision, each with a random, a basic
//! and an advanced implementation.

mod advanced_bidding;
mod advanced_exchange;
mod advanced_playing;
mod basic_bidding;
mod basic_exchange;
mod basic_playing;
mod random;
mod tracker;

pub use advanced_bidding::AdvancedBidding;
pub use advanced_exchange::AdvancedExchange;
pub use advanced_playing::AdvancedPlaying;
pub use basic_bidding::BasicBidding;
pub use basic_exchange::BasicExchange;
pub use basic_playing::BasicPlaying;
pub use random::{RandomBidding, RandomExchange, RandomPlaying};
pub use tracker::CardTracker;

use crate::bid::Bid;
use crate::card::Card;
use crate::card_list::CardList;
use crate::hand::Hand;
use crate::seat::Seat;
use crate::trick::Trick;
use crate::PLAYERS;

pub trait BiddingStrategy {
    /// Picks a bid for `seat`. `previous` holds the bids already made, by
    /// seat. The result must be a pass or beat every bid in `previous`.
    fn select_bid(&mut self, previous: &[Option<Bid>; PLAYERS], seat: Seat, hand: &Hand) -> Bid;
}

pub trait CardExchangeStrategy {
    /// Picks the six cards the contract holder sets aside. `hand` already
    /// includes the widow.
    fn select_cards_to_discard(
        &mut self,
        bids: &[Bid; PLAYERS],
        holder: Seat,
        hand: &Hand,
    ) -> CardList;
}

pub trait PlayingStrategy {
    /// Picks a card from `hand` that may legally be added to `trick`.
    fn play(&mut self, trick: &Trick, hand: &Hand) -> Card;

    /// Called for every player at each deal.
    fn reset_for_new_round(&mut self) {}

    /// Called for every player after `seat` adds `card` to `trick_before`.
    fn observe_play(&mut self, _trick_before: &Trick, _seat: Seat, _card: Card) {}
}

/// The cards `hand` may put on `trick`: the lead set on an empty trick,
/// otherwise the cards that follow the suit led.
pub fn legal_cards(trick: &Trick, hand: &Hand) -> CardList {
    match trick.suit_led() {
        Ok(led) => hand.playable_cards(led, trick.trump()),
        Err(_) => hand.can_lead(trick.contract().is_no_trump()),
    }
}
