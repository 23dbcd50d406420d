//! Rules engine and robot players for the card game Five Hundred.
//!
//! Four players in two partnerships bid for the right to name trump, the
//! winner exchanges cards with the six-card widow, and ten tricks are played.
//! The first partnership to reach 500 on its own contract, or the one whose
//! opponents fall to -500, wins.

pub mod ai;
pub mod bid;
pub mod card;
pub mod card_list;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod event;
pub mod hand;
pub mod player;
pub mod scoring;
pub mod seat;
pub mod trick;

pub use bid::{Bid, Contract};
pub use card::{Card, Joker, Rank, Suit};
pub use card_list::CardList;
pub use config::{AiConfig, AiLevel};
pub use engine::{GameEngine, Phase};
pub use error::{ConfigError, GameError, ModelError};
pub use event::{GameEvent, GameListener};
pub use hand::Hand;
pub use player::Player;
pub use seat::{Seat, Team};
pub use trick::Trick;

pub const PLAYERS: usize = 4;
pub const HAND_SIZE: usize = 10;
pub const WIDOW_SIZE: usize = 6;
