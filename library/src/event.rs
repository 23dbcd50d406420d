use serde::{Deserialize, Serialize};

use crate::bid::{Bid, Contract};
use crate::card::Card;
use crate::card_list::CardList;
use crate::seat::{Seat, Team};
use crate::trick::Trick;
use crate::PLAYERS;

/// State changes announced by the engine, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    NewGame {
        dealer: Seat,
    },
    Deal {
        dealer: Seat,
        first_bidder: Seat,
    },
    /// All four bids are in. `contract` is `None` when everyone passed.
    Bid {
        bids: [Bid; PLAYERS],
        contract: Option<(Seat, Contract)>,
    },
    Exchange {
        contract_holder: Seat,
        discards: CardList,
    },
    SinglePlay {
        seat: Seat,
        card: Card,
    },
    Play {
        winner: Seat,
        trick: Trick,
    },
    Score {
        round_scores: [i32; 2],
        team_scores: [i32; 2],
        contract_made: bool,
    },
    GameOver {
        winners: Team,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::NewGame { .. } => "new game",
            GameEvent::Deal { .. } => "deal",
            GameEvent::Bid { .. } => "bid",
            GameEvent::Exchange { .. } => "exchange",
            GameEvent::SinglePlay { .. } => "single play",
            GameEvent::Play { .. } => "play",
            GameEvent::Score { .. } => "score",
            GameEvent::GameOver { .. } => "game over",
        }
    }
}

/// Receives every event before the engine moves on.
pub trait GameListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}
