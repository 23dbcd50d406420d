use std::fmt::Debug;

use crate::ai::{
    AdvancedBidding, AdvancedExchange, AdvancedPlaying, BasicBidding, BasicExchange, BasicPlaying,
    BiddingStrategy, CardExchangeStrategy, PlayingStrategy, RandomBidding, RandomExchange,
    RandomPlaying,
};
use crate::config::{AiConfig, AiLevel};
use crate::error::ConfigError;
use crate::hand::Hand;

/// One seat at the table: the cards held, the running score, and the three
/// decisions the player makes.
pub struct Player {
    name: String,
    pub(crate) hand: Hand,
    pub(crate) score: i32,
    pub(crate) round_score: i32,
    pub(crate) tricks_won: usize,
    pub(crate) game_winner: bool,
    pub(crate) bidding: Box<dyn BiddingStrategy>,
    pub(crate) exchange: Box<dyn CardExchangeStrategy>,
    pub(crate) playing: Box<dyn PlayingStrategy>,
}

impl Player {
    pub fn with_strategies(
        name: impl Into<String>,
        bidding: Box<dyn BiddingStrategy>,
        exchange: Box<dyn CardExchangeStrategy>,
        playing: Box<dyn PlayingStrategy>,
    ) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            score: 0,
            round_score: 0,
            tricks_won: 0,
            game_winner: false,
            bidding,
            exchange,
            playing,
        }
    }

    /// A computer player at `level`. Randomised decisions are seeded from
    /// `seed` so that a game can be replayed.
    pub fn robot(
        name: impl Into<String>,
        level: AiLevel,
        config: &AiConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = match level {
            AiLevel::Random => Self::with_strategies(
                name,
                Box::new(RandomBidding::new(config.pass_probability, seed)),
                Box::new(RandomExchange::new(seed.wrapping_add(1))),
                Box::new(RandomPlaying::new(seed.wrapping_add(2))),
            ),
            AiLevel::Basic => Self::with_strategies(
                name,
                Box::new(BasicBidding::new()),
                Box::new(BasicExchange::new()),
                Box::new(BasicPlaying::new(seed)),
            ),
            AiLevel::Advanced => Self::with_strategies(
                name,
                Box::new(AdvancedBidding::new()),
                Box::new(AdvancedExchange::new()),
                Box::new(AdvancedPlaying::new(config, seed)),
            ),
        };
        Ok(player)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Cumulative score. Partners carry the same score.
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn round_score(&self) -> i32 {
        self.round_score
    }

    pub fn tricks_won(&self) -> usize {
        self.tricks_won
    }

    pub fn is_game_winner(&self) -> bool {
        self.game_winner
    }

    pub(crate) fn reset_for_game(&mut self) {
        self.score = 0;
        self.round_score = 0;
        self.tricks_won = 0;
        self.game_winner = false;
        self.hand.clear();
    }
}

impl Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("hand", &self.hand)
            .field("score", &self.score)
            .field("tricks_won", &self.tricks_won)
            .finish_non_exhaustive()
    }
}

#[test]
fn test_robot_rejects_bad_config() {
    let config = AiConfig {
        second_seat_low_probability: -0.1,
        ..Default::default()
    };
    assert!(Player::robot("West", AiLevel::Advanced, &config, 0).is_err());
}

#[test]
fn test_robot_starts_empty() {
    let player = Player::robot("North", AiLevel::Basic, &AiConfig::default(), 0).unwrap();
    assert_eq!(player.name(), "North");
    assert!(player.hand().is_empty());
    assert_eq!(player.score(), 0);
    assert!(!player.is_game_winner());
}
