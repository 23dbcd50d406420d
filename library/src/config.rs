use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::error::ConfigError;

/// Tuning knobs for the robot players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Chance that the random bidder passes outright.
    pub pass_probability: f64,
    /// Chance that the advanced player, second to act and unable to take the
    /// trick safely, plays its lowest card rather than its highest.
    pub second_seat_low_probability: f64,
    /// The same, third to act.
    pub third_seat_low_probability: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            pass_probability: 0.5,
            second_seat_low_probability: 0.7,
            third_seat_low_probability: 0.5,
        }
    }
}

impl AiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("pass_probability", self.pass_probability),
            ("second_seat_low_probability", self.second_seat_low_probability),
            ("third_seat_low_probability", self.third_seat_low_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        Ok(())
    }
}

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Sequence, Serialize, Deserialize, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum AiLevel {
    Random,
    Basic,
    Advanced,
}

impl Display for AiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AiLevel::Random => "random",
                AiLevel::Basic => "basic",
                AiLevel::Advanced => "advanced",
            }
        )
    }
}

impl FromStr for AiLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum_iterator::all::<AiLevel>()
            .find(|level| level.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownLevel(s.to_string()))
    }
}

#[test]
fn test_default_config_is_valid() {
    assert_eq!(AiConfig::default().validate(), Ok(()));
}

#[test]
fn test_probabilities_are_checked() {
    let config = AiConfig {
        third_seat_low_probability: 1.5,
        ..Default::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::Probability {
            name: "third_seat_low_probability",
            value: 1.5
        })
    );
    let config = AiConfig {
        pass_probability: f64::NAN,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_levels_parse() {
    assert_eq!("Advanced".parse::<AiLevel>(), Ok(AiLevel::Advanced));
    assert_eq!("random".parse::<AiLevel>(), Ok(AiLevel::Random));
    assert_eq!(
        "expert".parse::<AiLevel>(),
        Err(ConfigError::UnknownLevel("expert".to_string()))
    );
}
