use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::{legal_cards, CardTracker, PlayingStrategy};
use crate::card::{by_rank, by_suit, trick_order, Card};
use crate::card_list::CardList;
use crate::config::AiConfig;
use crate::hand::Hand;
use crate::seat::Seat;
use crate::trick::Trick;

/// Plays from what it has learned this round: which suits each opponent
/// has shown out of and which cards are still unseen.
pub struct AdvancedPlaying {
    rng: StdRng,
    tracker: CardTracker,
    second_seat_low_probability: f64,
    third_seat_low_probability: f64,
}

impl AdvancedPlaying {
    pub fn new(config: &AiConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            tracker: CardTracker::new(),
            second_seat_low_probability: config.second_seat_low_probability,
            third_seat_low_probability: config.third_seat_low_probability,
        }
    }

    pub fn tracker(&self) -> &CardTracker {
        &self.tracker
    }

    /// Cards worth leading, lowest first: trump when any is held, otherwise
    /// everything leadable by rank.
    fn lead_candidates(trick: &Trick, hand: &Hand) -> CardList {
        let leadable = hand.can_lead(trick.contract().is_no_trump());
        match trick.trump() {
            Some(trump) if leadable.iter().any(|card| card.is_trump(Some(trump))) => leadable
                .filter(|card| card.is_trump(Some(trump)))
                .sorted_by(by_suit(trump)),
            _ => leadable.sorted_by(by_rank),
        }
    }

    fn lead(&self, trick: &Trick, hand: &Hand) -> Option<Card> {
        let trump = trick.trump();
        let leader = trick.leader();
        let candidates = Self::lead_candidates(trick, hand);
        let highest = candidates.last()?;
        if !self.tracker.has_history() {
            return Some(highest);
        }
        let safe = candidates.iter().rev().find(|card| {
            !self
                .tracker
                .can_be_beaten(*card, leader, leader, trump, card.effective_suit(trump))
        });
        safe.or(Some(highest))
    }

    /// The cheapest legal card that takes the trick and cannot be overtaken.
    fn play_to_win(&self, trick: &Trick, hand: &Hand) -> Option<Card> {
        let trump = trick.trump();
        let led = trick.suit_led().ok().flatten();
        let seat = trick.next_seat();
        let playable = legal_cards(trick, hand).sorted_by(trick_order(trump));
        let winner = playable.iter().find(|card| {
            trick.would_win(*card)
                && !self
                    .tracker
                    .can_be_beaten(*card, seat, trick.leader(), trump, led)
        });
        winner
    }

    /// The lowest legal card with probability `probability`, otherwise the
    /// highest. Always the lowest when nothing could take the trick.
    fn play_low(&mut self, trick: &Trick, hand: &Hand, probability: f64) -> Option<Card> {
        let playable = legal_cards(trick, hand).sorted_by(by_rank);
        let might_win = playable.iter().any(|card| trick.would_win(card));
        if !might_win || self.rng.gen_bool(probability) {
            playable.first()
        } else {
            playable.last()
        }
    }

    fn follow(&mut self, trick: &Trick, hand: &Hand) -> Option<Card> {
        let seat = trick.next_seat();
        match trick.len() {
            3 => {
                if trick.winner_index() == Some(1) {
                    self.play_low(trick, hand, 1.0)
                } else {
                    self.play_to_win(trick, hand)
                        .or_else(|| self.play_low(trick, hand, 1.0))
                }
            }
            2 => {
                let partner_safe = trick.winner_index() == Some(0)
                    && trick.card_led().map_or(false, |card| {
                        !self.tracker.can_be_beaten(
                            card,
                            seat,
                            trick.leader(),
                            trick.trump(),
                            trick.suit_led().ok().flatten(),
                        )
                    });
                if partner_safe {
                    self.play_low(trick, hand, 1.0)
                } else {
                    let probability = self.third_seat_low_probability;
                    self.play_to_win(trick, hand)
                        .or_else(|| self.play_low(trick, hand, probability))
                }
            }
            _ => {
                let probability = self.second_seat_low_probability;
                self.play_to_win(trick, hand)
                    .or_else(|| self.play_low(trick, hand, probability))
            }
        }
    }
}

impl PlayingStrategy for AdvancedPlaying {
    fn play(&mut self, trick: &Trick, hand: &Hand) -> Card {
        self.tracker.forget_own_hand(hand);
        let choice = if trick.is_empty() {
            self.lead(trick, hand)
        } else {
            self.follow(trick, hand)
        };
        let card = choice.expect("a player with cards always has a legal play");
        trace!(seat = %trick.next_seat(), %card, "advanced play");
        card
    }

    fn reset_for_new_round(&mut self) {
        self.tracker.reset();
    }

    fn observe_play(&mut self, trick_before: &Trick, seat: Seat, card: Card) {
        self.tracker.observe(trick_before, seat, card);
    }
}

#[cfg(test)]
use crate::bid::Bid;
#[cfg(test)]
use crate::card::card;
#[cfg(test)]
use crate::card::{HIGH_JOKER, LOW_JOKER};

#[cfg(test)]
fn hand(s: &str) -> Hand {
    Hand::from(s.parse::<CardList>().unwrap())
}

#[cfg(test)]
fn trick(contract: &str, cards: &str) -> Trick {
    let mut trick = Trick::new(contract.parse::<Bid>().unwrap(), Seat::North).unwrap();
    for c in cards.split_whitespace() {
        trick.add(card(c));
    }
    trick
}

#[cfg(test)]
fn strategy() -> AdvancedPlaying {
    AdvancedPlaying::new(&AiConfig::default(), 17)
}

#[test]
fn test_opens_with_the_highest_card() {
    let mut player = strategy();
    assert_eq!(player.play(&trick("6 HEARTS", ""), &hand("4C AS JD 5H")), card("JD"));
}

#[test]
fn test_leads_the_highest_safe_card_once_play_is_under_way() {
    let mut player = strategy();
    let empty = trick("6 NO TRUMP", "");
    player.observe_play(&empty, Seat::North, HIGH_JOKER);
    player.observe_play(&empty, Seat::North, LOW_JOKER);
    assert_eq!(player.play(&empty, &hand("AS KD 4C")), card("AS"));
}

#[test]
fn test_last_hand_plays_low_behind_a_winning_partner() {
    let mut player = strategy();
    let t = trick("6 SPADES", "9H AH 4H");
    assert_eq!(player.play(&t, &hand("KH 5H AS")), card("5H"));
}

#[test]
fn test_last_hand_wins_as_cheaply_as_possible() {
    let mut player = strategy();
    let t = trick("6 SPADES", "9H 4H QH");
    assert_eq!(player.play(&t, &hand("AH 5H KH")), card("KH"));
}

#[test]
fn test_second_hand_ducks_when_it_cannot_win() {
    let mut player = strategy();
    let t = trick("6 SPADES", "AH");
    assert_eq!(player.play(&t, &hand("KH 5H 9C")), card("5H"));
}

#[test]
fn test_third_hand_does_not_overtake_a_safe_partner() {
    let mut player = strategy();
    let t = trick("6 SPADES", "HJ 4S");
    assert_eq!(player.play(&t, &hand("AS 5S 9C")), card("5S"));
}

#[test]
fn test_new_round_clears_what_was_learned() {
    let mut player = strategy();
    player.observe_play(&trick("6 SPADES", "AH"), Seat::East, card("4C"));
    assert!(!player.tracker().may_hold(Seat::East, crate::card::Suit::Hearts));
    player.reset_for_new_round();
    assert!(player.tracker().may_hold(Seat::East, crate::card::Suit::Hearts));
    assert!(!player.tracker().has_history());
}

#[test]
fn test_no_trump_opening_lead_is_the_highest_rank() {
    let mut player = strategy();
    assert_eq!(player.play(&trick("6 NO TRUMP", ""), &hand("AS KS 4H")), card("AS"));
}

#[test]
fn test_leads_the_highest_side_card_without_trump() {
    let mut player = strategy();
    assert_eq!(player.play(&trick("6 SPADES", ""), &hand("AC KC 4H")), card("AC"));
}

#[test]
fn test_leads_trump_when_holding_any() {
    let mut player = strategy();
    assert_eq!(player.play(&trick("6 SPADES", ""), &hand("AH 4S 5S")), card("5S"));
}

#[test]
fn test_passes_over_a_beatable_high_card_for_a_safe_one() {
    let mut player = strategy();
    let empty = trick("6 NO TRUMP", "");
    for played in [HIGH_JOKER, LOW_JOKER, card("AS"), card("KS")] {
        player.observe_play(&empty, Seat::North, played);
    }
    assert_eq!(player.play(&empty, &hand("KD QS")), card("QS"));
}
