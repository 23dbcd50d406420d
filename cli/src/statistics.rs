use enum_iterator::all;
use fivehundred::{GameEvent, GameListener, Seat, PLAYERS};
use ordered_float::NotNan;
use serde::Serialize;

/// Running totals over a batch of games, fed from engine events.
#[derive(Debug, Default, Clone, Serialize)]
pub struct GameStatistics {
    pub games: usize,
    pub rounds: usize,
    pub passed_out: usize,
    pub tricks_won: [usize; PLAYERS],
    pub contracts_won: [usize; PLAYERS],
    pub contracts_made: [usize; PLAYERS],
    pub games_won: [usize; PLAYERS],
    pub points: [i64; 2],
    #[serde(skip)]
    holder: Option<Seat>,
}

#[derive(Debug, Serialize)]
pub struct SeatSummary {
    pub seat: Seat,
    pub name: String,
    pub games_won: usize,
    pub contracts_won: usize,
    pub contract_success: Option<f64>,
}

impl GameStatistics {
    /// Seats ordered by the share of their contracts they made, best first.
    pub fn by_success(&self, names: &[String; PLAYERS]) -> Vec<SeatSummary> {
        let mut seats: Vec<SeatSummary> = all::<Seat>()
            .map(|seat| {
                let i = seat.index();
                SeatSummary {
                    seat,
                    name: names[i].clone(),
                    games_won: self.games_won[i],
                    contracts_won: self.contracts_won[i],
                    contract_success: (self.contracts_won[i] > 0)
                        .then(|| self.contracts_made[i] as f64 / self.contracts_won[i] as f64),
                }
            })
            .collect();
        seats.sort_by_key(|summary| {
            std::cmp::Reverse(
                summary
                    .contract_success
                    .and_then(|rate| NotNan::new(rate).ok()),
            )
        });
        seats
    }
}

impl GameListener for GameStatistics {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Bid { contract, .. } => match contract {
                Some((holder, _)) => {
                    self.holder = Some(*holder);
                    self.contracts_won[holder.index()] += 1;
                }
                None => self.passed_out += 1,
            },
            GameEvent::Play { winner, .. } => self.tricks_won[winner.index()] += 1,
            GameEvent::Score {
                round_scores,
                contract_made,
                ..
            } => {
                self.rounds += 1;
                for (total, round) in self.points.iter_mut().zip(round_scores) {
                    *total += i64::from(*round);
                }
                if let (true, Some(holder)) = (*contract_made, self.holder) {
                    self.contracts_made[holder.index()] += 1;
                }
            }
            GameEvent::GameOver { winners } => {
                self.games += 1;
                for seat in winners.seats() {
                    self.games_won[seat.index()] += 1;
                }
            }
            GameEvent::NewGame { .. }
            | GameEvent::Deal { .. }
            | GameEvent::Exchange { .. }
            | GameEvent::SinglePlay { .. } => {}
        }
    }
}

#[cfg(test)]
use fivehundred::{Bid, Contract, Team};

#[test]
fn test_counts_contracts_and_wins() {
    let mut stats = GameStatistics::default();
    let contract = Contract::new(7, None).unwrap();
    stats.on_event(&GameEvent::Bid {
        bids: [Bid::Contract(contract), Bid::Pass, Bid::Pass, Bid::Pass],
        contract: Some((Seat::North, contract)),
    });
    stats.on_event(&GameEvent::Score {
        round_scores: [220, 30],
        team_scores: [220, 30],
        contract_made: true,
    });
    stats.on_event(&GameEvent::Bid {
        bids: [Bid::Pass; PLAYERS],
        contract: None,
    });
    stats.on_event(&GameEvent::GameOver {
        winners: Team::NorthSouth,
    });

    assert_eq!(stats.contracts_won, [1, 0, 0, 0]);
    assert_eq!(stats.contracts_made, [1, 0, 0, 0]);
    assert_eq!(stats.passed_out, 1);
    assert_eq!(stats.rounds, 1);
    assert_eq!(stats.points, [220, 30]);
    assert_eq!(stats.games_won, [1, 0, 1, 0]);

    let names = ["N", "E", "S", "W"].map(String::from);
    let summary = stats.by_success(&names);
    assert_eq!(summary[0].seat, Seat::North);
    assert_eq!(summary[0].contract_success, Some(1.0));
}
