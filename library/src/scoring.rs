use crate::bid::Contract;
use crate::seat::Team;
use crate::HAND_SIZE;

pub const WINNING_SCORE: i32 = 500;
pub const LOSING_SCORE: i32 = -500;
pub const SLAM_SCORE: i32 = 250;

/// Points for the contracting team having taken `tricks` tricks.
pub fn contractor_score(contract: Contract, tricks: usize) -> i32 {
    let score = contract.score();
    if tricks < contract.tricks() as usize {
        -score
    } else if tricks == HAND_SIZE && score < SLAM_SCORE {
        SLAM_SCORE
    } else {
        score
    }
}

pub fn opposition_score(tricks: usize) -> i32 {
    10 * tricks as i32
}

/// The team that has won, if any. A team at or below -500 loses outright;
/// a team at or above 500 wins only when it held the contract.
pub fn winning_team(team_scores: [i32; 2], contract_team: Team) -> Option<Team> {
    for team in [Team::NorthSouth, Team::EastWest] {
        if team_scores[team.index()] <= LOSING_SCORE {
            return Some(team.other());
        }
    }
    [Team::NorthSouth, Team::EastWest]
        .into_iter()
        .find(|team| team_scores[team.index()] >= WINNING_SCORE && *team == contract_team)
}

#[cfg(test)]
use crate::card::Suit;

#[cfg(test)]
fn contract(tricks: u8, trump: Option<Suit>) -> Contract {
    Contract::new(tricks, trump).unwrap()
}

#[test]
fn test_defeated_contract_is_negated() {
    assert_eq!(contractor_score(contract(8, Some(Suit::Clubs)), 7), -260);
    assert_eq!(contractor_score(contract(6, None), 0), -120);
}

#[test]
fn test_made_contract_scores_its_value() {
    assert_eq!(contractor_score(contract(7, Some(Suit::Hearts)), 7), 200);
    assert_eq!(contractor_score(contract(7, Some(Suit::Hearts)), 9), 200);
}

#[test]
fn test_slam_scores_at_least_two_fifty() {
    assert_eq!(contractor_score(contract(6, Some(Suit::Spades)), 10), 250);
    assert_eq!(contractor_score(contract(8, Some(Suit::Spades)), 10), 250);
    assert_eq!(contractor_score(contract(8, Some(Suit::Diamonds)), 10), 280);
    assert_eq!(contractor_score(contract(10, None), 10), 520);
}

#[test]
fn test_opposition_scores_ten_per_trick() {
    assert_eq!(opposition_score(0), 0);
    assert_eq!(opposition_score(4), 40);
}

#[test]
fn test_losing_team_ends_the_game() {
    assert_eq!(winning_team([-510, 100], Team::EastWest), Some(Team::EastWest));
    assert_eq!(winning_team([100, -500], Team::NorthSouth), Some(Team::NorthSouth));
}

#[test]
fn test_only_contractors_cross_five_hundred() {
    assert_eq!(winning_team([520, 100], Team::NorthSouth), Some(Team::NorthSouth));
    assert_eq!(winning_team([520, 100], Team::EastWest), None);
    assert_eq!(winning_team([499, 480], Team::NorthSouth), None);
}
