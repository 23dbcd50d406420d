use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Seats in turn order. Partners sit opposite each other.
#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Sequence, Serialize, Deserialize, Hash,
)]
pub enum Seat {
    North,
    East,
    South,
    West,
}

impl Seat {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    /// The seat `steps` places further round the table.
    pub fn offset(self, steps: usize) -> Seat {
        (0..steps % 4).fold(self, |seat, _| seat.next())
    }

    pub fn partner(self) -> Seat {
        self.offset(2)
    }

    pub fn left(self) -> Seat {
        self.next()
    }

    pub fn right(self) -> Seat {
        self.offset(3)
    }

    pub fn team(self) -> Team {
        match self {
            Seat::North | Seat::South => Team::NorthSouth,
            Seat::East | Seat::West => Team::EastWest,
        }
    }
}

impl TryFrom<usize> for Seat {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Seat::North),
            1 => Ok(Seat::East),
            2 => Ok(Seat::South),
            3 => Ok(Seat::West),
            _ => Err(value),
        }
    }
}

impl Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Sequence, Serialize, Deserialize, Hash,
)]
pub enum Team {
    NorthSouth,
    EastWest,
}

impl Team {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn other(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }

    pub fn seats(self) -> [Seat; 2] {
        match self {
            Team::NorthSouth => [Seat::North, Seat::South],
            Team::EastWest => [Seat::East, Seat::West],
        }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Team::NorthSouth => "North/South",
                Team::EastWest => "East/West",
            }
        )
    }
}

#[test]
fn test_seats_go_round_the_table() {
    assert_eq!(Seat::West.next(), Seat::North);
    assert_eq!(Seat::East.partner(), Seat::West);
    assert_eq!(Seat::North.right(), Seat::West);
    assert_eq!(Seat::South.offset(6), Seat::North);
    assert_eq!(Seat::try_from(4), Err(4));
}

#[test]
fn test_partners_share_a_team() {
    for seat in enum_iterator::all::<Seat>() {
        assert_eq!(seat.team(), seat.partner().team());
        assert_ne!(seat.team(), seat.next().team());
        assert!(seat.team().seats().contains(&seat));
    }
}
