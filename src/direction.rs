//! Direction algebra (C1).
//!
//! Directions are a closed sum of four variants, encoded as angle-indexed
//! integers so that turning is addition mod 8 rather than a match on
//! enum ordinals. No runtime polymorphism: every operation below is a
//! plain `impl` method.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four cardinal headings, encoded N=0, E=2, S=4, W=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Angle-indexed encoding used throughout the planner's arithmetic.
    pub fn angle(self) -> i32 {
        match self {
            Direction::North => 0,
            Direction::East => 2,
            Direction::South => 4,
            Direction::West => 6,
        }
    }

    /// Reconstructs a direction from its angle encoding.
    ///
    /// `angle` must already be one of {0, 2, 4, 6}; any other value is an
    /// internal invariant violation (spec §3: "Direction encoding is
    /// always even in {0, 2, 4, 6}; no in-between values exist"), not a
    /// recoverable input error.
    pub fn from_angle(angle: i32) -> Self {
        match angle.rem_euclid(8) {
            0 => Direction::North,
            2 => Direction::East,
            4 => Direction::South,
            6 => Direction::West,
            other => panic!("invalid direction angle {other}, encoding invariant violated"),
        }
    }

    /// Turns `n` sixteenths-of-a-turn-pairs (i.e. `n` is itself in units of
    /// 2, matching the 90-degree step of the angle encoding). Positive is
    /// clockwise (right), negative counter-clockwise (left).
    pub fn rotate(self, n: i32) -> Self {
        Self::from_angle(self.angle() + n)
    }

    pub fn opposite(self) -> Self {
        self.rotate(4)
    }

    /// Headings differ by 2 or 6 mod 8.
    pub fn is_orthogonal_to(self, other: Direction) -> bool {
        matches!((self.angle() - other.angle()).rem_euclid(8), 2 | 6)
    }

    pub fn is_opposite_to(self, other: Direction) -> bool {
        (self.angle() - other.angle()).rem_euclid(8) == 4
    }

    /// Unit step `(dx, dy)` for moving one cell forward while facing this
    /// direction. `y` increases northward, matching the grid drawn by
    /// `original_source/simulator.py` (north is "up").
    pub fn unit_step(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::East => "E",
            Direction::South => "S",
            Direction::West => "W",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for Direction {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "N" => Ok(Direction::North),
            "E" => Ok(Direction::East),
            "S" => Ok(Direction::South),
            "W" => Ok(Direction::West),
            other => Err(format!("unknown direction label {other:?}")),
        }
    }
}

impl From<Direction> for String {
    fn from(value: Direction) -> Self {
        value.label().to_string()
    }
}
