//! Robot pose (C1).
//!
//! A pose is a geometric position `(x, y, d)` plus an optional screenshot
//! tag. Per spec §9 ("Pose identity vs. tag"), the tag must never
//! participate in hashing/equality — two poses at the same cell and
//! heading are the same search node regardless of which one (if either)
//! is due for a photograph. `GeoPose` carries only the geometric part and
//! is what `search.rs` hashes; `Pose` wraps it with the tag for the
//! stitched output sequence.

use crate::direction::Direction;
use std::fmt;

/// The bottom-left anchor cell and heading of the robot's 3x3 footprint.
/// This is the identity that feeds A* node hashing/equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoPose {
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
}

impl GeoPose {
    pub fn new(x: i32, y: i32, dir: Direction) -> Self {
        Self { x, y, dir }
    }

    pub fn manhattan(&self, other: &GeoPose) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn with_tag(self, tag: Option<String>) -> Pose {
        Pose {
            geo: self,
            snap: tag,
        }
    }
}

impl fmt::Display for GeoPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.dir)
    }
}

/// A pose plus an optional screenshot ("snap") tag. Poses compare by
/// their geometric part only; the tag is metadata carried along for
/// `commands.rs`/`stitch.rs`, never consulted by the search.
#[derive(Debug, Clone)]
pub struct Pose {
    pub geo: GeoPose,
    pub snap: Option<String>,
}

impl Pose {
    pub fn no_snap(x: i32, y: i32, dir: Direction) -> Self {
        GeoPose::new(x, y, dir).with_tag(None)
    }

    pub fn x(&self) -> i32 {
        self.geo.x
    }

    pub fn y(&self) -> i32 {
        self.geo.y
    }

    pub fn dir(&self) -> Direction {
        self.geo.dir
    }
}

impl PartialEq for Pose {
    fn eq(&self, other: &Self) -> bool {
        self.geo == other.geo
    }
}

impl Eq for Pose {}
