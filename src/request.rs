//! Wire request/response types for the TCP boundary (C8).
//!
//! Mirrors `original_source/testalgo.py`'s JSON envelope (`{"data": ...,
//! "error": null}`) and `algo_server.py`'s request shape (`robot`,
//! `obstacles`, each obstacle an `id`/`x`/`y`/`direction`). Obstacle ids
//! arrive as either a JSON string or integer in the original traffic;
//! `#[serde(deserialize_with = ...)]` normalises both to `String` so the
//! rest of the planner never has to care (DESIGN.md's Open Question
//! decision on obstacle id typing).

use crate::commands::CommandFrame;
use crate::direction::Direction;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accepts a JSON string or integer obstacle id and normalises it to `String`.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> de::Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or integer obstacle id")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RobotSpec {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "dir")]
    pub direction: Direction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObstacleSpec {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "dir")]
    pub direction: Direction,
}

/// A plan request: the robot's start pose and the obstacles it must
/// photograph (spec §6 [ADD], grounded on `algo_server.py`'s single
/// inbound JSON object).
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub robot: RobotSpec,
    pub obstacles: Vec<ObstacleSpec>,
}

/// `algo_server.py` wraps the request body in a top-level `"data"` key;
/// this is the outermost shape actually read off the socket.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    pub data: PlanRequest,
}

/// The extended response form from spec §6: the plain comma-joined
/// command string, plus the pose reached after each command as a
/// semicolon-joined `"x,y,D"` list (`FIN` contributes no coordinate).
#[derive(Debug, Clone, Serialize)]
pub struct ExtendedResponse {
    pub commands_string: String,
    pub coords: String,
}

impl ExtendedResponse {
    pub fn from_frames(frames: &[CommandFrame]) -> Self {
        let commands_string = frames
            .iter()
            .map(|f| f.token.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let coords = frames
            .iter()
            .filter_map(|f| f.pose)
            .map(|p| format!("{},{},{}", p.x, p.y, p.dir.label()))
            .collect::<Vec<_>>()
            .join(";");
        Self {
            commands_string,
            coords,
        }
    }
}

/// The `testalgo.py`-style envelope: `data.distance`/`data.commands` on
/// success, `error` (and a `null` `data`) on failure.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEnvelope {
    pub data: Option<PlanData>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanData {
    pub distance: i32,
    pub commands: Vec<String>,
}

impl PlanEnvelope {
    pub fn ok(distance: i32, commands: Vec<String>) -> Self {
        Self {
            data: Some(PlanData { distance, commands }),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }
}
