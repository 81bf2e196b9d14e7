//! Command synthesis and its inverse (C7).
//!
//! Walks a stitched pose trace and emits the wire command tokens: runs
//! of the same straight primitive collapse into one `FW{10k}`/`BW{10k}`
//! token (spec §4.7), arcs stay one token per primitive, a tagged pose
//! emits `SNAP{id}` immediately after the token that reaches it, and the
//! whole sequence ends with `FIN`. `reconstruct_trace` is the bijective
//! inverse used by the round-trip property in spec §8.

use crate::config::PlannerConfig;
use crate::pose::{GeoPose, Pose};
use crate::primitives::{Primitive, ALL as ALL_PRIMITIVES};

/// Identifies which single primitive connects adjacent stitched poses
/// `a` -> `b`. Every primitive's (heading change, net offset) pair is
/// distinct for a fixed starting heading, so at most one match exists.
fn classify(a: &GeoPose, b: &GeoPose, config: &PlannerConfig) -> Option<Primitive> {
    ALL_PRIMITIVES.into_iter().find(|&p| {
        p.end_dir(a.dir) == b.dir && p.net_offset(a.dir, config) == (b.x - a.x, b.y - a.y)
    })
}

/// One emitted token, paired with the pose reached by executing it.
/// `pose` is `None` only for `FIN`, which performs no motion (spec §6's
/// extended response: "`FIN` emits none").
pub struct CommandFrame {
    pub token: String,
    pub pose: Option<GeoPose>,
}

fn flush_straight_run(frames: &mut Vec<CommandFrame>, run: &mut Option<(Primitive, i32, GeoPose)>) {
    if let Some((primitive, count, pose)) = run.take() {
        let distance = 10 * count;
        let token = match primitive {
            Primitive::Fwd => format!("FW{distance}"),
            Primitive::Bwd => format!("BW{distance}"),
            _ => unreachable!("only straight primitives accumulate a run"),
        };
        frames.push(CommandFrame {
            token,
            pose: Some(pose),
        });
    }
}

/// Produces the ordered command tokens for `trace`, each paired with the
/// pose reached by executing it (spec §4.7, and §6's extended response
/// `coords` field).
///
/// Panics if two adjacent poses in `trace` aren't connected by exactly
/// one primitive under `config` — `trace` is expected to come straight
/// from `stitch::stitch`, which only ever concatenates real A* legs.
pub fn synthesize_with_poses(trace: &[Pose], config: &PlannerConfig) -> Vec<CommandFrame> {
    let mut frames = Vec::new();
    let mut run: Option<(Primitive, i32, GeoPose)> = None;

    for pair in trace.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let primitive = classify(&a.geo, &b.geo, config)
            .expect("adjacent stitched poses must be connected by exactly one primitive");

        if primitive.is_straight() {
            match &mut run {
                Some((current, count, pose)) if *current == primitive => {
                    *count += 1;
                    *pose = b.geo;
                }
                _ => {
                    flush_straight_run(&mut frames, &mut run);
                    run = Some((primitive, 1, b.geo));
                }
            }
        } else {
            flush_straight_run(&mut frames, &mut run);
            frames.push(CommandFrame {
                token: primitive.token().to_string(),
                pose: Some(b.geo),
            });
        }

        if let Some(tag) = &b.snap {
            flush_straight_run(&mut frames, &mut run);
            frames.push(CommandFrame {
                token: format!("SNAP{tag}"),
                pose: Some(b.geo),
            });
        }
    }

    flush_straight_run(&mut frames, &mut run);
    frames.push(CommandFrame {
        token: "FIN".to_string(),
        pose: None,
    });
    frames
}

/// Produces just the ordered command tokens for `trace` (spec §4.7).
pub fn synthesize(trace: &[Pose], config: &PlannerConfig) -> Vec<String> {
    synthesize_with_poses(trace, config)
        .into_iter()
        .map(|frame| frame.token)
        .collect()
}

fn parse_token(token: &str) -> Option<(Primitive, i32)> {
    if let Some(n) = token.strip_prefix("FW") {
        return Some((Primitive::Fwd, n.parse().ok()?));
    }
    if let Some(n) = token.strip_prefix("BW") {
        return Some((Primitive::Bwd, n.parse().ok()?));
    }
    match token {
        "FL" => Some((Primitive::FwdLeft, 1)),
        "FR" => Some((Primitive::FwdRight, 1)),
        "BL" => Some((Primitive::BwdLeft, 1)),
        "BR" => Some((Primitive::BwdRight, 1)),
        _ => None,
    }
}

/// Replays `commands` from `start`, returning the full pose trace they
/// describe. The inverse of `synthesize` modulo snap tags, which carry
/// no geometric information (spec §8: "encoding the same trace through
/// `synthesize` then `reconstruct_trace` recovers every geometric pose").
pub fn reconstruct_trace(start: GeoPose, commands: &[String], config: &PlannerConfig) -> Vec<GeoPose> {
    let mut trace = vec![start];
    let mut current = start;

    for token in commands {
        if token == "FIN" || token.starts_with("SNAP") {
            continue;
        }
        let Some((primitive, magnitude)) = parse_token(token) else {
            continue;
        };
        let steps = if primitive.is_straight() { magnitude / 10 } else { 1 };
        for _ in 0..steps {
            let (dx, dy) = primitive.net_offset(current.dir, config);
            let end_dir = primitive.end_dir(current.dir);
            current = GeoPose::new(current.x + dx, current.y + dy, end_dir);
            trace.push(current);
        }
    }

    trace
}
