//! Integration tests exercising the full plan pipeline end to end,
//! through the public API rather than any single module.

use grid_tour_planner::config::PlannerConfig;
use grid_tour_planner::direction::Direction;
use grid_tour_planner::plan::{plan, plan_frames};
use grid_tour_planner::pose::GeoPose;
use grid_tour_planner::request::{ObstacleSpec, PlanRequest, RobotSpec};

fn obstacle(id: &str, x: i32, y: i32, direction: Direction) -> ObstacleSpec {
    ObstacleSpec {
        id: id.to_string(),
        x,
        y,
        direction,
    }
}

#[test]
fn single_obstacle_produces_a_terminated_command_sequence_with_one_snap() {
    let request = PlanRequest {
        robot: RobotSpec {
            x: 1,
            y: 1,
            direction: Direction::North,
        },
        obstacles: vec![obstacle("1", 10, 10, Direction::North)],
    };

    let outcome = plan(&request, PlannerConfig::default()).unwrap();
    assert_eq!(outcome.commands.last().map(String::as_str), Some("FIN"));
    assert_eq!(outcome.commands.iter().filter(|c| c.starts_with("SNAP")).count(), 1);
    assert!(outcome.commands.contains(&"SNAP1".to_string()));
    assert!(outcome.distance > 0);
}

#[test]
fn two_obstacles_tag_each_with_its_own_snap_exactly_once() {
    let request = PlanRequest {
        robot: RobotSpec {
            x: 1,
            y: 1,
            direction: Direction::North,
        },
        obstacles: vec![
            obstacle("1", 5, 15, Direction::North),
            obstacle("2", 15, 5, Direction::South),
        ],
    };

    let outcome = plan(&request, PlannerConfig::default()).unwrap();
    assert!(outcome.commands.contains(&"SNAP1".to_string()));
    assert!(outcome.commands.contains(&"SNAP2".to_string()));
    assert_eq!(outcome.commands.iter().filter(|c| c.starts_with("SNAP")).count(), 2);
}

/// The eight-obstacle scenario literally enumerated in
/// `original_source/testalgo.py`, rescaled to this crate's default
/// 20x20 grid (the original ran on a 40x40 grid; positions here are
/// halved to keep every obstacle comfortably inside bounds with its
/// standoff candidates).
#[test]
fn eight_obstacle_tour_visits_every_obstacle_exactly_once() {
    let request = PlanRequest {
        robot: RobotSpec {
            x: 1,
            y: 1,
            direction: Direction::North,
        },
        obstacles: vec![
            obstacle("1", 3, 3, Direction::North),
            obstacle("2", 7, 7, Direction::North),
            obstacle("3", 11, 11, Direction::North),
            obstacle("4", 15, 15, Direction::North),
            obstacle("5", 7, 15, Direction::West),
            obstacle("6", 15, 7, Direction::West),
            obstacle("7", 3, 11, Direction::West),
            obstacle("8", 8, 3, Direction::West),
        ],
    };

    let outcome = plan(&request, PlannerConfig::default()).unwrap();
    assert_eq!(outcome.commands.last().map(String::as_str), Some("FIN"));
    for id in ["1", "2", "3", "4", "5", "6", "7", "8"] {
        let tag = format!("SNAP{id}");
        assert!(
            outcome.commands.contains(&tag),
            "expected {tag} in {:?}",
            outcome.commands
        );
    }
    assert_eq!(
        outcome.commands.iter().filter(|c| c.starts_with("SNAP")).count(),
        8
    );
}

#[test]
fn duplicate_obstacle_ids_are_rejected_before_any_search_runs() {
    let request = PlanRequest {
        robot: RobotSpec {
            x: 1,
            y: 1,
            direction: Direction::North,
        },
        obstacles: vec![
            obstacle("1", 5, 5, Direction::North),
            obstacle("1", 6, 6, Direction::North),
        ],
    };

    assert!(plan(&request, PlannerConfig::default()).is_err());
}

/// spec.md §8 scenario 1: a single North-facing obstacle at (7,7) with
/// the default offset K=2 is reached at the literal terminal pose
/// (7, 9, South) — the canonical standoff pose itself, not a fallback.
#[test]
fn single_north_facing_obstacle_is_photographed_from_its_canonical_standoff_pose() {
    let request = PlanRequest {
        robot: RobotSpec {
            x: 1,
            y: 1,
            direction: Direction::North,
        },
        obstacles: vec![obstacle("1", 7, 7, Direction::North)],
    };

    let frames = plan_frames(&request, PlannerConfig::default()).unwrap();
    let snap = frames
        .iter()
        .find(|f| f.token == "SNAP1")
        .expect("SNAP1 must be emitted");
    assert_eq!(snap.pose, Some(GeoPose::new(7, 9, Direction::South)));
}

/// spec.md §8 scenario 5: obstacle (1,5,South) sits directly north of the
/// start pose (1,1,North), so the commute is a pure straight run — exactly
/// one FW token, no turns, before the SNAP/FIN tail.
#[test]
fn obstacle_directly_ahead_is_reached_by_a_single_straight_run() {
    let request = PlanRequest {
        robot: RobotSpec {
            x: 1,
            y: 1,
            direction: Direction::North,
        },
        obstacles: vec![obstacle("1", 1, 5, Direction::South)],
    };

    let outcome = plan(&request, PlannerConfig::default()).unwrap();
    let motion_tokens: Vec<&String> = outcome
        .commands
        .iter()
        .take_while(|c| !c.starts_with("SNAP"))
        .collect();
    assert_eq!(motion_tokens.len(), 1, "expected one token, got {:?}", outcome.commands);
    assert!(motion_tokens[0].starts_with("FW"), "expected a forward run, got {:?}", outcome.commands);
}

/// spec.md §8 scenario 6: obstacle (5,1,West) demands a heading change
/// from the start's North, so the very first command is an arc rather
/// than a straight run.
#[test]
fn obstacle_requiring_a_heading_change_starts_with_a_turn() {
    let request = PlanRequest {
        robot: RobotSpec {
            x: 1,
            y: 1,
            direction: Direction::North,
        },
        obstacles: vec![obstacle("1", 5, 1, Direction::West)],
    };

    let outcome = plan(&request, PlannerConfig::default()).unwrap();
    let first = outcome.commands.first().map(String::as_str);
    assert!(
        matches!(first, Some("FR") | Some("BR")),
        "expected a right-hand arc as the first command, got {:?}",
        outcome.commands
    );
}

#[test]
fn request_json_round_trips_through_the_plan_envelope() {
    let json = r#"{"data": {
        "robot": {"x": 1, "y": 1, "dir": "N"},
        "obstacles": [{"id": 1, "x": 10, "y": 10, "dir": "N"}]
    }}"#;
    let envelope: grid_tour_planner::request::RequestEnvelope =
        serde_json::from_str(json).unwrap();
    let outcome = plan(&envelope.data, PlannerConfig::default()).unwrap();
    assert!(outcome.commands.contains(&"SNAP1".to_string()));
}
