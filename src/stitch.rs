//! Path stitching (C6).
//!
//! Concatenates each leg's pose sequence into one global trace, tagging
//! only the terminal pose of each leg with its obstacle id (spec §4.6)
//! and dropping the duplicate join pose where one leg's end coincides
//! with the next leg's start.

use crate::pose::Pose;
use crate::tour::Tour;

/// Flattens `tour`'s legs into one ordered pose sequence. The very first
/// pose (the robot's start) carries no tag; every leg's final pose is
/// tagged with that leg's obstacle id; every other pose is untagged.
pub fn stitch(start: crate::pose::GeoPose, tour: &Tour) -> Vec<Pose> {
    let mut out = vec![Pose {
        geo: start,
        snap: None,
    }];

    for leg in &tour.legs {
        // `leg.path` includes its own starting pose, which is the
        // previous leg's (or the robot's) final pose — already present
        // as the last element of `out`. Skip it to avoid a duplicate.
        let rest = &leg.path[1..];
        for (i, pose) in rest.iter().enumerate() {
            let is_last = i == rest.len() - 1;
            out.push(Pose {
                geo: *pose,
                snap: if is_last { Some(leg.obstacle_id.clone()) } else { None },
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::pose::GeoPose;
    use crate::tour::Leg;

    #[test]
    fn single_leg_tags_only_its_final_pose() {
        let start = GeoPose::new(1, 1, Direction::North);
        let path = vec![
            start,
            GeoPose::new(1, 2, Direction::North),
            GeoPose::new(1, 3, Direction::North),
        ];
        let tour = Tour {
            legs: vec![Leg {
                obstacle_id: "1".into(),
                target: *path.last().unwrap(),
                path: path.clone(),
                cost: 20,
            }],
            total_cost: 20,
        };
        let stitched = stitch(start, &tour);
        assert_eq!(stitched.len(), 3);
        assert!(stitched[0].snap.is_none());
        assert!(stitched[1].snap.is_none());
        assert_eq!(stitched[2].snap.as_deref(), Some("1"));
    }

    #[test]
    fn consecutive_legs_do_not_duplicate_the_shared_join_pose() {
        let start = GeoPose::new(1, 1, Direction::North);
        let mid = GeoPose::new(1, 3, Direction::North);
        let end = GeoPose::new(1, 5, Direction::North);
        let tour = Tour {
            legs: vec![
                Leg {
                    obstacle_id: "1".into(),
                    target: mid,
                    path: vec![start, mid],
                    cost: 10,
                },
                Leg {
                    obstacle_id: "2".into(),
                    target: end,
                    path: vec![mid, end],
                    cost: 10,
                },
            ],
            total_cost: 20,
        };
        let stitched = stitch(start, &tour);
        // start, mid(tagged "1"), end(tagged "2") -- mid appears once.
        assert_eq!(stitched.len(), 3);
        assert_eq!(stitched[1].snap.as_deref(), Some("1"));
        assert_eq!(stitched[2].snap.as_deref(), Some("2"));
    }
}
