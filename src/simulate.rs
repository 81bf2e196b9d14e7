//! ASCII-grid debug renderer (C8 [ADD]).
//!
//! The non-interactive, read-only counterpart to
//! `original_source/simulator.py`'s Tkinter canvas: it draws the same
//! picture (grid cells, obstacles, the robot's 3x3 footprint with its
//! front cell marked) as one static block of text rather than a GUI.
//! Not a simulator in the original sense — no mouse-driven obstacle
//! placement, no "Run Algorithm" button, just a rendering of a single
//! already-computed outcome.

use crate::direction::Direction;
use crate::grid::Grid;
use crate::pose::GeoPose;

/// The cell directly in front of `pose`'s anchor, in the direction it
/// faces — drawn as the "camera" cell, matching `draw_car`'s highlighted
/// front-middle square.
fn front_cell(pose: &GeoPose) -> (i32, i32) {
    let (dx, dy) = pose.dir.unit_step();
    (pose.x + 1 + dx, pose.y + 1 + dy)
}

/// Renders `grid` with the robot at `robot` as a grid of characters,
/// one row of text per grid row, printed north-up (row 0 of the text is
/// the highest `y`, matching the picture `simulator.py` draws).
///
/// Legend: `.` empty, `#` obstacle cell, `o` robot footprint, `^`/`>`/
/// `v`/`<` the robot's front ("camera") cell, oriented by heading.
pub fn render(grid: &Grid, robot: &GeoPose) -> String {
    let config = grid.config();
    let mut rows = Vec::with_capacity(config.height as usize);

    for y in (0..config.height).rev() {
        let mut line = String::with_capacity(config.width as usize);
        for x in 0..config.width {
            line.push(cell_glyph(grid, robot, x, y));
        }
        rows.push(line);
    }
    rows.join("\n")
}

fn cell_glyph(grid: &Grid, robot: &GeoPose, x: i32, y: i32) -> char {
    if (x, y) == front_cell(robot) {
        return match robot.dir {
            Direction::North => '^',
            Direction::East => '>',
            Direction::South => 'v',
            Direction::West => '<',
        };
    }
    if in_footprint(robot, x, y) {
        return 'o';
    }
    if grid.obstacles().any(|o| o.x == x && o.y == y) {
        return '#';
    }
    '.'
}

fn in_footprint(pose: &GeoPose, x: i32, y: i32) -> bool {
    x >= pose.x && x < pose.x + 3 && y >= pose.y && y < pose.y + 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;

    #[test]
    fn render_marks_the_front_cell_with_a_heading_arrow() {
        let mut config = PlannerConfig::default();
        config.width = 5;
        config.height = 5;
        let grid = Grid::new(config);
        let robot = GeoPose::new(1, 1, Direction::North);
        let text = render(&grid, &robot);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        // Front cell of a North-facing robot anchored at (1,1) is (2,3);
        // text row 0 is the top (y=4), so (2,3) is text row 1.
        assert_eq!(lines[1].chars().nth(2), Some('^'));
    }

    #[test]
    fn render_draws_obstacles_outside_the_footprint_as_hashes() {
        let mut config = PlannerConfig::default();
        config.width = 5;
        config.height = 5;
        let mut grid = Grid::new(config);
        grid.add_obstacle("1".into(), 4, 0, Direction::North).unwrap();
        let robot = GeoPose::new(0, 0, Direction::North);
        let text = render(&grid, &robot);
        let bottom_row = text.lines().last().unwrap();
        assert_eq!(bottom_row.chars().nth(4), Some('#'));
    }
}
