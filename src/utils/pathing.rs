use log::debug;
use serde::{Deserialize, Serialize};

use screeps::{Direction, RoomXY};

use crate::common::directions::{direction_offsets, general_direction, reverse_direction};

/// One step of a computed path: the tile the step lands on, the offset
/// traveled to get there, and the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub x: u8,
    pub y: u8,
    pub dx: i8,
    pub dy: i8,
    pub direction: Direction,
}

/// Returns the path that retraces a path's tiles in the opposite
/// direction: each step of the result lands on the tile the
/// corresponding original step departed from, traveling the reverse
/// octant, with the step order flipped end to end. Reversing twice
/// returns the original path.
pub fn reverse_path(path: &[PathStep]) -> Vec<PathStep> {
    path.iter()
        .rev()
        .map(|step| {
            let direction = reverse_direction(step.direction);
            let (dx, dy) = direction_offsets(direction);
            PathStep {
                x: (step.x as i16 + dx as i16) as u8,
                y: (step.y as i16 + dy as i16) as u8,
                dx,
                dy,
                direction,
            }
        })
        .collect()
}

/// Utility function for converting a position and a path into a
/// direction for the next movement on the path.
///
/// If the position is not on the path, it will return a direction that
/// moves towards the first tile of the path.
///
/// Returns None if the current position is the final tile in the path,
/// or if the path is empty.
pub fn next_step_direction(current: RoomXY, path: &[PathStep]) -> Option<Direction> {
    if path.is_empty() {
        return None;
    }

    for i in 0..path.len() {
        let step = &path[i];
        if step.x == current.x.u8() && step.y == current.y.u8() {
            // Check if the current position is the last entry in the path
            if i == (path.len() - 1) {
                return None; // No next step if we're at the last entry
            } else {
                // The next step's own direction is the move out of this tile
                return Some(path[i + 1].direction);
            }
        }
    }

    // No next step if we're not on the path at all, move towards the path start
    debug!(target: "next_step", "{:?} is not on the path, steering towards its start", current);
    let first = &path[0];
    let first_xy = RoomXY::checked_new(first.x, first.y).ok()?;
    general_direction(current, first_xy)
}
