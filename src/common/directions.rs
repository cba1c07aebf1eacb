use screeps::{Direction, RoomXY};

/// Returns the (dx, dy) grid offset for a single step in a direction.
///
/// Positive y is downward, matching room coordinates.
pub fn direction_offsets(direction: Direction) -> (i8, i8) {
    match direction {
        Direction::Top => (0, -1),
        Direction::TopRight => (1, -1),
        Direction::Right => (1, 0),
        Direction::BottomRight => (1, 1),
        Direction::Bottom => (0, 1),
        Direction::BottomLeft => (-1, 1),
        Direction::Left => (-1, 0),
        Direction::TopLeft => (-1, -1),
    }
}

/// Returns the direction that undoes a single step in the given direction.
pub fn reverse_direction(direction: Direction) -> Direction {
    direction.multi_rot(4)
}

/// Returns the direction whose unit step has the same signs as the
/// given offset, or None for the zero offset.
///
/// Offsets larger than one tile map by sign alone, so (7, -2) reads as
/// [Direction::TopRight].
pub fn offset_direction(dx: i8, dy: i8) -> Option<Direction> {
    match (dx.signum(), dy.signum()) {
        (0, 0) => None,
        (0, -1) => Some(Direction::Top),
        (1, -1) => Some(Direction::TopRight),
        (1, 0) => Some(Direction::Right),
        (1, 1) => Some(Direction::BottomRight),
        (0, 1) => Some(Direction::Bottom),
        (-1, 1) => Some(Direction::BottomLeft),
        (-1, 0) => Some(Direction::Left),
        (-1, -1) => Some(Direction::TopLeft),
        _ => unreachable!(),
    }
}

/// Returns the general bearing from one tile towards another, or None
/// if the tiles are the same.
///
/// The bearing is determined by coordinate comparison alone: any target
/// that is both rightward and downward is [Direction::BottomRight], no
/// matter how unequal the two deltas are. This keeps the bearing stable
/// across an entire quadrant, which is what the preferred-direction
/// ordering wants.
pub fn general_direction(from: RoomXY, to: RoomXY) -> Option<Direction> {
    let dx = (to.x.u8() as i16 - from.x.u8() as i16).signum() as i8;
    let dy = (to.y.u8() as i16 - from.y.u8() as i16).signum() as i8;
    offset_direction(dx, dy)
}

/// Returns all eight directions ordered from most to least aligned with
/// the bearing from one tile towards another: the bearing itself, then
/// alternating clockwise/anticlockwise rotations of increasing size,
/// ending with the direction pointing straight away.
///
/// Returns an empty ordering when the tiles are the same, since no
/// direction is better-aligned than any other.
pub fn preferred_directions(from: RoomXY, to: RoomXY) -> Vec<Direction> {
    let Some(bearing) = general_direction(from, to) else {
        return Vec::new();
    };

    vec![
        bearing,
        bearing.multi_rot(1),
        bearing.multi_rot(-1),
        bearing.multi_rot(2),
        bearing.multi_rot(-2),
        bearing.multi_rot(3),
        bearing.multi_rot(-3),
        bearing.multi_rot(4),
    ]
}

/// Returns the Manhattan distance between two tiles.
pub fn manhattan_distance(a: RoomXY, b: RoomXY) -> u32 {
    let dx = (a.x.u8() as i32 - b.x.u8() as i32).unsigned_abs();
    let dy = (a.y.u8() as i32 - b.y.u8() as i32).unsigned_abs();
    dx + dy
}
