use screeps::constants::Terrain;
use screeps::local::LocalRoomTerrain;
use screeps::RoomXY;

/// Returns the walkable tiles bordering a position: every neighbor that
/// is not a terrain wall and that the provided occupancy lookup reports
/// free.
///
/// `is_occupied` is the static-obstacle lookup, typically backed by the
/// room's structures; swamps are walkable and are not filtered out.
pub fn find_adjacent_free_spaces(
    room_terrain: &LocalRoomTerrain,
    is_occupied: impl Fn(RoomXY) -> bool,
    position: RoomXY,
) -> Vec<RoomXY> {
    position
        .neighbors()
        .into_iter()
        .filter(|xy| room_terrain.get_xy(*xy) != Terrain::Wall)
        .filter(|xy| !is_occupied(*xy))
        .collect()
}

/// Returns whether two tiles border each other (Chebyshev distance 1).
///
/// A tile is not adjacent to itself.
pub fn are_adjacent(a: RoomXY, b: RoomXY) -> bool {
    a.get_range_to(b) == 1
}

/// Filters candidate tiles down to those bordering a position.
pub fn filter_adjacent_spaces(position: RoomXY, spaces: &[RoomXY]) -> Vec<RoomXY> {
    spaces
        .iter()
        .copied()
        .filter(|space| are_adjacent(position, *space))
        .collect()
}

/// Returns whether a tile's terrain is plain.
pub fn is_plains(room_terrain: &LocalRoomTerrain, position: RoomXY) -> bool {
    room_terrain.get_xy(position) == Terrain::Plain
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper Functions

    fn new_xy(x: u8, y: u8) -> RoomXY {
        RoomXY::checked_new(x, y).unwrap()
    }

    fn nothing_occupied(_xy: RoomXY) -> bool {
        false
    }

    // Terrain with walls and swamps on the grid diagonal, where the
    // buffer index is unambiguous: 1 = wall, 2 = swamp.
    fn diagonal_terrain(walls: &[u8], swamps: &[u8]) -> LocalRoomTerrain {
        let mut bits = [0u8; 2500];
        for &i in walls {
            bits[i as usize * 50 + i as usize] = 1;
        }
        for &i in swamps {
            bits[i as usize * 50 + i as usize] = 2;
        }
        LocalRoomTerrain::new_from_bits(Box::new(bits))
    }

    // Test Cases

    #[test]
    fn open_ground_has_eight_free_neighbors() {
        let room_terrain = diagonal_terrain(&[], &[]);
        let spaces = find_adjacent_free_spaces(&room_terrain, nothing_occupied, new_xy(25, 30));
        assert_eq!(spaces.len(), 8);
    }

    #[test]
    fn corner_tiles_have_three_neighbors() {
        let room_terrain = diagonal_terrain(&[], &[]);
        let spaces = find_adjacent_free_spaces(&room_terrain, nothing_occupied, new_xy(0, 0));
        assert_eq!(spaces.len(), 3);
    }

    #[test]
    fn walls_are_not_free_spaces_but_swamps_are() {
        let room_terrain = diagonal_terrain(&[9, 11], &[10]);
        let center = new_xy(10, 10);

        let spaces = find_adjacent_free_spaces(&room_terrain, nothing_occupied, center);

        assert_eq!(spaces.len(), 6);
        assert_eq!(spaces.contains(&new_xy(9, 9)), false);
        assert_eq!(spaces.contains(&new_xy(11, 11)), false);
        assert_eq!(spaces.contains(&new_xy(9, 10)), true);
    }

    #[test]
    fn occupied_tiles_are_not_free_spaces() {
        let room_terrain = diagonal_terrain(&[], &[]);
        let blocked = new_xy(10, 9);

        let spaces =
            find_adjacent_free_spaces(&room_terrain, |xy| xy == blocked, new_xy(10, 10));

        assert_eq!(spaces.len(), 7);
        assert_eq!(spaces.contains(&blocked), false);
    }

    #[test]
    fn adjacency_is_the_one_tile_ring() {
        let center = new_xy(20, 20);

        assert_eq!(are_adjacent(center, new_xy(21, 21)), true);
        assert_eq!(are_adjacent(center, new_xy(20, 19)), true);
        assert_eq!(are_adjacent(center, center), false);
        assert_eq!(are_adjacent(center, new_xy(22, 20)), false);
    }

    #[test]
    fn filter_adjacent_spaces_keeps_only_the_ring() {
        let center = new_xy(20, 20);
        let spaces = [new_xy(21, 20), new_xy(22, 20), new_xy(19, 19), center];

        let adjacent = filter_adjacent_spaces(center, &spaces);

        assert_eq!(adjacent, vec![new_xy(21, 20), new_xy(19, 19)]);
    }

    #[test]
    fn is_plains_distinguishes_terrain() {
        let room_terrain = diagonal_terrain(&[10], &[20]);

        assert_eq!(is_plains(&room_terrain, new_xy(30, 30)), true);
        assert_eq!(is_plains(&room_terrain, new_xy(20, 20)), false);
        assert_eq!(is_plains(&room_terrain, new_xy(10, 10)), false);
    }
}
