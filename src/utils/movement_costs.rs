use screeps::constants::Terrain;
use screeps::local::{LocalCostMatrix, LocalRoomTerrain};
use screeps::RoomXY;

/// Movement cost of a plain tile. This is also the scale of the search
/// heuristic and of [Searcher::find_path_length](crate::algorithms::searcher::Searcher::find_path_length):
/// one unit of path length is one plain-tile step.
pub const PLAIN_COST: u8 = 2;

/// Movement cost of a swamp tile.
pub const SWAMP_COST: u8 = 10;

/// Builds a movement cost matrix from room terrain, mapping walls to
/// [u8::MAX] (impassable) and everything else to the provided costs.
pub fn cost_matrix_from_terrain(
    room_terrain: &LocalRoomTerrain,
    plain_cost: u8,
    swamp_cost: u8,
) -> LocalCostMatrix {
    let mut cm = LocalCostMatrix::new();

    for (xy, val) in cm.iter_mut() {
        *val = match room_terrain.get_xy(xy) {
            Terrain::Wall => u8::MAX,
            Terrain::Plain => plain_cost,
            Terrain::Swamp => swamp_cost,
        }
    }

    cm
}

/// Builds a movement cost matrix from room terrain using the crate's
/// default costs ([PLAIN_COST]/[SWAMP_COST]).
pub fn default_cost_matrix_from_terrain(room_terrain: &LocalRoomTerrain) -> LocalCostMatrix {
    cost_matrix_from_terrain(room_terrain, PLAIN_COST, SWAMP_COST)
}

/// Builds a cost function closure that pulls costs from a `LocalCostMatrix`.
///
/// Impassable tiles ([u8::MAX] in the matrix) come back as [u32::MAX],
/// the sentinel the Dijkstra reference expects.
///
/// # Example
/// ```rust
/// use screeps::{LocalRoomTerrain, RoomXY};
/// use screeps_searcher::utils::movement_costs::{
///     cost_matrix_from_terrain, movement_costs_from_cost_matrix, PLAIN_COST, SWAMP_COST,
/// };
///
/// let room_terrain = LocalRoomTerrain::new_from_bits(Box::new([0; 2500])); // Terrain that's all plains
/// let costs = cost_matrix_from_terrain(&room_terrain, PLAIN_COST, SWAMP_COST);
///
/// let costs_fn = movement_costs_from_cost_matrix(&costs);
///
/// let xy = RoomXY::checked_new(24, 18).unwrap();
/// assert_eq!(costs_fn(xy), PLAIN_COST as u32);
/// ```
pub fn movement_costs_from_cost_matrix(cm: &LocalCostMatrix) -> impl Fn(RoomXY) -> u32 + '_ {
    |xy| {
        let value = cm.get(xy);
        match value {
            u8::MAX => u32::MAX,
            _ => value as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper Functions

    fn new_xy(x: u8, y: u8) -> RoomXY {
        RoomXY::checked_new(x, y).unwrap()
    }

    // Test Cases

    #[test]
    fn all_plains_terrain_costs_plain_everywhere() {
        let room_terrain = LocalRoomTerrain::new_from_bits(Box::new([0; 2500]));
        let cm = default_cost_matrix_from_terrain(&room_terrain);

        assert_eq!(cm.get(new_xy(0, 0)), PLAIN_COST);
        assert_eq!(cm.get(new_xy(24, 18)), PLAIN_COST);
        assert_eq!(cm.get(new_xy(49, 49)), PLAIN_COST);
    }

    #[test]
    fn walls_and_swamps_map_to_their_costs() {
        // Terrain bit flags: 1 = wall, 2 = swamp. Flagged tiles sit on
        // the grid diagonal, where the buffer index is unambiguous.
        let mut bits = [0u8; 2500];
        bits[10 * 50 + 10] = 1;
        bits[20 * 50 + 20] = 2;
        let room_terrain = LocalRoomTerrain::new_from_bits(Box::new(bits));

        let cm = cost_matrix_from_terrain(&room_terrain, PLAIN_COST, SWAMP_COST);

        assert_eq!(cm.get(new_xy(10, 10)), u8::MAX);
        assert_eq!(cm.get(new_xy(20, 20)), SWAMP_COST);
        assert_eq!(cm.get(new_xy(30, 30)), PLAIN_COST);
    }

    #[test]
    fn cost_closure_reports_impassable_as_u32_max() {
        let mut bits = [0u8; 2500];
        bits[10 * 50 + 10] = 1;
        let room_terrain = LocalRoomTerrain::new_from_bits(Box::new(bits));
        let cm = default_cost_matrix_from_terrain(&room_terrain);

        let costs_fn = movement_costs_from_cost_matrix(&cm);

        assert_eq!(costs_fn(new_xy(10, 10)), u32::MAX);
        assert_eq!(costs_fn(new_xy(11, 10)), PLAIN_COST as u32);
    }
}
