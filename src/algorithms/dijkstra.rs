// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use screeps::RoomXY;

/// A complete cheapest path as computed by [shortest_path_generic]:
/// the total movement cost plus every tile from start to goal,
/// endpoints included.
#[derive(Debug)]
pub struct ShortestPath {
    cost: u32,
    path: Vec<RoomXY>,
}

impl ShortestPath {
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn path(&self) -> &[RoomXY] {
        &self.path
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: u32,
    position: RoomXY,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Notice that we flip the ordering on costs.
        // In case of a tie we compare positions - this step is necessary
        // to make implementations of `PartialEq` and `Ord` consistent.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.position.cmp(&other.position))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Calculates a cheapest path from `start` to `goal` by exhaustive
/// uninformed search over the room grid.
///
/// The cost function gives the cost of stepping onto a tile and should
/// return u32::MAX for unpassable tiles.
///
/// This takes no shortcuts: every reachable tile cheaper than the goal
/// gets relaxed. The forced-neighbor searcher exists so production
/// pathfinding never has to pay for that; this implementation stays
/// around as the reference that search results are validated against.
///
/// Returns None when the goal is unreachable.
///
/// # Example
/// ```rust
/// use screeps::{LocalRoomTerrain, RoomXY};
/// use screeps_searcher::algorithms::dijkstra::shortest_path_generic;
/// use screeps_searcher::utils::movement_costs::{
///     default_cost_matrix_from_terrain, movement_costs_from_cost_matrix,
/// };
///
/// let start = RoomXY::checked_new(24, 18).unwrap();
/// let goal = RoomXY::checked_new(34, 40).unwrap();
/// let room_terrain = LocalRoomTerrain::new_from_bits(Box::new([0; 2500])); // Terrain that's all plains
/// let costs = default_cost_matrix_from_terrain(&room_terrain);
/// let costs_fn = movement_costs_from_cost_matrix(&costs);
///
/// match shortest_path_generic(start, goal, costs_fn) {
///     Some(result) => println!("Cheapest cost: {}", result.cost()),
///     None => println!("Could not find a path."),
/// }
/// ```
///
/// Reference: https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
pub fn shortest_path_generic<G>(start: RoomXY, goal: RoomXY, cost_fn: G) -> Option<ShortestPath>
where
    G: Fn(RoomXY) -> u32,
{
    // Start at `start` and use `dist` to track the current shortest distance
    // to each node. This implementation isn't memory-efficient as it may leave
    // duplicate nodes in the queue. It also uses `u32::MAX` as a sentinel value,
    // for a simpler implementation.

    // dist[node] = current shortest distance from `start` to `node`
    let mut dist: HashMap<RoomXY, u32> = HashMap::new();
    let mut parents: HashMap<RoomXY, RoomXY> = HashMap::new();

    let mut heap = BinaryHeap::new();

    // We're at `start`, with a zero cost
    dist.insert(start, 0);
    heap.push(State {
        cost: 0,
        position: start,
    });

    // Examine the frontier with lower cost nodes first (min-heap)
    while let Some(State { cost, position }) = heap.pop() {
        // We found the goal state, return the search results
        if position == goal {
            let path = get_path_from_parents(&parents, start, position)?;
            return Some(ShortestPath { cost, path });
        }

        // Important as we may have already found a better way
        let current_cost = dist.get(&position).copied().unwrap_or(u32::MAX);
        if cost > current_cost {
            continue;
        }

        // For each node we can reach, see if we can find a way with
        // a lower cost going through this node
        for p in position.neighbors() {
            let next_tile_cost = cost_fn(p);

            // u32::MAX is our sentinel value for unpassable, skip this neighbor
            if next_tile_cost == u32::MAX {
                continue;
            }

            let next = State {
                cost: cost + next_tile_cost,
                position: p,
            };

            // If so, add it to the frontier and continue
            let current_next_cost = dist.get(&next.position).copied().unwrap_or(u32::MAX);
            if next.cost < current_next_cost {
                heap.push(next);

                // Relaxation, we have now found a better way
                dist.insert(next.position, next.cost);
                parents.insert(next.position, position);
            }
        }
    }

    // Goal not reachable
    None
}

fn get_path_from_parents(
    parents: &HashMap<RoomXY, RoomXY>,
    origin: RoomXY,
    end: RoomXY,
) -> Option<Vec<RoomXY>> {
    let mut path = Vec::new();

    let mut current_pos = end;

    path.push(end);

    while current_pos != origin {
        let parent = parents.get(&current_pos)?;
        path.push(*parent);
        current_pos = *parent;
    }

    Some(path.into_iter().rev().collect())
}
