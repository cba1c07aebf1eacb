// Weighted forced-neighbor search, a relative of jump point search that
// tolerates non-uniform movement costs:
// https://en.wikipedia.org/wiki/Jump_point_search

use log::debug;

use screeps::constants::{Direction, ROOM_AREA, ROOM_SIZE};
use screeps::local::{LocalCostMatrix, LocalRoomTerrain};
use screeps::RoomXY;

use crate::common::directions::{
    direction_offsets, general_direction, manhattan_distance, offset_direction,
    preferred_directions, reverse_direction,
};
use crate::data_structures::{OpenQueue, PendingNode};
use crate::utils::movement_costs::{default_cost_matrix_from_terrain, PLAIN_COST};
use crate::utils::pathing::PathStep;

/// One settled point of the search tree.
///
/// Nodes live in an arena and refer to their parents by index. When a
/// cheaper route to a position is found, a fresh node is appended
/// rather than mutating the old one in place, so parent chains already
/// recorded through the old node keep their costs intact.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    position: RoomXY,
    parent: Option<usize>,
    cost_so_far: u32,
}

/// A single-room path search between two fixed tiles over a snapshot
/// of movement costs.
///
/// The search expands tiles best first, ordered by cost so far plus a
/// range-based estimate, but it does not examine all eight neighbors
/// of every tile: travel continues in the direction it was going, and
/// extra directions are only queued where a cost rise beside the route
/// forces the turn to be considered. On uniform terrain this visits a
/// small fraction of the tiles plain A* would.
///
/// Tiles with cost [u8::MAX] are impassable. Every query consumes the
/// searcher, and repeated queries on equal inputs take identical
/// routes, since all priority ties are broken deterministically.
///
/// # Examples
/// ```rust
/// use screeps::{LocalRoomTerrain, RoomXY};
/// use screeps_searcher::algorithms::searcher::Searcher;
/// use screeps_searcher::utils::movement_costs::default_cost_matrix_from_terrain;
///
/// let room_terrain = LocalRoomTerrain::new_from_bits(Box::new([0; 2500]));
/// let costs = default_cost_matrix_from_terrain(&room_terrain);
///
/// let source = RoomXY::checked_new(23, 14).unwrap();
/// let target = RoomXY::checked_new(33, 19).unwrap();
///
/// let path = Searcher::new(&costs, source, target)
///     .find_single_path()
///     .unwrap();
///
/// assert_eq!(path.len(), 10);
/// assert_eq!(path.last().unwrap().x, 33);
/// assert_eq!(path.last().unwrap().y, 19);
/// ```
#[derive(Debug, Clone)]
pub struct Searcher {
    costs: LocalCostMatrix,
    source: RoomXY,
    target: RoomXY,
    target_range: u32,
    queue: OpenQueue,
    nodes: Vec<SearchNode>,
    closed: Vec<bool>,
}

impl Searcher {
    /// Initializes a searcher over a snapshot of the given movement
    /// costs.
    ///
    /// The snapshot is taken eagerly, so later changes to the caller's
    /// matrix do not affect this search.
    pub fn new(costs: &LocalCostMatrix, source: RoomXY, target: RoomXY) -> Self {
        Self {
            costs: costs.clone(),
            source,
            target,
            target_range: 0,
            queue: OpenQueue::new(),
            nodes: Vec::new(),
            closed: vec![false; ROOM_AREA],
        }
    }

    /// Initializes a searcher directly from terrain data, using the
    /// default plain and swamp costs.
    pub fn from_terrain(room_terrain: &LocalRoomTerrain, source: RoomXY, target: RoomXY) -> Self {
        Self {
            costs: default_cost_matrix_from_terrain(room_terrain),
            source,
            target,
            target_range: 0,
            queue: OpenQueue::new(),
            nodes: Vec::new(),
            closed: vec![false; ROOM_AREA],
        }
    }

    /// Marks tiles as impassable for this search only.
    ///
    /// Only the searcher's private cost snapshot is stamped; the matrix
    /// the searcher was built from is untouched. Avoiding the target
    /// itself makes exact arrival impossible, though ranged goals near
    /// it can still be reached.
    pub fn avoiding_positions(mut self, positions: &[RoomXY]) -> Self {
        for position in positions {
            self.costs.set(*position, u8::MAX);
        }
        self
    }

    /// Accepts any tile within `target_range` of the target as a goal,
    /// measured in Chebyshev range. Defaults to zero, exact arrival.
    pub fn with_target_range(mut self, target_range: u32) -> Self {
        self.target_range = target_range;
        self
    }

    /// Runs the search and returns the cheapest route found from the
    /// source to a goal tile, or None if no goal can be reached.
    ///
    /// The returned steps do not include the source tile; a search
    /// whose source already satisfies the goal yields an empty path.
    pub fn find_single_path(mut self) -> Option<Vec<PathStep>> {
        let goal = self.find_goal_node()?;
        Some(self.build_path(goal))
    }

    /// Runs the search and returns one route per distinct goal tile
    /// reachable for the same cheapest cost.
    ///
    /// With a target range of zero this is at most one path. Wider
    /// ranges can surface several equally cheap approaches, returned
    /// in the order the search settled them.
    pub fn find_all_paths(mut self) -> Vec<Vec<PathStep>> {
        let goals = self.find_all_goal_nodes();
        goals.into_iter().map(|goal| self.build_path(goal)).collect()
    }

    /// Runs the search and returns the route length in plain-tile
    /// steps, or None if no goal can be reached.
    ///
    /// Length is total movement cost scaled down by [PLAIN_COST], so
    /// one swamp tile counts the same as five plain tiles.
    pub fn find_path_length(mut self) -> Option<u32> {
        let goal = self.find_goal_node()?;
        Some(self.nodes[goal].cost_so_far / u32::from(PLAIN_COST))
    }

    /// One-shot convenience for [Searcher::find_path_length].
    pub fn path_length(costs: &LocalCostMatrix, source: RoomXY, target: RoomXY) -> Option<u32> {
        Searcher::new(costs, source, target).find_path_length()
    }

    /// Queues the source with every direction that makes progress
    /// towards the target.
    fn seed(&mut self) {
        let initial_directions = preferred_directions(self.source, self.target);
        self.add_node(self.source, None, 0, &initial_directions);
    }

    /// Drains the queue until a goal surfaces. Entries are visited
    /// best first; each visited position is closed permanently, and
    /// the entry's direction, if it has one, is followed one step.
    fn find_goal_node(&mut self) -> Option<usize> {
        self.seed();

        while let Some(entry) = self.queue.pop() {
            self.close(entry.position());

            if self.is_goal(entry.position()) {
                return Some(entry.node());
            }

            if let Some(direction) = entry.direction() {
                self.expand(entry.node(), direction);
            }
        }

        debug!(
            target: "searcher",
            "open set exhausted before reaching {:?} from {:?}",
            self.target,
            self.source
        );
        None
    }

    /// Like [Searcher::find_goal_node], but keeps draining until the
    /// pending work is strictly costlier than the first goal found,
    /// collecting every distinct goal node settled along the way.
    fn find_all_goal_nodes(&mut self) -> Vec<usize> {
        self.seed();

        let mut results: Vec<usize> = Vec::new();

        while let Some(entry) = self.queue.pop() {
            if let Some(&first) = results.first() {
                if self.nodes[entry.node()].cost_so_far > self.nodes[first].cost_so_far {
                    break;
                }
            }

            self.close(entry.position());

            if self.is_goal(entry.position()) && !results.contains(&entry.node()) {
                results.push(entry.node());
            }

            if let Some(direction) = entry.direction() {
                self.expand(entry.node(), direction);
            }
        }

        if results.is_empty() {
            debug!(
                target: "searcher",
                "no goal tiles within range {} of {:?} were reachable from {:?}",
                self.target_range,
                self.target,
                self.source
            );
        }
        results
    }

    /// Follows `direction` out of a node and queues the landing tile
    /// together with the directions it should continue in.
    ///
    /// Straight travel proposes only its own continuation, plus a
    /// forward diagonal for each side tile costlier than the landing
    /// tile. Diagonal travel proposes its continuation and both of its
    /// component directions, plus a reflected diagonal for each
    /// component tile beside the departure point that is costlier than
    /// the landing tile. Cost rises force the extra turns onto the
    /// queue; everywhere else the skipped neighbors are reachable just
    /// as cheaply through routes the search already carries.
    fn expand(&mut self, node: usize, direction: Direction) {
        let SearchNode {
            position,
            cost_so_far,
            ..
        } = self.nodes[node];

        let Some(neighbor) = position.checked_add_direction(direction) else {
            return;
        };
        if self.is_obstructed(neighbor) {
            return;
        }

        let neighbor_cost = u32::from(self.costs.get(neighbor));
        let mut proposed = vec![direction];

        let (dx, dy) = direction_offsets(direction);
        if dx == 0 || dy == 0 {
            for turn in [-1i8, 1] {
                let travel_direction = direction.multi_rot(turn);
                let beside_direction = direction.multi_rot(2 * turn);
                self.propose_if_forced(
                    &mut proposed,
                    neighbor.checked_add_direction(travel_direction),
                    neighbor.checked_add_direction(beside_direction),
                    travel_direction,
                    neighbor_cost,
                );
            }
        } else {
            let first_component = direction.multi_rot(-1);
            let second_component = direction.multi_rot(1);
            proposed.push(first_component);
            proposed.push(second_component);

            for component in [first_component, second_component] {
                let (cdx, cdy) = direction_offsets(component);
                // Reflect the travel direction across this component's
                // axis; the component offsets are (dx, 0) or (0, dy),
                // so this lands on the opposite forward diagonal.
                let Some(flank) = offset_direction(2 * cdx - dx, 2 * cdy - dy) else {
                    continue;
                };
                let beside = position.checked_add_direction(component);
                let travel = beside.and_then(|xy| xy.checked_add_direction(component));
                self.propose_if_forced(&mut proposed, travel, beside, flank, neighbor_cost);
            }
        }

        self.add_node(neighbor, Some(node), cost_so_far + neighbor_cost, &proposed);
    }

    /// Appends `forced` to the proposals if the travel tile is passable
    /// and the tile beside it costs more than the reference tile. An
    /// out-of-bounds travel or beside tile never forces anything.
    fn propose_if_forced(
        &self,
        proposed: &mut Vec<Direction>,
        travel: Option<RoomXY>,
        beside: Option<RoomXY>,
        forced: Direction,
        reference_cost: u32,
    ) {
        let Some(travel) = travel else {
            return;
        };
        if self.is_obstructed(travel) {
            return;
        }
        let Some(beside) = beside else {
            return;
        };
        if u32::from(self.costs.get(beside)) > reference_cost {
            proposed.push(forced);
        }
    }

    /// Records a route reaching `position` for `cost_so_far` and
    /// queues its pending work, unless the position is already closed.
    ///
    /// Of the proposed continuations, only directions that also make
    /// general progress towards the target are kept, in preference
    /// order. A position already queued is only replaced by a strictly
    /// cheaper route, and the replacement becomes a fresh node so that
    /// recorded parent links keep their costs.
    fn add_node(
        &mut self,
        position: RoomXY,
        parent: Option<usize>,
        cost_so_far: u32,
        proposed: &[Direction],
    ) {
        if self.is_closed(position) {
            return;
        }

        let range_to_target = u32::from(position.get_range_to(self.target));
        let estimated_cost = cost_so_far + u32::from(PLAIN_COST) * range_to_target;
        let manhattan = manhattan_distance(position, self.target);

        let directions: Vec<Direction> = preferred_directions(position, self.target)
            .into_iter()
            .filter(|direction| proposed.contains(direction))
            .collect();

        let updated = self.queue.update_position(position, |entry| {
            if estimated_cost < entry.estimated_cost() {
                self.nodes.push(SearchNode {
                    position,
                    parent,
                    cost_so_far,
                });
                Some(PendingNode {
                    node: self.nodes.len() - 1,
                    estimated_cost,
                    manhattan_distance: manhattan,
                    directions: directions.clone(),
                })
            } else {
                None
            }
        });

        if !updated {
            self.nodes.push(SearchNode {
                position,
                parent,
                cost_so_far,
            });
            self.queue.push(
                position,
                PendingNode {
                    node: self.nodes.len() - 1,
                    estimated_cost,
                    manhattan_distance: manhattan,
                    directions,
                },
            );
        }
    }

    /// Walks parent links back from a goal node, emitting one step per
    /// tile, then flips the steps into source-to-goal order.
    fn build_path(&self, goal: usize) -> Vec<PathStep> {
        let mut steps: Vec<PathStep> = Vec::new();

        let mut current = goal;
        while let Some(parent) = self.nodes[current].parent {
            let from = self.nodes[parent].position;
            let to = self.nodes[current].position;

            if let Some(direction) = general_direction(from, to) {
                let (dx, dy) = direction_offsets(direction);
                // Parent links normally span one tile, but a longer
                // straight link still expands into per-tile steps.
                let length = from.get_range_to(to);
                let mut tile = to;
                for _ in 0..length {
                    steps.push(PathStep {
                        x: tile.x.u8(),
                        y: tile.y.u8(),
                        dx,
                        dy,
                        direction,
                    });
                    match tile.checked_add_direction(reverse_direction(direction)) {
                        Some(previous) => tile = previous,
                        None => break,
                    }
                }
            }

            current = parent;
        }

        steps.reverse();
        steps
    }

    fn is_goal(&self, position: RoomXY) -> bool {
        u32::from(position.get_range_to(self.target)) <= self.target_range
    }

    fn is_obstructed(&self, position: RoomXY) -> bool {
        self.costs.get(position) == u8::MAX
    }

    fn close(&mut self, position: RoomXY) {
        self.closed[grid_index(position)] = true;
    }

    fn is_closed(&self, position: RoomXY) -> bool {
        self.closed[grid_index(position)]
    }
}

fn grid_index(position: RoomXY) -> usize {
    usize::from(position.y.u8()) * usize::from(ROOM_SIZE) + usize::from(position.x.u8())
}
