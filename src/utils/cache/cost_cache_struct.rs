use std::collections::HashMap;

use screeps::{LocalCostMatrix, RoomName};

/// A simple passthrough cache that preferentially returns cached
/// movement-cost matrices for a room, dynamically generating cost data
/// as-needed from a user-provided closure and caching it before
/// returning it.
///
/// The cache is plain owned state: nothing attaches it to terrain
/// sources or to searches implicitly. Callers decide where it lives,
/// seed it with [CostCache::update_cached_costs] when they already have
/// cost data, and hand matrices on to
/// [Searcher::new](crate::algorithms::searcher::Searcher::new), which
/// takes its own private copy.
#[derive(Debug, Clone)]
pub struct CostCache {
    cache: HashMap<RoomName, LocalCostMatrix>,
}

impl CostCache {
    /// Initializes a new, empty cost cache.
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Returns the cached cost matrix, if it exists.
    ///
    /// Returns None if no costs are cached for the room.
    pub fn get_cached_costs(&self, room_name: &RoomName) -> Option<&LocalCostMatrix> {
        self.cache.get(room_name)
    }

    /// Returns whether costs are cached for a particular room.
    pub fn is_cached(&self, room_name: &RoomName) -> bool {
        self.cache.contains_key(room_name)
    }

    /// Returns the room's cost matrix, generating and caching it if
    /// it's not already cached.
    ///
    /// # Example
    /// ```rust
    /// use screeps::{LocalRoomTerrain, RoomXY};
    /// use screeps_searcher::utils::cache::CostCache;
    /// use screeps_searcher::utils::movement_costs::{default_cost_matrix_from_terrain, PLAIN_COST};
    ///
    /// let mut cache = CostCache::new();
    /// let room_name = "E5N6".parse().unwrap();
    ///
    /// assert_eq!(cache.is_cached(&room_name), false);
    ///
    /// let costs = cache.get_costs(&room_name, |_| {
    ///     let room_terrain = LocalRoomTerrain::new_from_bits(Box::new([0; 2500]));
    ///     default_cost_matrix_from_terrain(&room_terrain)
    /// });
    /// assert_eq!(costs.get(RoomXY::checked_new(24, 18).unwrap()), PLAIN_COST);
    ///
    /// assert_eq!(cache.is_cached(&room_name), true);
    /// ```
    pub fn get_costs(
        &mut self,
        room_name: &RoomName,
        generator_fn: impl FnOnce(&RoomName) -> LocalCostMatrix,
    ) -> &LocalCostMatrix {
        if self.cache.get(room_name).is_none() {
            // We don't have cached costs for the room, generate and cache them
            let costs = generator_fn(room_name);
            let _ = self.cache.insert(*room_name, costs);
        }

        self.get_cached_costs(room_name).unwrap() // We know this is okay, because we generated and inserted costs for this entry
    }

    /// Updates the cost cache for a specific room.
    ///
    /// This allows for pre-loading the cache with any existing
    /// room cost data you might already have available.
    pub fn update_cached_costs(&mut self, room_name: RoomName, costs: LocalCostMatrix) {
        let _ = self.cache.insert(room_name, costs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screeps::RoomXY;
    use std::cell::Cell;

    // Test Cases

    #[test]
    fn generates_on_miss_and_reuses_on_hit() {
        let mut cache = CostCache::new();
        let room_name: RoomName = "E5N6".parse().unwrap();
        let generated = Cell::new(0u32);

        for _ in 0..3 {
            let costs = cache.get_costs(&room_name, |_| {
                generated.set(generated.get() + 1);
                LocalCostMatrix::new()
            });
            let origin = RoomXY::checked_new(0, 0).unwrap();
            assert_eq!(costs.get(origin), 0);
        }

        assert_eq!(generated.get(), 1);
    }

    #[test]
    fn preloaded_costs_suppress_generation() {
        let mut cache = CostCache::new();
        let room_name: RoomName = "E5N6".parse().unwrap();

        cache.update_cached_costs(room_name, LocalCostMatrix::new());
        assert_eq!(cache.is_cached(&room_name), true);

        cache.get_costs(&room_name, |_| {
            panic!("generator must not run for a cached room")
        });
    }

    #[test]
    fn rooms_are_cached_independently() {
        let mut cache = CostCache::new();
        let cached: RoomName = "E5N6".parse().unwrap();
        let missing: RoomName = "W1S1".parse().unwrap();

        cache.update_cached_costs(cached, LocalCostMatrix::new());

        assert_eq!(cache.is_cached(&cached), true);
        assert_eq!(cache.is_cached(&missing), false);
        assert!(cache.get_cached_costs(&missing).is_none());
    }
}
