use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::utils::pathing::PathStep;

/// A simple cache for computed path data.
///
/// Paths are stored per user-chosen key (a creep name, a
/// source/target pair, whatever fits the caller); the whole cache
/// serializes, so path data can survive in memory between ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathCache<K>
where
    K: PartialEq + Eq + Hash,
{
    cache: HashMap<K, Vec<PathStep>>,
}

impl<K> PathCache<K>
where
    K: PartialEq + Eq + Hash + Clone,
{
    /// Initializes a new, empty path cache.
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Returns the cached path, if it exists. Returns None if the path isn't cached.
    ///
    /// # Examples
    /// ```rust
    /// use screeps::Direction;
    /// use screeps_searcher::utils::cache::PathCache;
    /// use screeps_searcher::utils::pathing::PathStep;
    ///
    /// // Create a new path cache that uses String as the key type
    /// let mut cache: PathCache<String> = PathCache::new();
    ///
    /// let step = PathStep { x: 25, y: 18, dx: 1, dy: 0, direction: Direction::Right };
    ///
    /// let existing_key = "existing_key".to_string();
    ///
    /// // Actually store the path in the cache
    /// assert_eq!(cache.is_path_cached(&existing_key), false);
    /// cache.update_cached_path(&existing_key, [step].into_iter());
    /// assert_eq!(cache.is_path_cached(&existing_key), true);
    ///
    /// // Pull the cached copy of the path
    /// let path_opt = cache.get_cached_path(&existing_key);
    /// assert!(path_opt.is_some());
    /// assert_eq!(path_opt.unwrap(), &[step]);
    ///
    /// // Attempt to pull a non-existent path entry
    /// let nonexisting_key = "nonexisting_key".to_string();
    /// assert!(cache.get_cached_path(&nonexisting_key).is_none());
    /// ```
    pub fn get_cached_path(&self, path_key: &K) -> Option<&[PathStep]> {
        self.cache.get(path_key).map(|v| &**v)
    }

    /// Returns whether a path is cached with the provided path key.
    pub fn is_path_cached(&self, path_key: &K) -> bool {
        self.cache.contains_key(path_key)
    }

    /// Returns the path, generating and caching it if it's not already cached.
    ///
    /// Returns None only if the path is not cached and the generation function returns None.
    ///
    /// # Examples
    /// ```rust
    /// use screeps::{LocalRoomTerrain, RoomXY};
    /// use screeps_searcher::algorithms::searcher::Searcher;
    /// use screeps_searcher::utils::cache::PathCache;
    /// use screeps_searcher::utils::movement_costs::default_cost_matrix_from_terrain;
    ///
    /// // Create a new path cache that uses String as the key type
    /// let mut cache: PathCache<String> = PathCache::new();
    ///
    /// let key = "harvester_1".to_string();
    /// assert_eq!(cache.is_path_cached(&key), false);
    ///
    /// // Pull the path, computing it since it doesn't exist
    /// let room_terrain = LocalRoomTerrain::new_from_bits(Box::new([0; 2500])); // Terrain that's all plains
    /// let costs = default_cost_matrix_from_terrain(&room_terrain);
    /// let path_opt = cache.get_path(&key, |_| {
    ///     let source = RoomXY::checked_new(23, 14).unwrap();
    ///     let target = RoomXY::checked_new(25, 14).unwrap();
    ///     Searcher::new(&costs, source, target).find_single_path()
    /// });
    ///
    /// assert!(path_opt.is_some());
    /// assert_eq!(path_opt.unwrap().len(), 2);
    /// assert_eq!(cache.is_path_cached(&key), true);
    /// ```
    pub fn get_path<G>(&mut self, path_key: &K, generator_fn: G) -> Option<&[PathStep]>
    where
        G: FnOnce(&K) -> Option<Vec<PathStep>>,
    {
        if !self.is_path_cached(path_key) {
            // We don't have a cached copy of the path, generate and cache it
            let path_opt = generator_fn(path_key);
            if let Some(path) = path_opt {
                let _ = self.cache.insert(path_key.clone(), path);
            } else {
                return None;
            }
        }

        self.get_cached_path(path_key)
    }

    /// Updates the path cache for a specific key.
    ///
    /// This allows for pre-loading the cache with any existing
    /// path data you might already have available.
    pub fn update_cached_path(&mut self, path_key: &K, path_iter: impl Iterator<Item = PathStep>) {
        let path: Vec<PathStep> = path_iter.collect();
        let _ = self.cache.insert(path_key.clone(), path);
    }

    /// Removes the path cached for a specific key.
    pub fn remove_cached_path(&mut self, path_key: &K) {
        self.cache.remove(path_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screeps::Direction;

    // Helper Functions

    fn step(x: u8, y: u8, direction: Direction) -> PathStep {
        PathStep {
            x,
            y,
            dx: 0,
            dy: 1,
            direction,
        }
    }

    // Test Cases

    #[test]
    fn generation_runs_once_per_key() {
        let mut cache: PathCache<String> = PathCache::new();
        let key = "creep".to_string();
        let path = vec![step(10, 11, Direction::Bottom)];

        let first = cache.get_path(&key, |_| Some(path.clone()));
        assert_eq!(first, Some(&path[..]));

        let second = cache.get_path(&key, |_| panic!("generator must not run for a cached key"));
        assert_eq!(second, Some(&path[..]));
    }

    #[test]
    fn failed_generation_caches_nothing() {
        let mut cache: PathCache<String> = PathCache::new();
        let key = "unreachable".to_string();

        assert!(cache.get_path(&key, |_| None).is_none());
        assert_eq!(cache.is_path_cached(&key), false);
    }

    #[test]
    fn removal_forces_regeneration() {
        let mut cache: PathCache<String> = PathCache::new();
        let key = "creep".to_string();

        cache.update_cached_path(&key, [step(10, 11, Direction::Bottom)].into_iter());
        assert_eq!(cache.is_path_cached(&key), true);

        cache.remove_cached_path(&key);
        assert_eq!(cache.is_path_cached(&key), false);

        let regenerated = cache.get_path(&key, |_| Some(vec![step(10, 12, Direction::Bottom)]));
        assert_eq!(regenerated.unwrap()[0].y, 12);
    }
}
