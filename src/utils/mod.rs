/// Provides caching helper structures.
pub mod cache;

/// Provides adjacency and free-space queries over room terrain.
pub mod map;

/// Provides movement-cost matrices and cost closures built from room terrain.
pub mod movement_costs;

/// Provides path step data and path-walking helpers.
pub mod pathing;
