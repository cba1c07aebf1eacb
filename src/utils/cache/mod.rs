/// Implementation of the CostCache structure.
pub mod cost_cache_struct;

/// Implementation of the PathCache structure.
pub mod path_cache_struct;

pub use cost_cache_struct::CostCache;
pub use path_cache_struct::PathCache;
