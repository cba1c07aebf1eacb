/// Provides common definitions used across the crate
pub mod common;

/// Provides individual algorithm implementations
pub mod algorithms;

/// Provides the priority queue backing the search
pub mod data_structures;

/// Provides helper methods to simplify using algorithms
pub mod utils;
