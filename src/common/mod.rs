/// Provides direction and grid-offset arithmetic shared across the crate
pub mod directions;
