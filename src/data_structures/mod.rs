/// Implementation of the OpenQueue structure.
pub mod open_queue;


pub use open_queue::{OpenEntry, OpenQueue, PendingNode};
