//! Attack graph storage and traversal
//!
//! Pure in-memory store, rebuilt for every analysis session.

pub mod paths;
pub mod store;
pub mod traits;

pub use paths::find_all_paths;
pub use store::{AttackGraph, GraphStats};
pub use traits::GraphQuery;
