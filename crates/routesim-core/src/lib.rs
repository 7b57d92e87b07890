//! Routesim core — shared domain types and the topology error taxonomy.

pub mod error;
pub mod types;

pub use error::TopologyError;
pub use types::{Link, RouterId};
