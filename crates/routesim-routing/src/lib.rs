//! Routesim routing — the topology store and routing-table maintenance engine.
//!
//! This crate provides:
//! - [`RoutingTable`] — per-router destination → (cost, path) store with the
//!   self-entry invariant.
//! - [`Network`] — the topology engine: router/link mutations followed by a
//!   full Dijkstra recompute pass, plus read-only cost/path queries.
//! - [`persist`] — tolerant line-oriented text load/save for topologies.
//! - [`generate`] — seeded random topology generation with no global RNG
//!   state.

pub mod generate;
pub mod network;
pub mod persist;
pub mod table;

// Re-exports for convenience.
pub use generate::{random_topology, GeneratorConfig, GeneratorError};
pub use network::Network;
pub use persist::{LoadReport, PersistError};
pub use table::{RouteEntry, RoutingTable};
