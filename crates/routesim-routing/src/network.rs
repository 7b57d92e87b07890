use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use tracing::{debug, trace};

use routesim_core::{Link, RouterId, TopologyError};

use crate::table::RoutingTable;

/// The topology engine.
///
/// Owns the router registry (each router's [`RoutingTable`] lives and dies
/// with it) and the symmetric adjacency structure. Every successful topology
/// mutation ends with a full recompute pass — one Dijkstra run per router —
/// so queries never compute anything: they read the stored tables.
///
/// Mutations are atomic from the caller's perspective: arguments are
/// validated before any state changes, so a rejected call leaves the
/// topology and every routing table untouched.
///
/// `BTreeMap` keeps router and neighbor iteration deterministic within and
/// across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Network {
    routers: BTreeMap<RouterId, RoutingTable>,
    /// Symmetric adjacency: `adjacency[a][b] == adjacency[b][a]` always,
    /// and every endpoint present here is a registered router.
    adjacency: BTreeMap<RouterId, BTreeMap<RouterId, u32>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Register a router with an empty neighbor set and a routing table
    /// holding only its self-entry. No recompute runs: no link changed, so
    /// no other router's table is affected.
    pub fn add_router(&mut self, name: impl Into<RouterId>) -> Result<(), TopologyError> {
        let id = name.into();
        if self.routers.contains_key(&id) {
            return Err(TopologyError::RouterExists(id));
        }
        debug!(router = %id, "router added");
        self.adjacency.insert(id.clone(), BTreeMap::new());
        self.routers.insert(id.clone(), RoutingTable::new(id));
        Ok(())
    }

    /// Remove a router, every link incident to it, and its routing table,
    /// then recompute all remaining tables.
    pub fn remove_router(&mut self, name: &str) -> Result<(), TopologyError> {
        if self.routers.remove(name).is_none() {
            return Err(TopologyError::RouterNotFound(name.into()));
        }
        self.adjacency.remove(name);
        for neighbors in self.adjacency.values_mut() {
            neighbors.remove(name);
        }
        debug!(router = name, "router removed");
        self.recompute_tables();
        Ok(())
    }

    /// Set the symmetric link weight between `a` and `b`, inserting a new
    /// link or overwriting an existing one, then recompute all tables.
    pub fn add_link(&mut self, a: &str, b: &str, cost: u32) -> Result<(), TopologyError> {
        if a == b {
            return Err(TopologyError::SelfLink(a.into()));
        }
        let a = self.registered_id(a)?;
        let b = self.registered_id(b)?;
        if cost == 0 {
            return Err(TopologyError::InvalidCost(0));
        }
        self.set_symmetric_edge(a.clone(), b.clone(), cost);
        debug!(a = %a, b = %b, cost, "link set");
        self.recompute_tables();
        Ok(())
    }

    /// Delete the link between `a` and `b`, then recompute all tables.
    pub fn remove_link(&mut self, a: &str, b: &str) -> Result<(), TopologyError> {
        if !self.has_link(a, b) {
            return Err(TopologyError::LinkNotFound {
                a: a.into(),
                b: b.into(),
            });
        }
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.remove(b);
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            neighbors.remove(a);
        }
        debug!(a, b, "link removed");
        self.recompute_tables();
        Ok(())
    }

    /// Overwrite the cost of an existing link, then recompute all tables.
    pub fn update_link_cost(&mut self, a: &str, b: &str, new_cost: u32) -> Result<(), TopologyError> {
        if !self.has_link(a, b) {
            return Err(TopologyError::LinkNotFound {
                a: a.into(),
                b: b.into(),
            });
        }
        if new_cost == 0 {
            return Err(TopologyError::InvalidCost(0));
        }
        let a = self.registered_id(a)?;
        let b = self.registered_id(b)?;
        self.set_symmetric_edge(a.clone(), b.clone(), new_cost);
        debug!(a = %a, b = %b, new_cost, "link cost updated");
        self.recompute_tables();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Queries — read stored tables, never compute.
    // ---------------------------------------------------------------------

    /// Stored cost from `source` to `destination`. `None` means unreachable,
    /// including the case of an unregistered source — that is not an error.
    pub fn cost_between(&self, source: &str, destination: &str) -> Option<u32> {
        self.routers.get(source)?.cost_to(destination)
    }

    /// Stored hop sequence from `source` to `destination`, both endpoints
    /// inclusive. `None` means unreachable.
    pub fn path_between(&self, source: &str, destination: &str) -> Option<&[RouterId]> {
        self.routers.get(source)?.path_to(destination)
    }

    pub fn contains_router(&self, name: &str) -> bool {
        self.routers.contains_key(name)
    }

    pub fn has_link(&self, a: &str, b: &str) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains_key(b))
    }

    /// Registered router ids in lexicographic order.
    pub fn router_ids(&self) -> impl Iterator<Item = &RouterId> {
        self.routers.keys()
    }

    pub fn router_count(&self) -> usize {
        self.routers.len()
    }

    /// Every link exactly once (endpoints normalized), in order.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (a, neighbors) in &self.adjacency {
            for (b, &cost) in neighbors {
                if a < b {
                    links.push(Link::new(a.clone(), b.clone(), cost));
                }
            }
        }
        links
    }

    pub fn link_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    pub fn routing_table(&self, name: &str) -> Option<&RoutingTable> {
        self.routers.get(name)
    }

    // ---------------------------------------------------------------------
    // Recompute pass
    // ---------------------------------------------------------------------

    /// Rebuild every router's routing table from the current adjacency.
    ///
    /// One single-source Dijkstra run per registered router. Tables are
    /// cleared and fully rewritten — never patched — so running this twice
    /// without an intervening mutation yields identical tables.
    fn recompute_tables(&mut self) {
        debug!(
            routers = self.routers.len(),
            links = self.link_count(),
            "recomputing routing tables"
        );
        let sources: Vec<RouterId> = self.routers.keys().cloned().collect();
        for source in sources {
            let (dist, prev) = self.shortest_paths(&source);
            let Some(table) = self.routers.get_mut(&source) else {
                continue;
            };
            table.clear();
            for (destination, &cost) in &dist {
                if destination == &source {
                    continue;
                }
                if let Some(path) = reconstruct_path(&prev, &source, destination) {
                    table.insert(destination.clone(), cost, path);
                }
            }
            trace!(source = %source, reachable = table.len(), "routing table rebuilt");
        }
    }

    /// Single-source Dijkstra over non-negative integer weights.
    ///
    /// Returns the final distance map (only routers reachable from `source`
    /// appear) and the predecessor map used for path reconstruction.
    ///
    /// Tie-break rule: the heap orders by `(distance, router id)`, so among
    /// equal tentative distances the lexicographically smaller router
    /// settles first, and relaxation uses strict `<`. The chosen equal-cost
    /// path is therefore stable across runs; the costs themselves never
    /// depend on iteration order.
    fn shortest_paths(
        &self,
        source: &RouterId,
    ) -> (BTreeMap<RouterId, u32>, BTreeMap<RouterId, RouterId>) {
        let mut dist: BTreeMap<RouterId, u32> = BTreeMap::new();
        let mut prev: BTreeMap<RouterId, RouterId> = BTreeMap::new();
        let mut heap: BinaryHeap<Reverse<(u32, RouterId)>> = BinaryHeap::new();

        dist.insert(source.clone(), 0);
        heap.push(Reverse((0, source.clone())));

        while let Some(Reverse((current_dist, current))) = heap.pop() {
            // Stale heap entry for an already-settled router.
            if current_dist > dist.get(&current).copied().unwrap_or(u32::MAX) {
                continue;
            }
            let Some(neighbors) = self.adjacency.get(&current) else {
                continue;
            };
            for (neighbor, &edge_cost) in neighbors {
                let candidate = current_dist.saturating_add(edge_cost);
                if candidate < dist.get(neighbor).copied().unwrap_or(u32::MAX) {
                    dist.insert(neighbor.clone(), candidate);
                    prev.insert(neighbor.clone(), current.clone());
                    heap.push(Reverse((candidate, neighbor.clone())));
                }
            }
        }

        (dist, prev)
    }

    /// Owned clone of the registered id for `name`, or `RouterNotFound`.
    fn registered_id(&self, name: &str) -> Result<RouterId, TopologyError> {
        self.routers
            .get_key_value(name)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| TopologyError::RouterNotFound(name.into()))
    }

    fn set_symmetric_edge(&mut self, a: RouterId, b: RouterId, cost: u32) {
        self.adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone(), cost);
        self.adjacency.entry(b).or_default().insert(a, cost);
    }
}

/// Walk the predecessor map from `destination` back to `source` and reverse.
/// `None` if the chain is broken (destination unreached).
fn reconstruct_path(
    prev: &BTreeMap<RouterId, RouterId>,
    source: &RouterId,
    destination: &RouterId,
) -> Option<Vec<RouterId>> {
    let mut path = vec![destination.clone()];
    let mut current = destination;
    while current != source {
        current = prev.get(current)?;
        path.push(current.clone());
    }
    path.reverse();
    Some(path)
}
