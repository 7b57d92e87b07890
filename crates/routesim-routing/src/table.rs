use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use routesim_core::RouterId;

/// A single routing-table entry: total cost and the full hop sequence from
/// the owning router to the destination, inclusive of both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub cost: u32,
    pub path: Vec<RouterId>,
}

/// Per-router routing table: maps each reachable destination to the best
/// known cost and path from the owning router.
///
/// This is purely a keyed store — the shortest-path computation lives in
/// [`crate::network::Network`]. The only invariant enforced here is the
/// self-entry: the owner always maps to cost 0 with path `[owner]`, and
/// [`clear`](RoutingTable::clear) reinstates it. A destination with no entry
/// is unreachable; there is no sentinel cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTable {
    owner: RouterId,
    entries: BTreeMap<RouterId, RouteEntry>,
}

impl RoutingTable {
    /// Create a table holding only the owner's self-entry.
    pub fn new(owner: RouterId) -> Self {
        let mut table = Self {
            owner,
            entries: BTreeMap::new(),
        };
        table.insert_self_entry();
        table
    }

    fn insert_self_entry(&mut self) {
        self.entries.insert(
            self.owner.clone(),
            RouteEntry {
                cost: 0,
                path: vec![self.owner.clone()],
            },
        );
    }

    pub fn owner(&self) -> &RouterId {
        &self.owner
    }

    /// Insert or overwrite the entry for `destination`.
    pub fn insert(&mut self, destination: RouterId, cost: u32, path: Vec<RouterId>) {
        self.entries.insert(destination, RouteEntry { cost, path });
    }

    /// Discard every entry and reinstate the self-entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.insert_self_entry();
    }

    /// Stored cost to `destination`, `None` if unreachable.
    pub fn cost_to(&self, destination: &str) -> Option<u32> {
        self.entries.get(destination).map(|entry| entry.cost)
    }

    /// Stored path to `destination`, `None` if unreachable.
    pub fn path_to(&self, destination: &str) -> Option<&[RouterId]> {
        self.entries.get(destination).map(|entry| entry.path.as_slice())
    }

    pub fn contains(&self, destination: &str) -> bool {
        self.entries.contains_key(destination)
    }

    /// Iterate entries in destination order.
    pub fn entries(&self) -> impl Iterator<Item = (&RouterId, &RouteEntry)> {
        self.entries.iter()
    }

    /// Number of entries, the self-entry included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> RouterId {
        RouterId::from(name)
    }

    #[test]
    fn test_new_table_has_only_self_entry() {
        let table = RoutingTable::new(id("A"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.cost_to("A"), Some(0));
        assert_eq!(table.path_to("A"), Some(&[id("A")][..]));
    }

    #[test]
    fn test_insert_overwrites_prior_entry() {
        let mut table = RoutingTable::new(id("A"));
        table.insert(id("B"), 9, vec![id("A"), id("C"), id("B")]);
        table.insert(id("B"), 4, vec![id("A"), id("B")]);
        assert_eq!(table.cost_to("B"), Some(4));
        assert_eq!(table.path_to("B"), Some(&[id("A"), id("B")][..]));
    }

    #[test]
    fn test_clear_reinstates_self_entry() {
        let mut table = RoutingTable::new(id("A"));
        table.insert(id("B"), 4, vec![id("A"), id("B")]);
        table.clear();
        assert_eq!(table.len(), 1);
        assert_eq!(table.cost_to("A"), Some(0));
        assert!(!table.contains("B"));
    }

    #[test]
    fn test_unknown_destination_is_unreachable() {
        let table = RoutingTable::new(id("A"));
        assert_eq!(table.cost_to("Z"), None);
        assert_eq!(table.path_to("Z"), None);
        assert!(!table.contains("Z"));
    }
}
