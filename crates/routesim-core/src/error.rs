use crate::types::RouterId;

/// Topology engine errors.
///
/// All variants are recoverable, local conditions: a rejected mutation
/// leaves the engine's topology and every routing table unchanged. Querying
/// an unregistered source router is not an error; it simply reports
/// unreachable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("router '{0}' already exists")]
    RouterExists(RouterId),

    #[error("router '{0}' does not exist")]
    RouterNotFound(RouterId),

    #[error("no link between '{a}' and '{b}'")]
    LinkNotFound { a: RouterId, b: RouterId },

    #[error("link cost must be positive, got {0}")]
    InvalidCost(i64),

    #[error("router '{0}' cannot be linked to itself")]
    SelfLink(RouterId),
}
