use rebalance_core::{ChannelEdge, ChannelId, PublicKey, Route};
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::exclusion::DirectedEdge;

/// Constraints for a single pathfinder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQuery {
    /// Destination node; `None` lets the pathfinder route back to us.
    pub target: Option<PublicKey>,
    pub amount_sat: u64,
    /// Channel directions the route must not use.
    pub ignored_pairs: Vec<DirectedEdge>,
    /// Nodes the route must not pass through.
    pub ignored_nodes: Vec<PublicKey>,
    /// Channel the route must leave our node through.
    pub outgoing_chan_id: Option<ChannelId>,
    pub fee_limit_msat: u64,
}

/// Result of a pathfinder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleOutcome {
    /// Zero or more candidate routes. More may be available on a later request.
    Routes(Vec<Route>),
    /// No path exists under the current constraints.
    Exhausted,
}

/// The external pathfinding service.
pub trait PathFinder {
    /// Issue one blocking route request.
    fn find_routes(&self, query: &RouteQuery) -> Result<OracleOutcome, RoutingError>;
}

/// Lookups against our own node and the public channel graph.
pub trait NodeDirectory {
    /// Our own node key.
    fn own_pubkey(&self) -> Result<PublicKey, RoutingError>;

    /// Fee rate in parts per million charged towards `chan_id`.
    fn fee_rate_ppm_to(&self, chan_id: ChannelId) -> Result<u64, RoutingError>;

    /// Endpoints of a channel. Fails with [`RoutingError::ChannelNotFound`] for
    /// unknown channels.
    fn edge(&self, chan_id: ChannelId) -> Result<ChannelEdge, RoutingError>;
}

/// Presentation sink for exclusion notices.
pub trait RouteOutput {
    fn print_line(&self, line: &str);

    /// Human-readable description of a channel direction.
    fn channel_representation(&self, chan_id: ChannelId, to: &PublicKey, from: &PublicKey) -> String {
        format!("{} ({} -> {})", chan_id, from, to)
    }
}
