use rebalance_core::{ChannelId, CoreError};

/// Errors that can occur within the routing layer.
///
/// Collaborator failures are surfaced unchanged; the session adds no retry
/// wrapping of its own beyond the request budget.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("pathfinder request failed: {0}")]
    PathFinder(String),

    #[error("channel not found: {0}")]
    ChannelNotFound(ChannelId),

    #[error("node directory lookup failed: {0}")]
    Directory(String),
}
