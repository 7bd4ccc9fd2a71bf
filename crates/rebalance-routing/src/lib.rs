//! Rebalance Routing: route acquisition and exclusion for a single payment attempt.
//!
//! This crate provides:
//! - [`Routes`]: a per-payment session that lazily pulls candidate routes from a
//!   [`PathFinder`] and hands out each distinct route exactly once.
//! - The exclusion strategies on [`Routes`] (`ignore_*`) that turn a routing
//!   failure into directed-edge or node exclusions for the next request.
//! - [`ExclusionSet`], [`RouteCollection`] and [`RequestBudget`]: the session state.
//! - [`PathFinder`], [`NodeDirectory`] and [`RouteOutput`]: collaborator seams.

pub mod collection;
pub mod deriver;
pub mod error;
pub mod exclusion;
pub mod output;
pub mod routes;
pub mod traits;


// Re-exports for convenience.
pub use collection::{RequestBudget, RouteCollection};
pub use error::RoutingError;
pub use exclusion::{DirectedEdge, ExclusionSet};
pub use output::TracingOutput;
pub use routes::{RouteRequest, Routes};
pub use traits::{NodeDirectory, OracleOutcome, PathFinder, RouteOutput, RouteQuery};
