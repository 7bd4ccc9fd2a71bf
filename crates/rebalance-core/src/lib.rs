//! Rebalance Core: shared types for the rebalance routing engine.
//!
//! This crate provides:
//! - [`PublicKey`]: a fixed-width node key exchanged as hex.
//! - [`Hop`] and [`Route`]: candidate routes returned by a pathfinder.
//! - [`Channel`], [`ChannelEdge`] and [`PaymentRequest`]: session inputs.
//! - [`RoutingConfig`]: tunables for a routing session.

pub mod config;
pub mod error;
pub mod types;

pub use config::RoutingConfig;
pub use error::CoreError;
pub use types::{Channel, ChannelEdge, ChannelId, Hop, PaymentRequest, PublicKey, Route, PUBKEY_LEN};
