//! In-memory collaborators for exercising routing sessions end to end.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rebalance_core::{ChannelEdge, ChannelId, PublicKey, Route, PUBKEY_LEN};
use rebalance_routing::{
    DirectedEdge, NodeDirectory, OracleOutcome, PathFinder, RouteOutput, RouteQuery, RoutingError,
};

/// Deterministic test key: `0x02` followed by `byte` repeated.
pub fn key(byte: u8) -> PublicKey {
    let mut bytes = [byte; PUBKEY_LEN];
    bytes[0] = 0x02;
    PublicKey::from_bytes(bytes)
}

/// Parse candidate routes from a JSON array.
pub fn routes_from_json(value: serde_json::Value) -> Vec<Route> {
    serde_json::from_value(value).expect("fixture routes should deserialize")
}

/// A pathfinder that answers from a fixed list of candidate routes.
///
/// Each request returns up to `batch_size` candidates, in list order, that
/// satisfy the query: no excluded channel direction, no excluded node, the
/// forced outgoing channel, and the target as the node just before the final
/// hop back to us. When nothing qualifies the pathfinder reports
/// [`OracleOutcome::Exhausted`].
pub struct CandidatePathFinder {
    own: PublicKey,
    candidates: Vec<Route>,
    batch_size: usize,
    queries: Mutex<Vec<RouteQuery>>,
}

impl CandidatePathFinder {
    pub fn new(own: PublicKey, candidates: Vec<Route>, batch_size: usize) -> Self {
        Self {
            own,
            candidates,
            batch_size,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<RouteQuery> {
        self.queries.lock().expect("queries lock").clone()
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().expect("queries lock").len()
    }

    fn satisfies(&self, route: &Route, query: &RouteQuery) -> bool {
        let hops = route.hops();
        if let Some(chan_id) = query.outgoing_chan_id {
            if hops.first().map(|h| h.chan_id) != Some(chan_id) {
                return false;
            }
        }
        if let Some(target) = query.target {
            let final_node = hops.len().checked_sub(2).map(|i| hops[i].pub_key);
            if final_node != Some(target) {
                return false;
            }
        }
        let mut previous = self.own;
        for hop in hops {
            if query.ignored_nodes.contains(&hop.pub_key) {
                return false;
            }
            if query.ignored_pairs.contains(&DirectedEdge::new(previous, hop.pub_key)) {
                return false;
            }
            previous = hop.pub_key;
        }
        true
    }
}

impl PathFinder for CandidatePathFinder {
    fn find_routes(&self, query: &RouteQuery) -> Result<OracleOutcome, RoutingError> {
        self.queries.lock().expect("queries lock").push(query.clone());
        let found: Vec<Route> = self
            .candidates
            .iter()
            .filter(|route| self.satisfies(route, query))
            .take(self.batch_size)
            .cloned()
            .collect();
        tracing::debug!(found = found.len(), "candidate pathfinder answered");
        if found.is_empty() {
            Ok(OracleOutcome::Exhausted)
        } else {
            Ok(OracleOutcome::Routes(found))
        }
    }
}

/// Fixed node directory.
pub struct MapDirectory {
    pub own: PublicKey,
    pub fee_rates: HashMap<ChannelId, u64>,
    pub edges: HashMap<ChannelId, ChannelEdge>,
}

impl MapDirectory {
    pub fn new(own: PublicKey) -> Self {
        Self {
            own,
            fee_rates: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    pub fn with_fee_rate(mut self, chan_id: u64, ppm: u64) -> Self {
        self.fee_rates.insert(ChannelId(chan_id), ppm);
        self
    }

    pub fn with_edge(mut self, chan_id: u64, node1: PublicKey, node2: PublicKey) -> Self {
        self.edges.insert(
            ChannelId(chan_id),
            ChannelEdge {
                node1_pub: node1,
                node2_pub: node2,
            },
        );
        self
    }
}

impl NodeDirectory for MapDirectory {
    fn own_pubkey(&self) -> Result<PublicKey, RoutingError> {
        Ok(self.own)
    }

    fn fee_rate_ppm_to(&self, chan_id: ChannelId) -> Result<u64, RoutingError> {
        self.fee_rates
            .get(&chan_id)
            .copied()
            .ok_or_else(|| RoutingError::Directory(format!("no fee policy for {}", chan_id)))
    }

    fn edge(&self, chan_id: ChannelId) -> Result<ChannelEdge, RoutingError> {
        self.edges
            .get(&chan_id)
            .cloned()
            .ok_or(RoutingError::ChannelNotFound(chan_id))
    }
}

/// Output sink that keeps every printed line.
#[derive(Default)]
pub struct RecordingOutput {
    lines: Mutex<Vec<String>>,
}

impl RecordingOutput {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lines lock").clone()
    }
}

impl RouteOutput for RecordingOutput {
    fn print_line(&self, line: &str) {
        self.lines.lock().expect("lines lock").push(line.to_string());
    }
}
