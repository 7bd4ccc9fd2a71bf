use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Length of a compressed secp256k1 node key in bytes.
pub const PUBKEY_LEN: usize = 33;

/// A node public key in its fixed-width binary form.
///
/// Collaborators hand keys around as hex strings; they are decoded once at the
/// boundary so that exclusion-set membership compares raw bytes, independent
/// of the hex casing the collaborator happened to use.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; PUBKEY_LEN]);

impl PublicKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode a hex-encoded key (either case).
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s)
            .map_err(|e| CoreError::InvalidPublicKey(format!("{}: {}", s, e)))?;
        let bytes: [u8; PUBKEY_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            CoreError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                PUBKEY_LEN,
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBKEY_LEN] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for PublicKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Short channel id as used by the pathfinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One forwarding step of a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hop {
    /// Channel used to reach `pub_key` from the previous node.
    pub chan_id: ChannelId,
    /// The node reached by this hop.
    pub pub_key: PublicKey,
    /// Amount forwarded over this hop, in millisatoshis.
    pub amt_to_forward_msat: u64,
    /// Fee charged for this hop, in millisatoshis.
    pub fee_msat: u64,
}

/// A candidate route from our node to the destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Ordered hops, not including our own node.
    pub hops: Vec<Hop>,
    /// Total amount sent including fees, in millisatoshis.
    #[serde(default)]
    pub total_amt_msat: u64,
    /// Total fees along the route, in millisatoshis.
    #[serde(default)]
    pub total_fees_msat: u64,
}

impl Route {
    /// Create a route from its hops, deriving the totals.
    pub fn new(hops: Vec<Hop>) -> Self {
        let total_fees_msat = hops.iter().map(|h| h.fee_msat).sum();
        let total_amt_msat = hops
            .first()
            .map(|h| h.amt_to_forward_msat + h.fee_msat)
            .unwrap_or(0);
        Self {
            hops,
            total_amt_msat,
            total_fees_msat,
        }
    }

    /// The ordered hops.
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Number of hops in this route.
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Sum of the per-hop fees.
    pub fn total_fees_msat(&self) -> u64 {
        self.hops.iter().map(|h| h.fee_msat).sum()
    }

    /// Structural equality over the ordered hop sequence.
    ///
    /// Totals are derived from the hops and are not compared.
    pub fn same_hops(&self, other: &Route) -> bool {
        self.hops == other.hops
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.same_hops(other)
    }
}

impl Eq for Route {}

/// One of our own channels, as used to force the first or last hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub chan_id: ChannelId,
    /// The peer on the other side of the channel.
    pub remote_pubkey: PublicKey,
}

/// The two endpoints of a channel in the public graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEdge {
    pub node1_pub: PublicKey,
    pub node2_pub: PublicKey,
}

/// The decoded payment request a session routes for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub num_satoshis: u64,
}
