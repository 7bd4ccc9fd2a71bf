//! Exclusion strategies: translate a routing failure into constraints for the
//! next pathfinder request.
//!
//! Every strategy funnels into [`Routes::ignore_edge_from_to`], except
//! [`Routes::ignore_node`]. Nothing is ever removed.

use rebalance_core::{Channel, ChannelId, Hop, PublicKey, Route};

use crate::error::RoutingError;
use crate::exclusion::DirectedEdge;
use crate::routes::Routes;

impl Routes {
    /// Exclude the direction `from -> to` of `chan_id`.
    ///
    /// Returns true if the edge was not excluded before. The notice is only
    /// printed for new exclusions.
    pub fn ignore_edge_from_to(
        &mut self,
        chan_id: ChannelId,
        from: &PublicKey,
        to: &PublicKey,
        show_message: bool,
    ) -> bool {
        let edge = DirectedEdge::new(*from, *to);
        if self.exclusions.contains_edge(&edge) {
            return false;
        }
        if show_message {
            let channel = self.output.channel_representation(chan_id, to, from);
            self.output.print_line(&format!("Ignoring {}", channel));
        }
        tracing::info!(
            session_id = %self.session_id,
            %chan_id,
            %from,
            %to,
            "excluding channel direction"
        );
        self.exclusions.insert_edge(edge)
    }

    /// Exclude a node entirely. Returns true if it was not excluded before.
    pub fn ignore_node(&mut self, node: &PublicKey) -> bool {
        let added = self.exclusions.insert_node(*node);
        if added {
            tracing::info!(session_id = %self.session_id, %node, "excluding node");
        }
        added
    }

    /// Never leave through `channel` again.
    pub fn ignore_first_hop(&mut self, channel: &Channel, show_message: bool) -> Result<(), RoutingError> {
        let own_key = self.directory.own_pubkey()?;
        self.ignore_edge_from_to(channel.chan_id, &own_key, &channel.remote_pubkey, show_message);
        Ok(())
    }

    /// Exclude the edge leaving the node that reported the failure.
    ///
    /// Nothing is excluded if `failure_source` is the final hop or is not on
    /// the route.
    pub fn ignore_edge_on_route(&mut self, failure_source: &PublicKey, route: &Route) {
        let show_message = self.config.show_messages;
        let next = route
            .hops()
            .windows(2)
            .find(|pair| pair[0].pub_key == *failure_source)
            .map(|pair| &pair[1]);
        match next {
            Some(hop) => {
                self.ignore_edge_from_to(hop.chan_id, failure_source, &hop.pub_key, show_message);
            }
            None => {
                tracing::debug!(
                    session_id = %self.session_id,
                    %failure_source,
                    "failure source has no outgoing hop on route"
                );
            }
        }
    }

    /// Exclude the edge leading into `hop_to_ignore`, coming from the hop
    /// before it (or from us for the first hop).
    pub fn ignore_hop_on_route(&mut self, hop_to_ignore: &Hop, route: &Route) -> Result<(), RoutingError> {
        let show_message = self.config.show_messages;
        let mut previous = self.directory.own_pubkey()?;
        for hop in route.hops() {
            if hop == hop_to_ignore {
                self.ignore_edge_from_to(hop.chan_id, &previous, &hop.pub_key, show_message);
                return Ok(());
            }
            previous = hop.pub_key;
        }
        Ok(())
    }

    /// Guess the culprit of a failure from the fees along the route.
    ///
    /// Picks the hop charging the highest fee; when the last hop is forced the
    /// channel of the second-to-last hop does not take part. If the fee our own
    /// first hop would have charged is larger than that maximum and the first
    /// hop was not forced, the first hop is excluded. Otherwise the hop after
    /// the highest-fee hop is excluded.
    pub fn ignore_high_fee_hops(&mut self, route: &Route) -> Result<(), RoutingError> {
        let hops = route.hops();
        let exempt_chan = match (&self.request.last_hop_channel, hops.len()) {
            (Some(_), n) if n >= 2 => Some(hops[n - 2].chan_id),
            _ => None,
        };

        let mut max_fee: Option<(usize, u64)> = None;
        for (index, hop) in hops.iter().enumerate() {
            if Some(hop.chan_id) == exempt_chan {
                continue;
            }
            if max_fee.map_or(true, |(_, fee)| hop.fee_msat > fee) {
                max_fee = Some((index, hop.fee_msat));
            }
        }
        let Some((max_index, max_fee_msat)) = max_fee else {
            return Ok(());
        };

        let first_hop = &hops[0];
        let first_hop_fee_rate = self.directory.fee_rate_ppm_to(first_hop.chan_id)?;
        let missed_fee_first_hop_msat =
            first_hop.amt_to_forward_msat as f64 / 1_000_000.0 * first_hop_fee_rate as f64;

        let hop_to_ignore = if missed_fee_first_hop_msat > max_fee_msat as f64
            && self.request.first_hop_channel.is_none()
        {
            Some(first_hop)
        } else {
            hops.get(max_index + 1)
        };

        tracing::debug!(
            session_id = %self.session_id,
            max_fee_msat,
            max_index,
            missed_fee_first_hop_msat,
            "high fee hop selected"
        );

        match hop_to_ignore {
            Some(hop) => self.ignore_hop_on_route(hop, route),
            // The highest fee sits on the final hop: there is no hop after it.
            None => Ok(()),
        }
    }

    /// Exclude both directions of a channel. Lookup failures are swallowed.
    pub fn ignore_channel(&mut self, chan_id: ChannelId) {
        let edge = match self.directory.edge(chan_id) {
            Ok(edge) => edge,
            Err(e) => {
                tracing::debug!(
                    session_id = %self.session_id,
                    %chan_id,
                    error = %e,
                    "channel lookup failed, not excluding"
                );
                return;
            }
        };
        let show_message = self.config.show_messages;
        self.ignore_edge_from_to(chan_id, &edge.node1_pub, &edge.node2_pub, show_message);
        self.ignore_edge_from_to(chan_id, &edge.node2_pub, &edge.node1_pub, show_message);
    }
}
