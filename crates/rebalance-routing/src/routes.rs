use std::sync::Arc;

use rebalance_core::{Channel, PaymentRequest, Route, RoutingConfig};
use uuid::Uuid;

use crate::collection::{RequestBudget, RouteCollection};
use crate::error::RoutingError;
use crate::exclusion::ExclusionSet;
use crate::traits::{NodeDirectory, OracleOutcome, PathFinder, RouteOutput, RouteQuery};

/// Fixed parameters of a routing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub payment_request: PaymentRequest,
    /// Channel the payment must leave through, if forced.
    pub first_hop_channel: Option<Channel>,
    /// Channel the payment must come back through, if forced. Its remote peer
    /// is the pathfinder target.
    pub last_hop_channel: Option<Channel>,
    pub fee_limit_msat: u64,
}

/// One payment attempt's worth of routing state.
///
/// A session pulls candidate routes from the [`PathFinder`] on demand, keeps
/// every distinct route it has seen and hands each one out at most once. The
/// exclusion strategies (see the `ignore_*` methods) add constraints that the
/// next pathfinder request picks up.
pub struct Routes {
    pub(crate) session_id: Uuid,
    pub(crate) path_finder: Arc<dyn PathFinder>,
    pub(crate) directory: Arc<dyn NodeDirectory>,
    pub(crate) output: Arc<dyn RouteOutput>,
    pub(crate) request: RouteRequest,
    pub(crate) config: RoutingConfig,
    collection: RouteCollection,
    budget: RequestBudget,
    pub(crate) exclusions: ExclusionSet,
}

impl Routes {
    /// Start a session with the default configuration.
    pub fn new(
        path_finder: Arc<dyn PathFinder>,
        directory: Arc<dyn NodeDirectory>,
        output: Arc<dyn RouteOutput>,
        request: RouteRequest,
    ) -> Self {
        Self::with_config(path_finder, directory, output, request, RoutingConfig::default())
    }

    pub fn with_config(
        path_finder: Arc<dyn PathFinder>,
        directory: Arc<dyn NodeDirectory>,
        output: Arc<dyn RouteOutput>,
        request: RouteRequest,
        config: RoutingConfig,
    ) -> Self {
        let session_id = Uuid::now_v7();
        tracing::debug!(
            %session_id,
            amount_sat = request.payment_request.num_satoshis,
            fee_limit_msat = request.fee_limit_msat,
            max_requests = config.max_routes_to_request,
            "routing session created"
        );
        Self {
            session_id,
            path_finder,
            directory,
            output,
            budget: RequestBudget::new(config.max_routes_to_request),
            request,
            config,
            collection: RouteCollection::new(),
            exclusions: ExclusionSet::new(),
        }
    }

    /// Whether a route that has not been handed out is available, asking the
    /// pathfinder for more if needed.
    pub fn has_next(&mut self) -> Result<bool, RoutingError> {
        self.update_routes()?;
        Ok(self.collection.has_unreturned())
    }

    /// The next route not yet handed out, asking the pathfinder for more if
    /// needed. `None` once the request budget is spent without a new route.
    pub fn get_next(&mut self) -> Result<Option<Route>, RoutingError> {
        self.update_routes()?;
        Ok(self.collection.take_next().cloned())
    }

    /// Add a route unless a structurally equal one is already known.
    /// Returns true if the route was new.
    pub fn add_route(&mut self, route: Option<Route>) -> bool {
        match route {
            Some(route) => self.collection.insert(route),
            None => false,
        }
    }

    /// Request routes until an unreturned one exists or the budget runs out.
    fn update_routes(&mut self) -> Result<(), RoutingError> {
        while !self.collection.has_unreturned() && !self.budget.is_exhausted() {
            self.request_route()?;
        }
        Ok(())
    }

    fn request_route(&mut self) -> Result<(), RoutingError> {
        let query = RouteQuery {
            target: self
                .request
                .last_hop_channel
                .as_ref()
                .map(|c| c.remote_pubkey),
            amount_sat: self.amount_sat(),
            ignored_pairs: self.exclusions.edges().to_vec(),
            ignored_nodes: self.exclusions.nodes().to_vec(),
            outgoing_chan_id: self.request.first_hop_channel.as_ref().map(|c| c.chan_id),
            fee_limit_msat: self.request.fee_limit_msat,
        };
        tracing::debug!(
            session_id = %self.session_id,
            request = self.budget.requested() + 1,
            ignored_pairs = query.ignored_pairs.len(),
            ignored_nodes = query.ignored_nodes.len(),
            "requesting routes"
        );

        match self.path_finder.find_routes(&query)? {
            OracleOutcome::Exhausted => {
                tracing::warn!(
                    session_id = %self.session_id,
                    requests = self.budget.requested(),
                    "pathfinder found no route, giving up"
                );
                self.budget.exhaust();
            }
            OracleOutcome::Routes(routes) => {
                self.budget.record_request();
                let received = routes.len();
                let added = routes
                    .into_iter()
                    .map(|route| self.add_route(Some(route)))
                    .filter(|&new| new)
                    .count();
                tracing::debug!(
                    session_id = %self.session_id,
                    received,
                    added,
                    "routes received"
                );
            }
        }
        Ok(())
    }

    /// Amount to route, in satoshis.
    pub fn amount_sat(&self) -> u64 {
        self.request.payment_request.num_satoshis
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn request(&self) -> &RouteRequest {
        &self.request
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Pathfinder requests made so far. Reads as the maximum once the
    /// pathfinder has reported that no route exists.
    pub fn num_requested_routes(&self) -> u32 {
        self.budget.requested()
    }

    pub fn all_routes(&self) -> &[Route] {
        self.collection.all()
    }

    pub fn returned_routes(&self) -> &[Route] {
        self.collection.returned()
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }
}
