use rebalance_core::Route;

/// All distinct routes discovered in a session, and how many have been
/// handed out.
///
/// Routes are handed out in discovery order and the collection is append-only,
/// so the returned routes are always a prefix of the discovered ones.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    all: Vec<Route>,
    returned: usize,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route unless a structurally equal one is already known.
    /// Returns true if the route was new.
    pub fn insert(&mut self, route: Route) -> bool {
        if self.all.iter().any(|known| known.same_hops(&route)) {
            return false;
        }
        self.all.push(route);
        true
    }

    /// Whether a discovered route has not been handed out yet.
    pub fn has_unreturned(&self) -> bool {
        self.returned < self.all.len()
    }

    /// Hand out the first route that has not been returned yet.
    pub fn take_next(&mut self) -> Option<&Route> {
        let route = self.all.get(self.returned)?;
        self.returned += 1;
        Some(route)
    }

    pub fn all(&self) -> &[Route] {
        &self.all
    }

    pub fn returned(&self) -> &[Route] {
        &self.all[..self.returned]
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Counter of pathfinder requests, capped at a maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestBudget {
    requested: u32,
    max: u32,
}

impl RequestBudget {
    pub fn new(max: u32) -> Self {
        Self { requested: 0, max }
    }

    /// Count one completed request.
    pub fn record_request(&mut self) {
        self.requested = self.requested.saturating_add(1).min(self.max);
    }

    /// Give up: no further requests will be made this session.
    pub fn exhaust(&mut self) {
        self.requested = self.max;
    }

    pub fn is_exhausted(&self) -> bool {
        self.requested >= self.max
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}
