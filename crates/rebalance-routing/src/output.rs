use crate::traits::RouteOutput;

/// A [`RouteOutput`] that emits every line as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOutput;

impl RouteOutput for TracingOutput {
    fn print_line(&self, line: &str) {
        tracing::info!(target: "rebalance::output", "{}", line);
    }
}
