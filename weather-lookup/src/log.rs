use std::fmt::Debug;

/// Where the lookup reports its summary and failure lines.
pub trait LookupLog: Send + Sync + Debug {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
}

/// Forwards to the `tracing` subscriber installed by the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl LookupLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!(target: "weather_lookup", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(target: "weather_lookup", "{message}");
    }
}
