//! Service configuration.

/// Configuration for the event service.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Optional upper bound on `end - start` for instance queries, in
    /// milliseconds.
    ///
    /// Disabled by default: the engine skips ahead rather than enumerating,
    /// so arbitrary far-future windows are cheap. Deployments that want a
    /// hard view limit (40 days is a common choice) can set it here.
    pub max_window_span: Option<i64>,
}

impl ServiceConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: cap instance-query windows at `span` milliseconds.
    pub fn with_max_window_span(mut self, span: i64) -> Self {
        self.max_window_span = Some(span);
        self
    }
}
