//! Instance configuration.

/// Default for [`InstanceConfig::max_dispatches_per_flush`].
pub const DEFAULT_MAX_DISPATCHES_PER_FLUSH: usize = 1024;

/// Tuning knobs for an [`Instance`](crate::Instance).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceConfig {
    /// Upper bound on queued callbacks processed by one
    /// [`flush`](crate::Instance::flush). A hook that keeps invoking its own
    /// callbacks would otherwise keep a flush alive forever.
    ///
    /// Defaults to [`DEFAULT_MAX_DISPATCHES_PER_FLUSH`]. A value of `0` is
    /// treated as `1` so every flush makes progress.
    pub max_dispatches_per_flush: usize,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            max_dispatches_per_flush: DEFAULT_MAX_DISPATCHES_PER_FLUSH,
        }
    }
}

impl InstanceConfig {
    /// Set the per-flush dispatch limit, clamped to at least `1`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxide_component::InstanceConfig;
    ///
    /// let config = InstanceConfig::default().max_dispatches_per_flush(64);
    /// assert_eq!(config.max_dispatches_per_flush, 64);
    ///
    /// let config = InstanceConfig::default().max_dispatches_per_flush(0);
    /// assert_eq!(config.max_dispatches_per_flush, 1);
    /// ```
    pub fn max_dispatches_per_flush(mut self, limit: usize) -> Self {
        self.max_dispatches_per_flush = limit.max(1);
        self
    }
}
