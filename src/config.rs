/// Runtime configuration for the dispatcher and function tasks.
///
/// Controls channel buffer sizes, event batching and shutdown behavior. Use
/// the builder pattern to customize, or use [`Default`] for sensible
/// defaults.
///
/// # Examples
///
/// ```rust
/// use cloudfn::Config;
///
/// let config = Config::default()
///     .with_channel_size(256)            // Larger buffers for high throughput
///     .with_max_events_per_tick(20);     // Process more deliveries per cycle
/// ```
pub struct Config {
    /// Size of the channel buffer for each function (and the dispatcher).
    /// Determines how many deliveries can be queued before backpressure applies.
    /// Default: 128
    pub channel_size: usize,

    /// Maximum number of deliveries a function task will process in a single
    /// cycle before yielding control back to the scheduler.
    /// Lower values improve fairness, higher values improve throughput.
    /// Default: 10
    pub max_events_per_tick: usize,

    /// Duration to wait during shutdown before cancelling function tasks.
    /// This gives the dispatcher time to route in-flight deliveries.
    /// Default: 10 ms. Set to Duration::ZERO for immediate shutdown.
    pub sleep_on_shutdown: tokio::time::Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            channel_size: 128,
            max_events_per_tick: 10,
            sleep_on_shutdown: tokio::time::Duration::from_millis(10),
        }
    }
}

impl Config {
    /// Set the channel buffer size for function tasks and the dispatcher.
    ///
    /// Larger buffers allow more queued deliveries but use more memory.
    /// When the buffer is full, senders will block (backpressure).
    pub fn with_channel_size(mut self, size: usize) -> Self {
        self.channel_size = size;
        self
    }

    /// Set the maximum number of deliveries processed per cycle.
    ///
    /// After processing this many deliveries, the function task yields to
    /// allow other tasks to run.
    pub fn with_max_events_per_tick(mut self, limit: usize) -> Self {
        self.max_events_per_tick = limit;
        self
    }

    /// Set the grace period [`Runtime::stop`](crate::Runtime::stop) waits
    /// for in-flight deliveries before cancelling tasks.
    pub fn with_sleep_on_shutdown(mut self, duration: tokio::time::Duration) -> Self {
        self.sleep_on_shutdown = duration;
        self
    }
}
