use chrono::{DateTime, Utc};

/// Source of the server clock.
///
/// Everything that records "when" (submission timestamps, health check
/// caching) reads the time through this trait, so it can be pinned in tests.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    /// Returns the current server time.
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, time: DateTime<Utc>) -> Self {
        self.expect_now().once().return_const(time);
        self
    }
}
