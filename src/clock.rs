//! Clock port - time source and end-of-iteration sleep
//!
//! The poll loop never touches wall time directly so tests can substitute
//! a controllable clock.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

/// Provides the current time and the loop's sleep
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current unix timestamp in seconds
    fn now(&self) -> i64;

    /// Suspend the loop for `period`
    async fn sleep(&self, period: Duration);
}

/// Wall clock backed by chrono and tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }

    async fn sleep(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}
