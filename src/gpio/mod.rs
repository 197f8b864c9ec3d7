//! Edge event source abstraction for the button input line.
//!
//! The monitor only needs "wait for the next edge or time out" and "release
//! the line". [`EdgeSource`] captures that, so the press logic can be driven
//! by a scripted source in tests and by the Linux GPIO character device
//! ([`CdevLine`]) on the gateway.

mod cdev;

pub use cdev::CdevLine;

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::MonitorError;

/// Direction of a line transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Low to high. For an active-low button this is a release.
    Rising,
    /// High to low. For an active-low button this is a press.
    Falling,
}

/// A single edge reported by the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEvent {
    pub kind: EdgeKind,
    /// Monotonic event time.
    pub timestamp: Duration,
}

/// Outcome of one bounded wait on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollResult {
    Event(EdgeEvent),
    Timeout,
}

/// A line that reports edge events.
#[async_trait]
pub trait EdgeSource: Send + Debug {
    /// Wait up to `timeout` for the next edge.
    ///
    /// A timeout is a normal result, not an error.
    async fn wait_edge(&mut self, timeout: Duration) -> Result<PollResult, MonitorError>;

    /// Release the line back to the kernel.
    fn release(self)
    where
        Self: Sized;
}
