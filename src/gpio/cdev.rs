//! Linux GPIO character device line.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use gpiocdev::line::{EdgeDetection, EdgeKind as CdevEdgeKind};
use gpiocdev::tokio::AsyncRequest;
use gpiocdev::Request;
use tracing::{debug, info};

use super::{EdgeEvent, EdgeKind, EdgeSource, PollResult};
use crate::error::MonitorError;

/// An input line requested with both-edge detection.
///
/// Dropping the line also releases it; [`EdgeSource::release`] does so
/// explicitly and logs it.
pub struct CdevLine {
    request: AsyncRequest,
    chip: String,
    offset: u32,
}

impl CdevLine {
    /// Request `offset` on `chip` as an input reporting rising and falling edges.
    ///
    /// `chip` is either a chip name such as `gpiochip0` or a device path.
    pub fn request(chip: &str, offset: u32, consumer: &str) -> Result<Self, MonitorError> {
        let request = Request::builder()
            .on_chip(chip_path(chip))
            .with_consumer(consumer)
            .with_line(offset)
            .as_input()
            .with_edge_detection(EdgeDetection::BothEdges)
            .request()
            .map_err(|source| MonitorError::LineRequest {
                chip: chip.to_string(),
                offset,
                source,
            })?;

        debug!("Requested line {} on {} as {}", offset, chip, consumer);

        Ok(Self {
            request: AsyncRequest::new(request),
            chip: chip.to_string(),
            offset,
        })
    }
}

/// Resolve a chip name to its device path.
fn chip_path(chip: &str) -> PathBuf {
    if chip.contains('/') {
        PathBuf::from(chip)
    } else {
        PathBuf::from("/dev").join(chip)
    }
}

#[async_trait]
impl EdgeSource for CdevLine {
    async fn wait_edge(&mut self, timeout: Duration) -> Result<PollResult, MonitorError> {
        match tokio::time::timeout(timeout, self.request.read_edge_event()).await {
            Err(_) => Ok(PollResult::Timeout),
            Ok(Err(e)) => Err(MonitorError::EdgeWait(e)),
            Ok(Ok(event)) => {
                let kind = match event.kind {
                    CdevEdgeKind::Rising => EdgeKind::Rising,
                    CdevEdgeKind::Falling => EdgeKind::Falling,
                };
                Ok(PollResult::Event(EdgeEvent {
                    kind,
                    timestamp: Duration::from_nanos(event.timestamp_ns),
                }))
            }
        }
    }

    fn release(self) {
        info!("Releasing line {} on {}", self.offset, self.chip);
        drop(self.request);
    }
}

impl std::fmt::Debug for CdevLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdevLine")
            .field("chip", &self.chip)
            .field("offset", &self.offset)
            .finish()
    }
}
