//! The button monitor event loop.
//!
//! ```text
//!            falling edge                 rising edge
//!   Idle ───────────────▶ Open(since) ───────────────▶ Idle
//!    │                                                  ▲
//!    └──────────────── rising edge (warn) ──────────────┘
//! ```
//!
//! Each edge first drives the status lines, then updates the press state.
//! A completed press is classified and a long press triggers a factory reset.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::action::{ResetAction, SignalDriver};
use crate::config::{ActionFailurePolicy, MonitorConfig};
use crate::duration::format_secs;
use crate::error::MonitorError;
use crate::gpio::{EdgeEvent, EdgeKind, EdgeSource, PollResult};
use crate::press::{PressKind, PressState, PressThresholds, PressTracker};

/// Loop settings taken from [`MonitorConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    pub wait_timeout: Duration,
    pub thresholds: PressThresholds,
    pub on_action_failure: ActionFailurePolicy,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self::from(&MonitorConfig::default())
    }
}

impl From<&MonitorConfig> for MonitorSettings {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            wait_timeout: config.wait_timeout,
            thresholds: config.thresholds(),
            on_action_failure: config.on_action_failure,
        }
    }
}

/// A press that was closed by a rising edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedPress {
    pub held: Duration,
    pub kind: PressKind,
}

/// Watches one button line and acts on its presses.
///
/// The monitor owns the line; [`ButtonMonitor::run`] consumes the monitor and
/// releases the line exactly once, whichever way the loop ends.
#[derive(Debug)]
pub struct ButtonMonitor<L, S, R> {
    line: L,
    signals: S,
    reset: R,
    settings: MonitorSettings,
    tracker: PressTracker,
}

impl<L, S, R> ButtonMonitor<L, S, R>
where
    L: EdgeSource,
    S: SignalDriver,
    R: ResetAction,
{
    pub fn new(line: L, signals: S, reset: R, settings: MonitorSettings) -> Self {
        Self {
            line,
            signals,
            reset,
            settings,
            tracker: PressTracker::new(),
        }
    }

    pub fn press_state(&self) -> PressState {
        self.tracker.state()
    }

    /// Monitor until `shutdown` resolves or a fatal error occurs.
    pub async fn run<F>(mut self, shutdown: F) -> Result<(), MonitorError>
    where
        F: Future<Output = ()>,
    {
        let result = self.event_loop(shutdown).await;
        if let Err(e) = &result {
            error!("Button monitoring stopped: {}", e);
        }
        self.line.release();
        result
    }

    async fn event_loop<F>(&mut self, shutdown: F) -> Result<(), MonitorError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let poll = tokio::select! {
                _ = &mut shutdown => {
                    info!("Interrupt received, exiting");
                    return Ok(());
                }
                poll = self.line.wait_edge(self.settings.wait_timeout) => poll?,
            };

            self.handle_poll(poll).await?;
        }
    }

    /// Apply one wait result to the press state.
    ///
    /// Returns the completed press, if this poll closed one.
    pub async fn handle_poll(
        &mut self,
        poll: PollResult,
    ) -> Result<Option<CompletedPress>, MonitorError> {
        match poll {
            PollResult::Timeout => {
                info!("No event detected within timeout");
                Ok(None)
            }
            PollResult::Event(event) => self.handle_edge(event).await,
        }
    }

    async fn handle_edge(
        &mut self,
        event: EdgeEvent,
    ) -> Result<Option<CompletedPress>, MonitorError> {
        match event.kind {
            EdgeKind::Falling => {
                info!("Falling edge (button pressed)");
                if let Some(stale) = self.tracker.press(event.timestamp) {
                    warn!(
                        "Falling edge while a press was already open since {}; restarting press",
                        format_secs(stale)
                    );
                }
                let result = self.signals.set_pressed_signal().await;
                self.check_action("pressed signal", result)?;
                Ok(None)
            }
            EdgeKind::Rising => {
                info!("Rising edge (button released)");
                let result = self.signals.set_released_signal().await;
                self.check_action("released signal", result)?;

                match self.tracker.release(event.timestamp) {
                    Some(held) => self.complete_press(held).await.map(Some),
                    None => {
                        warn!("Rising edge detected without a prior falling edge");
                        Ok(None)
                    }
                }
            }
        }
    }

    async fn complete_press(&mut self, held: Duration) -> Result<CompletedPress, MonitorError> {
        let thresholds = self.settings.thresholds;
        let kind = PressKind::classify(held, &thresholds);
        info!("Button was pressed for {}", format_secs(held));

        match kind {
            PressKind::Long => {
                info!("{} (> {} seconds)", kind.label(), thresholds.long.as_secs_f64());
                let result = self.reset.factory_reset().await;
                self.check_action("factory reset", result)?;
            }
            PressKind::Medium => {
                info!(
                    "{} ({}-{} seconds)",
                    kind.label(),
                    thresholds.medium.as_secs_f64(),
                    thresholds.long.as_secs_f64()
                );
                debug!("Provisioning mode is not available; ignoring medium press");
            }
            PressKind::Short => {
                info!("{} (< {} seconds)", kind.label(), thresholds.medium.as_secs_f64());
            }
        }

        Ok(CompletedPress { held, kind })
    }

    fn check_action(
        &self,
        action: &str,
        result: Result<(), MonitorError>,
    ) -> Result<(), MonitorError> {
        match (result, self.settings.on_action_failure) {
            (Ok(()), _) => Ok(()),
            (Err(e), ActionFailurePolicy::Continue) => {
                warn!("{} failed, continuing: {}", action, e);
                Ok(())
            }
            (Err(e), ActionFailurePolicy::Exit) => Err(e),
        }
    }
}

/// Run the pull-up command for the monitored line.
///
/// Failure is logged and otherwise ignored; the line may already be biased.
pub async fn enable_pull_up(config: &MonitorConfig) {
    let command = config.pull_up.for_line(config.line);
    match command.run().await {
        Ok(()) => info!("Pull-up resistor enabled on GPIO{}", config.line),
        Err(e) => warn!("Failed to enable pull-up resistor: {}", e),
    }
}

/// Resolve when `listener` reports a signal.
///
/// A listener that fails is logged and never resolves, so it cannot end
/// monitoring by itself.
pub async fn until_signal<F>(name: &str, listener: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = listener.await {
        warn!("Failed to listen for {}: {}", name, e);
        std::future::pending::<()>().await;
    }
}
