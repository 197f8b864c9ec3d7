//! # gateway-button
//!
//! Operational helpers for a cellular/GNSS IoT gateway.
//!
//! The main piece is the button monitor: it watches the user button on a GPIO
//! line, measures how long each press lasts and runs a factory reset after a
//! long press.
//!
//! ```text
//! ┌──────────────┐  PollResult   ┌───────────────┐  set_*_signal  ┌───────────────┐
//! │  EdgeSource  │──────────────▶│ ButtonMonitor │───────────────▶│ SignalDriver  │
//! │ (CdevLine)   │               │ (PressTracker)│                └───────────────┘
//! └──────────────┘               │               │  factory_reset ┌───────────────┐
//!                                │               │───────────────▶│  ResetAction  │
//!                                └───────────────┘                └───────────────┘
//! ```
//!
//! - **[`gpio`]**: the [`EdgeSource`] trait and the Linux character device
//!   line ([`CdevLine`])
//! - **[`press`]**: press state and short/medium/long classification
//! - **[`action`]**: external commands behind [`SignalDriver`] and [`ResetAction`]
//! - **[`monitor`]**: the event loop
//! - **[`config`]**: defaults, TOML file and environment overrides
//! - **[`gps`]**: `+QGPSLOC` reply parsing for the `gps-link` tool
//!
//! ## Usage
//!
//! ```bash
//! # Watch gpiochip0 line 19 with the built-in defaults
//! button-monitor
//!
//! # Convert a modem location reply into a map link
//! gps-link "+QGPSLOC: 061951.000,3150.7223N,11711.9293E,0.7,62.2,2,000.00,0.0,0.0,110513,09"
//! ```
//!
//! ### Classifying presses
//!
//! ```
//! use std::time::Duration;
//! use gateway_button::{PressKind, PressThresholds, PressTracker};
//!
//! let mut tracker = PressTracker::new();
//! tracker.press(Duration::from_secs(100));
//! let held = tracker.release(Duration::from_secs(112)).unwrap();
//! assert_eq!(PressKind::classify(held, &PressThresholds::default()), PressKind::Long);
//! ```
//!
//! ### Running external actions
//!
//! ```no_run
//! use gateway_button::ShellCommand;
//!
//! # tokio_test::block_on(async {
//! let reset = ShellCommand::new(["sudo", "/home/viam/viam-factory-reset.sh"]);
//! reset.run().await.unwrap();
//! # });
//! ```

pub mod action;
pub mod config;
pub mod duration;
pub mod error;
pub mod gpio;
pub mod gps;
pub mod monitor;
pub mod press;

pub use action::{CommandReset, CommandSignals, ResetAction, ShellCommand, SignalDriver};
pub use config::{ActionFailurePolicy, MonitorConfig};
pub use error::{ConfigError, GpsError, MonitorError};
pub use gpio::{CdevLine, EdgeEvent, EdgeKind, EdgeSource, PollResult};
pub use gps::Coordinates;
pub use monitor::{
    enable_pull_up, until_signal, ButtonMonitor, CompletedPress, MonitorSettings,
};
pub use press::{PressKind, PressState, PressThresholds, PressTracker};
