//! Monitor configuration.
//!
//! Defaults match the gateway wiring (button on GPIO19 of `gpiochip0`).
//! A TOML file and `BUTTON_MONITOR_*` environment variables may override
//! any key.

use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::action::ShellCommand;
use crate::duration::{self, format_duration};
use crate::error::ConfigError;
use crate::press::PressThresholds;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "BUTTON_MONITOR";

/// What to do when a signal or reset command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionFailurePolicy {
    /// Log the failure and keep monitoring.
    #[default]
    Continue,
    /// Stop monitoring and return the error.
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub chip: String,
    pub line: u32,
    pub consumer: String,
    #[serde(with = "duration::serde_str")]
    pub wait_timeout: Duration,
    #[serde(with = "duration::serde_str")]
    pub medium_press: Duration,
    #[serde(with = "duration::serde_str")]
    pub long_press: Duration,
    pub pull_up: ShellCommand,
    pub pressed_signal: ShellCommand,
    pub released_signal: ShellCommand,
    pub factory_reset: ShellCommand,
    pub on_action_failure: ActionFailurePolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        let thresholds = PressThresholds::default();
        Self {
            chip: "gpiochip0".to_string(),
            line: 19,
            consumer: "button-monitor".to_string(),
            wait_timeout: Duration::from_secs(20),
            medium_press: thresholds.medium,
            long_press: thresholds.long,
            pull_up: ShellCommand::new(["sudo", "pinctrl", "-e", "set", "{line}", "pu"]),
            pressed_signal: ShellCommand::new(["sudo", "pinctrl", "20,21", "op", "dh"]),
            released_signal: ShellCommand::new(["sudo", "pinctrl", "16,20,21", "op", "dl"]),
            factory_reset: ShellCommand::new(["sudo", "/home/viam/viam-factory-reset.sh"]),
            on_action_failure: ActionFailurePolicy::Continue,
        }
    }
}

impl MonitorConfig {
    /// Load defaults, then `path` if it exists, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`MonitorConfig::load`], reading overrides from `env` instead of
    /// the process environment when it is given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the monitor cannot act on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, cmd) in [
            ("pull_up", &self.pull_up),
            ("pressed_signal", &self.pressed_signal),
            ("released_signal", &self.released_signal),
            ("factory_reset", &self.factory_reset),
        ] {
            if cmd.is_empty() {
                return Err(ConfigError::EmptyCommand(name));
            }
        }

        if self.wait_timeout.is_zero() {
            return Err(ConfigError::WaitTimeout);
        }

        if self.medium_press > self.long_press {
            return Err(ConfigError::Thresholds {
                medium: format_duration(self.medium_press),
                long: format_duration(self.long_press),
            });
        }

        Ok(())
    }

    pub fn thresholds(&self) -> PressThresholds {
        PressThresholds {
            medium: self.medium_press,
            long: self.long_press,
        }
    }
}
