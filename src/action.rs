//! External actions triggered by the monitor.
//!
//! Every action is a privileged command whose only contract is its exit
//! status. The monitor talks to them through [`SignalDriver`] and
//! [`ResetAction`] so tests can substitute recording fakes.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

use crate::error::MonitorError;

/// Drives the auxiliary status lines that mirror the button state.
#[async_trait]
pub trait SignalDriver: Send {
    /// Called on every falling edge.
    async fn set_pressed_signal(&mut self) -> Result<(), MonitorError>;

    /// Called on every rising edge.
    async fn set_released_signal(&mut self) -> Result<(), MonitorError>;
}

/// Performed after a long press.
#[async_trait]
pub trait ResetAction: Send {
    async fn factory_reset(&mut self) -> Result<(), MonitorError>;
}

/// A fixed argv command, e.g. `["sudo", "pinctrl", "20,21", "op", "dh"]`.
///
/// The literal argument `{line}` is replaced with the monitored line offset
/// when the command is built with [`ShellCommand::for_line`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShellCommand(Vec<String>);

impl ShellCommand {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(argv.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn argv(&self) -> &[String] {
        &self.0
    }

    /// Substitute `{line}` placeholders with `offset`.
    pub fn for_line(&self, offset: u32) -> Self {
        let offset = offset.to_string();
        Self(self.0.iter().map(|arg| arg.replace("{line}", &offset)).collect())
    }

    /// Run the command to completion, failing on a non-zero exit status.
    pub async fn run(&self) -> Result<(), MonitorError> {
        let (program, args) = self.0.split_first().ok_or_else(|| MonitorError::CommandSpawn {
            command: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        })?;

        debug!("Running `{}`", self);
        let status = Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(|source| MonitorError::CommandSpawn {
                command: self.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(MonitorError::CommandFailed {
                command: self.to_string(),
                status,
            })
        }
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Status lines toggled through `pinctrl` (or any configured command).
#[derive(Debug, Clone)]
pub struct CommandSignals {
    pressed: ShellCommand,
    released: ShellCommand,
}

impl CommandSignals {
    pub fn new(pressed: ShellCommand, released: ShellCommand) -> Self {
        Self { pressed, released }
    }
}

#[async_trait]
impl SignalDriver for CommandSignals {
    async fn set_pressed_signal(&mut self) -> Result<(), MonitorError> {
        self.pressed.run().await
    }

    async fn set_released_signal(&mut self) -> Result<(), MonitorError> {
        self.released.run().await
    }
}

/// Factory reset performed by running a script.
#[derive(Debug, Clone)]
pub struct CommandReset {
    command: ShellCommand,
}

impl CommandReset {
    pub fn new(command: ShellCommand) -> Self {
        Self { command }
    }
}

#[async_trait]
impl ResetAction for CommandReset {
    async fn factory_reset(&mut self) -> Result<(), MonitorError> {
        self.command.run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_line_substitutes_offset() {
        let cmd = ShellCommand::new(["sudo", "pinctrl", "-e", "set", "{line}", "pu"]);
        assert_eq!(cmd.for_line(19).to_string(), "sudo pinctrl -e set 19 pu");
    }

    #[test]
    fn test_deserialize_from_list() {
        let cmd: ShellCommand = serde_json::from_str(r#"["sudo", "reboot"]"#).unwrap();
        assert_eq!(cmd.argv(), ["sudo", "reboot"]);
    }

    #[tokio::test]
    async fn test_run_success() {
        ShellCommand::new(["true"]).run().await.unwrap();
    }

    #[tokio::test]
    async fn test_run_reports_exit_status() {
        let err = ShellCommand::new(["false"]).run().await.unwrap_err();
        assert!(matches!(err, MonitorError::CommandFailed { ref command, .. } if command == "false"));
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let err = ShellCommand::new(["/nonexistent/factory-reset.sh"])
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, MonitorError::CommandSpawn { .. }));
    }

    #[tokio::test]
    async fn test_run_empty_command() {
        let err = ShellCommand::new(Vec::<String>::new()).run().await.unwrap_err();
        assert!(matches!(err, MonitorError::CommandSpawn { .. }));
    }

    #[tokio::test]
    async fn test_command_signals_run_configured_commands() {
        let mut signals = CommandSignals::new(ShellCommand::new(["true"]), ShellCommand::new(["false"]));
        assert!(signals.set_pressed_signal().await.is_ok());
        assert!(signals.set_released_signal().await.is_err());
    }
}
