//! Error types for the button monitor and GNSS helpers.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that end (or, under the `exit` policy, may end) button monitoring.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The input line could not be requested from the GPIO chip.
    #[error("failed to request line {offset} on {chip}: {source}")]
    LineRequest {
        chip: String,
        offset: u32,
        #[source]
        source: gpiocdev::Error,
    },

    /// Waiting for or reading an edge event failed.
    #[error("failed to read edge event: {0}")]
    EdgeWait(#[source] gpiocdev::Error),

    /// An external command could not be started.
    #[error("failed to run `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// An external command ran but reported failure.
    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid duration: {0:?}")]
    Duration(String),

    #[error("command `{0}` is empty")]
    EmptyCommand(&'static str),

    #[error("wait_timeout must be greater than zero")]
    WaitTimeout,

    #[error("medium press threshold ({medium}) exceeds long press threshold ({long})")]
    Thresholds { medium: String, long: String },

    #[error(transparent)]
    Source(#[from] ::config::ConfigError),
}

/// Errors from parsing a GNSS location reply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GpsError {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("malformed {field}: {value:?}")]
    Malformed { field: &'static str, value: String },

    #[error("unknown hemisphere {0:?}")]
    Hemisphere(char),
}
