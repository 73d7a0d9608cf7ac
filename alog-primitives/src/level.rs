//! Event severity levels.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Severity attached to a recorded event.
///
/// Ordering follows severity: `Debug < Info < Warning < Error < Critical`.
/// The router drops events below its configured minimum level.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Verbose diagnostic detail.
    Debug,
    /// Routine events; the default for start/complete records.
    #[default]
    Info,
    /// Something unexpected that did not affect the call outcome.
    Warning,
    /// A wrapped method returned an error.
    Error,
    /// Unrecoverable condition.
    Critical,
}

impl Level {
    /// Returns the canonical uppercase name used in serialized events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            other => Err(Error::UnknownLevel(other.to_owned())),
        }
    }
}
