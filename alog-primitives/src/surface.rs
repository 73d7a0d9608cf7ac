//! Logging surfaces.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Category of a recorded event.
///
/// Every event carries exactly one surface tag; the router uses it to pick
/// the destination file and to decide exporter forwarding.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Method timing and status (start/complete/error).
    Operational,
    /// Reasoning traces extracted from method output.
    Cognitive,
    /// External-interaction metadata (retrievals, stores, cache hits).
    Contextual,
}

impl Surface {
    /// Returns the lowercase name used in serialized events and file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Cognitive => "cognitive",
            Self::Contextual => "contextual",
        }
    }

    /// Returns the JSONL file name backing this surface.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.jsonl", self.as_str())
    }
}

impl Display for Surface {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Surface {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operational" => Ok(Self::Operational),
            "cognitive" => Ok(Self::Cognitive),
            "contextual" => Ok(Self::Contextual),
            other => Err(Error::UnknownSurface(other.to_owned())),
        }
    }
}
