//! Travel modes and their heuristic speeds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the traveller moves from the center point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Transit,
    Driving,
}

impl TravelMode {
    /// All supported modes, slowest first.
    pub const ALL: [TravelMode; 3] = [
        TravelMode::Walking,
        TravelMode::Transit,
        TravelMode::Driving,
    ];

    /// Average speed used by the heuristic model, in meters per minute.
    pub const fn speed_m_per_min(self) -> f64 {
        match self {
            TravelMode::Walking => 80.0,
            TravelMode::Transit => 600.0,
            TravelMode::Driving => 800.0,
        }
    }

    /// Wire name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
            TravelMode::Driving => "driving",
        }
    }

    /// Whether a routing provider can refine this mode.
    ///
    /// The routing provider only answers car routes.
    pub const fn supports_sampling(self) -> bool {
        match self {
            TravelMode::Driving => true,
            TravelMode::Walking | TravelMode::Transit => false,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}': mode must be one of walking|driving|transit")]
pub struct UnknownModeError(pub String);

impl FromStr for TravelMode {
    type Err = UnknownModeError;

    /// Parses the exact lowercase wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "walking" => Ok(TravelMode::Walking),
            "transit" => Ok(TravelMode::Transit),
            "driving" => Ok(TravelMode::Driving),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}
