//! Common types shared across CLI commands.

use clap::ValueEnum;
use isochrone::mode::TravelMode;
use isochrone::provider::RouteOption;

/// Travel mode selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// On foot, 80 m/min
    Walking,
    /// Public transit, 600 m/min
    Transit,
    /// Car, sampled through the routing provider when configured
    Driving,
}

impl From<ModeArg> for TravelMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Walking => TravelMode::Walking,
            ModeArg::Transit => TravelMode::Transit,
            ModeArg::Driving => TravelMode::Driving,
        }
    }
}

/// Route preference selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RouteOptionArg {
    /// Fastest under real-time traffic
    Trafast,
    /// Most comfortable
    Tracomfort,
    /// Balanced
    Traoptimal,
    /// Avoid toll roads
    Traavoidtoll,
    /// Avoid car-only roads
    Traavoidcaronly,
}

impl From<RouteOptionArg> for RouteOption {
    fn from(option: RouteOptionArg) -> Self {
        match option {
            RouteOptionArg::Trafast => RouteOption::Trafast,
            RouteOptionArg::Tracomfort => RouteOption::Tracomfort,
            RouteOptionArg::Traoptimal => RouteOption::Traoptimal,
            RouteOptionArg::Traavoidtoll => RouteOption::Traavoidtoll,
            RouteOptionArg::Traavoidcaronly => RouteOption::Traavoidcaronly,
        }
    }
}
