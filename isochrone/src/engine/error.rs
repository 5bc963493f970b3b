//! Engine error types.

use std::time::Duration;

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors surfaced to the caller of an isochrone computation.
///
/// Per-bearing provider failures never appear here; they are absorbed into
/// the sample set as [`ProbeError`]s.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsochroneError {
    /// The routing provider cannot be used for this request.
    #[error("routing provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),

    /// The caller cancelled the computation.
    #[error("isochrone computation cancelled")]
    Cancelled,
}

/// Why a single probe could not reach the provider.
///
/// Rejected responses are not probe errors; they count as "no route".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbeError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider panicked while handling probe")]
    Panicked,
}
