use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the trendstitch workspace.
///
/// Covers malformed requests, unplannable date ranges, and provider-tagged
/// failures. Degradations that are recovered locally (a window with no data,
/// an undefined overlap reconciliation, a length mismatch) are *not* errors;
/// they surface as quality flags on the assembled result instead.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StitchError {
    /// Malformed input request (empty identity, bad scope set, inverted span).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The requested date range cannot be planned (start after end, or
    /// clipping produced a zero-length window).
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// An individual provider call failed.
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {provider}")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
    },

    /// The provider is persistently unavailable (e.g. sustained rate-limit
    /// rejection). Not locally recoverable; halts further fetching for the
    /// run while already-assembled results are preserved.
    #[error("provider unavailable: {provider}: {msg}")]
    ProviderUnavailable {
        /// Provider name that became unavailable.
        provider: String,
        /// Human-readable reason.
        msg: String,
    },
}

impl StitchError {
    /// Helper: build an `InvalidRequest` error from a description.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Helper: build an `InvalidRange` error from a description.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Helper: build a `Provider` error with the provider name and message.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
        }
    }

    /// Helper: build a `ProviderUnavailable` error.
    pub fn unavailable(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Whether this error halts a batch run rather than failing one request.
    #[must_use]
    pub const fn is_fatal_for_run(&self) -> bool {
        matches!(self, Self::ProviderUnavailable { .. })
    }
}
