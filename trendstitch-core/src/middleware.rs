//! Middleware trait for wrapping `InterestProvider` implementations.

use std::sync::Arc;

use crate::provider::InterestProvider;

/// Trait implemented by provider middleware layers.
///
/// A middleware consumes an inner `InterestProvider` and returns a wrapped
/// provider that augments or restricts behavior (e.g., pacing, memoization).
pub trait Middleware: Send + Sync {
    /// Apply this middleware to wrap an inner provider and return the wrapped provider.
    fn apply(self: Box<Self>, inner: Arc<dyn InterestProvider>) -> Arc<dyn InterestProvider>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
