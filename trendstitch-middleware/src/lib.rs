//! trendstitch-middleware
//!
//! Provider wrappers composed around an `InterestProvider` through the core
//! `Middleware` trait: pacing between calls and memoization of fetch
//! outcomes. Layers are applied innermost-first by the facade builder, so the
//! usual stack is cache outside pacer (a cache hit must not consume a pacing
//! slot).

mod cache;
mod pacer;

pub use crate::cache::{CacheMiddleware, CachedProvider};
pub use crate::pacer::{PacedProvider, PacerMiddleware};
