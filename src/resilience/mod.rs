//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Confirmation waiter, between two status queries:
//!     → backoff.rs (Delay capability, jittered block-time interval)
//! ```
//!
//! # Design Decisions
//! - Only "not yet confirmed" is waited on; I/O errors are never retried here
//! - The delay is injected so polling can be driven without real timers
//! - Per-request timeouts live on the HTTP client, not here

pub mod backoff;

pub use backoff::{Delay, TokioDelay};
