//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (tx_id, address, operation)
//!     → logging.rs subscriber, written to stderr
//! ```
//!
//! # Design Decisions
//! - stdout carries command output only, so logs never corrupt json/yaml/raw
//! - Quiet by default; `--verbose` or `RUST_LOG` opens it up

pub mod logging;
