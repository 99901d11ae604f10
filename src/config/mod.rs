//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in network presets
//!     + optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CliConfig::network(selected) → NetworkConfig
//!     → passed explicitly to every command
//! ```
//!
//! # Design Decisions
//! - No global state: the selected network's settings travel in the command context
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{CliConfig, Network, NetworkConfig, WaitConfig, NETWORK_ENV_VAR};
