//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → IngressConfig (validated, immutable)
//!
//! process environment
//!     → env.rs (Environment: IP_WHITELIST, DEFAULT_RESPONSE, PORT)
//!
//! Both are built once at startup and shared via Arc.
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow running without a config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::Environment;
pub use loader::{load_config, ConfigError};
pub use schema::{
    IngestConfig, IngressConfig, ListenerConfig, ObservabilityConfig, PublisherConfig,
    TimeoutConfig,
};
