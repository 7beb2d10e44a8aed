//! Herald Runtime - configuration and logging for the Herald engine.
//!
//! This crate provides:
//! - Layered configuration loading (`HeraldConfig`, `ConfigLoader`) with
//!   named filter presets
//! - Logging setup on `tracing-subscriber` (`LoggingBuilder`,
//!   `init_from_config`)
//!
//! ```ignore
//! use herald_framework::{Dispatcher, Matcher};
//! use herald_runtime::{config::load_config, logging};
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging);
//!
//! let ping = config.matcher_filter("ping")?;
//! let dispatcher = Dispatcher::new().with(Matcher::try_new(ping, reply)?);
//! ```

pub mod config;
pub mod error;
pub mod logging;

// Re-exports
pub use config::{
    ConfigError, ConfigLoader, ConfigResult, FilterConfig, HeraldConfig, LoggingConfig,
};
pub use error::{LoggingError, LoggingResult};
pub use logging::{LoggingBuilder, SpanEvents, init_from_config};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides all the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
