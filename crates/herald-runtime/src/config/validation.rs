//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{FilterConfig, HeraldConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &HeraldConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    for (name, preset) in &config.filters {
        validate_filter_preset(name, preset)?;
    }
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "logging.file_path is required when logging.output is \"file\"",
        ));
    }

    if let Some(module) = logging.filters.keys().find(|m| m.trim().is_empty()) {
        return Err(ConfigError::validation(format!(
            "Invalid module name in logging.filters: {module:?}"
        )));
    }

    Ok(())
}

/// Checks a preset name and that its options decode into a filter.
fn validate_filter_preset(name: &str, preset: &FilterConfig) -> ConfigResult<()> {
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(ConfigError::validation(format!(
            "Filter preset name cannot be empty or contain whitespace: {name:?}"
        )));
    }

    preset
        .to_filter()
        .map(drop)
        .map_err(|source| ConfigError::invalid_filter(name, source))
}
