//! Configuration module for the Toolkit lexer
//!
//! Compile-time limits are generated by build.rs from the TOML profile in
//! `config/`; runtime preferences live in [`runtime`].

// Generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    ConfigError, FileProcessorPreferences, LogLevel, LoggingPreferences, RuntimeConfig,
    ScannerPreferences,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("TOOLKIT_BUILD_PROFILE").unwrap_or("development")
    }

    /// Configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("TOOLKIT_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::{file_processing, lexical, logging};
    use super::*;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(lexical::MAX_TOKEN_COUNT > 0);
        assert!(lexical::MAX_TOKEN_LENGTH > 0);
        assert!(file_processing::LARGE_FILE_THRESHOLD <= file_processing::MAX_FILE_SIZE);
        assert!(logging::MAX_LOG_EVENTS_PER_FILE <= logging::LOG_BUFFER_SIZE);
        assert!(logging::SECURITY_MIN_LOG_LEVEL <= 2);
    }

    #[test]
    fn test_build_info() {
        assert!(build_info::source_info().ends_with(".toml"));
    }
}
