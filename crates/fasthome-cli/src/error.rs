//! Error types for Fasthome CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use fasthome_core::error::CoreError;
use thiserror::Error;

pub use fasthome_core::error::{ApiError, ConfigError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const API_ERROR: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure reported by the device store, already in user-facing form.
    #[error("Something went wrong: {0}")]
    Store(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Api(api) => match api {
                    ApiError::Transport(_) => exit_codes::NETWORK_ERROR,
                    ApiError::InvalidUrl(_) => exit_codes::INVALID_ARGS,
                    _ => exit_codes::API_ERROR,
                },
                CoreError::Config(_) => exit_codes::INVALID_ARGS,
            },
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::Store(_) => exit_codes::API_ERROR,
        }
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Core(CoreError::Api(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}
