//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use hearth_core::CoreError;

/// Exit codes for scripting.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to hub at {url}")]
    #[diagnostic(
        code(hearth::connection_failed),
        help(
            "Check that the hub is running and accessible.\n\
             URL: {url}\n\
             Reason: {reason}\n\
             Try: hearth status -H {url}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Hub request timed out")]
    #[diagnostic(
        code(hearth::timeout),
        help("The hub proxies commands to the device itself; a slow device can stall the hub. Try again or raise --timeout.")
    )]
    Timeout,

    // ── Configuration ────────────────────────────────────────────────
    #[error("No hub configured")]
    #[diagnostic(
        code(hearth::no_config),
        help(
            "Create a profile with: hearth config init -H http://<hub-address>\n\
             Or pass the hub directly: --hub http://<hub-address>\n\
             Config file: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(hearth::validation))]
    Validation { field: String, reason: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(hearth::not_found),
        help("Run: hearth {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Hub ──────────────────────────────────────────────────────────
    #[error("Hub rejected the operation: {message}")]
    #[diagnostic(code(hearth::rejected))]
    Rejected { message: String },

    #[error("API error: {message}")]
    #[diagnostic(code(hearth::api_error))]
    ApiError { message: String },

    // ── Local ────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    #[diagnostic(code(hearth::io))]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    #[diagnostic(code(hearth::config))]
    Config { message: String },
}

impl CliError {
    /// Stable exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NoConfig { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::ApiError { .. } | Self::Io(_) | Self::Config { .. } => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::HubDisconnected => Self::ConnectionFailed {
                url: "<hub>".into(),
                reason: "not connected".into(),
            },
            CoreError::Timeout => Self::Timeout,
            CoreError::DeviceNotFound { id } => Self::NotFound {
                resource_type: "device".into(),
                identifier: id.to_string(),
                list_command: "devices list".into(),
            },
            CoreError::EventNotFound { id } => Self::NotFound {
                resource_type: "event".into(),
                identifier: id.to_string(),
                list_command: "events list".into(),
            },
            CoreError::Rejected { message } => Self::Rejected { message },
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Api { message } | CoreError::Internal(message) => {
                Self::ApiError { message }
            }
            CoreError::Config { message } => Self::Config { message },
        }
    }
}

impl From<hearth_config::ConfigError> for CliError {
    fn from(err: hearth_config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
