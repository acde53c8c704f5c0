//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use storefront_config::ConfigError;
use storefront_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to storefront at {url}")]
    #[diagnostic(
        code(storefront::connection_failed),
        help(
            "Check that the service is running and reachable.\n\
             Reason: {reason}\n\
             For local servers with self-signed certificates try --insecure."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(storefront::timeout),
        help("Increase the timeout with --timeout or check service responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(storefront::auth_failed),
        help(
            "Verify your email and password.\n\
             Store a password with: storefront config set-password --profile {profile}"
        )
    )]
    AuthFailed { message: String, profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(storefront::no_credentials),
        help(
            "Pass --email or set STOREFRONT_EMAIL, and set STOREFRONT_PASSWORD,\n\
             or run: storefront config init"
        )
    )]
    NoCredentials { profile: String },

    // ── Service ──────────────────────────────────────────────────────
    #[error("{what} not found")]
    #[diagnostic(code(storefront::not_found))]
    NotFound { what: String },

    #[error("Storefront error: {message}")]
    #[diagnostic(code(storefront::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("Unexpected response from storefront: {message}")]
    #[diagnostic(
        code(storefront::invalid_response),
        help("Check that --api-url points at the storefront API root.")
    )]
    InvalidResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(storefront::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(storefront::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: storefront config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No storefront URL configured")]
    #[diagnostic(
        code(storefront::no_config),
        help(
            "Pass --api-url, set STOREFRONT_API_URL, or create a profile with:\n\
             storefront config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(storefront::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(storefront::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(storefront::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Config(inner) => match **inner {
                ConfigError::NoCredentials { .. } => exit_code::AUTH,
                ConfigError::Validation { .. } => exit_code::USAGE,
                _ => exit_code::GENERAL,
            },
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the active profile name to auth failures.
    pub fn with_profile(self, profile: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                message,
                profile: profile.into(),
            },
            other => other,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed {
                message,
                profile: "default".into(),
            },
            CoreError::Timeout => Self::Timeout,
            CoreError::NotFound { what } => Self::NotFound { what },
            CoreError::InvalidResponse { message } => Self::InvalidResponse { message },
            CoreError::Api { message, status } => Self::ApiError { message, status },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let cases = [
            (
                CoreError::ConnectionFailed {
                    url: "http://x".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (CoreError::Timeout, exit_code::TIMEOUT),
            (
                CoreError::AuthenticationFailed {
                    message: "invalid credentials".into(),
                },
                exit_code::AUTH,
            ),
            (
                CoreError::Api {
                    message: "catalog offline".into(),
                    status: Some(503),
                },
                exit_code::GENERAL,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn missing_credentials_is_an_auth_exit() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "shop".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
