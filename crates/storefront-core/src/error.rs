// ── Core error types ──
//
// User-facing errors from storefront-core. Consumers never see reqwest
// errors or JSON parse failures directly; the `From<storefront_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach storefront at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Unexpected response from storefront: {message}")]
    InvalidResponse { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` for failures the user can fix by signing in again.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<storefront_api::Error> for CoreError {
    fn from(err: storefront_api::Error) -> Self {
        match err {
            storefront_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            storefront_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            storefront_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            storefront_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            storefront_api::Error::Http { status: 404, message } => {
                CoreError::NotFound { what: message }
            }
            storefront_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            storefront_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_the_display_text() {
        let err = CoreError::from(storefront_api::Error::Http {
            status: 500,
            message: "catalog offline".into(),
        });
        assert_eq!(err.to_string(), "catalog offline");
    }

    #[test]
    fn unauthorized_maps_to_auth_failure() {
        let err = CoreError::from(storefront_api::Error::Authentication {
            message: "invalid credentials".into(),
        });
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "Authentication failed: invalid credentials");
    }

    #[test]
    fn missing_resource_maps_to_not_found() {
        let err = CoreError::from(storefront_api::Error::Http {
            status: 404,
            message: "no such category".into(),
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
