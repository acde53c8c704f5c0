// ── Runtime connection configuration ──
//
// These types describe *how* to reach a storefront service. They carry
// credential data and connection tuning, but never touch disk.
// The CLI/TUI constructs a `StoreConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default number of products requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development servers).
    DangerAcceptInvalid,
}

/// Email + password used by [`Authenticator`](crate::Authenticator).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Configuration for talking to one storefront service.
///
/// Built by CLI/TUI, passed to [`RemoteCatalog`](crate::RemoteCatalog);
/// core never reads config files.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Service base URL (e.g., `https://shop.example.com/api`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Products requested per page.
    pub page_size: u32,
    /// Sign-in credentials, when the profile has them.
    pub credentials: Option<Credentials>,
}

impl StoreConfig {
    /// Config with defaults for everything but the URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
            credentials: None,
        }
    }
}
