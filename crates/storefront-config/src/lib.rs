//! Shared configuration for the storefront CLI and TUI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `storefront_core::StoreConfig`. Both binaries
//! depend on this crate; the CLI layers its flag overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use storefront_core::{Credentials, DEFAULT_PAGE_SIZE, StoreConfig, TlsVerification};

/// Keyring service name for stored passwords.
const KEYRING_SERVICE: &str = "storefront";

/// Env var consulted for the password when a profile names none.
pub const PASSWORD_ENV: &str = "STOREFRONT_PASSWORD";

/// Env var consulted for the email when a profile has none.
pub const EMAIL_ENV: &str = "STOREFRONT_EMAIL";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named storefront profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: explicit choice, else the default.
    pub fn profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// A named storefront profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Service base URL (e.g., "https://shop.example.com/api").
    pub api_url: String,

    /// Sign-in email.
    pub email: Option<String>,

    /// Password (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Skip TLS verification.
    pub insecure: Option<bool>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override products per page.
    pub page_size: Option<u32>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "storefront", "storefront").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("storefront");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file yields defaults.
///
/// Env vars use a `STOREFRONT_` prefix with `__` as the nesting separator,
/// e.g. `STOREFRONT_DEFAULTS__PAGE_SIZE=40`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("STOREFRONT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

/// Resolve the sign-in email: profile, then `STOREFRONT_EMAIL`.
pub fn resolve_email(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .email
        .clone()
        .or_else(|| std::env::var(EMAIL_ENV).ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve the password from the credential chain.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env, else STOREFRONT_PASSWORD
    let env_name = profile.password_env.as_deref().unwrap_or(PASSWORD_ENV);
    if let Ok(val) = std::env::var(env_name) {
        return Ok(SecretString::from(val));
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Email + password, when both resolve.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Option<Credentials> {
    let email = resolve_email(profile, profile_name).ok()?;
    let password = resolve_password(profile, profile_name).ok()?;
    Some(Credentials { email, password })
}

/// Parse a service URL, requiring http(s).
pub fn parse_api_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Build a `StoreConfig` from a profile plus global defaults.
///
/// Suitable for the TUI and other non-CLI consumers. Credentials are
/// attached only when both email and password resolve.
pub fn profile_to_store_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<StoreConfig, ConfigError> {
    let url = parse_api_url(&profile.api_url)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let page_size = profile.page_size.unwrap_or(defaults.page_size);
    if page_size == 0 {
        return Err(ConfigError::Validation {
            field: "page_size".into(),
            reason: "must be at least 1".into(),
        });
    }

    Ok(StoreConfig {
        url,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        page_size,
        credentials: resolve_credentials(profile, profile_name),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile(url: &str) -> Profile {
        Profile {
            api_url: url.into(),
            ..Profile::default()
        }
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "shop".into(),
            Profile {
                email: Some("ada@example.com".into()),
                page_size: Some(40),
                ..profile("https://shop.example.com/api")
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let shop = loaded.profile("shop").unwrap();
        assert_eq!(shop.api_url, "https://shop.example.com/api");
        assert_eq!(shop.email.as_deref(), Some("ada@example.com"));
        assert_eq!(shop.page_size, Some(40));
        assert_eq!(loaded.defaults.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("default"));
        assert!(loaded.profiles.is_empty());
        assert_eq!(loaded.defaults.output, "table");
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = Config::default().profile("nope").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { .. }));
    }

    #[test]
    fn profile_name_prefers_explicit() {
        let cfg = Config::default();
        assert_eq!(cfg.profile_name(Some("shop")), "shop");
        assert_eq!(cfg.profile_name(None), "default");
    }

    #[test]
    fn store_config_applies_overrides() {
        let p = Profile {
            timeout: Some(5),
            page_size: Some(10),
            insecure: Some(true),
            ..profile("http://localhost:4000")
        };
        let cfg = profile_to_store_config(&p, "local", &Defaults::default()).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn store_config_uses_defaults_and_system_tls() {
        let cfg = profile_to_store_config(
            &profile("https://shop.example.com"),
            "shop",
            &Defaults::default(),
        )
        .unwrap();
        assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn rejects_bad_urls_and_zero_page_size() {
        let defaults = Defaults::default();
        assert!(profile_to_store_config(&profile("not a url"), "x", &defaults).is_err());
        assert!(profile_to_store_config(&profile("ftp://shop"), "x", &defaults).is_err());

        let p = Profile {
            page_size: Some(0),
            ..profile("https://shop.example.com")
        };
        assert!(matches!(
            profile_to_store_config(&p, "x", &defaults),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn password_falls_back_to_plaintext() {
        let p = Profile {
            password_env: Some("STOREFRONT_TEST_UNSET_PASSWORD_VAR".into()),
            password: Some("plaintext".into()),
            ..profile("https://shop.example.com")
        };

        let secret = resolve_password(&p, "plaintext-fallback-test").unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&secret), "plaintext");
    }

    #[test]
    fn no_password_anywhere_is_no_credentials() {
        let p = Profile {
            password_env: Some("STOREFRONT_TEST_UNSET_PASSWORD_VAR".into()),
            ..profile("https://shop.example.com")
        };
        assert!(matches!(
            resolve_password(&p, "no-credentials-test"),
            Err(ConfigError::NoCredentials { .. })
        ));
    }
}
