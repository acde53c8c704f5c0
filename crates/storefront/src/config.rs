//! CLI configuration: thin wrapper around `storefront_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --timeout, etc.).

use std::time::Duration;

use storefront_core::{StoreConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use storefront_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Profile-not-found error listing what is configured.
pub fn profile_not_found(name: &str, config: &Config) -> CliError {
    let available: Vec<_> = config.profiles.keys().cloned().collect();
    CliError::ProfileNotFound {
        name: name.into(),
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

/// Build a `StoreConfig` from the config file, profile, and CLI overrides.
///
/// Flags win over profile values. Without a profile, `--api-url` alone
/// is enough for anonymous commands.
pub fn build_store_config(global: &GlobalOpts) -> Result<(StoreConfig, String), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut store = if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut profile = profile.clone();
        if let Some(ref url) = global.api_url {
            profile.api_url.clone_from(url);
        }
        storefront_config::profile_to_store_config(&profile, &profile_name, &cfg.defaults)?
    } else if global.profile.is_some() {
        return Err(profile_not_found(&profile_name, &cfg));
    } else {
        let url_str = global.api_url.as_deref().ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
        let mut store = StoreConfig::new(storefront_config::parse_api_url(url_str)?);
        store.timeout = Duration::from_secs(cfg.defaults.timeout);
        store.page_size = cfg.defaults.page_size;
        if cfg.defaults.insecure {
            store.tls = TlsVerification::DangerAcceptInvalid;
        }
        store
    };

    if global.insecure {
        store.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        store.timeout = Duration::from_secs(secs);
    }
    if let Some(size) = global.page_size {
        store.page_size = size;
    }

    Ok((store, profile_name))
}
