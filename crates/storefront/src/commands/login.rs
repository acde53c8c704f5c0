//! Login command handler.

use std::io::IsTerminal;

use secrecy::SecretString;
use serde::Serialize;

use storefront_core::{Authenticator, RemoteCatalog, StoreConfig, User};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct SignedIn<'a> {
    id: &'a str,
    name: Option<&'a str>,
    email: &'a str,
}

fn detail(user: &SignedIn<'_>) -> String {
    let mut out = format!("Signed in as {}", user.name.unwrap_or(user.email));
    if user.name.is_some() {
        out.push_str(&format!(" <{}>", user.email));
    }
    out.push_str(&format!("\nUser ID: {}", user.id));
    out
}

/// Password: profile chain first, then `STOREFRONT_PASSWORD`, then a prompt.
fn resolve_password(store: &StoreConfig, profile_name: &str) -> Result<SecretString, CliError> {
    if let Some(ref creds) = store.credentials {
        return Ok(creds.password.clone());
    }
    if let Ok(pw) = std::env::var(storefront_config::PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }
    if std::io::stdin().is_terminal() {
        let pw = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
        if !pw.is_empty() {
            return Ok(SecretString::from(pw));
        }
    }
    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}

pub async fn handle(
    catalog: RemoteCatalog,
    store: &StoreConfig,
    profile_name: &str,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let email = args
        .email
        .or_else(|| store.credentials.as_ref().map(|c| c.email.clone()))
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.into(),
        })?;
    let password = resolve_password(store, profile_name)?;

    let auth = Authenticator::new(catalog);
    let pb = util::spinner("Signing in", global.quiet);
    let result = auth.sign_in(&email, &password).await;
    pb.finish_and_clear();
    let user: User = result.map_err(|e| CliError::from(e).with_profile(profile_name))?;

    let view = SignedIn {
        id: &user.id,
        name: user.name.as_deref(),
        email: &user.email,
    };
    let out = output::render_single(&global.output, &view, detail, |u| u.email.to_owned())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
