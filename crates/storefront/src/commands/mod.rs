//! Command handlers, one module per top-level subcommand.

pub mod categories;
pub mod config_cmd;
pub mod login;
pub mod products;
pub mod util;

use storefront_core::{RemoteCatalog, StoreConfig};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a service-backed command to its handler.
pub async fn dispatch(
    cmd: Command,
    store: &StoreConfig,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let catalog = RemoteCatalog::from_config(store)?;
    match cmd {
        Command::Products(args) => products::handle(catalog, args, global).await,
        Command::Categories => categories::handle(&catalog, global).await,
        Command::Login(args) => login::handle(catalog, store, profile_name, args, global).await,
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
