//! Category command handler.

use tabled::Tabled;

use storefront_core::{Category, CategoryDataSource, RemoteCatalog, category_route};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Search as")]
    route: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            route: category_route(c).category.unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(catalog: &RemoteCatalog, global: &GlobalOpts) -> Result<(), CliError> {
    let pb = util::spinner("Loading categories", global.quiet);
    let result = catalog.fetch_categories().await;
    pb.finish_and_clear();
    let categories = result?;

    let out = output::render_list(
        &global.output,
        &categories,
        |c| CategoryRow::from(c),
        |c| c.name.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
