//! Product search command handler.
//!
//! Drives a `ProductFetchController` the same way the search screen does:
//! one `load_products`, then `load_more` until enough pages are loaded or
//! the service reports no more.

use std::sync::{Arc, Mutex};

use tabled::Tabled;
use tracing::debug;

use storefront_core::{
    CoreError, FilterState, Product, ProductDataSource, ProductFetchController, ProductPage,
    RemoteCatalog,
};

use crate::cli::{GlobalOpts, OutputFormat, ProductsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            price: output::format_price(p.price),
            category: p.category.clone().unwrap_or_default(),
        }
    }
}

// ── Error capture ───────────────────────────────────────────────────

/// Keeps the last fetch error so the exit code reflects its kind; the
/// controller itself only records the message.
struct ErrorTap<S> {
    inner: S,
    last: Mutex<Option<CoreError>>,
}

impl<S> ErrorTap<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            last: Mutex::new(None),
        }
    }

    fn take(&self) -> Option<CoreError> {
        self.last.lock().ok().and_then(|mut last| last.take())
    }
}

impl<S: ProductDataSource> ProductDataSource for ErrorTap<S> {
    async fn fetch_page(&self, filter: &FilterState) -> Result<ProductPage, CoreError> {
        let result = self.inner.fetch_page(filter).await;
        if let Err(ref e) = result {
            if let Ok(mut last) = self.last.lock() {
                *last = Some(e.clone());
            }
        }
        result
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: RemoteCatalog,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let source = Arc::new(ErrorTap::new(catalog));
    let controller = ProductFetchController::new(Arc::clone(&source));

    let filter = FilterState::default()
        .with_category(args.category)
        .with_sort(args.sort)
        .with_keyword(args.keyword.as_deref().unwrap_or_default());

    let pb = util::spinner("Loading products", global.quiet);
    controller.load_products(filter).await;

    let mut pages = 1;
    loop {
        let state = controller.snapshot();
        let wanted = args.all || pages < args.pages;
        if !wanted || !state.has_more || !state.status.is_idle() {
            break;
        }
        pb.set_message(format!("Loading page {}", pages + 1));
        controller.load_more().await;
        pages += 1;
    }
    pb.finish_and_clear();
    controller.close();

    let state = controller.snapshot();
    if let Some(message) = state.error() {
        return Err(source.take().map_or_else(
            || CliError::ApiError {
                message: message.to_owned(),
                status: None,
            },
            CliError::from,
        ));
    }
    debug!(pages, items = state.items().len(), has_more = state.has_more, "products loaded");

    let products: Vec<Product> = state.items().iter().map(|p| Product::clone(p)).collect();
    let out = output::render_list(
        &global.output,
        &products,
        |p| ProductRow::from(p),
        |p| p.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);

    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        let color = output::should_color(&global.color);
        if products.is_empty() {
            output::hint("No products match.", color);
        } else if state.has_more {
            output::hint(
                &format!(
                    "{} products shown; more available (use --pages or --all)",
                    products.len()
                ),
                color,
            );
        }
    }
    Ok(())
}
