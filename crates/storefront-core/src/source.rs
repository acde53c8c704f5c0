// ── Data source seams ──
//
// The controller, category loader and authenticator only ever talk to
// these traits. `RemoteCatalog` implements all three on top of
// `storefront_api::StoreClient`; tests substitute scripted sources.

use std::future::Future;
use std::sync::Arc;

use secrecy::SecretString;
use storefront_api::{StoreClient, TlsMode, TransportConfig};
use tracing::debug;

use crate::config::{StoreConfig, TlsVerification};
use crate::convert;
use crate::error::CoreError;
use crate::model::{Category, FilterState, ProductPage, Session};

/// Fetches one page of products for a filter.
pub trait ProductDataSource: Send + Sync + 'static {
    fn fetch_page(
        &self,
        filter: &FilterState,
    ) -> impl Future<Output = Result<ProductPage, CoreError>> + Send;
}

/// Fetches the full, ordered category list.
pub trait CategoryDataSource: Send + Sync + 'static {
    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<Category>, CoreError>> + Send;
}

/// Exchanges credentials for a session.
pub trait AuthService: Send + Sync + 'static {
    fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;
}

impl<T: ProductDataSource> ProductDataSource for Arc<T> {
    fn fetch_page(
        &self,
        filter: &FilterState,
    ) -> impl Future<Output = Result<ProductPage, CoreError>> + Send {
        (**self).fetch_page(filter)
    }
}

impl<T: CategoryDataSource> CategoryDataSource for Arc<T> {
    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<Category>, CoreError>> + Send {
        (**self).fetch_categories()
    }
}

impl<T: AuthService> AuthService for Arc<T> {
    fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send {
        (**self).login(email, password)
    }
}

// ── Remote implementation ────────────────────────────────────────────

/// HTTP-backed data source for products, categories and sign-in.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its pool.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    client: StoreClient,
    page_size: u32,
}

impl RemoteCatalog {
    /// Build the HTTP client described by `config`.
    pub fn from_config(config: &StoreConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = StoreClient::new(config.url.as_str(), &transport)?;
        Ok(Self::new(client, config.page_size))
    }

    /// Wrap an existing client.
    pub fn new(client: StoreClient, page_size: u32) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl ProductDataSource for RemoteCatalog {
    async fn fetch_page(&self, filter: &FilterState) -> Result<ProductPage, CoreError> {
        let query = convert::product_query(filter, self.page_size);
        let resp = self.client.list_products(&query).await?;
        let page = convert::product_page(resp, filter, self.page_size);
        debug!(
            page = filter.page(),
            items = page.items.len(),
            has_more = page.has_more,
            "fetched product page"
        );
        Ok(page)
    }
}

impl CategoryDataSource for RemoteCatalog {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CoreError> {
        let categories = self.client.list_categories().await?;
        Ok(categories.into_iter().map(Category::from).collect())
    }
}

impl AuthService for RemoteCatalog {
    async fn login(&self, email: &str, password: &SecretString) -> Result<Session, CoreError> {
        let resp = self.client.login(email, password).await?;
        Ok(Session::from(resp))
    }
}

fn build_transport(config: &StoreConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig {
        tls,
        timeout: config.timeout,
    }
}
