// storefront-api: Async Rust client for the storefront REST service

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::StoreClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{
    CategoryResponse, LoginResponse, ProductListResponse, ProductQuery, ProductResponse,
    UserResponse,
};
