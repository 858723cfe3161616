//! Timeline Client
//!
//! Read and write access to the timeline API:
//! - [`RecordFetcher`]: typed revision records by item kind and id
//! - [`Deleter`]: `DELETE` requests for confirmed deletions
//! - [`ApiClient`]: reqwest implementation of both, driven by [`ClientConfig`]
//!
//! # Example
//!
//! ```rust,ignore
//! use timeline_client::{ApiClient, ClientConfig, RecordFetcher};
//! use timeline_types::{ItemId, ItemKind};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ClientConfig::new().apply_env())?;
//! let record = client.fetch(ItemKind::Edit, &ItemId::new("42")?).await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;

pub use api::ApiClient;
pub use config::{ClientConfig, ENV_BASE_URL, ENV_TOKEN};
pub use error::{ConfigError, DeleteError, FetchError};
pub use fetcher::{Deleter, RecordFetcher};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
