pub mod config;
pub mod db;
pub mod error;
pub mod fallback;
pub mod repository;

pub use config::{Config, DataSource};
pub use error::{BackendError, ListingError};
pub use fallback::FallbackDataset;
pub use repository::{ListingBackend, ListingRepository};

use crate::db::listings_client::PgListingsClient;
use tracing::{info, warn};

/// Wires a repository from process configuration. The pool and client are
/// constructed here, once, and handed to the repository; nothing holds a
/// hidden global handle. In `primary` mode a failed pool connection
/// degrades to the local snapshot instead of failing the process.
pub async fn build_repository(config: &Config) -> ListingRepository {
    let fallback = FallbackDataset::embedded();

    match config.data_source {
        DataSource::Local => {
            info!("listing data source: local snapshot");
            ListingRepository::local(fallback)
        }
        DataSource::Primary => match db::pool::connect(config).await {
            Ok(pool) => {
                info!("listing data source: primary backend");
                ListingRepository::with_primary(PgListingsClient::new(pool), fallback)
            }
            Err(e) => {
                warn!(error = %e, "primary backend unreachable at startup, running on local snapshot");
                ListingRepository::local(fallback)
            }
        },
    }
}
