use async_trait::async_trait;
use shared_types::{ListingFilter, ListingRecord};
use tracing::{debug, warn};

use crate::error::{BackendError, ListingError};
use crate::fallback::FallbackDataset;

/// Read seam between the façade and the primary backend.
/// [`PgListingsClient`](crate::db::listings_client::PgListingsClient) is
/// the production implementation; tests substitute in-memory fakes.
///
/// Contract: `fetch_all` returns only records not marked inactive,
/// already normalized and capped by the backend; `fetch_by_id` treats a
/// miss as `Ok(None)` and reserves `Err` for transport/query failure.
#[async_trait]
pub trait ListingBackend: Send + Sync + 'static {
    async fn fetch_all(&self) -> Result<Vec<ListingRecord>, BackendError>;

    async fn fetch_by_id(&self, id: &str) -> Result<Option<ListingRecord>, BackendError>;
}

/// The single entry point callers use for listing reads. Hides which
/// backend served a request: primary when configured and healthy, the
/// embedded snapshot otherwise. Callers can assume listing data is
/// always obtainable; at worst it is stale.
pub struct ListingRepository {
    /// `None` means the process is configured for local mode and the
    /// primary backend is never consulted.
    backend: Option<Box<dyn ListingBackend>>,
    fallback: FallbackDataset,
}

impl ListingRepository {
    pub fn with_primary(backend: impl ListingBackend, fallback: FallbackDataset) -> Self {
        Self {
            backend: Some(Box::new(backend)),
            fallback,
        }
    }

    pub fn local(fallback: FallbackDataset) -> Self {
        Self {
            backend: None,
            fallback,
        }
    }

    /// Every active listing. Never fails: a primary-backend failure is
    /// logged and answered from the snapshot instead.
    pub async fn fetch_all_listings(&self) -> Vec<ListingRecord> {
        let Some(backend) = &self.backend else {
            debug!("serving listings from local snapshot (local mode)");
            return self.fallback.fetch_all(&ListingFilter::only_active());
        };

        match backend.fetch_all().await {
            Ok(records) => {
                debug!(count = records.len(), "served listings from primary backend");
                records
            }
            Err(e) => {
                warn!(error = %e, "primary backend failed, serving fallback snapshot");
                self.fallback.fetch_all(&ListingFilter::only_active())
            }
        }
    }

    /// The listing with the given id, or `None`. A miss against the
    /// primary backend stays a miss; only a backend failure consults
    /// the snapshot. An empty id is a caller bug and errors immediately.
    pub async fn fetch_listing_by_id(
        &self,
        id: &str,
    ) -> Result<Option<ListingRecord>, ListingError> {
        if id.trim().is_empty() {
            return Err(ListingError::InvalidId(id.to_string()));
        }

        let Some(backend) = &self.backend else {
            return Ok(self.fallback.fetch_by_id(id));
        };

        match backend.fetch_by_id(id).await {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(listing_id = id, error = %e, "primary backend failed, consulting fallback snapshot");
                Ok(self.fallback.fetch_by_id(id))
            }
        }
    }
}
