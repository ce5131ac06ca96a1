use async_trait::async_trait;
use shared_types::ListingRecord;
use sqlx::PgPool;
use tracing::debug;

use super::entities::ListingRow;
use crate::error::BackendError;
use crate::repository::ListingBackend;

/// Cap on a full fetch, to keep an unbounded table from flooding one
/// request.
pub const MAX_LISTING_ROWS: i64 = 500;

const LISTING_COLUMNS: &str = "id, name, category, category_slug, description, image, images, \
     address, neighborhood, district, coordinates, active, \
     phone, whatsapp, website, tags, featured, rating";

/// Thin query shim over the listings table. No retries and no caching:
/// every failure is reported as [`BackendError::Unavailable`] and the
/// fallback decision happens one layer up.
pub struct PgListingsClient {
    pool: PgPool,
}

impl PgListingsClient {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingBackend for PgListingsClient {
    async fn fetch_all(&self) -> Result<Vec<ListingRecord>, BackendError> {
        // A row with NULL active counts as active.
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             FROM listings
             WHERE active IS DISTINCT FROM FALSE
             ORDER BY featured DESC NULLS LAST, name ASC
             LIMIT $1",
        );

        let rows = sqlx::query(&query)
            .bind(MAX_LISTING_ROWS)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "fetched listings from primary backend");

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(ListingRow::from_row(row)?.into_record());
        }
        Ok(records)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<ListingRecord>, BackendError> {
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             FROM listings
             WHERE id = $1
             LIMIT 1",
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(ListingRow::from_row(&row)?.into_record())),
            None => Ok(None),
        }
    }
}
