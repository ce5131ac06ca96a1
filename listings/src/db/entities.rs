use shared_types::{canonical_category_slug, Coordinates, ListingRecord, RawCoordinates};
use sqlx::postgres::PgRow;
use sqlx::Row;
use tracing::debug;

/// A listings-table row as stored: JSON-encoded text for the fields the
/// admin tooling writes as arrays/objects, nullable everything except
/// `id` and `name`.
#[derive(Debug, Clone)]
pub struct ListingRow {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub category_slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    /// JSON array of URL strings.
    pub images: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub district: Option<String>,
    /// JSON, either `[lat, lng]` or `{"lat": .., "lng": ..}`.
    pub coordinates: Option<String>,
    pub active: Option<bool>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    /// JSON array of strings.
    pub tags: Option<String>,
    pub featured: Option<bool>,
    pub rating: Option<f64>,
}

impl ListingRow {
    pub fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(ListingRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            category_slug: row.try_get("category_slug")?,
            description: row.try_get("description")?,
            image: row.try_get("image")?,
            images: row.try_get("images")?,
            address: row.try_get("address")?,
            neighborhood: row.try_get("neighborhood")?,
            district: row.try_get("district")?,
            coordinates: row.try_get("coordinates")?,
            active: row.try_get("active")?,
            phone: row.try_get("phone")?,
            whatsapp: row.try_get("whatsapp")?,
            website: row.try_get("website")?,
            tags: row.try_get("tags")?,
            featured: row.try_get("featured")?,
            rating: row.try_get("rating")?,
        })
    }

    /// The one normalization point between the stored shape and the
    /// canonical [`ListingRecord`]: coordinates collapse from either raw
    /// encoding to `{lat, lng}`, a missing slug is derived from the
    /// category name, JSON-encoded sequences become real ones.
    pub fn into_record(self) -> ListingRecord {
        let coordinates = self.coordinates.as_deref().and_then(parse_coordinates);

        let category_slug = match self.category_slug {
            Some(slug) if !slug.trim().is_empty() => Some(slug),
            _ => self
                .category
                .as_deref()
                .map(canonical_category_slug)
                .filter(|s| !s.is_empty()),
        };

        ListingRecord {
            id: self.id,
            name: self.name,
            category: self.category,
            category_slug,
            description: self.description,
            image: self.image,
            images: parse_string_array(self.images.as_deref()),
            address: self.address,
            neighborhood: self.neighborhood,
            district: self.district,
            coordinates,
            active: self.active,
            phone: self.phone,
            whatsapp: self.whatsapp,
            website: self.website,
            tags: parse_string_array(self.tags.as_deref()),
            featured: self.featured.unwrap_or(false),
            rating: self.rating,
        }
    }
}

fn parse_coordinates(raw: &str) -> Option<Coordinates> {
    match serde_json::from_str::<RawCoordinates>(raw) {
        Ok(coords) => Some(coords.into()),
        Err(e) => {
            debug!(raw, error = %e, "dropping unparseable coordinates");
            None
        }
    }
}

fn parse_string_array(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}
