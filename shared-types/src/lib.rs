use serde::{Deserialize, Serialize};

/// Canonical geographic position. Source data carries coordinates either
/// as a `[lat, lng]` pair or as a `{lat, lng}` object; both deserialize
/// into this one shape (see [`RawCoordinates`]) so nothing past the
/// backend boundary has to care which variant a record arrived in.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// The two coordinate encodings found across backends and snapshot data.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(untagged)]
pub enum RawCoordinates {
    Pair([f64; 2]),
    Keyed { lat: f64, lng: f64 },
}

impl From<RawCoordinates> for Coordinates {
    fn from(raw: RawCoordinates) -> Self {
        match raw {
            RawCoordinates::Pair([lat, lng]) => Coordinates { lat, lng },
            RawCoordinates::Keyed { lat, lng } => Coordinates { lat, lng },
        }
    }
}

impl<'de> Deserialize<'de> for Coordinates {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawCoordinates::deserialize(deserializer).map(Coordinates::from)
    }
}

/// A single business/service entry in the directory, as served to
/// pages and API handlers. Field names stay camelCase on the wire to
/// match the stored record shape.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    /// Absent means active ("undefined is not false").
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl ListingRecord {
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }

    /// One consistent rule for map/contact display: the most specific
    /// non-empty field wins.
    pub fn display_address(&self) -> Option<&str> {
        non_empty(&self.address)
            .or_else(|| non_empty(&self.neighborhood))
            .or_else(|| non_empty(&self.district))
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Filter options recognized by listing fetches. The default filters
/// nothing.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub active_only: bool,
    pub category_slug: Option<String>,
}

impl ListingFilter {
    pub fn only_active() -> Self {
        Self {
            active_only: true,
            category_slug: None,
        }
    }

    pub fn category(slug: impl Into<String>) -> Self {
        Self {
            active_only: true,
            category_slug: Some(slug.into()),
        }
    }

    pub fn matches(&self, record: &ListingRecord) -> bool {
        if self.active_only && !record.is_active() {
            return false;
        }
        if let Some(slug) = &self.category_slug {
            return record.category_slug.as_deref() == Some(slug.as_str());
        }
        true
    }
}

/// Category names that accumulated as aliases of an existing slug.
const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("restaurant", "restaurants"),
    ("eatery", "restaurants"),
    ("food", "restaurants"),
    ("cafe", "cafes"),
    ("coffee-shop", "cafes"),
    ("rental", "rentals"),
    ("property-rental", "rentals"),
    ("lodging", "rentals"),
    ("store", "shopping"),
    ("shop", "shopping"),
    ("service", "services"),
];

/// Canonical slug for a category name: lowercased, accents folded,
/// separators collapsed to hyphens, then mapped through the alias table.
pub fn canonical_category_slug(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.trim().to_lowercase().chars() {
        match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => slug.push('a'),
            'é' | 'è' | 'ê' | 'ë' => slug.push('e'),
            'í' | 'ì' | 'î' | 'ï' => slug.push('i'),
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => slug.push('o'),
            'ú' | 'ù' | 'û' | 'ü' => slug.push('u'),
            'ç' => slug.push('c'),
            'ñ' => slug.push('n'),
            ' ' | '-' | '_' | '/' | '&' => {
                if !slug.is_empty() && !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            c if c.is_alphanumeric() => slug.push(c),
            _ => {}
        }
    }
    let slug = slug.trim_end_matches('-');
    for (alias, canonical) in CATEGORY_ALIASES {
        if slug == *alias {
            return (*canonical).to_string();
        }
    }
    slug.to_string()
}
