use shared_types::{ListingFilter, ListingRecord};

/// Snapshot of the directory taken from the primary backend; stale by
/// definition but always servable.
static SNAPSHOT: &str = include_str!("../data/listings.json");

/// Read-only, in-process listing dataset used whenever the primary
/// backend is disabled or failing. Holds no mutable state, so it is safe
/// for any number of concurrent readers.
#[derive(Debug, Clone)]
pub struct FallbackDataset {
    records: Vec<ListingRecord>,
}

impl FallbackDataset {
    /// The snapshot shipped in the binary. The data is fixed at compile
    /// time and pinned valid by tests, so a parse failure here is a
    /// build defect, not a runtime condition.
    pub fn embedded() -> Self {
        let records =
            serde_json::from_str(SNAPSHOT).expect("embedded listing snapshot should be valid");
        Self { records }
    }

    /// A dataset over caller-supplied records. Used by tests and by any
    /// deployment that ships its own snapshot.
    pub fn from_records(records: Vec<ListingRecord>) -> Self {
        Self { records }
    }

    pub fn fetch_all(&self, filter: &ListingFilter) -> Vec<ListingRecord> {
        self.records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    pub fn fetch_by_id(&self, id: &str) -> Option<ListingRecord> {
        // Linear scan; the snapshot is small and bounded.
        self.records.iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
