use async_trait::async_trait;
use listings::{BackendError, FallbackDataset, ListingBackend, ListingError, ListingRepository};
use shared_types::ListingRecord;

/// In-memory stand-in for the primary backend. Honors the
/// [`ListingBackend`] contract: `fetch_all` serves only active records,
/// a by-id miss is `Ok(None)`, and `fail` simulates transport failure.
struct FakeBackend {
    records: Vec<ListingRecord>,
    fail: bool,
}

impl FakeBackend {
    fn healthy(records: Vec<ListingRecord>) -> Self {
        Self {
            records,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ListingBackend for FakeBackend {
    async fn fetch_all(&self) -> Result<Vec<ListingRecord>, BackendError> {
        if self.fail {
            return Err(BackendError::Unavailable(sqlx::Error::PoolTimedOut));
        }
        Ok(self
            .records
            .iter()
            .filter(|r| r.is_active())
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<ListingRecord>, BackendError> {
        if self.fail {
            return Err(BackendError::Unavailable(sqlx::Error::PoolTimedOut));
        }
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }
}

/// Opt-in log output (`RUST_LOG=listings=debug cargo test`) for the
/// failure-path tests, where the façade's fallback warnings are the
/// interesting signal.
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn record(id: &str, active: Option<bool>) -> ListingRecord {
    serde_json::from_str(&format!(
        r#"{{"id": "{id}", "name": "Listing {id}"}}"#
    ))
    .map(|mut r: ListingRecord| {
        r.active = active;
        r
    })
    .unwrap()
}

/// Primary holds an active "a" and an inactive "b"; the snapshot holds
/// an active "c" and an inactive "d".
fn primary_records() -> Vec<ListingRecord> {
    vec![record("a", Some(true)), record("b", Some(false))]
}

fn snapshot() -> FallbackDataset {
    FallbackDataset::from_records(vec![record("c", Some(true)), record("d", Some(false))])
}

#[tokio::test]
async fn local_mode_serves_snapshot_active_records() {
    let repo = ListingRepository::local(snapshot());

    let all = repo.fetch_all_listings().await;
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["c"]);
}

#[tokio::test]
async fn healthy_primary_serves_only_active_records() {
    let repo = ListingRepository::with_primary(FakeBackend::healthy(primary_records()), snapshot());

    let all = repo.fetch_all_listings().await;
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
    assert!(all.iter().all(|r| r.active != Some(false)));
}

#[tokio::test]
async fn backend_failure_falls_back_to_snapshot() {
    init_tracing();
    let repo = ListingRepository::with_primary(FakeBackend::failing(), snapshot());

    let all = repo.fetch_all_listings().await;
    let standalone = ListingRepository::local(snapshot()).fetch_all_listings().await;
    assert_eq!(all, standalone);
}

#[tokio::test]
async fn fetch_all_is_idempotent_against_unchanged_backend() {
    let repo = ListingRepository::with_primary(FakeBackend::healthy(primary_records()), snapshot());

    let first = repo.fetch_all_listings().await;
    let second = repo.fetch_all_listings().await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_id_is_invalid_in_both_modes() {
    let local = ListingRepository::local(snapshot());
    let primary =
        ListingRepository::with_primary(FakeBackend::healthy(primary_records()), snapshot());

    for repo in [&local, &primary] {
        assert_eq!(
            repo.fetch_listing_by_id("").await,
            Err(ListingError::InvalidId(String::new())),
        );
        assert!(matches!(
            repo.fetch_listing_by_id("   ").await,
            Err(ListingError::InvalidId(_)),
        ));
    }
}

#[tokio::test]
async fn by_id_hit_serves_primary_record() {
    let repo = ListingRepository::with_primary(FakeBackend::healthy(primary_records()), snapshot());

    let found = repo.fetch_listing_by_id("a").await.unwrap();
    assert_eq!(found.map(|r| r.id), Some("a".to_string()));
}

#[tokio::test]
async fn by_id_miss_does_not_consult_snapshot() {
    // "c" exists only in the snapshot; a healthy primary must answer the
    // miss itself rather than fall back.
    let repo = ListingRepository::with_primary(FakeBackend::healthy(primary_records()), snapshot());

    assert_eq!(repo.fetch_listing_by_id("c").await, Ok(None));
    assert_eq!(repo.fetch_listing_by_id("z").await, Ok(None));
}

#[tokio::test]
async fn by_id_backend_failure_falls_back_to_snapshot() {
    init_tracing();
    let repo = ListingRepository::with_primary(FakeBackend::failing(), snapshot());

    let found = repo.fetch_listing_by_id("c").await.unwrap();
    assert_eq!(found.map(|r| r.id), Some("c".to_string()));
    assert_eq!(repo.fetch_listing_by_id("z").await, Ok(None));
}

#[tokio::test]
async fn local_mode_by_id_reads_snapshot() {
    let repo = ListingRepository::local(snapshot());

    let found = repo.fetch_listing_by_id("c").await.unwrap();
    assert_eq!(found.map(|r| r.id), Some("c".to_string()));
    assert_eq!(repo.fetch_listing_by_id("a").await, Ok(None));
}
