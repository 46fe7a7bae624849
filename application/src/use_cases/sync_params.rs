//! Sync params use case
//!
//! Drives one reconciliation run: fetch each source document in order,
//! validate its dynamic parameters, pick the winning item per parameter,
//! and bring the external store up to date with as few writes as possible.

use crate::ports::config_fetcher::ConfigFetcher;
use crate::ports::value_store::ValueStore;
use chrono::{DateTime, Utc};
use mapsync_domain::{Param, RunStats, is_dynamic_key};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input for one sync run.
#[derive(Debug, Clone)]
pub struct SyncInput {
    /// Source URLs, processed strictly in order. A later source reconciles
    /// after an earlier one and can overwrite keys it set.
    pub sources: Vec<String>,
    /// The evaluation instant for effectiveness checks.
    pub now: DateTime<Utc>,
}

impl SyncInput {
    pub fn new(sources: Vec<String>) -> Self {
        Self {
            sources,
            now: Utc::now(),
        }
    }

    /// Pin the evaluation instant (tests and dry replays).
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

/// Result of one sync run.
#[derive(Debug, Clone, Copy)]
pub struct SyncResult {
    /// Counters accumulated over the run.
    pub stats: RunStats,
    /// Number of sources whose document was fetched and processed. Zero
    /// means the run reconciled nothing at all, which callers treat as a
    /// hard failure rather than a quiet no-op.
    pub sources_synced: u32,
}

/// Use case reconciling dynamic parameters into the Map store.
///
/// Writes are costly and can fail, so every applied item goes through a
/// read-compare-write sequence, and every expected failure class (broken
/// source, malformed parameter, rejected write) is absorbed into the run
/// statistics instead of aborting the run.
pub struct SyncParamsUseCase<F: ConfigFetcher, S: ValueStore> {
    fetcher: Arc<F>,
    store: Arc<S>,
}

impl<F: ConfigFetcher, S: ValueStore> SyncParamsUseCase<F, S> {
    pub fn new(fetcher: Arc<F>, store: Arc<S>) -> Self {
        Self { fetcher, store }
    }

    /// Execute the run and return the accumulated statistics.
    ///
    /// Sources and parameters are processed sequentially; each key's
    /// read-then-write is completed before the next key is touched.
    pub async fn execute(&self, input: SyncInput) -> SyncResult {
        let mut stats = RunStats::default();
        let mut sources_synced = 0;

        for url in &input.sources {
            if self.sync_source(url, input.now, &mut stats).await {
                sources_synced += 1;
            }
        }

        SyncResult {
            stats,
            sources_synced,
        }
    }

    /// Reconcile all dynamic parameters from a single source document.
    ///
    /// A broken source contributes zero parameters; subsequent sources
    /// still run. Returns whether the source's document was fetched.
    async fn sync_source(&self, url: &str, now: DateTime<Utc>, stats: &mut RunStats) -> bool {
        info!("Syncing config from: {}", url);

        let document = match self.fetcher.fetch(url).await {
            Ok(document) => document,
            Err(e) => {
                warn!("Skipping source: {}", e);
                return false;
            }
        };

        for (key, raw) in &document {
            if !is_dynamic_key(key) {
                continue;
            }

            let param = match Param::parse(key, raw) {
                Ok(param) => param,
                Err(e) => {
                    warn!("{}", e);
                    stats.failed += 1;
                    continue;
                }
            };

            self.apply_param(key, &param, now, stats).await;
        }

        true
    }

    /// Apply the winning item of one parameter via the conditional write
    /// protocol: read, compare canonical stringifications, write only on a
    /// difference.
    async fn apply_param(&self, key: &str, param: &Param, now: DateTime<Utc>, stats: &mut RunStats) {
        let Some(winner) = param.winning_item(now) else {
            debug!("No effective item for {}, skipping", key);
            stats.skipped += param.items.len() as u32;
            return;
        };

        // Non-winning items are not applied, whether still in the future or
        // superseded by a later activation.
        stats.skipped += (param.items.len() - 1) as u32;

        let desired = winner.value.to_string();

        let current = match self.store.read(key).await {
            Ok(current) => current,
            Err(e) => {
                warn!("Failed to read config {}: {}", key, e);
                stats.failed += 1;
                return;
            }
        };

        if current == desired {
            debug!("Config {}={} unchanged, skipping store", key, desired);
            stats.unchanged += 1;
            return;
        }

        match self.store.write(key, &desired).await {
            Ok(()) => {
                info!("Set config {}={} (was: {})", key, desired, current);
                stats.stored += 1;
            }
            Err(e) => {
                warn!("Failed to set config {}={}: {}", key, desired, e);
                stats.failed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::config_fetcher::FetchError;
    use crate::ports::value_store::StoreError;
    use async_trait::async_trait;
    use mapsync_domain::RawDocument;
    use serde_json::json;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// Fetcher serving canned documents; unknown URLs fail as transport
    /// errors.
    struct MockFetcher {
        documents: HashMap<String, serde_json::Value>,
    }

    impl MockFetcher {
        fn new(documents: Vec<(&str, serde_json::Value)>) -> Self {
            Self {
                documents: documents
                    .into_iter()
                    .map(|(url, doc)| (url.to_string(), doc))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl ConfigFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
            match self.documents.get(url) {
                Some(serde_json::Value::Object(map)) => Ok(map.clone()),
                Some(_) => Err(FetchError::Malformed {
                    url: url.to_string(),
                    reason: "not an object".to_string(),
                }),
                None => Err(FetchError::Transport {
                    url: url.to_string(),
                    reason: "connection refused".to_string(),
                }),
            }
        }
    }

    /// In-memory store recording every read and write.
    struct MockStore {
        values: Mutex<HashMap<String, String>>,
        reads: Mutex<Vec<String>>,
        writes: Mutex<Vec<(String, String)>>,
        failing_keys: HashSet<String>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                values: Mutex::new(HashMap::new()),
                reads: Mutex::new(Vec::new()),
                writes: Mutex::new(Vec::new()),
                failing_keys: HashSet::new(),
            }
        }

        fn with_value(self, key: &str, value: &str) -> Self {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            self
        }

        fn failing_on(mut self, key: &str) -> Self {
            self.failing_keys.insert(key.to_string());
            self
        }

        fn value(&self, key: &str) -> Option<String> {
            self.values.lock().unwrap().get(key).cloned()
        }

        fn write_count(&self) -> usize {
            self.writes.lock().unwrap().len()
        }

        fn read_keys(&self) -> Vec<String> {
            self.reads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ValueStore for MockStore {
        async fn read(&self, key: &str) -> Result<String, StoreError> {
            self.reads.lock().unwrap().push(key.to_string());
            Ok(self.value(key).unwrap_or_default())
        }

        async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.failing_keys.contains(key) {
                return Err(StoreError::Rejected("out of gas".to_string()));
            }
            self.writes
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string()));
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn use_case(
        fetcher: MockFetcher,
        store: MockStore,
    ) -> (SyncParamsUseCase<MockFetcher, MockStore>, Arc<MockStore>) {
        let store = Arc::new(store);
        (
            SyncParamsUseCase::new(Arc::new(fetcher), Arc::clone(&store)),
            store,
        )
    }

    fn input(urls: &[&str]) -> SyncInput {
        SyncInput::new(urls.iter().map(|u| u.to_string()).collect())
            .at("2026-06-01T12:00:00Z".parse().unwrap())
    }

    fn simple_param(value: serde_json::Value) -> serde_json::Value {
        json!({"description": "test param", "items": [{"value": value}]})
    }

    const URL: &str = "https://configs.test/validator-config-prod.json";
    const COMMON_URL: &str = "https://configs.test/common-config-prod.json";

    #[tokio::test]
    async fn test_stores_effective_value() {
        let fetcher = MockFetcher::new(vec![(
            URL,
            json!({"DYNAMIC_MAX_JOBS": simple_param(json!(25))}),
        )]);
        let (uc, store) = use_case(fetcher, MockStore::new());

        let stats = uc.execute(input(&[URL])).await.stats;

        assert_eq!(stats.stored, 1);
        assert_eq!(stats.failed, 0);
        assert_eq!(store.value("DYNAMIC_MAX_JOBS").as_deref(), Some("25"));
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let document = json!({
            "DYNAMIC_MAX_JOBS": simple_param(json!(25)),
            "DYNAMIC_FEATURE_ON": simple_param(json!(true)),
        });
        let (uc, _store) = use_case(MockFetcher::new(vec![(URL, document)]), MockStore::new());

        let first = uc.execute(input(&[URL])).await.stats;
        assert_eq!(first.stored, 2);

        let second = uc.execute(input(&[URL])).await.stats;
        assert_eq!(second.stored, 0);
        assert_eq!(second.unchanged, 2);
        assert_eq!(second.failed, 0);
    }

    #[tokio::test]
    async fn test_write_suppressed_when_value_matches() {
        let fetcher = MockFetcher::new(vec![(
            URL,
            json!({"DYNAMIC_MAX_JOBS": simple_param(json!(25))}),
        )]);
        let store = MockStore::new().with_value("DYNAMIC_MAX_JOBS", "25");
        let (uc, store) = use_case(fetcher, store);

        let stats = uc.execute(input(&[URL])).await.stats;

        assert_eq!(stats.unchanged, 1);
        assert_eq!(stats.stored, 0);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_non_dynamic_keys_are_ignored() {
        let fetcher = MockFetcher::new(vec![(
            URL,
            json!({
                "comment": "not a param at all",
                "STATIC_LIMIT": simple_param(json!(5)),
            }),
        )]);
        let (uc, store) = use_case(fetcher, MockStore::new());

        let stats = uc.execute(input(&[URL])).await.stats;

        assert_eq!(stats, RunStats::default());
        assert!(store.read_keys().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_param_does_not_abort_run() {
        let fetcher = MockFetcher::new(vec![(
            URL,
            json!({
                "DYNAMIC_BROKEN": {"items": [{"value": 1}]},
                "DYNAMIC_OK": simple_param(json!("fine")),
            }),
        )]);
        let store = MockStore::new().with_value("DYNAMIC_OK", "stale");
        let (uc, store) = use_case(fetcher, store);

        let stats = uc.execute(input(&[URL])).await.stats;

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.stored, 1);
        assert_eq!(store.value("DYNAMIC_OK").as_deref(), Some("fine"));
    }

    #[tokio::test]
    async fn test_write_failure_does_not_abort_run() {
        let fetcher = MockFetcher::new(vec![(
            URL,
            json!({
                "DYNAMIC_CURSED": simple_param(json!(1)),
                "DYNAMIC_OK": simple_param(json!(2)),
            }),
        )]);
        let store = MockStore::new().failing_on("DYNAMIC_CURSED");
        let (uc, store) = use_case(fetcher, store);

        let stats = uc.execute(input(&[URL])).await.stats;

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.stored, 1);
        assert_eq!(store.value("DYNAMIC_OK").as_deref(), Some("2"));
        assert!(store.value("DYNAMIC_CURSED").is_none());
    }

    #[tokio::test]
    async fn test_broken_source_contributes_zero_params() {
        let fetcher = MockFetcher::new(vec![(
            COMMON_URL,
            json!({"DYNAMIC_MAX_JOBS": simple_param(json!(7))}),
        )]);
        let (uc, store) = use_case(fetcher, MockStore::new());

        // First source is unreachable; the fallback must still be applied.
        let result = uc.execute(input(&[URL, COMMON_URL])).await;

        assert_eq!(result.stats.stored, 1);
        assert_eq!(result.sources_synced, 1);
        assert_eq!(store.value("DYNAMIC_MAX_JOBS").as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_no_reachable_source_reports_zero_synced() {
        let fetcher = MockFetcher::new(vec![]);
        let (uc, store) = use_case(fetcher, MockStore::new());

        let result = uc.execute(input(&[URL, COMMON_URL])).await;

        assert_eq!(result.sources_synced, 0);
        assert_eq!(result.stats, RunStats::default());
        assert!(store.read_keys().is_empty());
    }

    #[tokio::test]
    async fn test_later_source_overrides_earlier() {
        let fetcher = MockFetcher::new(vec![
            (URL, json!({"DYNAMIC_MAX_JOBS": simple_param(json!(10))})),
            (COMMON_URL, json!({"DYNAMIC_MAX_JOBS": simple_param(json!(20))})),
        ]);
        let (uc, store) = use_case(fetcher, MockStore::new());

        let stats = uc.execute(input(&[URL, COMMON_URL])).await.stats;

        assert_eq!(stats.stored, 2);
        assert_eq!(store.value("DYNAMIC_MAX_JOBS").as_deref(), Some("20"));
    }

    #[tokio::test]
    async fn test_last_effective_item_wins_single_write() {
        let fetcher = MockFetcher::new(vec![(
            URL,
            json!({"DYNAMIC_RATE": {
                "description": "scheduled rollout",
                "items": [
                    {"value": "a", "effective_from": "2026-01-01T00:00:00Z"},
                    {"value": "b", "effective_from": "2026-02-01T00:00:00Z"},
                    {"value": "c", "effective_from": "2030-01-01T00:00:00Z"},
                ],
            }}),
        )]);
        let (uc, store) = use_case(fetcher, MockStore::new());

        let stats = uc.execute(input(&[URL])).await.stats;

        // Only the winner is written; the superseded and the future item
        // both count as skipped.
        assert_eq!(store.value("DYNAMIC_RATE").as_deref(), Some("b"));
        assert_eq!(store.write_count(), 1);
        assert_eq!(stats.stored, 1);
        assert_eq!(stats.skipped, 2);
    }

    #[tokio::test]
    async fn test_all_items_in_future_counts_skipped() {
        let fetcher = MockFetcher::new(vec![(
            URL,
            json!({"DYNAMIC_RATE": {
                "description": "not yet",
                "items": [{"value": 1, "effective_from": "2030-01-01T00:00:00Z"}],
            }}),
        )]);
        let (uc, store) = use_case(fetcher, MockStore::new());

        let stats = uc.execute(input(&[URL])).await.stats;

        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.stored, 0);
        assert!(store.read_keys().is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_counts_as_failed() {
        struct ReadFailStore;

        #[async_trait]
        impl ValueStore for ReadFailStore {
            async fn read(&self, _key: &str) -> Result<String, StoreError> {
                Err(StoreError::Transport("rpc down".to_string()))
            }

            async fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
                panic!("write must not be attempted when the read fails");
            }
        }

        let fetcher = MockFetcher::new(vec![(
            URL,
            json!({"DYNAMIC_MAX_JOBS": simple_param(json!(25))}),
        )]);
        let uc = SyncParamsUseCase::new(Arc::new(fetcher), Arc::new(ReadFailStore));

        let stats = uc.execute(input(&[URL])).await.stats;

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.stored, 0);
    }
}
