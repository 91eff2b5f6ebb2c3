//! The query cache state machine.

use crate::domain::{DomainError, ListResult, QueryKey};
use std::collections::HashMap;
use std::sync::Arc;

/// Lifecycle of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No value has been fetched for this key yet (or the last attempt failed
    /// and a retry is in flight).
    Pending,
    Resolved,
    Errored,
}

/// Tuning knobs for a [`QueryCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// Keep the last good value of a key when a refetch of that key fails.
    /// Off by default, so a failed key shows its error rather than stale data.
    pub retain_value_on_error: bool,
}

/// Snapshot of one key's cached state.
///
/// Entries are never mutated in place; every transition replaces the entry.
#[derive(Debug)]
pub struct CacheEntry<T> {
    pub key: QueryKey,
    pub status: CacheStatus,
    pub value: Option<Arc<ListResult<T>>>,
    pub error: Option<DomainError>,
    /// Sequence number of the most recently issued request for this key.
    pub seq: u64,
    pub in_flight: bool,
    /// Invalidated while not observed; refetched the next time it is read.
    pub stale: bool,
}

/// Instruction to the runtime to fetch `key`, tagged with its sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: QueryKey,
    pub seq: u64,
}

/// What the view needs to know about the observed key.
#[derive(Debug)]
pub struct QuerySnapshot<T> {
    pub key: QueryKey,
    /// Data to show: the key's own value, or a placeholder from a previous key.
    pub data: Option<Arc<ListResult<T>>>,
    pub is_placeholder: bool,
    /// In flight with nothing at all to show.
    pub is_loading: bool,
    pub is_fetching: bool,
    pub error: Option<DomainError>,
}

// Values sit behind `Arc`, so cloning never needs `T: Clone`.
impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            status: self.status,
            value: self.value.clone(),
            error: self.error.clone(),
            seq: self.seq,
            in_flight: self.in_flight,
            stale: self.stale,
        }
    }
}

impl<T> Clone for QuerySnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            data: self.data.clone(),
            is_placeholder: self.is_placeholder,
            is_loading: self.is_loading,
            is_fetching: self.is_fetching,
            error: self.error.clone(),
        }
    }
}

/// Keyed cache of list results with dedup, keep-previous-data and
/// last-request-wins semantics.
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: HashMap<QueryKey, CacheEntry<T>>,
    observed: Option<QueryKey>,
    placeholder: Option<Arc<ListResult<T>>>,
    next_seq: u64,
    options: CacheOptions,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new(CacheOptions::default())
    }
}

impl<T> QueryCache<T> {
    #[must_use]
    pub fn new(options: CacheOptions) -> Self {
        Self {
            entries: HashMap::new(),
            observed: None,
            placeholder: None,
            next_seq: 0,
            options,
        }
    }

    #[must_use]
    pub fn observed(&self) -> Option<&QueryKey> {
        self.observed.as_ref()
    }

    #[must_use]
    pub fn entry(&self, key: &QueryKey) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Replaces `current` with an in-flight copy under a fresh sequence.
    fn reissue(&mut self, current: &CacheEntry<T>) -> FetchRequest {
        let seq = self.bump_seq();
        let (status, error) = match current.status {
            CacheStatus::Errored => (CacheStatus::Pending, None),
            status => (status, current.error.clone()),
        };

        let next = CacheEntry {
            key: current.key.clone(),
            status,
            value: current.value.clone(),
            error,
            seq,
            in_flight: true,
            stale: false,
        };
        self.entries.insert(current.key.clone(), next);

        FetchRequest {
            key: current.key.clone(),
            seq,
        }
    }

    /// Reads `key`, issuing a fetch when it is absent, or stale or errored
    /// with nothing in flight.
    pub fn get(&mut self, key: &QueryKey) -> (CacheEntry<T>, Option<FetchRequest>) {
        let Some(current) = self.entries.get(key).cloned() else {
            let seq = self.bump_seq();
            let entry = CacheEntry {
                key: key.clone(),
                status: CacheStatus::Pending,
                value: None,
                error: None,
                seq,
                in_flight: true,
                stale: false,
            };
            self.entries.insert(key.clone(), entry.clone());
            tracing::debug!(key = %key, seq, "cache miss, fetch issued");
            return (
                entry,
                Some(FetchRequest {
                    key: key.clone(),
                    seq,
                }),
            );
        };

        if current.in_flight {
            tracing::debug!(key = %key, seq = current.seq, "fetch already in flight");
            return (current, None);
        }

        if current.stale || current.status == CacheStatus::Errored {
            let request = self.reissue(&current);
            tracing::debug!(key = %key, seq = request.seq, stale = current.stale, "refetch issued");
            let entry = self.entries.get(key).cloned().unwrap_or(current);
            return (entry, Some(request));
        }

        (current, None)
    }

    /// Makes `key` the observed key and reads it.
    ///
    /// When the observed key changes, the previous key's value (if it has
    /// one) becomes the placeholder shown until `key` resolves.
    pub fn observe(&mut self, key: &QueryKey) -> Option<FetchRequest> {
        if self.observed.as_ref() != Some(key) {
            let previous = self
                .observed
                .take()
                .and_then(|prev| self.entries.get(&prev))
                .and_then(|entry| entry.value.clone());
            if previous.is_some() {
                self.placeholder = previous;
            }
            self.observed = Some(key.clone());
        }

        self.get(key).1
    }

    /// Applies a fetch outcome. Returns `false` when the response was
    /// superseded by a later request for the same key and has been dropped.
    pub fn resolve(
        &mut self,
        key: &QueryKey,
        seq: u64,
        result: Result<ListResult<T>, DomainError>,
    ) -> bool {
        let Some(current) = self.entries.get(key) else {
            tracing::debug!(key = %key, seq, "response for unknown key discarded");
            return false;
        };

        if !current.in_flight || current.seq != seq {
            tracing::debug!(
                key = %key,
                seq,
                latest = current.seq,
                "superseded response discarded"
            );
            return false;
        }

        let next = match result {
            Ok(value) => CacheEntry {
                key: key.clone(),
                status: CacheStatus::Resolved,
                value: Some(Arc::new(value)),
                error: None,
                seq,
                in_flight: false,
                stale: current.stale,
            },
            Err(error) => CacheEntry {
                key: key.clone(),
                status: CacheStatus::Errored,
                value: if self.options.retain_value_on_error {
                    current.value.clone()
                } else {
                    None
                },
                error: Some(error),
                seq,
                in_flight: false,
                stale: current.stale,
            },
        };

        tracing::debug!(key = %key, seq, status = ?next.status, "response applied");
        self.entries.insert(key.clone(), next);
        true
    }

    /// Invalidates every entry whose key matches `predicate`.
    ///
    /// The observed key, if it matches, is refetched immediately under a new
    /// sequence, which supersedes any fetch of it already in flight. Other
    /// matches are marked stale and refetched when next read.
    pub fn invalidate(&mut self, predicate: impl Fn(&QueryKey) -> bool) -> Vec<FetchRequest> {
        let matching: Vec<QueryKey> = self
            .entries
            .keys()
            .filter(|key| predicate(key))
            .cloned()
            .collect();

        let mut requests = Vec::new();
        for key in matching {
            let Some(current) = self.entries.get(&key).cloned() else {
                continue;
            };

            if self.observed.as_ref() == Some(&key) {
                let request = self.reissue(&current);
                tracing::debug!(key = %key, seq = request.seq, "observed key invalidated, refetching");
                requests.push(request);
            } else {
                self.entries.insert(
                    key,
                    CacheEntry {
                        stale: true,
                        ..current
                    },
                );
            }
        }

        requests
    }

    /// State of the observed key, or `None` before anything was observed.
    #[must_use]
    pub fn snapshot(&self) -> Option<QuerySnapshot<T>> {
        let key = self.observed.as_ref()?;
        let entry = self.entries.get(key)?;

        let own = match entry.status {
            CacheStatus::Errored if !self.options.retain_value_on_error => None,
            _ => entry.value.clone(),
        };
        let (data, is_placeholder) = match (own, entry.status) {
            (Some(value), _) => (Some(value), false),
            (None, CacheStatus::Errored) => (None, false),
            (None, _) => {
                let placeholder = self.placeholder.clone();
                let is_placeholder = placeholder.is_some();
                (placeholder, is_placeholder)
            }
        };

        Some(QuerySnapshot {
            key: key.clone(),
            is_loading: entry.in_flight && data.is_none(),
            is_fetching: entry.in_flight,
            error: entry.error.clone(),
            data,
            is_placeholder,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Entity, ListQuery};
    use rstest::rstest;

    fn key(page: u32, term: &str) -> QueryKey {
        QueryKey::new(Entity::Notes, ListQuery::new(page, 12, term))
    }

    fn page_of(items: &[&str], total_pages: u32) -> ListResult<String> {
        ListResult::new(items.iter().map(|s| (*s).to_string()).collect(), total_pages)
    }

    #[test]
    fn concurrent_gets_share_one_fetch() {
        let mut cache = QueryCache::<String>::default();

        let (_, first) = cache.get(&key(1, ""));
        let (entry, second) = cache.get(&key(1, ""));

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(entry.in_flight);
        assert_eq!(cache.len(), 1);
    }

    #[derive(Debug, PartialEq)]
    struct Opaque(u8);

    #[test]
    fn items_need_not_be_clone() {
        let mut cache = QueryCache::<Opaque>::default();
        let request = cache.observe(&key(1, "")).unwrap();
        assert!(cache.resolve(&request.key, request.seq, Ok(ListResult::new(vec![Opaque(7)], 1))));

        let (entry, refetch) = cache.get(&key(1, ""));
        assert!(refetch.is_none());
        let snapshot = cache.snapshot().unwrap().clone();
        assert!(Arc::ptr_eq(entry.value.as_ref().unwrap(), snapshot.data.as_ref().unwrap()));
        assert_eq!(snapshot.data.unwrap().items, vec![Opaque(7)]);
    }

    #[test]
    fn resolved_key_is_served_without_refetch() {
        let mut cache = QueryCache::<String>::default();
        let request = cache.observe(&key(1, "")).unwrap();
        assert!(cache.resolve(&request.key, request.seq, Ok(page_of(&["a"], 1))));

        assert!(cache.observe(&key(1, "")).is_none());
        let snapshot = cache.snapshot().unwrap();
        assert_eq!(snapshot.data.unwrap().items, vec!["a".to_string()]);
        assert!(!snapshot.is_fetching);
    }

    #[test]
    fn previous_key_value_is_kept_as_placeholder() {
        let mut cache = QueryCache::<String>::default();
        let first = cache.observe(&key(1, "")).unwrap();
        cache.resolve(&first.key, first.seq, Ok(page_of(&["a"], 2)));

        cache.observe(&key(2, "")).unwrap();
        let snapshot = cache.snapshot().unwrap();

        assert!(snapshot.is_placeholder);
        assert!(snapshot.is_fetching);
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.data.unwrap().items, vec!["a".to_string()]);
    }

    #[test]
    fn placeholder_survives_skipping_an_unresolved_key() {
        let mut cache = QueryCache::<String>::default();
        let first = cache.observe(&key(1, "")).unwrap();
        cache.resolve(&first.key, first.seq, Ok(page_of(&["a"], 3)));
        cache.observe(&key(2, ""));
        cache.observe(&key(3, ""));

        let snapshot = cache.snapshot().unwrap();
        assert!(snapshot.is_placeholder);
        assert_eq!(snapshot.data.unwrap().items, vec!["a".to_string()]);
    }

    #[test]
    fn first_load_has_nothing_to_show() {
        let mut cache = QueryCache::<String>::default();
        cache.observe(&key(1, ""));

        let snapshot = cache.snapshot().unwrap();
        assert!(snapshot.is_loading);
        assert!(snapshot.data.is_none());
    }

    #[test]
    fn invalidation_supersedes_in_flight_fetch() {
        let mut cache = QueryCache::<String>::default();
        let early = cache.observe(&key(1, "")).unwrap();

        let refetch = cache.invalidate(QueryKey::all_of(Entity::Notes));
        assert_eq!(refetch.len(), 1);
        assert!(refetch[0].seq > early.seq);

        assert!(cache.resolve(&refetch[0].key, refetch[0].seq, Ok(page_of(&["new"], 1))));
        assert!(!cache.resolve(&early.key, early.seq, Ok(page_of(&["old"], 1))));

        let data = cache.snapshot().unwrap().data.unwrap();
        assert_eq!(data.items, vec!["new".to_string()]);
    }

    #[test]
    fn invalidation_marks_unobserved_keys_stale() {
        let mut cache = QueryCache::<String>::default();
        let first = cache.observe(&key(1, "")).unwrap();
        cache.resolve(&first.key, first.seq, Ok(page_of(&["a"], 2)));
        let second = cache.observe(&key(2, "")).unwrap();
        cache.resolve(&second.key, second.seq, Ok(page_of(&["b"], 2)));

        let requests = cache.invalidate(QueryKey::all_of(Entity::Notes));
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].key, key(2, ""));
        assert!(cache.entry(&key(1, "")).unwrap().stale);

        assert!(cache.observe(&key(1, "")).is_some());
    }

    #[test]
    fn invalidation_ignores_other_entities() {
        let mut cache = QueryCache::<String>::default();
        let movies = QueryKey::new(Entity::Movies, ListQuery::new(1, 20, "matrix"));
        let request = cache.observe(&movies).unwrap();
        cache.resolve(&request.key, request.seq, Ok(page_of(&["m"], 1)));

        assert!(cache.invalidate(QueryKey::all_of(Entity::Notes)).is_empty());
        assert!(!cache.entry(&movies).unwrap().stale);
    }

    #[rstest]
    #[case(false, None)]
    #[case(true, Some(vec!["a".to_string()]))]
    fn refetch_failure_honors_retention(
        #[case] retain: bool,
        #[case] expected: Option<Vec<String>>,
    ) {
        let mut cache = QueryCache::<String>::new(CacheOptions {
            retain_value_on_error: retain,
        });
        let first = cache.observe(&key(1, "")).unwrap();
        cache.resolve(&first.key, first.seq, Ok(page_of(&["a"], 1)));
        let refetch = cache.invalidate(QueryKey::all_of(Entity::Notes)).remove(0);
        cache.resolve(
            &refetch.key,
            refetch.seq,
            Err(DomainError::Transport("boom".to_string())),
        );

        let snapshot = cache.snapshot().unwrap();
        assert_eq!(snapshot.error, Some(DomainError::Transport("boom".to_string())));
        assert_eq!(snapshot.data.map(|d| d.items.clone()), expected);
    }

    #[test]
    fn errored_key_is_retried_when_read_again() {
        let mut cache = QueryCache::<String>::default();
        let first = cache.observe(&key(1, "")).unwrap();
        cache.resolve(
            &first.key,
            first.seq,
            Err(DomainError::Transport("down".to_string())),
        );

        let retry = cache.observe(&key(1, "")).unwrap();
        assert!(retry.seq > first.seq);
        let snapshot = cache.snapshot().unwrap();
        assert!(snapshot.error.is_none());
        assert!(snapshot.is_loading);
    }

    #[test]
    fn snapshot_is_none_before_observing() {
        let cache = QueryCache::<String>::default();
        assert!(cache.snapshot().is_none());
    }
}
