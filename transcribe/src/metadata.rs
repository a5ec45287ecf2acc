//! Per-request response metadata.
//!
//! The dispatcher remembers the service-assigned request id and status of
//! recent calls so callers can correlate a request with service-side logs
//! after the fact. The cache is bounded and evicts oldest-first.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, MutexGuard},
};

/// Metadata describing one response from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    /// Operation that produced the response.
    pub operation: &'static str,
    /// Request id assigned by the service.
    pub request_id: Option<String>,
    /// HTTP status code.
    pub status: u16,
}

type Key = (&'static str, String);

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<Key, ResponseMetadata>,
    order: VecDeque<Key>,
}

/// Bounded FIFO cache of [`ResponseMetadata`] keyed by operation and
/// serialized request body.
#[derive(Debug)]
pub struct ResponseMetadataCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl ResponseMetadataCache {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero disables retention.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(Entries::default()),
        }
    }

    /// Maximum number of retained entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Record metadata for a request, replacing any earlier entry for it.
    pub fn insert(&self, operation: &'static str, body: &str, metadata: ResponseMetadata) {
        if self.capacity == 0 {
            return;
        }
        let key = (operation, body.to_owned());
        let mut entries = self.lock();
        if entries.map.insert(key.clone(), metadata).is_none() {
            entries.order.push_back(key);
        }
        while entries.order.len() > self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.map.remove(&oldest);
            }
        }
    }

    /// Metadata recorded for a request, if still retained.
    #[must_use]
    pub fn get(&self, operation: &'static str, body: &str) -> Option<ResponseMetadata> {
        self.lock().map.get(&(operation, body.to_owned())).cloned()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    /// Whether nothing is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.map.clear();
        entries.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str) -> ResponseMetadata {
        ResponseMetadata {
            operation: "GetVocabulary",
            request_id: Some(id.into()),
            status: 200,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let cache = ResponseMetadataCache::new(4);
        cache.insert("GetVocabulary", "{\"VocabularyName\":\"a\"}", meta("r1"));
        assert_eq!(
            cache.get("GetVocabulary", "{\"VocabularyName\":\"a\"}"),
            Some(meta("r1"))
        );
        assert_eq!(cache.get("GetVocabulary", "{\"VocabularyName\":\"b\"}"), None);
        assert_eq!(cache.get("DeleteVocabulary", "{\"VocabularyName\":\"a\"}"), None);
    }

    #[test]
    fn test_evicts_oldest() {
        let cache = ResponseMetadataCache::new(2);
        cache.insert("GetVocabulary", "a", meta("r1"));
        cache.insert("GetVocabulary", "b", meta("r2"));
        cache.insert("GetVocabulary", "c", meta("r3"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("GetVocabulary", "a").is_none());
        assert!(cache.get("GetVocabulary", "c").is_some());
    }

    #[test]
    fn test_replace_keeps_position() {
        let cache = ResponseMetadataCache::new(2);
        cache.insert("GetVocabulary", "a", meta("r1"));
        cache.insert("GetVocabulary", "a", meta("r2"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("GetVocabulary", "a"), Some(meta("r2")));
    }

    #[test]
    fn test_zero_capacity() {
        let cache = ResponseMetadataCache::new(0);
        cache.insert("GetVocabulary", "a", meta("r1"));
        assert!(cache.is_empty());
    }
}
