//! Mock object store.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::clients::{ObjectPage, ObjectStore, StoreError};

/// Thread-safe in-memory object store.
///
/// Keys within a bucket are held sorted, so listings come back in
/// lexicographic order like the real service. The page size is configurable
/// to exercise pagination with small fixtures.
#[derive(Debug, Clone)]
pub struct MockStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug)]
struct Inner {
    /// bucket -> key -> body
    buckets: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
    page_size: usize,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    pub fn new() -> Self {
        Self::with_page_size(1000)
    }

    /// Create a store that returns at most `page_size` keys per listing page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                buckets: BTreeMap::new(),
                page_size: page_size.max(1),
            })),
        }
    }

    /// Number of objects in a bucket.
    pub fn object_count(&self, bucket: &str) -> usize {
        let inner = self.inner.read().unwrap();
        inner.buckets.get(bucket).map(BTreeMap::len).unwrap_or(0)
    }
}

impl ObjectStore for MockStore {
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        inner
            .buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), body);
        Ok(())
    }

    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let inner = self.inner.read().unwrap();
        inner
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        let removed = inner
            .buckets
            .get_mut(bucket)
            .and_then(|objects| objects.remove(key));
        match removed {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
        }
    }

    fn list_objects_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<&str>,
    ) -> Result<ObjectPage, StoreError> {
        let inner = self.inner.read().unwrap();
        let Some(objects) = inner.buckets.get(bucket) else {
            return Ok(ObjectPage::default());
        };

        let keys: Vec<String> = objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .filter(|key| continuation.map_or(true, |after| key.as_str() > after))
            .take(inner.page_size + 1)
            .cloned()
            .collect();

        let mut page = ObjectPage::default();
        if keys.len() > inner.page_size {
            page.keys = keys[..inner.page_size].to_vec();
            page.continuation = page.keys.last().cloned();
        } else {
            page.keys = keys;
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete_round_trip() {
        let store = MockStore::new();
        store.put_object("bucket", "a/b", b"payload".to_vec()).unwrap();

        assert_eq!(store.get_object("bucket", "a/b").unwrap(), b"payload");
        store.delete_object("bucket", "a/b").unwrap();
        assert!(matches!(
            store.get_object("bucket", "a/b"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_put_overwrites() {
        let store = MockStore::new();
        store.put_object("bucket", "a", b"first".to_vec()).unwrap();
        store.put_object("bucket", "a", b"second".to_vec()).unwrap();

        assert_eq!(store.get_object("bucket", "a").unwrap(), b"second");
        assert_eq!(store.object_count("bucket"), 1);
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let store = MockStore::new();
        assert!(matches!(
            store.delete_object("bucket", "missing"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_listing_paginates_in_order() {
        let store = MockStore::with_page_size(2);
        for key in ["p/1", "p/2", "p/3", "p/4", "p/5", "q/1"] {
            store.put_object("bucket", key, Vec::new()).unwrap();
        }

        let mut all = Vec::new();
        let mut continuation: Option<String> = None;
        let mut pages = 0;
        loop {
            let page = store
                .list_objects_page("bucket", "p/", continuation.as_deref())
                .unwrap();
            all.extend(page.keys);
            pages += 1;
            match page.continuation {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        assert_eq!(all, vec!["p/1", "p/2", "p/3", "p/4", "p/5"]);
        assert_eq!(pages, 3);
    }

    #[test]
    fn test_listing_unknown_bucket_is_empty() {
        let store = MockStore::new();
        let page = store.list_objects_page("missing", "p/", None).unwrap();
        assert!(page.keys.is_empty());
        assert!(page.continuation.is_none());
    }
}
