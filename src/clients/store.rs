//! Object-storage client trait.

/// Errors from object-storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("storage unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("storage provider error: {0}")]
    Provider(String),
}

/// One page of a listing, plus the token to request the next page.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    /// Object keys in this page, in listing order.
    pub keys: Vec<String>,
    /// Token for the next page; `None` when the listing is exhausted.
    pub continuation: Option<String>,
}

/// The object-storage service: put/get/delete by key plus paginated
/// list-by-prefix.
pub trait ObjectStore: Send + Sync {
    /// Store an object, silently overwriting any existing object at the key.
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), StoreError>;

    /// Retrieve an object; [`StoreError::NotFound`] if absent.
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Remove an object. Behavior on a missing key follows the provider
    /// contract; callers wanting idempotent semantics normalize it.
    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError>;

    /// List one page of keys under a prefix. Pass the previous page's
    /// continuation token to advance.
    fn list_objects_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<&str>,
    ) -> Result<ObjectPage, StoreError>;
}
