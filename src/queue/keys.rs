//! Store key derivation
//!
//! Every queue addresses the store through keys of the form
//! `queue:<id path joined by '.'>:type:<queue type>:of:<element kind>`.
//! These strings are the only persisted naming contract, so the format
//! must not change between releases.
//!
//! Path segments containing `.` are not escaped: `["a.b"]` and `["a", "b"]`
//! derive the same key.

use std::fmt;

/// Joiner placed between id path segments
pub const ID_PATH_SEPARATOR: &str = ".";

/// Element kind used when the caller does not name one
pub const DEFAULT_ELEMENT_KIND: &str = "elements";

/// Type tag of a plain ordered queue
pub const SIMPLE_QUEUE_TYPE: &str = "simple";

/// Type tag of a standalone membership bucket
pub const BUCKET_TYPE: &str = "bucket";

/// Type tag of the ordered half of a deduplicating queue
pub const SMART_QUEUE_TYPE: &str = "smart";

/// Type tag of the membership half of a deduplicating queue
pub const SMART_BUCKET_TYPE: &str = "smart_bucket";

/// Everything that determines where a queue lives in the store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueIdentity {
    id_path: Vec<String>,
    element_kind: String,
    queue_type: String,
}

impl QueueIdentity {
    pub fn new<I, S>(
        id_path: I,
        element_kind: impl Into<String>,
        queue_type: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id_path: id_path.into_iter().map(Into::into).collect(),
            element_kind: element_kind.into(),
            queue_type: queue_type.into(),
        }
    }

    pub fn id_path(&self) -> &[String] {
        &self.id_path
    }

    pub fn element_kind(&self) -> &str {
        &self.element_kind
    }

    pub fn queue_type(&self) -> &str {
        &self.queue_type
    }

    /// Same path and element kind under a different type tag
    pub fn with_queue_type(&self, queue_type: impl Into<String>) -> Self {
        Self {
            id_path: self.id_path.clone(),
            element_kind: self.element_kind.clone(),
            queue_type: queue_type.into(),
        }
    }

    /// Derive the store key for this identity
    pub fn key(&self) -> StoreKey {
        derive_key(self)
    }
}

/// A derived store key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey(String);

impl StoreKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StoreKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<StoreKey> for String {
    fn from(key: StoreKey) -> Self {
        key.0
    }
}

/// Derive the store key for a queue identity. Pure, no I/O.
pub fn derive_key(identity: &QueueIdentity) -> StoreKey {
    StoreKey(format!(
        "queue:{}:type:{}:of:{}",
        identity.id_path.join(ID_PATH_SEPARATOR),
        identity.queue_type,
        identity.element_kind
    ))
}
