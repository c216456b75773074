//! Domain identifiers (strongly-typed IDs).
//!
//! ULID-backed: sortable by creation time, generatable on any node without
//! coordination, 128-bit. A phantom marker type keeps distinct ID spaces
//! apart at compile time.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Marker trait for one ID space.
///
/// Provides the prefix used by `Display` (e.g. "job-").
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic identifier.
///
/// `T` is a zero-sized marker: it costs nothing at run time but makes IDs
/// from different spaces distinct types, so they cannot be mixed up.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// Fresh ID stamped with the current time.
    pub fn generate() -> Self {
        Self::from_ulid(Ulid::new())
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Marker type for job IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Job {}

impl IdMarker for Job {
    fn prefix() -> &'static str {
        "job-"
    }
}

/// Identifier of a job (the unit that owns one packed status value).
pub type JobId = Id<Job>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_prefix() {
        let id = JobId::generate();
        assert!(id.to_string().starts_with("job-"));
    }

    #[test]
    fn ids_sort_by_creation_time() {
        let id1 = JobId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = JobId::generate();

        assert!(id1 < id2);
    }

    #[test]
    fn serde_round_trip() {
        let id = JobId::generate();

        let serialized = serde_json::to_string(&id).unwrap();
        let deserialized: JobId = serde_json::from_str(&serialized).unwrap();

        assert_eq!(id, deserialized);
    }

    #[test]
    fn marker_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<JobId>(), size_of::<Ulid>());
    }
}
