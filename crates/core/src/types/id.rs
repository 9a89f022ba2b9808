//! Newtype IDs for type-safe entity references.
//!
//! Dish IDs and draft IDs have different backing types (the catalog hands
//! out numeric IDs, the draft service mints UUIDs), so each gets its own
//! wrapper instead of a shared macro.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a dish in the marketplace catalog.
///
/// # Example
///
/// ```rust
/// use samovar_core::DishId;
///
/// let id = DishId::new(42);
/// assert_eq!(id.as_i64(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DishId(i64);

impl DishId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DishId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<DishId> for i64 {
    fn from(id: DishId) -> Self {
        id.0
    }
}

/// Identifier of a persisted order draft.
///
/// Serialized as a plain UUID string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(Uuid);

impl DraftId {
    /// Mint a fresh random draft ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for DraftId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<DraftId> for Uuid {
    fn from(id: DraftId) -> Self {
        id.0
    }
}

impl std::str::FromStr for DraftId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_id_conversions() {
        let id = DishId::new(7);
        assert_eq!(id.as_i64(), 7);
        assert_eq!(i64::from(id), 7);
        assert_eq!(DishId::from(7), id);
    }

    #[test]
    fn test_dish_id_serde_transparent() {
        let id = DishId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: DishId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_draft_id_new_is_unique() {
        assert_ne!(DraftId::new(), DraftId::new());
    }

    #[test]
    fn test_draft_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = DraftId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn test_draft_id_serde_roundtrip() {
        let id = DraftId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let parsed: DraftId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_draft_id_from_str() {
        let id: DraftId = "00000000-0000-0000-0000-000000000001".parse().unwrap();
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000001");

        assert!("not-a-uuid".parse::<DraftId>().is_err());
    }
}
