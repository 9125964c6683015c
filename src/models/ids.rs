//! Stable record identifiers.
//!
//! Fixture rows normally carry their own id. When one is missing the store
//! derives it from the row's identity fields with SHA256, so the same row
//! always gets the same id.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identifier of a fixture record.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Derive an id from identity fields.
    /// Fields are joined with `|` before hashing; the first 16 hex chars are kept.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Player-season record id
pub type PlayerId = EntityId;

/// Match fixture id
pub type MatchId = EntityId;

/// Match prediction id
pub type PredictionId = EntityId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let a = EntityId::generate(&["Erling Haaland", "Man City", "23/24"]);
        let b = EntityId::generate(&["Erling Haaland", "Man City", "23/24"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_differs_by_season() {
        let a = EntityId::generate(&["Erling Haaland", "Man City", "23/24"]);
        let b = EntityId::generate(&["Erling Haaland", "Man City", "22/23"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_length_and_hex() {
        let id = EntityId::generate(&["test"]);
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_transparent_serialization() {
        let id = EntityId::from("p1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");

        let parsed: EntityId = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_is_empty() {
        assert!(EntityId::default().is_empty());
        assert!(EntityId::from("  ").is_empty());
        assert!(!EntityId::from("p1").is_empty());
    }

    #[test]
    fn test_debug_contains_value() {
        let id = EntityId::new("debug-test".to_string());
        assert!(format!("{:?}", id).contains("debug-test"));
    }
}
