//! Core identifier types for the navigation engine
//!
//! This module centralizes the identifiers used throughout the crate
//! for consistency and discoverability.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique backstack entry identifier
///
/// Generated once per [`BackstackEntry`](crate::BackstackEntry) as a random
/// UUID and never changed afterwards. Two entries holding equal keys are still
/// distinct entries.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier string (used when restoring saved ids)
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique lifecycle manager identifier
///
/// Survives save/restore so a recreated manager can reclaim the saved state of
/// the entries it was tracking.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManagerId(String);

impl ManagerId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a navigation key's type
///
/// Presentations and key-specific transitions are looked up by key type, so
/// every variant of a key that should share a presentation reports the same
/// name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyType(&'static str);

impl KeyType {
    /// Create a key type from a static name
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The key type's name
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
