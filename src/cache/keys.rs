//! Cache key topology.
//!
//! Each entity kind owns exactly two key scopes: a detail key per id
//! (`menu:7`) and one list key (`menu:list`). Invalidation treats a scope as
//! a unit; there are no pattern-matched keys.

use std::fmt;

use crate::domain::entities::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// A single entity serialized under `kind:{id}`.
    Detail { kind: EntityKind, id: i64 },
    /// The full collection of one kind under `kind:list`.
    List { kind: EntityKind },
}

impl CacheKey {
    pub fn detail(kind: EntityKind, id: i64) -> Self {
        Self::Detail { kind, id }
    }

    pub fn list(kind: EntityKind) -> Self {
        Self::List { kind }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Detail { kind, id } => write!(f, "{}:{}", kind.as_str(), id),
            CacheKey::List { kind } => write!(f, "{}:list", kind.as_str()),
        }
    }
}
