//! Identifier types for todo items.
//!
//! Identifiers are human-readable strings of the form `todo<n>`, where `n`
//! is a positive sequence number handed out by [`TodoIdGenerator`].

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix shared by every generated identifier.
pub const TODO_ID_PREFIX: &str = "todo";

/// Identifier of a single todo item.
///
/// Any string received from a client is a valid `TodoId`; only the
/// generator guarantees the `todo<n>` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Build the identifier for sequence number `n`.
    #[inline]
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("{TODO_ID_PREFIX}{n}"))
    }

    /// Borrow the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying string.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TodoId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TodoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Monotonic source of [`TodoId`]s.
///
/// Sequence numbers start at 1 and are never handed out twice, even after
/// the item that carried one has been deleted.
#[derive(Debug)]
pub struct TodoIdGenerator {
    next: AtomicU64,
}

impl TodoIdGenerator {
    /// Create a generator whose first identifier is `todo1`.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Hand out the next identifier.
    pub fn next_id(&self) -> TodoId {
        TodoId::from_sequence(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TodoIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sequence() {
        assert_eq!(TodoId::from_sequence(1).as_str(), "todo1");
        assert_eq!(TodoId::from_sequence(42).to_string(), "todo42");
    }

    #[test]
    fn test_generator_is_sequential() {
        let gen = TodoIdGenerator::new();
        let ids: Vec<_> = (0..3).map(|_| gen.next_id().into_inner()).collect();
        assert_eq!(ids, vec!["todo1", "todo2", "todo3"]);
    }

    #[test]
    fn test_serde_transparent() {
        let id = TodoId::from_sequence(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"todo3\"");
        let back: TodoId = serde_json::from_str("\"todo3\"").unwrap();
        assert_eq!(back, id);
    }
}
