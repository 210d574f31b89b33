//! Toast identifiers and the monotonic generator that issues them.

use std::{cell::Cell, fmt};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier stamped on a toast item node and handed back to the caller for dismissal.
pub struct ToastId(String);

impl ToastId {
    /// Wraps an identifier string, typically one received back from a caller.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as it appears in the item node attribute.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier and returns its string form.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ToastId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Default)]
/// Single-owner counter producing strictly increasing decimal identifiers.
///
/// The first identifier is `"1"`. Values are never reused for the lifetime of the generator.
pub struct IdGenerator {
    last: Cell<u64>,
}

impl IdGenerator {
    /// Creates a generator whose first identifier will be `"1"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next identifier.
    pub fn next_id(&self) -> ToastId {
        let next = self.last.get().saturating_add(1);
        self.last.set(next);
        ToastId(next.to_string())
    }

    /// Returns how many identifiers have been issued so far.
    pub fn issued(&self) -> u64 {
        self.last.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase_strictly() {
        let ids = IdGenerator::new();
        let issued: Vec<u64> = (0..50)
            .map(|_| ids.next_id().as_str().parse().expect("numeric id"))
            .collect();

        assert_eq!(issued.first(), Some(&1));
        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ids.issued(), 50);
    }

    #[test]
    fn independent_generators_do_not_share_state() {
        let first = IdGenerator::new();
        let second = IdGenerator::new();
        first.next_id();
        first.next_id();

        assert_eq!(second.next_id(), ToastId::from("1"));
        assert_eq!(first.next_id(), ToastId::from("3"));
    }

    #[test]
    fn toast_id_serializes_as_plain_string() {
        let id = ToastId::new("7");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"7\"");
        assert_eq!(id.to_string(), "7");
    }
}
