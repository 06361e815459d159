//! The read-only token collection the core computes over.
//!
//! A token is an identifier plus one composite string per slot. The whole
//! collection is loaded once, up front, and never mutated; every table and
//! score in this crate is derived from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single collectible token: a stable id and its per-slot composite values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Stable identifier within the collection.
    pub id: String,
    /// Slot name to composite slot value. Ordered so derived output is
    /// reproducible without sorting at every use site.
    pub slots: BTreeMap<String, String>,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(id: S, slots: BTreeMap<String, String>) -> Self {
        Token {
            id: id.into(),
            slots,
        }
    }

    /// Get one slot's composite value.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }
}

/// An ordered, immutable collection of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCollection {
    tokens: Vec<Token>,
}

impl TokenCollection {
    /// Create a collection from tokens, preserving their order.
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenCollection { tokens }
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over tokens in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Find a token by id.
    pub fn get(&self, id: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }
}

impl<'a> IntoIterator for &'a TokenCollection {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: &str, weapon: &str) -> Token {
        let mut slots = BTreeMap::new();
        slots.insert("weapon".to_string(), weapon.to_string());
        Token::new(id, slots)
    }

    #[test]
    fn test_token_slot_access() {
        let t = token("1", "Pocket Knife");
        assert_eq!(t.slot("weapon"), Some("Pocket Knife"));
        assert_eq!(t.slot("ring"), None);
    }

    #[test]
    fn test_collection_order_and_lookup() {
        let c = TokenCollection::new(vec![token("1", "Knife"), token("2", "Chain")]);
        assert_eq!(c.len(), 2);
        let ids: Vec<&str> = c.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(c.get("2").unwrap().slot("weapon"), Some("Chain"));
        assert!(c.get("3").is_none());
    }
}
