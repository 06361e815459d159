//! Whole-value attribute census: occurrence counts, rarity tiers, and the
//! occurrence-sum overall ranking.
//!
//! Unlike the fragment-level frequency tables, the census treats each slot
//! value as an opaque string. Its outputs are the two auxiliary datasets the
//! report echoes per token (tier labels and raw occurrence counts) plus the
//! collection-wide overall rank, so a report can be assembled from the token
//! collection alone.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::ser::{Serialize, Serializer};

use crate::collection::TokenCollection;
use crate::error::{LootrankError, Result};

/// Rarity tier of an attribute value, derived from its occurrence count.
///
/// Thresholds come from the source collection's published tier split:
/// Common above 350 occurrences, Mythic at exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl RarityTier {
    /// Derive the tier from an occurrence count.
    pub fn from_occurrences(count: u64) -> Self {
        match count {
            c if c > 350 => RarityTier::Common,
            c if c > 310 => RarityTier::Uncommon,
            c if c > 130 => RarityTier::Rare,
            c if c > 7 => RarityTier::Epic,
            c if c > 1 => RarityTier::Legendary,
            _ => RarityTier::Mythic,
        }
    }

    /// Numeric level, 1 (Common) through 6 (Mythic).
    pub fn level(&self) -> u8 {
        match self {
            RarityTier::Common => 1,
            RarityTier::Uncommon => 2,
            RarityTier::Rare => 3,
            RarityTier::Epic => 4,
            RarityTier::Legendary => 5,
            RarityTier::Mythic => 6,
        }
    }

    /// Display name of the tier.
    pub fn name(&self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Uncommon => "Uncommon",
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
            RarityTier::Legendary => "Legendary",
            RarityTier::Mythic => "Mythic",
        }
    }
}

// Reports carry tiers as their numeric level, matching the source datasets.
impl Serialize for RarityTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

/// Count how often each exact attribute value occurs, across all slots.
pub fn occurrences(collection: &TokenCollection) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for token in collection {
        for value in token.slots.values() {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Map every counted attribute value to its tier.
pub fn tiers(occurrences: &BTreeMap<String, u64>) -> BTreeMap<String, RarityTier> {
    occurrences
        .iter()
        .map(|(value, count)| (value.clone(), RarityTier::from_occurrences(*count)))
        .collect()
}

/// Overall rank per token id: tokens sorted ascending by the sum of their
/// attributes' occurrence counts, rank 1 being the rarest. The sort is
/// stable, so tokens with equal sums keep collection order.
pub fn overall_ranks(
    collection: &TokenCollection,
    occurrences: &BTreeMap<String, u64>,
) -> Result<AHashMap<String, usize>> {
    let mut sums = Vec::with_capacity(collection.len());
    for token in collection {
        let mut sum = 0u64;
        for value in token.slots.values() {
            sum += occurrences.get(value).copied().ok_or_else(|| {
                LootrankError::collection(format!(
                    "token '{}' value '{}' missing from occurrence counts",
                    token.id, value
                ))
            })?;
        }
        sums.push((token.id.clone(), sum));
    }
    sums.sort_by_key(|(_, sum)| *sum);
    Ok(sums
        .into_iter()
        .enumerate()
        .map(|(index, (id, _))| (id, index + 1))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::collection::Token;

    fn token(id: &str, ring: &str, weapon: &str) -> Token {
        let mut slots = BTreeMap::new();
        slots.insert("ring".to_string(), ring.to_string());
        slots.insert("weapon".to_string(), weapon.to_string());
        Token::new(id, slots)
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(RarityTier::from_occurrences(351), RarityTier::Common);
        assert_eq!(RarityTier::from_occurrences(350), RarityTier::Uncommon);
        assert_eq!(RarityTier::from_occurrences(311), RarityTier::Uncommon);
        assert_eq!(RarityTier::from_occurrences(310), RarityTier::Rare);
        assert_eq!(RarityTier::from_occurrences(131), RarityTier::Rare);
        assert_eq!(RarityTier::from_occurrences(130), RarityTier::Epic);
        assert_eq!(RarityTier::from_occurrences(8), RarityTier::Epic);
        assert_eq!(RarityTier::from_occurrences(7), RarityTier::Legendary);
        assert_eq!(RarityTier::from_occurrences(2), RarityTier::Legendary);
        assert_eq!(RarityTier::from_occurrences(1), RarityTier::Mythic);
        assert_eq!(RarityTier::Mythic.level(), 6);
        assert_eq!(RarityTier::Common.level(), 1);
    }

    #[test]
    fn test_occurrences_span_slots() {
        let collection = TokenCollection::new(vec![
            token("1", "Gold Ring", "Knife"),
            token("2", "Gold Ring", "Gold Ring"),
        ]);
        let counts = occurrences(&collection);
        assert_eq!(counts.get("Gold Ring"), Some(&3));
        assert_eq!(counts.get("Knife"), Some(&1));
    }

    #[test]
    fn test_overall_ranks_rarest_first() {
        let collection = TokenCollection::new(vec![
            token("1", "Gold Ring", "Knife"),
            token("2", "Gold Ring", "Gold Ring"),
            token("3", "Silver Ring", "Bat"),
        ]);
        let counts = occurrences(&collection);
        // sums: token 1 = 3+1 = 4, token 2 = 3+3 = 6, token 3 = 1+1 = 2
        let ranks = overall_ranks(&collection, &counts).unwrap();
        assert_eq!(ranks.get("3"), Some(&1));
        assert_eq!(ranks.get("1"), Some(&2));
        assert_eq!(ranks.get("2"), Some(&3));
    }

    #[test]
    fn test_missing_occurrence_is_an_error() {
        let collection = TokenCollection::new(vec![token("1", "Gold Ring", "Knife")]);
        let counts = BTreeMap::new();
        assert!(overall_ranks(&collection, &counts).is_err());
    }
}
