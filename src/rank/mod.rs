//! Dense rank index over observed rarity scores.
//!
//! Every token is scored, per-slot scores are collapsed to distinct values
//! and sorted descending, and a score's position is its 1-based index in
//! that sequence. Equal scores share a position; positions are dense, so the
//! number of positions in a slot equals the number of distinct scores, not
//! the number of tokens.

use std::collections::BTreeMap;

use crate::collection::TokenCollection;
use crate::error::{LootrankError, Result};
use crate::frequency::TraitFrequencyTable;
use crate::score::RarityScorer;

/// Per-slot distinct scores, sorted descending.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RankIndex {
    slots: BTreeMap<String, Vec<u64>>,
}

impl RankIndex {
    /// Score the whole collection and build the index.
    pub fn build(table: &TraitFrequencyTable, collection: &TokenCollection) -> Result<Self> {
        let scorer = RarityScorer::new(table);
        let mut slots: BTreeMap<String, Vec<u64>> = BTreeMap::new();
        for token in collection {
            for (slot, score) in scorer.score_token(token)? {
                slots.entry(slot).or_default().push(score);
            }
        }
        for scores in slots.values_mut() {
            scores.sort_unstable_by(|a, b| b.cmp(a));
            scores.dedup();
        }
        Ok(RankIndex { slots })
    }

    /// The distinct descending scores observed for a slot.
    pub fn scores(&self, slot: &str) -> Option<&[u64]> {
        self.slots.get(slot).map(Vec::as_slice)
    }

    /// Iterate slots in name order.
    pub fn slots(&self) -> impl Iterator<Item = (&String, &[u64])> {
        self.slots.iter().map(|(slot, scores)| (slot, scores.as_slice()))
    }

    /// 1-based dense position of a score within its slot's distribution.
    ///
    /// Fails if the slot is unknown or the score was never observed when the
    /// index was built; both mean the caller mixed tables from different
    /// inputs.
    pub fn position_of(&self, slot: &str, score: u64) -> Result<usize> {
        let scores = self
            .slots
            .get(slot)
            .ok_or_else(|| LootrankError::ScoreNotRanked {
                slot: slot.to_string(),
                score,
            })?;
        // Binary search over a descending sequence.
        scores
            .binary_search_by(|probe| probe.cmp(&score).reverse())
            .map(|index| index + 1)
            .map_err(|_| LootrankError::ScoreNotRanked {
                slot: slot.to_string(),
                score,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::collection::{Token, TokenCollection};
    use crate::vocabulary::{FragmentVocabulary, SlotVocabulary};

    fn setup(values: &[&str]) -> (TraitFrequencyTable, TokenCollection) {
        let parts: Vec<String> = {
            let mut seen: Vec<String> = Vec::new();
            for value in values {
                let bare = value.trim_end_matches(" +1").to_string();
                if !seen.contains(&bare) {
                    seen.push(bare);
                }
            }
            seen
        };
        let mut slots = BTreeMap::new();
        slots.insert(
            "ring".to_string(),
            SlotVocabulary {
                parts,
                ..Default::default()
            },
        );
        let vocab = FragmentVocabulary::new(slots, FragmentVocabulary::default_exclusions());
        let collection = TokenCollection::new(
            values
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    let mut slots = BTreeMap::new();
                    slots.insert("ring".to_string(), value.to_string());
                    Token::new((i + 1).to_string(), slots)
                })
                .collect(),
        );
        let table = TraitFrequencyTable::build(&collection, &vocab);
        (table, collection)
    }

    #[test]
    fn test_duplicate_scores_collapse() {
        let (table, collection) = setup(&["Gold Band", "Gold Band"]);
        let index = RankIndex::build(&table, &collection).unwrap();
        assert_eq!(index.scores("ring").unwrap().len(), 1);
        // scoreOf(2) = 4000 -> 40_000_000, shared position 1.
        assert_eq!(index.position_of("ring", 40_000_000).unwrap(), 1);
    }

    #[test]
    fn test_rank_monotonicity() {
        // Silver Band appears twice (count 2), the others once (count 1):
        // unique values score 80_000_000, Silver Band 40_000_000.
        let (table, collection) = setup(&["Gold Band", "Silver Band", "Silver Band", "Iron Band"]);
        let index = RankIndex::build(&table, &collection).unwrap();
        let scores = index.scores("ring").unwrap();
        assert_eq!(scores, &[80_000_000, 40_000_000]);
        assert!(
            index.position_of("ring", 80_000_000).unwrap()
                < index.position_of("ring", 40_000_000).unwrap()
        );
    }

    #[test]
    fn test_unobserved_score_is_an_error() {
        let (table, collection) = setup(&["Gold Band"]);
        let index = RankIndex::build(&table, &collection).unwrap();
        let err = index.position_of("ring", 123).unwrap_err();
        assert!(matches!(err, LootrankError::ScoreNotRanked { .. }));
        let err = index.position_of("neck", 80_000_000).unwrap_err();
        assert!(matches!(err, LootrankError::ScoreNotRanked { .. }));
    }
}
