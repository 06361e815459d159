//! Final per-token report assembly.
//!
//! The assembler combines the core's scorer and rank index output with the
//! pre-supplied auxiliary maps (tier labels, whole-value occurrence counts,
//! overall ranks). The auxiliary values are echoed into the report without
//! recomputation; a token or value missing from them is an input mismatch
//! and fails the whole assembly.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::Serialize;

use crate::census::RarityTier;
use crate::collection::{Token, TokenCollection};
use crate::error::{LootrankError, Result};
use crate::frequency::TraitFrequencyTable;
use crate::rank::RankIndex;
use crate::score::RarityScorer;

/// Rank block of a report: the collection-wide overall rank plus the tier
/// level of each slot's value.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRank {
    pub overall: usize,
    #[serde(flatten)]
    pub slots: BTreeMap<String, RarityTier>,
}

/// One token's full rarity record.
#[derive(Debug, Clone, Serialize)]
pub struct TokenReport {
    pub token_id: String,
    pub rank: TokenRank,
    /// Whole-value occurrence count per slot.
    pub count: BTreeMap<String, u64>,
    /// Fixed-point rarity score per slot.
    pub rarity: BTreeMap<String, u64>,
    /// Dense rank of the score within its slot's distribution.
    pub rarity_position: BTreeMap<String, usize>,
}

/// Assembles [`TokenReport`]s from core output and the auxiliary datasets.
#[derive(Debug, Clone, Copy)]
pub struct ReportAssembler<'a> {
    table: &'a TraitFrequencyTable,
    rank_index: &'a RankIndex,
    tiers: &'a BTreeMap<String, RarityTier>,
    occurrences: &'a BTreeMap<String, u64>,
    overall_ranks: &'a AHashMap<String, usize>,
}

impl<'a> ReportAssembler<'a> {
    /// Create an assembler over prebuilt tables and auxiliary maps.
    pub fn new(
        table: &'a TraitFrequencyTable,
        rank_index: &'a RankIndex,
        tiers: &'a BTreeMap<String, RarityTier>,
        occurrences: &'a BTreeMap<String, u64>,
        overall_ranks: &'a AHashMap<String, usize>,
    ) -> Self {
        ReportAssembler {
            table,
            rank_index,
            tiers,
            occurrences,
            overall_ranks,
        }
    }

    /// Assemble reports for the whole collection, in collection order.
    pub fn assemble(&self, collection: &TokenCollection) -> Result<Vec<TokenReport>> {
        collection.iter().map(|token| self.report(token)).collect()
    }

    /// Assemble one token's report.
    pub fn report(&self, token: &Token) -> Result<TokenReport> {
        let scorer = RarityScorer::new(self.table);
        let rarity = scorer.score_token(token)?;

        let rarity_position = rarity
            .iter()
            .map(|(slot, score)| {
                Ok((slot.clone(), self.rank_index.position_of(slot, *score)?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        let mut count = BTreeMap::new();
        let mut slot_tiers = BTreeMap::new();
        for (slot, value) in &token.slots {
            let occurrences = self.occurrences.get(value).copied().ok_or_else(|| {
                LootrankError::collection(format!(
                    "no occurrence count for '{value}' (token '{}')",
                    token.id
                ))
            })?;
            let tier = self.tiers.get(value).copied().ok_or_else(|| {
                LootrankError::collection(format!(
                    "no rarity tier for '{value}' (token '{}')",
                    token.id
                ))
            })?;
            count.insert(slot.clone(), occurrences);
            slot_tiers.insert(slot.clone(), tier);
        }

        let overall = self
            .overall_ranks
            .get(&token.id)
            .copied()
            .ok_or_else(|| {
                LootrankError::collection(format!("no overall rank for token '{}'", token.id))
            })?;

        Ok(TokenReport {
            token_id: token.id.clone(),
            rank: TokenRank {
                overall,
                slots: slot_tiers,
            },
            count,
            rarity,
            rarity_position,
        })
    }
}
