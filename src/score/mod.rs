//! Rarity scoring.
//!
//! A fragment observed `count` times across the collection contributes
//! `1 / (count / 8000)`, i.e. `8000 / count`, to its slot's score; a slot's
//! score is the sum over every fragment present in its value. Sums are
//! accumulated in exact rational arithmetic and the result is returned as a
//! fixed-point integer, the decimal score times 10000 truncated (4 decimal
//! places), so identical inputs always produce identical integers.
//!
//! The scorer borrows a prebuilt [`TraitFrequencyTable`]; it never counts
//! anything itself.

pub mod fraction;
pub mod parser;

use std::collections::BTreeMap;

use crate::collection::Token;
use crate::error::{LootrankError, Result};
use crate::frequency::{SlotFrequencies, TraitFrequencyTable};
use crate::score::fraction::Fraction;
use crate::vocabulary::{FragmentKind, PLUS_MARKER};

/// Fixed scoring base: a count equal to the full source collection size
/// scores exactly 1.
pub const SCORE_BASE: u64 = 8000;

/// Fixed-point scale of returned scores (4 decimal places).
pub const SCORE_SCALE: u64 = 10000;

/// Scores tokens against an injected frequency table.
#[derive(Debug, Clone, Copy)]
pub struct RarityScorer<'a> {
    table: &'a TraitFrequencyTable,
}

impl<'a> RarityScorer<'a> {
    /// Create a scorer over a prebuilt table.
    pub fn new(table: &'a TraitFrequencyTable) -> Self {
        RarityScorer { table }
    }

    /// Score every slot of a token. Returns the fixed-point score per slot.
    pub fn score_token(&self, token: &Token) -> Result<BTreeMap<String, u64>> {
        token
            .slots
            .iter()
            .map(|(slot, value)| Ok((slot.clone(), self.score_slot(slot, value)?)))
            .collect()
    }

    /// Score one slot's composite value.
    pub fn score_slot(&self, slot: &str, value: &str) -> Result<u64> {
        let frequencies = self
            .table
            .slot(slot)
            .ok_or_else(|| LootrankError::lookup(slot, value))?;
        let parsed = parser::parse(value)?;

        let mut sum = Fraction::zero();
        if parsed.plus {
            add_count(&mut sum, slot, PLUS_MARKER, frequencies.plus_total)?;
        }
        if let Some(phrase) = parsed.from_phrase {
            self.add_fragment(&mut sum, frequencies, slot, FragmentKind::FromPhrase, phrase)?;
        }
        if let Some(prefix) = parsed.name_prefix {
            self.add_fragment(&mut sum, frequencies, slot, FragmentKind::NamePrefix, prefix)?;
        }
        if let Some(suffix) = parsed.name_suffix {
            self.add_fragment(&mut sum, frequencies, slot, FragmentKind::NameSuffix, suffix)?;
        }
        self.add_fragment(&mut sum, frequencies, slot, FragmentKind::Part, parsed.part)?;

        Ok(sum.floor_scaled(SCORE_SCALE))
    }

    fn add_fragment(
        &self,
        sum: &mut Fraction,
        frequencies: &SlotFrequencies,
        slot: &str,
        kind: FragmentKind,
        fragment: &str,
    ) -> Result<()> {
        let count = frequencies
            .count(kind, fragment)
            .ok_or_else(|| LootrankError::lookup(slot, fragment))?;
        add_count(sum, slot, fragment, count)
    }
}

fn add_count(sum: &mut Fraction, slot: &str, fragment: &str, count: u64) -> Result<()> {
    if count == 0 {
        return Err(LootrankError::inconsistent(slot, fragment));
    }
    sum.add(SCORE_BASE, count);
    Ok(())
}
