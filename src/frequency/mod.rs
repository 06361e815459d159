//! Trait frequency tables.
//!
//! One pass over the collection per slot produces, for every known fragment,
//! the number of tokens whose slot value contains it (under the collision
//! guard of [`FragmentVocabulary::credits`]). Parts are additionally counted
//! against the `+1` marker, and each slot records how many of its values
//! carry `+1` at all. Tables are built once and read-only afterward; the
//! scorer and ranker receive them by reference and never recompute counts.
//!
//! Counts are exposed sorted ascending, rarest first, with ties keeping
//! vocabulary order. The order is a convenience for consumers that display
//! rarity tables; scoring only uses the lookup side and is order-independent.
//!
//! Slots are independent, so the per-slot scans run in parallel via rayon
//! with no shared mutable state.

use std::collections::BTreeMap;

use ahash::AHashMap;
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::collection::TokenCollection;
use crate::vocabulary::{FragmentKind, FragmentVocabulary, SlotVocabulary, PLUS_MARKER};

/// Counts for one fragment kind of one slot.
///
/// Entries are sorted ascending by count (stable, so ties keep vocabulary
/// order); a hash index backs O(1) lookups during scoring.
#[derive(Debug, Clone, Default)]
pub struct FragmentCounts {
    entries: Vec<(String, u64)>,
    index: AHashMap<String, u64>,
}

impl FragmentCounts {
    /// Build from `(fragment, count)` pairs in vocabulary order.
    pub fn from_counts(counts: Vec<(String, u64)>) -> Self {
        let index = counts.iter().cloned().collect();
        let mut entries = counts;
        entries.sort_by_key(|(_, count)| *count);
        FragmentCounts { entries, index }
    }

    /// Look up a fragment's count.
    pub fn get(&self, fragment: &str) -> Option<u64> {
        self.index.get(fragment).copied()
    }

    /// Iterate entries ascending by count.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(f, c)| (f.as_str(), *c))
    }

    /// Number of distinct fragments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as a map in ascending-count order, which serde_json preserves
// when writing straight to output.
impl Serialize for FragmentCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (fragment, count) in &self.entries {
            map.serialize_entry(fragment, count)?;
        }
        map.end()
    }
}

/// All frequency counts for one slot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SlotFrequencies {
    /// Base part counts.
    pub parts: FragmentCounts,
    /// Per part, how many of its matching tokens also carry `+1`.
    pub parts_plus: FragmentCounts,
    /// Quoted name prefix counts.
    pub name_prefixes: FragmentCounts,
    /// Quoted name suffix counts.
    pub name_suffixes: FragmentCounts,
    /// `from` phrase counts (keyed by the bare phrase).
    pub from_phrases: FragmentCounts,
    /// Tokens in this slot carrying `+1`, regardless of part.
    pub plus_total: u64,
}

impl SlotFrequencies {
    /// Look up the count for a fragment of the given kind.
    pub fn count(&self, kind: FragmentKind, fragment: &str) -> Option<u64> {
        match kind {
            FragmentKind::Part => self.parts.get(fragment),
            FragmentKind::NamePrefix => self.name_prefixes.get(fragment),
            FragmentKind::NameSuffix => self.name_suffixes.get(fragment),
            FragmentKind::FromPhrase => self.from_phrases.get(fragment),
        }
    }
}

/// Frequency tables for every slot, plus the collection size they were
/// built from.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TraitFrequencyTable {
    slots: BTreeMap<String, SlotFrequencies>,
    collection_size: usize,
}

impl TraitFrequencyTable {
    /// Scan the collection once per slot and build the full table.
    pub fn build(collection: &TokenCollection, vocabulary: &FragmentVocabulary) -> Self {
        let slot_vocabs: Vec<(&String, &SlotVocabulary)> = vocabulary.slots().collect();
        let slots = slot_vocabs
            .into_par_iter()
            .map(|(name, slot_vocab)| {
                let frequencies = count_slot(collection, vocabulary, name, slot_vocab);
                (name.clone(), frequencies)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect();
        TraitFrequencyTable {
            slots,
            collection_size: collection.len(),
        }
    }

    /// Get one slot's frequencies.
    pub fn slot(&self, name: &str) -> Option<&SlotFrequencies> {
        self.slots.get(name)
    }

    /// Iterate slots in name order.
    pub fn slots(&self) -> impl Iterator<Item = (&String, &SlotFrequencies)> {
        self.slots.iter()
    }

    /// Size of the collection the table was built from.
    pub fn collection_size(&self) -> usize {
        self.collection_size
    }
}

/// Count every vocabulary fragment of one slot across the collection.
fn count_slot(
    collection: &TokenCollection,
    vocabulary: &FragmentVocabulary,
    slot_name: &str,
    slot_vocab: &SlotVocabulary,
) -> SlotFrequencies {
    let values: Vec<&str> = collection
        .iter()
        .filter_map(|token| token.slot(slot_name))
        .collect();

    let mut part_counts = Vec::with_capacity(slot_vocab.parts.len());
    let mut plus_counts = Vec::with_capacity(slot_vocab.parts.len());
    for part in &slot_vocab.parts {
        let formatted = FragmentKind::Part.formatted(part);
        let mut count = 0u64;
        let mut plus = 0u64;
        for value in &values {
            if vocabulary.credits(value, part, &formatted) {
                count += 1;
                if value.contains(PLUS_MARKER) {
                    plus += 1;
                }
            }
        }
        part_counts.push((part.clone(), count));
        plus_counts.push((part.clone(), plus));
    }

    let count_kind = |kind: FragmentKind| {
        slot_vocab
            .fragments(kind)
            .iter()
            .map(|fragment| {
                let formatted = kind.formatted(fragment);
                let count = values
                    .iter()
                    .filter(|value| vocabulary.credits(value, fragment, &formatted))
                    .count() as u64;
                (fragment.clone(), count)
            })
            .collect::<Vec<_>>()
    };

    let name_prefixes = FragmentCounts::from_counts(count_kind(FragmentKind::NamePrefix));
    let name_suffixes = FragmentCounts::from_counts(count_kind(FragmentKind::NameSuffix));
    let from_phrases = FragmentCounts::from_counts(count_kind(FragmentKind::FromPhrase));

    let plus_total = values
        .iter()
        .filter(|value| value.contains(PLUS_MARKER))
        .count() as u64;

    SlotFrequencies {
        parts: FragmentCounts::from_counts(part_counts),
        parts_plus: FragmentCounts::from_counts(plus_counts),
        name_prefixes,
        name_suffixes,
        from_phrases,
        plus_total,
    }
}
