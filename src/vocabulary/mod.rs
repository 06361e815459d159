//! Fragment vocabularies and collision-aware containment.
//!
//! A composite slot value such as `"Grim Viper" Bane from the Forbidden
//! Dreams +1` is assembled from fragments of four kinds: a base part, an
//! optional quoted name-prefix/name-suffix pair, an optional `from` phrase,
//! and an optional `+1` marker. The vocabulary records, per slot, every
//! fragment string that can occur, and detection of a fragment inside a
//! composite value is plain substring containment on a formatted form of the
//! fragment.
//!
//! Containment is ambiguous two ways, and each ambiguity has its own fix:
//!
//! - A name prefix or suffix can be a substring of an unrelated phrase
//!   (prefix `Big` inside `from Big Smoke`). Prefixes anchor against the
//!   leading quote and suffixes against the trailing quote, so the formatted
//!   forms cannot collide with phrase text.
//! - A part can be a substring of another part (`Knife` inside
//!   `Pocket Knife`). These pairs are listed in an explicit exclusions map
//!   consulted at every containment check; [`FragmentVocabulary::validate`]
//!   verifies the map covers every such pair rather than trusting it.

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::error::{LootrankError, Result};

/// The bonus marker that may trail a composite slot value.
pub const PLUS_MARKER: &str = "+1";

/// The kind of a fragment, which determines its formatted substring form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// Base part name, matched literally anywhere in the value.
    Part,
    /// Quoted name prefix, anchored against the leading quote.
    NamePrefix,
    /// Quoted name suffix, anchored against the trailing quote.
    NameSuffix,
    /// Phrase following `from `.
    FromPhrase,
}

impl FragmentKind {
    /// Format a fragment into the exact substring that appears in a
    /// composite slot value containing it.
    pub fn formatted(&self, fragment: &str) -> String {
        match self {
            FragmentKind::Part => fragment.to_string(),
            FragmentKind::NamePrefix => format!("\"{fragment} "),
            FragmentKind::NameSuffix => format!("{fragment}\""),
            FragmentKind::FromPhrase => format!("from {fragment}"),
        }
    }

    /// Get the name of this fragment kind.
    pub fn name(&self) -> &'static str {
        match self {
            FragmentKind::Part => "part",
            FragmentKind::NamePrefix => "name_prefix",
            FragmentKind::NameSuffix => "name_suffix",
            FragmentKind::FromPhrase => "from_phrase",
        }
    }
}

/// The known fragment sets for one slot.
///
/// Vectors preserve vocabulary order; frequency tables use that order to
/// break ties when sorting counts.
#[derive(Debug, Clone, Default)]
pub struct SlotVocabulary {
    /// Base part names.
    pub parts: Vec<String>,
    /// Quoted name prefixes.
    pub name_prefixes: Vec<String>,
    /// Quoted name suffixes.
    pub name_suffixes: Vec<String>,
    /// Phrases that follow `from ` (stored without the lead).
    pub from_phrases: Vec<String>,
}

impl SlotVocabulary {
    /// Get the fragment set for a kind.
    pub fn fragments(&self, kind: FragmentKind) -> &[String] {
        match kind {
            FragmentKind::Part => &self.parts,
            FragmentKind::NamePrefix => &self.name_prefixes,
            FragmentKind::NameSuffix => &self.name_suffixes,
            FragmentKind::FromPhrase => &self.from_phrases,
        }
    }
}

/// Per-slot fragment vocabularies plus the substring-collision exclusions.
///
/// The key set of `slots` defines the slot universe: every token in the
/// collection carries exactly these slots.
#[derive(Debug, Clone, Default)]
pub struct FragmentVocabulary {
    slots: BTreeMap<String, SlotVocabulary>,
    exclusions: AHashMap<String, String>,
}

impl FragmentVocabulary {
    /// Create a vocabulary from per-slot fragment sets and an exclusions map.
    pub fn new(
        slots: BTreeMap<String, SlotVocabulary>,
        exclusions: AHashMap<String, String>,
    ) -> Self {
        FragmentVocabulary { slots, exclusions }
    }

    /// The exclusions table of the source collection: each key is a fragment
    /// that is a substring of the value, and must not be credited when the
    /// value is present.
    pub fn default_exclusions() -> AHashMap<String, String> {
        [
            ("Dress Shoes", "Alligator Dress Shoes"),
            ("Leather Gloves", "Studded Leather Gloves"),
            ("Knife", "Pocket Knife"),
            ("Scooter", "Electric Scooter"),
            ("Bike", "Push Bike"),
            ("The Orphan", "The Orphan Maker"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    /// Iterate over slots in name order.
    pub fn slots(&self) -> impl Iterator<Item = (&String, &SlotVocabulary)> {
        self.slots.iter()
    }

    /// Get one slot's vocabulary.
    pub fn slot(&self, name: &str) -> Option<&SlotVocabulary> {
        self.slots.get(name)
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether `fragment`, in its `formatted` form, should be credited as
    /// present in `haystack`.
    ///
    /// The exclusion guard runs on the raw value: a fragment with a
    /// registered longer collision string is not credited when that longer
    /// string is present.
    pub fn credits(&self, haystack: &str, fragment: &str, formatted: &str) -> bool {
        if !haystack.contains(formatted) {
            return false;
        }
        match self.exclusions.get(fragment) {
            Some(longer) => !haystack.contains(longer.as_str()),
            None => true,
        }
    }

    /// Verify that the exclusions map covers every part-inside-part substring
    /// collision in this vocabulary.
    ///
    /// Part matching is unanchored containment, so any part that is a
    /// substring of another part in the same slot would be over-counted
    /// unless the pair is registered. The hand-written exclusions list covers
    /// the source collection; a future vocabulary may introduce collisions it
    /// does not, and this check fails fast instead of silently mis-counting.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();
        for (slot, vocab) in &self.slots {
            for shorter in &vocab.parts {
                for longer in &vocab.parts {
                    if shorter == longer || !longer.contains(shorter.as_str()) {
                        continue;
                    }
                    if self.exclusions.get(shorter) != Some(longer) {
                        violations.push(format!("{slot}: '{shorter}' inside '{longer}'"));
                    }
                }
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(LootrankError::vocabulary(format!(
                "unregistered substring collisions: {}",
                violations.join(", ")
            )))
        }
    }
}
