//! Dataset loading and normalization.
//!
//! The only I/O in the crate lives here and runs before the core: raw JSON
//! datasets are decoded, slot keys are renamed to the collection's names,
//! the shared name-prefix/name-suffix/phrase sets are distributed to every
//! slot, and the vocabulary is validated against the exclusions table.
//!
//! Raw shapes:
//!
//! - collection: an array of single-key objects, `[{"1": {"ring": "Gold
//!   Ring", ...}}, ...]`
//! - item parts: one object whose slot keys map to part lists, alongside the
//!   shared `namePrefixes`, `nameSuffixes` and `suffixes` lists (suffix
//!   entries carry a literal `from ` lead).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::collection::{Token, TokenCollection};
use crate::error::{LootrankError, Result};
use crate::vocabulary::{FragmentVocabulary, SlotVocabulary};

/// Source dataset slot keys that differ from the collection's slot names.
const SLOT_RENAMES: &[(&str, &str)] = &[
    ("waistArmor", "waist"),
    ("footArmor", "foot"),
    ("handArmor", "hand"),
    ("necklaces", "neck"),
    ("rings", "ring"),
    ("weapons", "weapon"),
];

/// Load a token collection from its JSON file.
///
/// Token order follows file order. Every token must carry the same slot key
/// set; the first token defines it.
pub fn load_collection(path: &Path) -> Result<TokenCollection> {
    let reader = BufReader::new(File::open(path)?);
    let raw: Vec<BTreeMap<String, BTreeMap<String, String>>> = serde_json::from_reader(reader)?;

    let mut tokens = Vec::with_capacity(raw.len());
    for entry in raw {
        if entry.len() != 1 {
            return Err(LootrankError::collection(format!(
                "expected one token id per entry, found {}",
                entry.len()
            )));
        }
        for (id, slots) in entry {
            tokens.push(Token::new(id, slots));
        }
    }

    if let Some(first) = tokens.first() {
        let expected: Vec<&String> = first.slots.keys().collect();
        for token in &tokens {
            let keys: Vec<&String> = token.slots.keys().collect();
            if keys != expected {
                return Err(LootrankError::collection(format!(
                    "token '{}' has a different slot set than token '{}'",
                    token.id, first.id
                )));
            }
        }
    }

    Ok(TokenCollection::new(tokens))
}

/// Load and normalize a fragment vocabulary from an item-parts JSON file.
///
/// Applies the slot key renames, distributes the shared prefix/suffix/phrase
/// sets to every slot, strips the `from ` lead off phrases, attaches the
/// default exclusions table, and validates the result.
pub fn load_vocabulary(path: &Path) -> Result<FragmentVocabulary> {
    let reader = BufReader::new(File::open(path)?);
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_reader(reader)?;
    vocabulary_from_raw(raw)
}

fn vocabulary_from_raw(mut raw: BTreeMap<String, Vec<String>>) -> Result<FragmentVocabulary> {
    let name_prefixes = take_shared(&mut raw, "namePrefixes")?;
    let name_suffixes = take_shared(&mut raw, "nameSuffixes")?;
    let from_phrases: Vec<String> = take_shared(&mut raw, "suffixes")?
        .into_iter()
        .map(|phrase| match phrase.strip_prefix("from ") {
            Some(bare) => bare.to_string(),
            None => phrase,
        })
        .collect();

    for (source, target) in SLOT_RENAMES {
        if let Some(parts) = raw.remove(*source) {
            raw.insert(target.to_string(), parts);
        }
    }

    let slots: BTreeMap<String, SlotVocabulary> = raw
        .into_iter()
        .map(|(slot, parts)| {
            let vocab = SlotVocabulary {
                parts,
                name_prefixes: name_prefixes.clone(),
                name_suffixes: name_suffixes.clone(),
                from_phrases: from_phrases.clone(),
            };
            (slot, vocab)
        })
        .collect();

    let vocabulary = FragmentVocabulary::new(slots, FragmentVocabulary::default_exclusions());
    vocabulary.validate()?;
    Ok(vocabulary)
}

fn take_shared(raw: &mut BTreeMap<String, Vec<String>>, key: &str) -> Result<Vec<String>> {
    raw.remove(key)
        .ok_or_else(|| LootrankError::vocabulary(format!("item parts missing '{key}'")))
}
