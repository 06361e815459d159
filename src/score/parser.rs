//! Sequential-match parser for composite slot values.
//!
//! The grammar is small and fixed:
//!
//! ```text
//! ["<namePrefix> <nameSuffix>"] <part> [from <fromPhrase>] [+1]
//! ```
//!
//! Parsing runs as ordered stages, each consuming its matched substring
//! before the next runs: the `+1` marker, then the `from` phrase, then the
//! quoted name pair, and whatever remains is the bare part. Each stage has
//! its own failure point so a malformed value reports which piece of the
//! grammar it broke.

use crate::error::{LootrankError, Result};
use crate::vocabulary::PLUS_MARKER;

/// A composite slot value split into its fragments. Borrows from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedValue<'a> {
    /// Base part name; the only mandatory fragment.
    pub part: &'a str,
    /// Quoted name prefix, without the quote.
    pub name_prefix: Option<&'a str>,
    /// Quoted name suffix, without the quote.
    pub name_suffix: Option<&'a str>,
    /// Phrase following `from `, without the lead.
    pub from_phrase: Option<&'a str>,
    /// Whether the value carried the `+1` marker.
    pub plus: bool,
}

/// Parse a composite slot value into fragments.
pub fn parse(value: &str) -> Result<ParsedValue<'_>> {
    let (remainder, plus) = strip_plus(value)?;
    let (remainder, from_phrase) = split_from(remainder);
    let (remainder, name_pair) = split_quoted(remainder)?;
    let part = remainder.trim();
    if part.is_empty() {
        return Err(LootrankError::parse(format!(
            "no base part left in '{value}'"
        )));
    }
    let (name_prefix, name_suffix) = match name_pair {
        Some((prefix, suffix)) => (Some(prefix), Some(suffix)),
        None => (None, None),
    };
    Ok(ParsedValue {
        part,
        name_prefix,
        name_suffix,
        from_phrase,
        plus,
    })
}

/// Stage 1: consume a trailing ` +1` if the marker is present anywhere.
fn strip_plus(value: &str) -> Result<(&str, bool)> {
    if !value.contains(PLUS_MARKER) {
        return Ok((value, false));
    }
    value
        .strip_suffix(" +1")
        .map(|rest| (rest, true))
        .ok_or_else(|| {
            LootrankError::parse(format!("'{value}' contains '+1' but does not end with ' +1'"))
        })
}

/// Stage 2: split off the `from` phrase at the first ` from `.
fn split_from(value: &str) -> (&str, Option<&str>) {
    match value.split_once(" from ") {
        Some((left, phrase)) => (left, Some(phrase)),
        None => (value, None),
    }
}

/// Stage 3: split off the quoted name pair.
///
/// The quoted header ends at the first quote-then-space; its last space
/// separates the (possibly multi-word) prefix from the single-word suffix.
fn split_quoted(value: &str) -> Result<(&str, Option<(&str, &str)>)> {
    if !value.contains('"') {
        return Ok((value, None));
    }
    let (header, remainder) = value.split_once("\" ").ok_or_else(|| {
        LootrankError::parse(format!("unterminated quoted name in '{value}'"))
    })?;
    let (prefix, suffix) = header.rsplit_once(' ').ok_or_else(|| {
        LootrankError::parse(format!("quoted name '{header}\"' is not a prefix/suffix pair"))
    })?;
    let prefix = prefix.strip_prefix('"').ok_or_else(|| {
        LootrankError::parse(format!("quoted name in '{value}' does not start with a quote"))
    })?;
    Ok((remainder, Some((prefix, suffix))))
}
