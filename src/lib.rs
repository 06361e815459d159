//! # lootrank
//!
//! Deterministic rarity scoring and ranking for fixed collections of
//! generatively-composed collectible tokens.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Exact rational arithmetic, reproducible byte-for-byte across runs
//! - Substring-collision-aware fragment matching
//! - Per-slot trait frequency tables, inverse-frequency scores, dense ranks
//!
//! ## Pipeline
//!
//! ```text
//! FragmentVocabulary -> TraitFrequencyTable -> { RarityScorer, RankIndex }
//!                                                      -> ReportAssembler
//! ```

pub mod census;
pub mod cli;
pub mod collection;
pub mod dataset;
pub mod error;
pub mod frequency;
pub mod rank;
pub mod report;
pub mod score;
pub mod vocabulary;

pub mod prelude {}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
