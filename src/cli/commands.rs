//! Command implementations for the lootrank CLI.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use log::{debug, info};

use crate::census;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::collection::TokenCollection;
use crate::dataset;
use crate::error::{LootrankError, Result};
use crate::frequency::TraitFrequencyTable;
use crate::rank::RankIndex;
use crate::report::ReportAssembler;
use crate::score::RarityScorer;
use crate::vocabulary::FragmentVocabulary;

/// Execute a CLI command.
pub fn execute_command(args: LootrankArgs) -> Result<()> {
    match &args.command {
        Command::Report(report_args) => run_report(report_args.clone(), &args),
        Command::Frequencies(freq_args) => run_frequencies(freq_args.clone(), &args),
        Command::Score(score_args) => run_score(score_args.clone(), &args),
        Command::Validate(validate_args) => run_validate(validate_args.clone(), &args),
    }
}

/// Load and normalize both input datasets.
fn load_inputs(dataset_args: &DatasetArgs) -> Result<(TokenCollection, FragmentVocabulary)> {
    info!(
        "loading collection from {}",
        dataset_args.collection.display()
    );
    let collection = dataset::load_collection(&dataset_args.collection)?;
    if collection.is_empty() {
        return Err(LootrankError::invalid_operation("collection is empty"));
    }
    info!(
        "loading vocabulary from {}",
        dataset_args.item_parts.display()
    );
    let vocabulary = dataset::load_vocabulary(&dataset_args.item_parts)?;
    debug!(
        "{} tokens, {} slots",
        collection.len(),
        vocabulary.slot_count()
    );
    Ok((collection, vocabulary))
}

/// Compute the full rarity report.
fn run_report(args: ReportArgs, cli_args: &LootrankArgs) -> Result<()> {
    let (collection, vocabulary) = load_inputs(&args.dataset)?;

    let start = Instant::now();
    let table = TraitFrequencyTable::build(&collection, &vocabulary);
    let rank_index = RankIndex::build(&table, &collection)?;
    let occurrences = census::occurrences(&collection);
    let tiers = census::tiers(&occurrences);
    let overall_ranks = census::overall_ranks(&collection, &occurrences)?;

    let assembler = ReportAssembler::new(&table, &rank_index, &tiers, &occurrences, &overall_ranks);
    let reports = assembler.assemble(&collection)?;
    info!(
        "assembled {} token reports in {}ms",
        reports.len(),
        start.elapsed().as_millis()
    );

    match &args.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &reports)?;
            output_result(
                "Report written",
                &ReportSummary {
                    tokens: reports.len(),
                    slots: vocabulary.slot_count(),
                    output_path: Some(path.to_string_lossy().to_string()),
                    duration_ms: start.elapsed().as_millis() as u64,
                },
                cli_args,
            )
        }
        None => output_result("Rarity report", &reports, cli_args),
    }
}

/// Dump the trait frequency table.
fn run_frequencies(args: FrequenciesArgs, cli_args: &LootrankArgs) -> Result<()> {
    let (collection, vocabulary) = load_inputs(&args.dataset)?;
    let table = TraitFrequencyTable::build(&collection, &vocabulary);

    match &args.slot {
        Some(slot) => {
            let frequencies = table.slot(slot).ok_or_else(|| {
                LootrankError::invalid_operation(format!("unknown slot '{slot}'"))
            })?;
            output_result(
                &format!("Trait frequencies for slot '{slot}'"),
                frequencies,
                cli_args,
            )
        }
        None => output_result("Trait frequencies", &table, cli_args),
    }
}

/// Score a single token and report its rank positions.
fn run_score(args: ScoreArgs, cli_args: &LootrankArgs) -> Result<()> {
    let (collection, vocabulary) = load_inputs(&args.dataset)?;
    let token = collection.get(&args.token_id).ok_or_else(|| {
        LootrankError::invalid_operation(format!("no token with id '{}'", args.token_id))
    })?;

    let table = TraitFrequencyTable::build(&collection, &vocabulary);
    let scorer = RarityScorer::new(&table);
    let rarity = scorer.score_token(token)?;

    let rank_index = RankIndex::build(&table, &collection)?;
    let rarity_position = rarity
        .iter()
        .map(|(slot, score)| Ok((slot.clone(), rank_index.position_of(slot, *score)?)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    output_result(
        &format!("Rarity for token '{}'", token.id),
        &TokenScoreResult {
            token_id: token.id.clone(),
            rarity,
            rarity_position,
        },
        cli_args,
    )
}

/// Validate a vocabulary file; loading already runs the consistency check.
fn run_validate(args: ValidateArgs, cli_args: &LootrankArgs) -> Result<()> {
    let vocabulary = dataset::load_vocabulary(&args.item_parts)?;

    let mut parts = 0;
    let mut name_prefixes = 0;
    let mut name_suffixes = 0;
    let mut from_phrases = 0;
    for (_, slot_vocab) in vocabulary.slots() {
        parts += slot_vocab.parts.len();
        name_prefixes += slot_vocab.name_prefixes.len();
        name_suffixes += slot_vocab.name_suffixes.len();
        from_phrases += slot_vocab.from_phrases.len();
    }

    output_result(
        "Vocabulary is consistent",
        &ValidationResult {
            slots: vocabulary.slot_count(),
            parts,
            name_prefixes,
            name_suffixes,
            from_phrases,
        },
        cli_args,
    )
}
