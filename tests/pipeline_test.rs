//! End-to-end pipeline test: load datasets from disk, build the frequency
//! table, score and rank every token, and assemble the final report.

use std::fs;

use tempfile::TempDir;

use lootrank::census;
use lootrank::dataset;
use lootrank::frequency::TraitFrequencyTable;
use lootrank::rank::RankIndex;
use lootrank::report::ReportAssembler;
use lootrank::score::RarityScorer;

const ITEM_PARTS: &str = r#"{
    "weapons": ["Knife", "Pocket Knife", "Baseball Bat", "AK47"],
    "rings": ["Gold Ring", "Diamond Ring"],
    "namePrefixes": ["Grim", "Big Worm"],
    "nameSuffixes": ["Viper", "Killer"],
    "suffixes": ["from the Docks", "from Big Smoke"]
}"#;

const LOOT: &str = r#"[
    {"1": {"weapon": "Pocket Knife", "ring": "Gold Ring"}},
    {"2": {"weapon": "Knife", "ring": "Gold Ring"}},
    {"3": {"weapon": "\"Grim Viper\" AK47 from the Docks +1", "ring": "Diamond Ring"}},
    {"4": {"weapon": "Baseball Bat from Big Smoke", "ring": "Gold Ring"}},
    {"5": {"weapon": "Baseball Bat +1", "ring": "Gold Ring"}}
]"#;

fn load() -> (
    lootrank::collection::TokenCollection,
    lootrank::vocabulary::FragmentVocabulary,
) {
    let dir = TempDir::new().unwrap();
    let loot_path = dir.path().join("loot.json");
    let parts_path = dir.path().join("item-parts.json");
    fs::write(&loot_path, LOOT).unwrap();
    fs::write(&parts_path, ITEM_PARTS).unwrap();
    let collection = dataset::load_collection(&loot_path).unwrap();
    let vocabulary = dataset::load_vocabulary(&parts_path).unwrap();
    (collection, vocabulary)
}

#[test]
fn frequency_table_applies_exclusions_and_anchors() {
    let (collection, vocabulary) = load();
    let table = TraitFrequencyTable::build(&collection, &vocabulary);
    let weapon = table.slot("weapon").unwrap();

    // "Knife" must not be credited for the "Pocket Knife" token.
    assert_eq!(weapon.parts.get("Knife"), Some(1));
    assert_eq!(weapon.parts.get("Pocket Knife"), Some(1));
    assert_eq!(weapon.parts.get("Baseball Bat"), Some(2));
    // "Big Worm" never appears as a quoted prefix, even though "Big" letters
    // occur inside "from Big Smoke".
    assert_eq!(weapon.name_prefixes.get("Big Worm"), Some(0));
    assert_eq!(weapon.name_prefixes.get("Grim"), Some(1));
    assert_eq!(weapon.from_phrases.get("Big Smoke"), Some(1));
    assert_eq!(weapon.plus_total, 2);
    assert_eq!(weapon.parts_plus.get("Baseball Bat"), Some(1));
}

#[test]
fn scores_match_hand_computed_values() {
    let (collection, vocabulary) = load();
    let table = TraitFrequencyTable::build(&collection, &vocabulary);
    let scorer = RarityScorer::new(&table);

    // Token 3: plus(2) + the Docks(1) + Grim(1) + Viper(1) + AK47(1)
    // = 4000 + 8000 + 8000 + 8000 + 8000 = 36000.0000
    let scores = scorer.score_token(collection.get("3").unwrap()).unwrap();
    assert_eq!(scores["weapon"], 360_000_000);
    assert_eq!(scores["ring"], 80_000_000);

    // Token 4: Big Smoke(1) + Baseball Bat(2) = 8000 + 4000 = 12000.0000
    let scores = scorer.score_token(collection.get("4").unwrap()).unwrap();
    assert_eq!(scores["weapon"], 120_000_000);
    // Gold Ring appears 4 times: 8000/4 = 2000.0000
    assert_eq!(scores["ring"], 20_000_000);
}

#[test]
fn rank_positions_are_dense_and_monotonic() {
    let (collection, vocabulary) = load();
    let table = TraitFrequencyTable::build(&collection, &vocabulary);
    let index = RankIndex::build(&table, &collection).unwrap();

    assert_eq!(
        index.scores("weapon").unwrap(),
        &[360_000_000, 120_000_000, 80_000_000]
    );
    assert_eq!(index.position_of("weapon", 360_000_000).unwrap(), 1);
    assert_eq!(index.position_of("weapon", 120_000_000).unwrap(), 2);
    assert_eq!(index.position_of("weapon", 80_000_000).unwrap(), 3);
    // Two distinct ring values, so exactly two positions for five tokens.
    assert_eq!(index.scores("ring").unwrap().len(), 2);
}

#[test]
fn report_combines_scores_ranks_and_census() {
    let (collection, vocabulary) = load();
    let table = TraitFrequencyTable::build(&collection, &vocabulary);
    let index = RankIndex::build(&table, &collection).unwrap();
    let occurrences = census::occurrences(&collection);
    let tiers = census::tiers(&occurrences);
    let overall = census::overall_ranks(&collection, &occurrences).unwrap();

    let assembler = ReportAssembler::new(&table, &index, &tiers, &occurrences, &overall);
    let reports = assembler.assemble(&collection).unwrap();
    assert_eq!(reports.len(), 5);

    // Token 3 has the rarest weapon and the lowest occurrence sum.
    let third = &reports[2];
    assert_eq!(third.token_id, "3");
    assert_eq!(third.rank.overall, 1);
    assert_eq!(third.rarity_position["weapon"], 1);
    assert_eq!(third.count["ring"], 1);
    assert_eq!(third.rank.slots["ring"].level(), 6);

    // Gold Ring occurs 4 times and lands in the Legendary tier.
    let first = &reports[0];
    assert_eq!(first.count["ring"], 4);
    assert_eq!(first.rank.slots["ring"].level(), 5);
    assert_eq!(first.rarity_position["ring"], 2);
}

#[test]
fn pipeline_output_is_reproducible() {
    let (collection, vocabulary) = load();

    let run = || {
        let table = TraitFrequencyTable::build(&collection, &vocabulary);
        let index = RankIndex::build(&table, &collection).unwrap();
        let occurrences = census::occurrences(&collection);
        let tiers = census::tiers(&occurrences);
        let overall = census::overall_ranks(&collection, &occurrences).unwrap();
        let assembler = ReportAssembler::new(&table, &index, &tiers, &occurrences, &overall);
        serde_json::to_string(&assembler.assemble(&collection).unwrap()).unwrap()
    };

    // Byte-for-byte identical across runs.
    assert_eq!(run(), run());
}
