//! Merge module tests

mod common;

use artisan_merge::merge::{Merger, merge_batches};
use artisan_merge::{CraftBatch, RandomIdGenerator};
use common::{batch, sequential_ids};
use std::collections::HashSet;
use uuid::Uuid;

fn ceramics_batches() -> Vec<CraftBatch> {
    vec![
        batch(
            "batch-001.json",
            r#"[
                {"craft_id": "c1", "craft_name": "Ceramics", "artisans": [{"name": "A1"}, {"name": "A2"}]},
                {"craft_id": "c2", "craft_name": "Lacquer", "artisans": [{"name": "L1"}]}
            ]"#,
        ),
        batch(
            "batch-002.json",
            r#"[
                {"craft_id": "c1", "craft_name": "Ceramics", "artisans": [{"name": "B1"}]}
            ]"#,
        ),
    ]
}

#[test]
fn test_last_write_wins_in_lookup() {
    let result = merge_batches(ceramics_batches(), sequential_ids());

    let ceramics: Vec<_> = result
        .lookup
        .get("Ceramics")
        .unwrap()
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(ceramics, vec!["B1"]);
    assert_eq!(result.lookup.len(), 2);
    assert_eq!(result.overwritten_crafts, 1);
}

#[test]
fn test_overwritten_craft_rows_are_retained() {
    let result = merge_batches(ceramics_batches(), sequential_ids());

    let names: Vec<_> = result.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A1", "A2", "L1", "B1"]);
    assert_eq!(result.artisan_rows(), 4);
    assert_eq!(result.crafts_processed, 3);
}

#[test]
fn test_row_count_matches_total_artisans() {
    let batches = ceramics_batches();
    let expected: usize = batches.iter().map(|b| b.artisan_count()).sum();

    let result = merge_batches(batches, RandomIdGenerator);
    assert_eq!(result.rows.len(), expected);
}

#[test]
fn test_ids_assigned_in_processing_order() {
    let result = merge_batches(ceramics_batches(), sequential_ids());

    let ids: Vec<Uuid> = result.rows.iter().map(|r| r.id).collect();
    let expected: Vec<Uuid> = (1..=4).map(Uuid::from_u128).collect();
    assert_eq!(ids, expected);

    assert_eq!(result.rows[0].craft_id, "c1");
    assert_eq!(result.rows[2].craft_id, "c2");
    assert_eq!(result.rows[3].craft_id, "c1");
}

#[test]
fn test_random_ids_unique_across_run() {
    let entries: String = (0..40)
        .map(|i| {
            let artisans: Vec<String> = (0..50)
                .map(|j| format!(r#"{{"name": "artisan-{}-{}"}}"#, i, j))
                .collect();
            format!(
                r#"{{"craft_id": "c{}", "craft_name": "Craft {}", "artisans": [{}]}}"#,
                i,
                i % 7,
                artisans.join(",")
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    let batches = vec![batch("batch-big.json", &format!("[{}]", entries))];

    let result = merge_batches(batches, RandomIdGenerator);
    let ids: HashSet<Uuid> = result.rows.iter().map(|r| r.id).collect();
    assert_eq!(result.rows.len(), 2000);
    assert_eq!(ids.len(), 2000);
    assert_eq!(result.lookup.len(), 7);
}

#[test]
fn test_duplicate_craft_within_one_batch() {
    let batches = vec![batch(
        "batch-001.json",
        r#"[
            {"craft_id": "c1", "craft_name": "Weaving", "artisans": [{"name": "First"}]},
            {"craft_id": "c9", "craft_name": "Weaving", "artisans": []}
        ]"#,
    )];
    let result = merge_batches(batches, sequential_ids());

    assert!(result.lookup.get("Weaving").unwrap().is_empty());
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.overwritten_crafts, 1);
}

#[test]
fn test_merger_accepts_entries_incrementally() {
    let mut merger = Merger::new(sequential_ids());
    for b in ceramics_batches() {
        merger.add_batch(b);
    }
    let result = merger.finish();
    assert_eq!(result.crafts_processed, 3);
    assert_eq!(result.rows.len(), 4);
}

#[test]
fn test_empty_input() {
    let result = merge_batches(Vec::new(), sequential_ids());
    assert!(result.lookup.is_empty());
    assert!(result.rows.is_empty());
    assert_eq!(result.crafts_processed, 0);
}
