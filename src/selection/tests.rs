use super::types::format_reason;
use super::*;
use crate::inventory::Document;

fn docs(count: usize) -> Vec<Document> {
    (0..count)
        .map(|i| Document {
            name: format!("doc{}", i),
            category: "knowledge".to_string(),
            description: String::new(),
            content: String::new(),
        })
        .collect()
}

#[test]
fn test_floor_cap_and_order() {
    let scores = [0.9, 0.5, 0.3, 0.1, 0.05, 0.021, 0.02, 0.019, 0.6, 0.4];
    let selector = RetrievalSelector::default();

    let ranked = selector.rank(&scores);
    let ranked_scores: Vec<f64> = ranked.iter().map(|&i| scores[i]).collect();

    assert_eq!(ranked_scores, vec![0.9, 0.6, 0.5, 0.4, 0.3, 0.1, 0.05, 0.021]);
    assert_eq!(ranked, vec![0, 8, 1, 9, 2, 3, 4, 5]);
}

#[test]
fn test_floor_is_strict() {
    let selector = RetrievalSelector::default();
    assert!(selector.rank(&[0.02]).is_empty());
    assert_eq!(selector.rank(&[0.0200001]), vec![0]);
}

#[test]
fn test_cap_applies_after_sort() {
    let scores: Vec<f64> = (1..=12).map(|i| i as f64 / 100.0 + 0.1).collect();
    let ranked = RetrievalSelector::default().rank(&scores);

    assert_eq!(ranked.len(), 8);
    assert_eq!(ranked[0], 11);
    assert_eq!(ranked[7], 4);
}

#[test]
fn test_ties_keep_input_order() {
    let scores = [0.3, 0.5, 0.3, 0.5, 0.3];
    let ranked = RetrievalSelector::default().rank(&scores);
    assert_eq!(ranked, vec![1, 3, 0, 2, 4]);
}

#[test]
fn test_nan_is_dropped() {
    let ranked = RetrievalSelector::default().rank(&[f64::NAN, 0.5]);
    assert_eq!(ranked, vec![1]);
}

#[test]
fn test_custom_floor_and_cap() {
    let selector = RetrievalSelector::new(0.4, 2);
    assert_eq!(selector.rank(&[0.41, 0.9, 0.4, 0.8]), vec![1, 3]);
}

#[test]
fn test_select_builds_memories() {
    let documents = docs(3);
    let selected = RetrievalSelector::default().select(&documents, &[0.1, 0.456, 0.0]);

    assert_eq!(
        selected,
        vec![
            SelectedMemory {
                name: "doc1".to_string(),
                category: "knowledge".to_string(),
                reason: "similarity: 0.46".to_string(),
            },
            SelectedMemory {
                name: "doc0".to_string(),
                category: "knowledge".to_string(),
                reason: "similarity: 0.10".to_string(),
            },
        ]
    );
}

#[test]
fn test_select_empty() {
    assert!(RetrievalSelector::default().select(&[], &[]).is_empty());
}

#[test]
fn test_select_pairs_common_prefix() {
    let documents = docs(2);
    let selected = RetrievalSelector::default().select(&documents, &[0.5]);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].name, "doc0");
}

#[test]
fn test_reason_format() {
    assert_eq!(format_reason(1.0), "similarity: 1.00");
    assert_eq!(format_reason(0.021), "similarity: 0.02");
    assert_eq!(format_reason(0.876), "similarity: 0.88");
}

#[test]
fn test_selected_memory_serializes_fields() {
    let memory = SelectedMemory {
        name: "a".to_string(),
        category: "b".to_string(),
        reason: "similarity: 0.50".to_string(),
    };
    assert_eq!(
        serde_json::to_string(&memory).unwrap(),
        r#"{"name":"a","category":"b","reason":"similarity: 0.50"}"#
    );
}
