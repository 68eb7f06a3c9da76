//! Exact response framing and field order.

mod common;

use serde_json::json;

use triage::labels::OutputLabel;

use common::harness::{dispatcher, frame, mock_classifier, run};

#[tokio::test]
async fn test_classification_line_layout() {
    let dispatcher = dispatcher(Some(mock_classifier(&[
        (OutputLabel::Command, 0.9),
        (OutputLabel::Text, 0.25),
    ])));

    let transcript = run(
        &dispatcher,
        &frame(&[json!({"task": "phase_a", "prompt": "open Chrome"})]),
    )
    .await;

    assert_eq!(
        transcript.lines(),
        vec![concat!(
            r#"{"taskDescription":"open Chrome","outputType":"command","#,
            r#""outputLabels":{"text":false,"picture":false,"command":true,"presentation":false,"specificFile":false,"other":false},"#,
            r#""outputScores":{"text":0.25,"picture":0.0,"command":0.9,"presentation":0.0,"specificFile":0.0,"other":0.0},"#,
            r#""outputFormat":{"type":"inline_text","structure":"direct answer","deliveryMethod":"inline"},"#,
            r#""requiredDomains":[],"complexity":"simple","estimatedSteps":1}"#,
        )]
    );
}

#[tokio::test]
async fn test_bypass_line_layout() {
    let transcript = run(
        &dispatcher(None),
        &frame(&[json!({"task": "phase_a", "prompt": "hi"})]),
    )
    .await;

    assert_eq!(
        transcript.lines(),
        vec![concat!(
            r#"{"taskDescription":"hi","outputType":"text","#,
            r#""outputLabels":{"text":true,"picture":false,"command":false,"presentation":false,"specificFile":false,"other":false},"#,
            r#""outputFormat":{"type":"inline_text","structure":"direct answer","deliveryMethod":"inline"},"#,
            r#""requiredDomains":[],"complexity":"simple","estimatedSteps":1}"#,
        )]
    );
}

#[tokio::test]
async fn test_empty_inventory_line_layout() {
    let transcript = run(
        &dispatcher(None),
        &frame(&[json!({"task": "phase_b", "prompt": "anything"})]),
    )
    .await;

    assert_eq!(
        transcript.lines(),
        vec![
            r#"{"selectedMemories":[],"missingMemories":[],"toolsNeeded":[],"notes":"No memory files in inventory"}"#
        ]
    );
}

#[tokio::test]
async fn test_retrieval_line_layout() {
    let request = json!({
        "task": "phase_b",
        "prompt": "climate change",
        "inventory": [
            {"name": "unrelated", "description": "bread"},
            {"name": "match", "category": "research", "description": "climate change"},
        ],
    });

    let transcript = run(&dispatcher(None), &frame(&[request])).await;

    assert_eq!(
        transcript.lines(),
        vec![concat!(
            r#"{"selectedMemories":[{"name":"match","category":"research","reason":"similarity: 1.00"}],"#,
            r#""missingMemories":[],"toolsNeeded":[],"#,
            r#""notes":"Selected by TF-IDF cosine similarity from 2 memory files (threshold 0.02, top 8)"}"#,
        )]
    );
}

#[tokio::test]
async fn test_missing_item_fields_use_defaults() {
    let request = json!({
        "task": "phase_b",
        "prompt": "climate",
        "inventory": [{"description": "climate"}],
    });

    let transcript = run(&dispatcher(None), &frame(&[request])).await;
    let response = &transcript.responses()[0];

    assert_eq!(
        response["selectedMemories"],
        json!([{"name": "", "category": "knowledge", "reason": "similarity: 1.00"}])
    );
}

#[tokio::test]
async fn test_blank_lines_get_no_response() {
    let transcript = run(&dispatcher(None), "\n\n  \t \n").await;
    assert!(transcript.raw.is_empty());
    assert_eq!(transcript.stats.skipped, 3);
    assert_eq!(transcript.stats.requests, 0);
}

#[tokio::test]
async fn test_error_line_layout() {
    let transcript = run(&dispatcher(None), "{\"task\": null}\n").await;
    assert_eq!(transcript.lines(), vec![r#"{"error":"unknown task: None"}"#]);
}

#[tokio::test]
async fn test_null_path_falls_back_to_description() {
    let transcript = run(
        &dispatcher(None),
        &frame(&[json!({
            "task": "phase_b",
            "prompt": "x y",
            "inventory": [{"name": "n", "description": "x y", "path": null}]
        })]),
    )
    .await;

    let responses = transcript.responses();
    assert_eq!(transcript.stats.errors, 0);
    assert!(responses[0].get("error").is_none());
    assert_eq!(responses[0]["selectedMemories"][0]["name"], json!("n"));
    assert_eq!(
        responses[0]["selectedMemories"][0]["reason"],
        json!("similarity: 1.00")
    );
}
