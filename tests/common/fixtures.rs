//! On-disk fixtures: classifier artifacts and inventory files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use candle_core::{Device, Tensor};
use tempfile::TempDir;

use triage::labels::OutputLabel;

/// Vocabulary of the fixture classifier, in column order.
pub const VOCABULARY: [&str; 6] = ["open", "chrome", "open chrome", "draw", "cat", "slides"];

/// Writes a classifier artifact where `command` fires on "open"/"chrome",
/// `picture` on "draw"/"cat", `presentation` on "slides".
pub fn write_classifier_artifact(dir: &Path) {
    let labels: Vec<&str> = OutputLabel::ALL.iter().map(|l| l.as_str()).collect();
    std::fs::write(
        dir.join("config.json"),
        serde_json::json!({ "labels": labels }).to_string(),
    )
    .unwrap();

    let vocabulary: HashMap<&str, usize> = VOCABULARY
        .iter()
        .enumerate()
        .map(|(i, term)| (*term, i))
        .collect();
    std::fs::write(
        dir.join("vectorizer.json"),
        serde_json::json!({
            "vocabulary": vocabulary,
            "idf": vec![1.0f32; VOCABULARY.len()],
            "ngram_range": [1, 2],
            "sublinear_tf": true,
            "lowercase": true,
        })
        .to_string(),
    )
    .unwrap();

    let rows = OutputLabel::ALL.len();
    let cols = VOCABULARY.len();
    let mut weight = vec![0.0f32; rows * cols];
    let mut bias = vec![-3.0f32; rows];
    for (label, columns) in [
        (OutputLabel::Command, &[0usize, 1, 2][..]),
        (OutputLabel::Picture, &[3, 4][..]),
        (OutputLabel::Presentation, &[5][..]),
    ] {
        let row = label.index();
        for &column in columns {
            weight[row * cols + column] = 4.0;
        }
        bias[row] = -2.0;
    }

    let mut tensors = HashMap::new();
    tensors.insert(
        "classifier.weight".to_string(),
        Tensor::from_vec(weight, (rows, cols), &Device::Cpu).unwrap(),
    );
    tensors.insert(
        "classifier.bias".to_string(),
        Tensor::from_vec(bias, rows, &Device::Cpu).unwrap(),
    );
    candle_core::safetensors::save(&tensors, dir.join("model.safetensors")).unwrap();
}

/// Temporary artifact directory, removed on drop.
pub fn classifier_artifact() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_classifier_artifact(dir.path());
    dir
}

/// Writes each `(file_name, body)` into `dir` and returns the paths in order.
pub fn write_documents(dir: &Path, documents: &[(&str, &str)]) -> Vec<PathBuf> {
    documents
        .iter()
        .map(|(name, body)| {
            let path = dir.join(name);
            std::fs::write(&path, body).unwrap();
            path
        })
        .collect()
}

/// Builds one inventory entry as JSON.
pub fn inventory_item(name: &str, description: &str, path: &Path) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "category": "knowledge",
        "description": description,
        "path": path.to_string_lossy(),
    })
}
