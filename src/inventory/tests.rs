use super::*;
use std::io::Write;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};

fn item(path: &str) -> InventoryItem {
    InventoryItem::new("notes", "knowledge", "fallback description", path)
}

#[test]
fn test_item_defaults() {
    let parsed: InventoryItem = serde_json::from_str("{}").unwrap();
    assert_eq!(parsed.name, "");
    assert_eq!(parsed.category, "knowledge");
    assert_eq!(parsed.description, "");
    assert_eq!(parsed.path, "");
}

#[test]
fn test_item_null_path_is_empty() {
    let parsed: InventoryItem =
        serde_json::from_str(r#"{"name":"n","description":"x y","path":null}"#).unwrap();
    assert_eq!(parsed.path, "");
    assert_eq!(parsed.description, "x y");
}

#[test]
fn test_item_keeps_explicit_fields() {
    let parsed: InventoryItem = serde_json::from_str(
        r#"{"name":"a.md","category":"skill","description":"d","path":"/x","extra":1}"#,
    )
    .unwrap();
    assert_eq!(parsed, InventoryItem::new("a.md", "skill", "d", "/x"));
}

#[tokio::test]
async fn test_reads_file_content() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "climate change policy").unwrap();

    let loader = DocumentLoader::default();
    let doc = loader
        .materialize_one(&item(file.path().to_str().unwrap()))
        .await;

    assert_eq!(doc.content, "climate change policy");
    assert_eq!(doc.description, "fallback description");
    assert_eq!(doc.name, "notes");
}

#[tokio::test]
async fn test_missing_file_uses_description() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.md");

    let doc = DocumentLoader::default()
        .materialize_one(&item(missing.to_str().unwrap()))
        .await;

    assert_eq!(doc.content, "fallback description");
}

#[tokio::test]
async fn test_directory_path_uses_description() {
    let dir = TempDir::new().unwrap();

    let doc = DocumentLoader::default()
        .materialize_one(&item(dir.path().to_str().unwrap()))
        .await;

    assert_eq!(doc.content, "fallback description");
}

#[tokio::test]
async fn test_empty_path_uses_description() {
    let doc = DocumentLoader::default().materialize_one(&item("")).await;
    assert_eq!(doc.content, "fallback description");
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&[b'o', b'k', 0xFF, b'!']).unwrap();

    let doc = DocumentLoader::default()
        .materialize_one(&item(file.path().to_str().unwrap()))
        .await;

    assert_eq!(doc.content, "ok\u{FFFD}!");
}

#[tokio::test]
async fn test_materialize_preserves_order() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.md");
    std::fs::write(&first, "first body").unwrap();

    let items = vec![
        InventoryItem::new("one", "knowledge", "desc one", first.to_str().unwrap()),
        InventoryItem::new("two", "skill", "desc two", "/definitely/not/here"),
    ];

    let loader = DocumentLoader::new(Duration::from_millis(500));
    let docs = loader.materialize(&items).await;

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].content, "first body");
    assert_eq!(docs[1].content, "desc two");
    assert_eq!(docs[1].category, "skill");
}
