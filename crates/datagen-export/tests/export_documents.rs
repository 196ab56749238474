use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use datagen_export::{DocumentSink, ExportError, export_all};
use serde_json::{Map, Value, json};

/// Records inserts in memory; optionally fails on a given collection.
#[derive(Default)]
struct MemorySink {
    inserted: Mutex<Vec<(String, Map<String, Value>)>>,
    fail_on: Option<String>,
}

#[async_trait]
impl DocumentSink for MemorySink {
    async fn insert(
        &self,
        collection: &str,
        document: &Map<String, Value>,
    ) -> Result<(), ExportError> {
        if self.fail_on.as_deref() == Some(collection) {
            return Err(ExportError::Io(std::io::Error::other("sink unavailable")));
        }
        self.inserted
            .lock()
            .expect("lock inserted")
            .push((collection.to_string(), document.clone()));
        Ok(())
    }
}

fn output_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("datagen_export_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

fn write_json(dir: &PathBuf, name: &str, value: Value) {
    fs::write(dir.join(name), serde_json::to_vec_pretty(&value).expect("encode")).expect("write");
}

#[tokio::test]
async fn inserts_each_document_into_its_collection() {
    let dir = output_dir("inserts");
    write_json(&dir, "User.json", json!([{ "name": "Ada" }, { "name": "Grace" }]));
    write_json(&dir, "Category.json", json!([{ "title": "Books" }]));

    let sink = MemorySink::default();
    let report = export_all(&dir, &sink).await.expect("export");

    assert_eq!(report.documents_total(), 3);
    let collections: Vec<(&str, usize)> = report
        .collections
        .iter()
        .map(|c| (c.collection.as_str(), c.documents))
        .collect();
    assert_eq!(collections, vec![("categories", 1), ("users", 2)]);

    let inserted = sink.inserted.lock().expect("lock inserted");
    let order: Vec<(&str, &Value)> = inserted
        .iter()
        .map(|(collection, document)| {
            let value = document.values().next().expect("one field");
            (collection.as_str(), value)
        })
        .collect();
    assert_eq!(
        order,
        vec![
            ("categories", &json!("Books")),
            ("users", &json!("Ada")),
            ("users", &json!("Grace")),
        ]
    );
}

#[tokio::test]
async fn empty_directory_exports_nothing() {
    let dir = output_dir("empty");
    let sink = MemorySink::default();
    let report = export_all(&dir, &sink).await.expect("export");
    assert!(report.collections.is_empty());
    assert!(sink.inserted.lock().expect("lock inserted").is_empty());
}

#[tokio::test]
async fn missing_directory_is_an_error() {
    let dir = std::env::temp_dir().join(format!("datagen_export_missing_{}", uuid::Uuid::new_v4()));
    let sink = MemorySink::default();
    let err = export_all(&dir, &sink).await.expect_err("missing dir");
    assert!(matches!(err, ExportError::OutputDirMissing(_)));
}

#[tokio::test]
async fn sink_failures_stop_the_export() {
    let dir = output_dir("failure");
    write_json(&dir, "Author.json", json!([{ "name": "Ada" }]));
    write_json(&dir, "Book.json", json!([{ "title": "Notes" }]));
    write_json(&dir, "Review.json", json!([{ "stars": 5 }]));

    let sink = MemorySink {
        fail_on: Some("books".to_string()),
        ..MemorySink::default()
    };
    let err = export_all(&dir, &sink).await.expect_err("sink fails");
    assert!(matches!(err, ExportError::Io(_)));

    let inserted = sink.inserted.lock().expect("lock inserted");
    let collections: Vec<&str> = inserted.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(collections, vec!["authors"]);
}
