use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::errors::ExportError;
use crate::files::{read_documents, scan_output_dir};
use crate::sink::DocumentSink;

/// Documents loaded from one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    pub file: PathBuf,
    pub collection: String,
    pub documents: usize,
}

/// Summary of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub collections: Vec<CollectionReport>,
}

impl ExportReport {
    pub fn documents_total(&self) -> usize {
        self.collections.iter().map(|report| report.documents).sum()
    }
}

/// Insert every document of every generated file in `dir` into `sink`.
///
/// Files are processed in name order and documents in file order. The first
/// failure stops the export; documents inserted before it stay in place.
pub async fn export_all(dir: &Path, sink: &dyn DocumentSink) -> Result<ExportReport, ExportError> {
    let files = scan_output_dir(dir)?;
    let mut report = ExportReport::default();

    for file in files {
        let documents = read_documents(&file.path)?;
        info!(
            file = %file.path.display(),
            collection = %file.collection,
            documents = documents.len(),
            "adding documents to collection"
        );

        for document in &documents {
            sink.insert(&file.collection, document).await?;
        }

        report.collections.push(CollectionReport {
            file: file.path,
            collection: file.collection,
            documents: documents.len(),
        });
    }

    info!(
        collections = report.collections.len(),
        documents = report.documents_total(),
        "export completed"
    );
    Ok(report)
}
