use std::path::{Path, PathBuf};

use inflector::string::pluralize::to_plural;
use serde_json::{Map, Value};

use crate::errors::ExportError;

/// A generated document file and the collection it loads into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub path: PathBuf,
    pub type_name: String,
    pub collection: String,
}

/// Collection name for a generated type: lowercased, then pluralized.
///
/// The pluralization rules expect lowercase words, so case is folded first.
pub fn collection_name(type_name: &str) -> String {
    to_plural(&type_name.to_lowercase())
}

/// List the `*.json` files of `dir`, sorted by file name.
pub fn scan_output_dir(dir: &Path) -> Result<Vec<ExportFile>, ExportError> {
    if !dir.is_dir() {
        return Err(ExportError::OutputDirMissing(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(type_name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let type_name = type_name.to_string();
        files.push(ExportFile {
            collection: collection_name(&type_name),
            type_name,
            path,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Read a generated file as a list of plain JSON objects.
pub fn read_documents(path: &Path) -> Result<Vec<Map<String, Value>>, ExportError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|err| ExportError::InvalidDocumentFile {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
