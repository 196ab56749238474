use std::path::{Path, PathBuf};

use crate::assembler::DocumentSet;
use crate::errors::GenerationError;
use crate::output::atomic::write_bytes_atomic;

/// Path of the output file for `type_name`.
pub fn output_path(out_dir: &Path, type_name: &str) -> PathBuf {
    out_dir.join(format!("{type_name}.json"))
}

/// Write a document set as a pretty-printed JSON array.
///
/// Creates `out_dir` when missing and replaces an existing file atomically.
pub fn write_document_set(out_dir: &Path, set: &DocumentSet) -> Result<PathBuf, GenerationError> {
    let path = output_path(out_dir, &set.type_name);
    let data = serde_json::to_vec_pretty(&set.documents)?;
    write_bytes_atomic(&path, &data)?;
    Ok(path)
}
