use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUT_DIR: &str = "datagen";

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory that receives one `<TypeName>.json` file per type.
    pub out_dir: PathBuf,
    /// Documents generated per type.
    pub documents: NonZeroUsize,
    /// Seed for the faker RNG. Drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            documents: NonZeroUsize::MIN,
            seed: None,
        }
    }
}

/// Summary of one generated type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeReport {
    pub type_name: String,
    pub documents: usize,
    pub fields_generated: Vec<String>,
    pub fields_skipped: Vec<String>,
    pub path: PathBuf,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub types: Vec<TypeReport>,
    /// Types left out because they declare no fields.
    pub skipped_types: Vec<String>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            types: Vec::new(),
            skipped_types: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn documents_total(&self) -> usize {
        self.types.iter().map(|report| report.documents).sum()
    }
}
