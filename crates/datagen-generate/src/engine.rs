use std::path::PathBuf;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use datagen_core::SchemaDocument;

use crate::assembler::{DocumentSet, assemble_schema};
use crate::errors::GenerationError;
use crate::evaluator::RhaiEvaluator;
use crate::model::{GenerateOptions, GenerationReport, TypeReport};
use crate::output::json::write_document_set;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub report: GenerationReport,
}

/// Entry point for generating document files from a parsed schema.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Assemble every object type, then write one file per type.
    ///
    /// Nothing is written unless every type assembles: a failing directive
    /// or expression leaves the output directory untouched.
    pub fn run(&self, schema: &SchemaDocument) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());
        let mut report = GenerationReport::new(seed);

        info!(
            types = schema.types.len(),
            documents = self.options.documents.get(),
            seed,
            out_dir = %self.options.out_dir.display(),
            "generation started"
        );

        let sets = self.assemble(schema, seed)?;

        for decl in &schema.types {
            if decl.fields.is_empty() {
                report.skipped_types.push(decl.name.clone());
            }
        }

        for set in sets {
            let path = write_document_set(&self.options.out_dir, &set)?;
            info!(
                type_name = %set.type_name,
                documents = set.documents.len(),
                path = %path.display(),
                "documents written"
            );
            report.types.push(type_report(set, path));
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            types = report.types.len(),
            skipped_types = report.skipped_types.len(),
            documents = report.documents_total(),
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            out_dir: self.options.out_dir.clone(),
            report,
        })
    }

    /// Assemble all document sets in memory without writing anything.
    ///
    /// Each type gets its own evaluator seeded from `seed` and the type name,
    /// so a type's documents do not depend on the other types in the schema.
    pub fn assemble(
        &self,
        schema: &SchemaDocument,
        seed: u64,
    ) -> Result<Vec<DocumentSet>, GenerationError> {
        assemble_schema(schema, self.options.documents, |decl| {
            debug!(type_name = %decl.name, fields = decl.fields.len(), "assembling type");
            RhaiEvaluator::seeded(hash_seed(seed, &decl.name))
        })
    }
}

fn type_report(set: DocumentSet, path: PathBuf) -> TypeReport {
    TypeReport {
        type_name: set.type_name,
        documents: set.documents.len(),
        fields_generated: set.generated_fields,
        fields_skipped: set.skipped_fields,
        path,
    }
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_seeds_differ_by_name() {
        assert_ne!(hash_seed(1, "Person"), hash_seed(1, "Post"));
        assert_eq!(hash_seed(1, "Person"), hash_seed(1, "Person"));
        assert_ne!(hash_seed(1, "Person"), hash_seed(2, "Person"));
    }
}
