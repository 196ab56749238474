mod logging;
mod settings;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use datagen_core::{Error as CoreError, load_schema};
use datagen_export::{Credentials, ExportError, MongoSink, export_all};
use datagen_generate::{GenerationEngine, GenerationError};
use logging::{LoggingError, init_logging};
use settings::{Overrides, Settings, SettingsError, load_settings};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] SettingsError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Schema(#[from] CoreError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Parser, Debug)]
#[command(
    name = "datagen",
    version,
    about = "Generate fake documents from a GraphQL schema"
)]
struct Cli {
    /// Settings file (defaults to ./datagen.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Append JSON log lines to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one JSON file of documents per object type.
    Generate(GenerateArgs),
    /// Load generated files into MongoDB, one collection per file.
    #[command(name = "export-mongodb")]
    ExportMongodb(ExportArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// GraphQL schema annotated with @generate(faker: "...").
    #[arg(short, long, value_name = "PATH")]
    schema_path: PathBuf,
    /// Documents generated per type.
    #[arg(short, long, value_name = "COUNT")]
    num_documents: Option<NonZeroUsize>,
    /// Output directory for the generated files.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Key file holding the connection `uri` and `database`.
    #[arg(short, long, value_name = "PATH")]
    keypath: PathBuf,
    /// Directory holding the generated files.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(cli.config.as_deref())?.with_overrides(Overrides {
        log_file: cli.log_file,
        ..Overrides::default()
    });
    init_logging(cli.verbose, settings.log_file.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(args, settings),
        Command::ExportMongodb(args) => run_export(args, settings).await,
    }
}

fn run_generate(args: GenerateArgs, settings: Settings) -> Result<(), CliError> {
    let settings = settings.with_overrides(Overrides {
        out_dir: args.out_dir,
        num_documents: args.num_documents,
        seed: args.seed,
        log_file: None,
    });

    let schema = load_schema(&args.schema_path)?;
    tracing::info!(
        event = "schema_loaded",
        path = %args.schema_path.display(),
        types = schema.types.len()
    );

    let result = GenerationEngine::new(settings.generate_options()).run(&schema)?;
    for report in &result.report.types {
        println!(
            "{}: {} documents -> {}",
            report.type_name,
            report.documents,
            report.path.display()
        );
    }
    println!("seed: {}", result.report.seed);

    Ok(())
}

async fn run_export(args: ExportArgs, settings: Settings) -> Result<(), CliError> {
    let out_dir = args.out_dir.unwrap_or(settings.out_dir);
    let credentials = Credentials::load(&args.keypath)?;

    let timer = Instant::now();
    let sink = MongoSink::connect(&credentials).await?;
    let report = export_all(&out_dir, &sink).await?;

    for collection in &report.collections {
        println!(
            "{}: {} documents <- {}",
            collection.collection,
            collection.documents,
            collection.file.display()
        );
    }
    tracing::info!(
        event = "run_finished",
        status = "success",
        documents = report.documents_total(),
        duration_ms = timer.elapsed().as_millis() as u64
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "datagen", "generate", "-s", "schema.graphql", "-n", "3", "--seed", "7",
        ])
        .expect("parse");
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.schema_path, PathBuf::from("schema.graphql"));
        assert_eq!(args.num_documents.map(NonZeroUsize::get), Some(3));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.out_dir, None);
    }

    #[test]
    fn num_documents_defaults_to_settings() {
        let cli = Cli::try_parse_from(["datagen", "generate", "--schema-path", "s.graphql"])
            .expect("parse");
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.num_documents, None);
    }

    #[test]
    fn rejects_zero_and_non_integer_counts() {
        for value in ["0", "three", "1.5"] {
            let err = Cli::try_parse_from(["datagen", "generate", "-s", "s.graphql", "-n", value])
                .expect_err("invalid count");
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "value {value}");
        }
    }

    #[test]
    fn generate_requires_a_schema_path() {
        let err = Cli::try_parse_from(["datagen", "generate"]).expect_err("missing schema");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_export_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "datagen",
            "export-mongodb",
            "-k",
            "key.json",
            "--config",
            "custom.toml",
            "-v",
        ])
        .expect("parse");
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        let Command::ExportMongodb(args) = cli.command else {
            panic!("expected export-mongodb");
        };
        assert_eq!(args.keypath, PathBuf::from("key.json"));
    }

    #[test]
    fn missing_schema_is_reported_with_its_path() {
        let path =
            std::env::temp_dir().join(format!("datagen_missing_{}.graphql", uuid::Uuid::new_v4()));
        let args = GenerateArgs {
            schema_path: path.clone(),
            num_documents: None,
            out_dir: None,
            seed: None,
        };
        let err = run_generate(args, Settings::default()).expect_err("missing schema");
        assert!(matches!(err, CliError::Schema(CoreError::SchemaNotFound(ref p)) if *p == path));
    }

    #[test]
    fn generates_files_into_configured_directory() {
        let dir = std::env::temp_dir().join(format!("datagen_cli_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let schema_path = dir.join("schema.graphql");
        std::fs::write(
            &schema_path,
            "type User {\n  name: String @generate(faker: \"faker.person.fullName()\")\n}\n",
        )
        .expect("write schema");

        let out_dir = dir.join("out");
        let args = GenerateArgs {
            schema_path,
            num_documents: NonZeroUsize::new(2),
            out_dir: Some(out_dir.clone()),
            seed: Some(3),
        };
        run_generate(args, Settings::default()).expect("generate");

        let content = std::fs::read_to_string(out_dir.join("User.json")).expect("read output");
        let documents: Vec<serde_json::Value> =
            serde_json::from_str(&content).expect("parse output");
        assert_eq!(documents.len(), 2);
    }
}
