use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use datagen_generate::{DEFAULT_OUT_DIR, GenerateOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings file read from the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "datagen.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub out_dir: PathBuf,
    pub num_documents: NonZeroUsize,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            num_documents: NonZeroUsize::MIN,
            seed: None,
            log_file: None,
        }
    }
}

/// Values given on the command line. Each one replaces the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub out_dir: Option<PathBuf>,
    pub num_documents: Option<NonZeroUsize>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn with_overrides(self, overrides: Overrides) -> Self {
        Self {
            out_dir: overrides.out_dir.unwrap_or(self.out_dir),
            num_documents: overrides.num_documents.unwrap_or(self.num_documents),
            seed: overrides.seed.or(self.seed),
            log_file: overrides.log_file.or(self.log_file),
        }
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            out_dir: self.out_dir.clone(),
            documents: self.num_documents,
            seed: self.seed,
        }
    }
}

/// Load settings from `explicit`, or from `datagen.toml` when it exists.
///
/// An explicit path must exist; a missing default file yields the defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    let path = match explicit {
        Some(path) if !path.exists() => return Err(SettingsError::NotFound(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !path.exists() {
                return Ok(Settings::default());
            }
            path
        }
    };
    read_settings(&path)
}

fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| SettingsError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
