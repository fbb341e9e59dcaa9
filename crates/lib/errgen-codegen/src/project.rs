use crate::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub const CONFIG_FILE_NAME: &str = "errgen.toml";

/// Where definitions and templates are read from and where output goes.
///
/// Every field is optional in `errgen.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Project {
    pub definitions_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            definitions_dir: PathBuf::from("definitions"),
            templates_dir: PathBuf::from("templates"),
            out_dir: PathBuf::from("generated/erlang"),
        }
    }
}

impl Project {
    pub fn from_toml_str(source: &str) -> CodeGeneratorResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> CodeGeneratorResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| {
            error!(path = %path.display(), error = %source, "Failed to read the project configuration");
            CodeGeneratorError::ReadFile {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Self::from_toml_str(&source).inspect_err(|error| {
            error!(path = %path.display(), error = %error, "Invalid project configuration");
        })
    }

    /// Loads `errgen.toml` from `dir`, or the defaults if there is none.
    pub fn discover(dir: &Path) -> CodeGeneratorResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);

        if path.is_file() {
            debug!(path = %path.display(), "Using the project configuration");
            Self::load(&path)
        } else {
            debug!("No project configuration found, using defaults");
            Ok(Self::default())
        }
    }
}
