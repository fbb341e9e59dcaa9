use crate::template::Rule;
use pest::error::Error as PestError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Pest parsing error: {0}")]
    Parse(#[from] Box<PestError<Rule>>),

    #[error("Unexpected rule: expected {expected}, found {found}")]
    UnexpectedRule { expected: String, found: String },

    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Template `{template}` uses unknown placeholder `{placeholder}` (available: {available:?})")]
    UnknownPlaceholder {
        placeholder: String,
        template: String,
        available: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Failed to read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse the YAML definition `{origin}`: {source}")]
    Yaml {
        origin: String,
        source: serde_yaml::Error,
    },

    #[error("Failed to walk the definitions directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid errno `{errno}`, expected a POSIX errno name")]
    InvalidErrno { errno: String },

    #[error("Invalid description template: {0}")]
    Template(#[from] TemplateError),
}
