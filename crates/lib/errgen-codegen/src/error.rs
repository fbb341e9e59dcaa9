use crate::translation::strategy::{Concern, StrategyKind};
use errgen_definitions::error::{DefinitionError, TemplateError};
use std::path::PathBuf;
use thiserror::Error;

/// An argument kind whose strategies cannot be turned into code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("The custom {concern} strategy requires an assignment target")]
    MissingAssignTarget { concern: Concern },

    #[error("The {strategy:?} strategy cannot be used for {concern}")]
    UnsupportedStrategy {
        strategy: StrategyKind,
        concern: Concern,
    },

    #[error("No nullable encoding for json strategy {json:?} with print strategy {print:?}")]
    UnmappedNullableDispatch {
        json: StrategyKind,
        print: Option<StrategyKind>,
    },
}

/// Error type for code generators
#[derive(Error, Debug)]
pub enum CodeGeneratorError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Argument type `{name}` is not registered")]
    UnknownType { name: String },

    #[error("Argument type `{name}` is already registered")]
    DuplicateRegistration { name: String },

    #[error("HTTP code {code} has no status macro")]
    UnmappedHttpCode { code: u16 },

    #[error("Description of `{error}` references unknown placeholder `{placeholder}`")]
    UnknownDescriptionPlaceholder { error: String, placeholder: String },

    #[error("Definition error: {0}")]
    Definition(#[from] DefinitionError),

    #[error("Invalid project configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to read `{}`: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
