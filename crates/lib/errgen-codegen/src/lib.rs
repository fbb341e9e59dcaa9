use std::path::PathBuf;

pub mod args;
pub mod error;
pub mod generator;
pub mod model;
pub mod prelude;
pub mod project;
pub mod templates;
pub mod translation;

/// A generated file, with `path` relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOutput {
    pub path: PathBuf,
    pub content: String,
}

/// Trait defining the interface for code generators
///
/// Generators build every file in memory. Writing them to disk is left to
/// the caller, so a failing generator never leaves half an output tree
/// behind.
///
/// # Examples
///
/// ```rust,no_run
/// use errgen_codegen::CodeGenerator;
/// use errgen_codegen::GeneratorOutput;
/// use std::fmt;
/// use std::path::PathBuf;
///
/// #[derive(Debug)]
/// struct ReadmeError(String);
///
/// impl fmt::Display for ReadmeError {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}", self.0)
///     }
/// }
///
/// impl std::error::Error for ReadmeError {}
///
/// struct ReadmeGenerator;
///
/// impl CodeGenerator for ReadmeGenerator {
///     type Error = ReadmeError;
///
///     fn generate(&self) -> Result<Vec<GeneratorOutput>, Self::Error> {
///         Ok(vec![GeneratorOutput {
///             path: PathBuf::from("README.md"),
///             content: "Generated errors".to_string(),
///         }])
///     }
///
///     fn name(&self) -> &'static str {
///         "readme"
///     }
/// }
/// ```
pub trait CodeGenerator {
    /// The error type returned by this generator
    type Error: std::error::Error;

    /// Generate every output file
    ///
    /// # Returns
    ///
    /// A list of generated files or an error if code generation fails.
    fn generate(&self) -> Result<Vec<GeneratorOutput>, Self::Error>;

    /// Get the name of this generator
    fn name(&self) -> &'static str;
}
