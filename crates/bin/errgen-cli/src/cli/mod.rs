use crate::error::CliError;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a directory containing YAML error definitions
    #[arg(short, long)]
    pub definitions: Option<PathBuf>,

    /// Path to a directory containing the Erlang templates
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Path to a directory where Erlang files will be generated.
    ///
    /// This will overwrite any file inside the folder, please be sure when running.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a project configuration file.
    ///
    /// Defaults to `errgen.toml` in the working directory when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Checks if a path exists and is a directory.
///
/// This is needed to validate the input folders are at the very least
/// valid paths to operate on.
pub fn check_path(path: &Path) -> Result<(), CliError> {
    if !path.exists() {
        return Err(CliError::InexistentPath(
            path.to_string_lossy().to_string(),
        ));
    }

    if !path.is_dir() {
        return Err(CliError::NotDirectory(path.to_string_lossy().to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_path() {
        let temp_dir = tempfile::Builder::new()
            .prefix("errgen-cli")
            .tempdir()
            .unwrap();
        let file_path = temp_dir.path().join("errgen.toml");
        std::fs::write(&file_path, "").unwrap();

        assert!(check_path(temp_dir.path()).is_ok());
        assert!(matches!(
            check_path(&file_path),
            Err(CliError::NotDirectory(_))
        ));
        assert!(matches!(
            check_path(&temp_dir.path().join("missing")),
            Err(CliError::InexistentPath(_))
        ));
    }

    #[test]
    fn test_arguments() {
        let cli = Cli::parse_from(["errgen", "-d", "defs", "--output", "out"]);

        assert_eq!(cli.definitions, Some(PathBuf::from("defs")));
        assert_eq!(cli.templates, None);
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.config, None);
    }
}
