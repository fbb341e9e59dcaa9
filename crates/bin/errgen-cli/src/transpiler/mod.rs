use crate::cli::{Cli, check_path};
use crate::error::CliError;
use errgen_codegen::generator::ErlangGenerator;
use errgen_codegen::model::resolve_groups;
use errgen_codegen::prelude::{CodeGenerator, GeneratorOutput, TypeRegistry};
use errgen_codegen::project::Project;
use errgen_codegen::templates::Templates;
use errgen_definitions::loader::load_error_groups;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub struct Transpiler {
    project: Project,
}

impl Transpiler {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    /// Loads the project configuration, then applies the command line
    /// overrides on top of it.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut project = match &cli.config {
            Some(path) => Project::load(path)?,
            None => Project::discover(&std::env::current_dir()?)?,
        };

        if let Some(definitions) = &cli.definitions {
            project.definitions_dir = definitions.clone();
        }
        if let Some(templates) = &cli.templates {
            project.templates_dir = templates.clone();
        }
        if let Some(output) = &cli.output {
            project.out_dir = output.clone();
        }

        Ok(Self::new(project))
    }

    /// Runs the whole pipeline and returns the number of written files.
    ///
    /// Every file is generated in memory first. The output directory is only
    /// touched once generation succeeded.
    #[tracing::instrument(skip_all, fields(
        definitions = %self.project.definitions_dir.display(),
        out_dir = %self.project.out_dir.display()
    ))]
    pub fn transpile(&self) -> Result<usize, CliError> {
        let Project {
            definitions_dir,
            templates_dir,
            out_dir,
        } = &self.project;

        check_path(definitions_dir)?;
        check_path(templates_dir)?;
        Self::check_output_directory(out_dir, &[definitions_dir, templates_dir])?;

        let registry = TypeRegistry::with_builtin_kinds()?;
        let groups = load_error_groups(definitions_dir)?;
        let groups = resolve_groups(&groups, &registry)?;
        let templates = Templates::load(templates_dir)?;

        let outputs = ErlangGenerator::new(&groups, &templates).generate()?;

        Self::prepare_output_directory(out_dir)?;
        Self::write_outputs(out_dir, &outputs)?;

        info!(files = outputs.len(), "Erlang sources written");
        Ok(outputs.len())
    }

    /// Refuses an output directory that would wipe one of the inputs.
    fn check_output_directory(output_path: &Path, inputs: &[&PathBuf]) -> Result<(), CliError> {
        if check_path(output_path).is_err() {
            return Ok(());
        }

        let output_path = canonicalize(output_path)?;
        for input in inputs {
            if canonicalize(input)?.starts_with(&output_path) {
                error!(
                    output = %output_path.display(),
                    input = %input.display(),
                    "The output directory contains an input directory"
                );
                return Err(CliError::InvalidPath(
                    output_path.to_string_lossy().to_string(),
                ));
            }
        }

        Ok(())
    }

    fn prepare_output_directory(output_path: &Path) -> Result<(), CliError> {
        let is_valid_dir = check_path(output_path).is_ok();

        if is_valid_dir {
            debug!(path = %output_path.display(), "Cleaning the output directory");
            std::fs::remove_dir_all(output_path)?;
        }

        std::fs::create_dir_all(output_path)?;

        Ok(())
    }

    fn write_outputs(output_path: &Path, outputs: &[GeneratorOutput]) -> Result<(), CliError> {
        for output in outputs {
            let path = output_path.join(&output.path);

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(&path, &output.content)?;
            debug!(path = %path.display(), "File written");
        }

        Ok(())
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf, CliError> {
    path.canonicalize()
        .map_err(|error| CliError::InvalidPath(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const BAD_VALUE_ATOM: &str = r#"
id: badValueAtom
description: "Bad value: provided \"{key}\" must be an atom"
http_code: 400
args:
  - name: key
    type: Binary
"#;

    const UNAUTHORIZED: &str = r#"
id: unauthorized
description: "You must authenticate yourself to perform this operation."
http_code: 401
"#;

    fn bundled_templates() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../templates")
    }

    fn workspace(definitions: &[(&str, &str)]) -> (TempDir, Project) {
        let temp_dir = tempfile::Builder::new()
            .prefix("errgen-transpiler")
            .tempdir()
            .unwrap();

        let definitions_dir = temp_dir.path().join("definitions");
        for (path, content) in definitions {
            let path = definitions_dir.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        let project = Project {
            definitions_dir,
            templates_dir: bundled_templates(),
            out_dir: temp_dir.path().join("generated"),
        };

        (temp_dir, project)
    }

    #[test]
    fn test_transpile() {
        let (_temp_dir, project) = workspace(&[
            ("general/unauthorized.yaml", UNAUTHORIZED),
            ("posix/bad_value_atom.yaml", BAD_VALUE_ATOM),
        ]);
        let out_dir = project.out_dir.clone();

        let files = Transpiler::new(project).transpile().unwrap();

        assert_eq!(files, 5);
        assert!(out_dir.join("errors.hrl").is_file());
        assert!(out_dir.join("errors.erl").is_file());
        assert!(out_dir.join("od_error.erl").is_file());

        let module =
            fs::read_to_string(out_dir.join("types/posix/od_error_bad_value_atom.erl")).unwrap();
        assert!(module.contains("-module(od_error_bad_value_atom)."));
        assert!(module.contains("to_json(?ERROR_BAD_VALUE_ATOM(Key)) ->"));
        assert!(out_dir
            .join("types/general/od_error_unauthorized.erl")
            .is_file());
    }

    #[test]
    fn test_output_directory_is_cleaned() {
        let (_temp_dir, project) = workspace(&[("general/unauthorized.yaml", UNAUTHORIZED)]);
        let stale_file = project.out_dir.join("types/stale.erl");
        fs::create_dir_all(stale_file.parent().unwrap()).unwrap();
        fs::write(&stale_file, "-module(stale).").unwrap();

        Transpiler::new(project).transpile().unwrap();

        assert!(!stale_file.exists());
    }

    #[test]
    fn test_failure_leaves_output_untouched() {
        let (_temp_dir, project) = workspace(&[(
            "general/odd.yaml",
            "id: odd\ndescription: \"Odd.\"\nhttp_code: 999\n",
        )]);
        let existing_file = project.out_dir.join("errors.hrl");
        fs::create_dir_all(&project.out_dir).unwrap();
        fs::write(&existing_file, "previous").unwrap();

        let result = Transpiler::new(project).transpile();

        assert!(matches!(result, Err(CliError::Codegen(_))));
        assert_eq!(fs::read_to_string(existing_file).unwrap(), "previous");
    }

    #[test]
    fn test_invalid_definition() {
        let (_temp_dir, project) = workspace(&[(
            "general/bad_errno.yaml",
            "id: badErrno\ndescription: \"Bad.\"\nhttp_code: 400\nerrno: ENOTREAL\n",
        )]);

        let result = Transpiler::new(project).transpile();

        assert!(matches!(result, Err(CliError::Definition(_))));
    }

    #[test]
    fn test_missing_definitions_directory() {
        let (_temp_dir, mut project) = workspace(&[]);
        project.definitions_dir = project.definitions_dir.join("missing");

        let result = Transpiler::new(project).transpile();

        assert!(matches!(result, Err(CliError::InexistentPath(_))));
    }

    #[test]
    fn test_output_directory_containing_inputs_is_rejected() {
        let (temp_dir, mut project) = workspace(&[("general/unauthorized.yaml", UNAUTHORIZED)]);
        project.out_dir = temp_dir.path().to_path_buf();

        let result = Transpiler::new(project).transpile();

        assert!(matches!(result, Err(CliError::InvalidPath(_))));
        assert!(temp_dir.path().join("definitions").is_dir());
    }

    #[test]
    fn test_cli_overrides_configuration() {
        let temp_dir = tempfile::Builder::new()
            .prefix("errgen-config")
            .tempdir()
            .unwrap();
        let config_path = temp_dir.path().join("errgen.toml");
        fs::write(
            &config_path,
            "definitions_dir = \"defs\"\nout_dir = \"build\"\n",
        )
        .unwrap();
        let cli = Cli {
            definitions: None,
            templates: None,
            output: Some(PathBuf::from("elsewhere")),
            config: Some(config_path),
        };

        let transpiler = Transpiler::from_cli(&cli).unwrap();

        assert_eq!(transpiler.project.definitions_dir, PathBuf::from("defs"));
        assert_eq!(transpiler.project.templates_dir, PathBuf::from("templates"));
        assert_eq!(transpiler.project.out_dir, PathBuf::from("elsewhere"));
    }
}
