use crate::prelude::*;
use errgen_definitions::template::Template;
use std::path::Path;
use tracing::{debug, error};

pub const ERRORS_HRL_TEMPLATE: &str = "errors.hrl.template";
pub const ERRORS_ERL_TEMPLATE: &str = "errors.erl.template";
pub const OD_ERROR_TEMPLATE: &str = "od_error.erl.template";
pub const ERROR_TEMPLATE: &str = "error.erl.template";

/// Templates the Erlang outputs are rendered from.
///
/// `od_error` is copied verbatim and therefore kept as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub errors_hrl: Template,
    pub errors_erl: Template,
    pub od_error: String,
    pub error: Template,
}

impl Templates {
    #[tracing::instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load(dir: &Path) -> CodeGeneratorResult<Self> {
        let templates = Self::from_sources(
            &read_template(dir, ERRORS_HRL_TEMPLATE)?,
            &read_template(dir, ERRORS_ERL_TEMPLATE)?,
            &read_template(dir, OD_ERROR_TEMPLATE)?,
            &read_template(dir, ERROR_TEMPLATE)?,
        )?;

        debug!("Templates loaded");
        Ok(templates)
    }

    pub fn from_sources(
        errors_hrl: &str,
        errors_erl: &str,
        od_error: &str,
        error: &str,
    ) -> CodeGeneratorResult<Self> {
        Ok(Self {
            errors_hrl: Template::parse(errors_hrl)?,
            errors_erl: Template::parse(errors_erl)?,
            od_error: od_error.to_string(),
            error: Template::parse(error)?,
        })
    }
}

fn read_template(dir: &Path, name: &str) -> CodeGeneratorResult<String> {
    let path = dir.join(name);

    std::fs::read_to_string(&path).map_err(|source| {
        error!(path = %path.display(), error = %source, "Failed to read a template");
        CodeGeneratorError::ReadFile { path, source }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_templates() {
        let temp_dir = tempfile::Builder::new()
            .prefix("errgen-templates")
            .tempdir()
            .unwrap();
        fs::write(temp_dir.path().join(ERRORS_HRL_TEMPLATE), "{macros}").unwrap();
        fs::write(temp_dir.path().join(ERRORS_ERL_TEMPLATE), "{types}").unwrap();
        fs::write(temp_dir.path().join(OD_ERROR_TEMPLATE), "-module(od_error).").unwrap();
        fs::write(temp_dir.path().join(ERROR_TEMPLATE), "-module({error_type}).").unwrap();

        let templates = Templates::load(temp_dir.path()).unwrap();

        assert_eq!(templates.od_error, "-module(od_error).");
        assert_eq!(
            templates.error.placeholders().collect::<Vec<_>>(),
            vec!["error_type"]
        );
    }

    #[test]
    fn test_missing_template() {
        let temp_dir = tempfile::Builder::new()
            .prefix("errgen-templates")
            .tempdir()
            .unwrap();

        let result = Templates::load(temp_dir.path());

        assert!(matches!(result, Err(CodeGeneratorError::ReadFile { .. })));
    }

    #[test]
    fn test_bundled_templates() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../templates");

        let templates = Templates::load(&dir).unwrap();

        assert_eq!(
            templates.errors_hrl.placeholders().collect::<Vec<_>>(),
            vec!["macros"]
        );
        assert_eq!(
            templates.errors_erl.placeholders().collect::<Vec<_>>(),
            vec!["types", "id_to_type_mapping"]
        );
        assert_eq!(
            templates.error.placeholders().collect::<Vec<_>>(),
            vec!["error_type", "includes", "to_json", "from_json", "to_http_code", "to_errno"]
        );
    }
}
