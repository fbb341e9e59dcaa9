//! Erlang output generation.
//!
//! Produces the global header, the interface module, the `od_error`
//! behaviour and one module per error type.

mod error_type;
mod headers;
mod http;
mod interface;


pub use error_type::{AssembledError, assemble_error, render_error_module};
pub use headers::{errors_hrl_macros, horizontal_comment_line};
pub use http::{http_code_macro, to_http_code_callback};
pub use interface::{error_types, id_to_type_mapping};

use crate::prelude::*;
use crate::templates::Templates;
use std::path::PathBuf;
use tracing::{debug, info};

pub const ERRORS_HRL_FILE: &str = "errors.hrl";
pub const ERRORS_ERL_FILE: &str = "errors.erl";
pub const OD_ERROR_FILE: &str = "od_error.erl";
pub const TYPES_DIR: &str = "types";

/// Groups named after the definitions root itself.
const ROOT_GROUP: &str = ".";

/// Generates the Erlang sources of every resolved error group.
pub struct ErlangGenerator<'a> {
    groups: &'a [OdErrorGroup],
    templates: &'a Templates,
}

impl<'a> ErlangGenerator<'a> {
    pub fn new(groups: &'a [OdErrorGroup], templates: &'a Templates) -> Self {
        Self { groups, templates }
    }

    fn errors_hrl(&self) -> CodeGeneratorResult<GeneratorOutput> {
        let macros = errors_hrl_macros(self.groups);

        Ok(GeneratorOutput {
            path: PathBuf::from(ERRORS_HRL_FILE),
            content: self
                .templates
                .errors_hrl
                .render(&[("macros", macros.as_str())])?,
        })
    }

    fn errors_erl(&self) -> CodeGeneratorResult<GeneratorOutput> {
        let types = error_types(self.groups);
        let mapping = id_to_type_mapping(self.groups);

        Ok(GeneratorOutput {
            path: PathBuf::from(ERRORS_ERL_FILE),
            content: self.templates.errors_erl.render(&[
                ("types", types.as_str()),
                ("id_to_type_mapping", mapping.as_str()),
            ])?,
        })
    }

    fn od_error(&self) -> GeneratorOutput {
        GeneratorOutput {
            path: PathBuf::from(OD_ERROR_FILE),
            content: self.templates.od_error.clone(),
        }
    }

    fn error_modules(&self) -> CodeGeneratorResult<Vec<GeneratorOutput>> {
        let mut outputs = Vec::new();

        for group in self.groups {
            let group_dir = if group.name == ROOT_GROUP {
                PathBuf::from(TYPES_DIR)
            } else {
                PathBuf::from(TYPES_DIR).join(&group.name)
            };

            for od_error in &group.errors {
                let content = render_error_module(od_error, &self.templates.error)?;
                let path = group_dir.join(format!("{}.erl", od_error.type_name));

                debug!(path = %path.display(), "Error module generated");
                outputs.push(GeneratorOutput { path, content });
            }
        }

        Ok(outputs)
    }
}

impl CodeGenerator for ErlangGenerator<'_> {
    type Error = CodeGeneratorError;

    #[tracing::instrument(skip_all, fields(generator = self.name(), groups = self.groups.len()))]
    fn generate(&self) -> Result<Vec<GeneratorOutput>, Self::Error> {
        info!("Generating Erlang sources");

        let mut outputs = vec![self.errors_hrl()?, self.errors_erl()?, self.od_error()];
        outputs.extend(self.error_modules()?);

        info!(files = outputs.len(), "Erlang sources generated");
        Ok(outputs)
    }

    fn name(&self) -> &'static str {
        "erlang"
    }
}
