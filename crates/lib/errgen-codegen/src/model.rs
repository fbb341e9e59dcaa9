use crate::prelude::*;
use errgen_definitions::prelude::{Errno, ErrorDefinition, ErrorGroup, HttpCode, MacroRef};
use errgen_definitions::template::Template;
use tracing::error;

/// An error definition with its arguments resolved against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdError {
    pub name: String,
    pub type_name: String,
    pub id: String,
    pub description: Template,
    pub http_code: HttpCode,
    pub errno: Option<Errno>,
    pub args: Vec<ErrorArg>,
    pub includes: Vec<String>,
    pub macros: Vec<MacroRef>,
    pub to_json: Option<String>,
    pub from_json: Option<String>,
    pub to_errno: Option<String>,
}

impl OdError {
    /// Resolves `definition`, checking that every description placeholder
    /// names an argument or a macro alias.
    pub fn resolve(
        definition: &ErrorDefinition,
        registry: &TypeRegistry,
    ) -> CodeGeneratorResult<Self> {
        let args = definition
            .args
            .iter()
            .map(|decl| registry.create_error_arg(decl))
            .collect::<CodeGeneratorResult<Vec<_>>>()?;

        for placeholder in definition.description.placeholders() {
            let known = args.iter().any(|arg| arg.name == placeholder)
                || definition
                    .macros
                    .iter()
                    .any(|macro_ref| macro_ref.alias == placeholder);

            if !known {
                error!(
                    error = %definition.name,
                    placeholder = %placeholder,
                    "Description placeholder matches no argument or macro"
                );
                return Err(CodeGeneratorError::UnknownDescriptionPlaceholder {
                    error: definition.name.clone(),
                    placeholder: placeholder.to_string(),
                });
            }
        }

        Ok(Self {
            name: definition.name.clone(),
            type_name: definition.type_name.clone(),
            id: definition.id.clone(),
            description: definition.description.clone(),
            http_code: definition.http_code.clone(),
            errno: definition.errno.clone(),
            args,
            includes: definition.includes.clone(),
            macros: definition.macros.clone(),
            to_json: definition.to_json.clone(),
            from_json: definition.from_json.clone(),
            to_errno: definition.to_errno.clone(),
        })
    }

    fn macro_prefix(&self) -> String {
        format!("ERROR_{}", self.name.to_uppercase())
    }

    /// `ERROR_<NAME>_ID`
    pub fn id_macro(&self) -> String {
        format!("{}_ID", self.macro_prefix())
    }

    /// `ERROR_<NAME>_TYPE`
    pub fn type_macro(&self) -> String {
        format!("{}_TYPE", self.macro_prefix())
    }

    /// `ERROR_<NAME>` or `ERROR_<NAME>(Arg1, Arg2, ...)`.
    pub fn error_macro(&self) -> String {
        if self.args.is_empty() {
            return self.macro_prefix();
        }

        format!(
            "{}({})",
            self.macro_prefix(),
            self.erlang_variable_names().join(", ")
        )
    }

    pub fn erlang_variable_names(&self) -> Vec<String> {
        self.args.iter().map(ErrorArg::erlang_variable_name).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdErrorGroup {
    pub name: String,
    pub errors: Vec<OdError>,
}

impl OdErrorGroup {
    pub fn resolve(group: &ErrorGroup, registry: &TypeRegistry) -> CodeGeneratorResult<Self> {
        Ok(Self {
            name: group.name.clone(),
            errors: group
                .errors
                .iter()
                .map(|definition| OdError::resolve(definition, registry))
                .collect::<CodeGeneratorResult<Vec<_>>>()?,
        })
    }
}

pub fn resolve_groups(
    groups: &[ErrorGroup],
    registry: &TypeRegistry,
) -> CodeGeneratorResult<Vec<OdErrorGroup>> {
    groups
        .iter()
        .map(|group| OdErrorGroup::resolve(group, registry))
        .collect()
}
