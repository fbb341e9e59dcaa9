pub mod errno;

use crate::prelude::*;
use serde::Deserialize;
use tracing::{debug, error};

pub const DEFAULT_MACRO_FMT_CONTROL_SEQUENCE: &str = "~ts";

/// HTTP status of an error.
///
/// A numeric code is later mapped onto a status macro, a string is raw
/// Erlang code pasted verbatim into the generated accessor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HttpCode {
    Code(u16),
    Raw(String),
}

/// A typed argument entry of a definition, resolved against the type
/// registry during code generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArgDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub nullable: bool,
}

/// An Erlang macro usable as a description placeholder under `alias`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MacroRef {
    pub alias: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default = "default_macro_fmt_control_sequence")]
    pub fmt_control_sequence: String,
}

fn default_macro_fmt_control_sequence() -> String {
    DEFAULT_MACRO_FMT_CONTROL_SEQUENCE.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErlHeaders {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub macros: Vec<MacroRef>,
}

/// Shape of a single YAML definition file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDefinition {
    pub id: String,
    pub description: String,
    pub http_code: HttpCode,
    #[serde(default)]
    pub errno: Option<String>,
    #[serde(default)]
    pub args: Vec<ArgDecl>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, rename = "x-erl-to_json")]
    pub to_json: Option<String>,
    #[serde(default, rename = "x-erl-from_json")]
    pub from_json: Option<String>,
    #[serde(default, rename = "x-erl-to_errno")]
    pub to_errno: Option<String>,
    #[serde(default, rename = "x-erl-headers")]
    pub headers: Option<ErlHeaders>,
}

/// A validated error definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDefinition {
    /// File stem of the definition, e.g. `bad_value_atom`.
    pub name: String,
    /// Erlang module and type name, e.g. `od_error_bad_value_atom`.
    pub type_name: String,
    pub id: String,
    pub description: Template,
    pub http_code: HttpCode,
    pub errno: Option<Errno>,
    pub args: Vec<ArgDecl>,
    pub includes: Vec<String>,
    pub macros: Vec<MacroRef>,
    pub to_json: Option<String>,
    pub from_json: Option<String>,
    pub to_errno: Option<String>,
}

impl ErrorDefinition {
    /// Parses a definition from YAML. Deprecated definitions yield `None`.
    pub fn from_yaml_str(name: &str, source: &str) -> DefinitionResult<Option<Self>> {
        let raw: RawDefinition =
            serde_yaml::from_str(source).map_err(|source| DefinitionError::Yaml {
                origin: name.to_string(),
                source,
            })?;

        Self::from_raw(name, raw)
    }

    pub fn from_raw(name: &str, raw: RawDefinition) -> DefinitionResult<Option<Self>> {
        if raw.deprecated {
            debug!(name = %name, "Skipping a deprecated definition");
            return Ok(None);
        }

        let errno = match raw.errno {
            Some(errno) => Some(Errno::try_from(errno).inspect_err(|error| {
                error!(name = %name, error = %error, "The definition carries an invalid errno");
            })?),
            None => None,
        };

        let description = Template::parse(&raw.description).inspect_err(|error| {
            error!(name = %name, error = %error, "The description template is malformed");
        })?;

        let headers = raw.headers.unwrap_or_default();

        Ok(Some(Self {
            name: name.to_string(),
            type_name: format!("od_error_{name}"),
            id: raw.id,
            description,
            http_code: raw.http_code,
            errno,
            args: raw.args,
            includes: headers.include,
            macros: headers.macros,
            to_json: raw.to_json,
            from_json: raw.from_json,
            to_errno: raw.to_errno,
        }))
    }
}

/// Definitions sharing a directory, named after its path relative to the
/// definitions root (`.` for the root itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorGroup {
    pub name: String,
    pub errors: Vec<ErrorDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_definition() {
        let source = r#"
id: badValueAtom
description: "Bad value: provided \"{key}\" must be an atom"
http_code: 400
errno: EINVAL
args:
  - name: key
    type: Binary
  - name: hint
    type: Atom
    nullable: true
x-erl-to_errno: "?EINVAL"
x-erl-headers:
  include:
    - modules/fslogic/fslogic_common.hrl
  macros:
    - alias: root_dir
      ref: "?ROOT_DIR"
"#;

        let definition = ErrorDefinition::from_yaml_str("bad_value_atom", source)
            .unwrap()
            .unwrap();

        assert_eq!(definition.type_name, "od_error_bad_value_atom");
        assert_eq!(definition.id, "badValueAtom");
        assert_eq!(definition.http_code, HttpCode::Code(400));
        assert_eq!(definition.errno.as_ref().map(Errno::as_str), Some("EINVAL"));
        assert_eq!(
            definition.description.placeholders().collect::<Vec<_>>(),
            vec!["key"]
        );
        assert_eq!(
            definition.args[1],
            ArgDecl {
                name: "hint".to_string(),
                type_name: "Atom".to_string(),
                nullable: true,
            }
        );
        assert_eq!(definition.to_errno.as_deref(), Some("?EINVAL"));
        assert_eq!(definition.includes.len(), 1);
        assert_eq!(definition.macros[0].fmt_control_sequence, "~ts");
    }

    #[test]
    fn test_raw_http_code() {
        let source = r#"
id: unauthorized
description: "You must authenticate yourself to perform this operation."
http_code: "?HTTP_401_UNAUTHORIZED"
"#;

        let definition = ErrorDefinition::from_yaml_str("unauthorized", source)
            .unwrap()
            .unwrap();

        assert_eq!(
            definition.http_code,
            HttpCode::Raw("?HTTP_401_UNAUTHORIZED".to_string())
        );
        assert!(definition.args.is_empty());
        assert!(definition.errno.is_none());
    }

    #[test]
    fn test_deprecated_definition_is_skipped() {
        let source = r#"
id: oldError
description: "Old."
http_code: 500
deprecated: true
"#;

        let definition = ErrorDefinition::from_yaml_str("old_error", source).unwrap();
        assert!(definition.is_none());
    }

    #[test]
    fn test_invalid_errno() {
        let source = r#"
id: weird
description: "Weird."
http_code: 500
errno: EWEIRD
"#;

        let result = ErrorDefinition::from_yaml_str("weird", source);
        assert!(matches!(result, Err(DefinitionError::InvalidErrno { .. })));
    }

    #[test]
    fn test_missing_required_field() {
        let result = ErrorDefinition::from_yaml_str("broken", "id: broken\n");
        assert!(matches!(result, Err(DefinitionError::Yaml { .. })));
    }
}
