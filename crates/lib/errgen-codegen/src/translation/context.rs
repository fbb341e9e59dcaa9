use crate::prelude::*;
use errgen_definitions::template::Template;

/// Variables an expression may reference, per concern.
///
/// JSON encoding sees `{erl_var}`, JSON decoding sees `{json_var}` and print
/// encoding sees both. `{var}` is accepted as a shorthand for the input of
/// the two JSON concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextVars {
    JsonEncoding { erl_var: String },
    JsonDecoding { json_var: String },
    PrintEncoding { erl_var: String, json_var: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationContext {
    pub vars: ContextVars,
    pub assign_to: Option<String>,
    pub indent_level: usize,
}

impl TranslationContext {
    pub const DEFAULT_INDENT_LEVEL: usize = 1;

    fn with_vars(vars: ContextVars) -> Self {
        Self {
            vars,
            assign_to: None,
            indent_level: Self::DEFAULT_INDENT_LEVEL,
        }
    }

    pub fn json_encoding(erl_var: impl Into<String>) -> Self {
        Self::with_vars(ContextVars::JsonEncoding {
            erl_var: erl_var.into(),
        })
    }

    pub fn json_decoding(json_var: impl Into<String>) -> Self {
        Self::with_vars(ContextVars::JsonDecoding {
            json_var: json_var.into(),
        })
    }

    pub fn print_encoding(erl_var: impl Into<String>, json_var: impl Into<String>) -> Self {
        Self::with_vars(ContextVars::PrintEncoding {
            erl_var: erl_var.into(),
            json_var: json_var.into(),
        })
    }

    pub fn at_indent(mut self, indent_level: usize) -> Self {
        self.indent_level = indent_level;
        self
    }

    pub fn assigning_to(mut self, target: impl Into<String>) -> Self {
        self.assign_to = Some(target.into());
        self
    }

    pub fn with_indent(&self, diff: usize) -> Self {
        Self {
            indent_level: self.indent_level + diff,
            ..self.clone()
        }
    }

    pub fn without_assignment(&self) -> Self {
        Self {
            assign_to: None,
            ..self.clone()
        }
    }

    pub fn concern(&self) -> Concern {
        match self.vars {
            ContextVars::JsonEncoding { .. } => Concern::JsonEncoding,
            ContextVars::JsonDecoding { .. } => Concern::JsonDecoding,
            ContextVars::PrintEncoding { .. } => Concern::PrintEncoding,
        }
    }

    pub fn template_vars(&self) -> Vec<(&'static str, &str)> {
        match &self.vars {
            ContextVars::JsonEncoding { erl_var } => {
                vec![("erl_var", erl_var.as_str()), ("var", erl_var.as_str())]
            }
            ContextVars::JsonDecoding { json_var } => {
                vec![("json_var", json_var.as_str()), ("var", json_var.as_str())]
            }
            ContextVars::PrintEncoding { erl_var, json_var } => {
                vec![("erl_var", erl_var.as_str()), ("json_var", json_var.as_str())]
            }
        }
    }

    pub fn format_template(&self, template: &Template) -> CodeGeneratorResult<String> {
        Ok(template.render(&self.template_vars())?)
    }
}

/// Placeholder names an expression of `concern` may use.
pub fn available_placeholders(concern: Concern) -> &'static [&'static str] {
    match concern {
        Concern::JsonEncoding => &["erl_var", "var"],
        Concern::JsonDecoding => &["json_var", "var"],
        Concern::PrintEncoding => &["erl_var", "json_var"],
    }
}
