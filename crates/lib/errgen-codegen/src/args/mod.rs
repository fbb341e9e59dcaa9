//! Typed error arguments.
//!
//! An [`ErrorArgKind`] describes how values of one argument type are encoded
//! to JSON, decoded back and printed inside descriptions. An [`ErrorArg`] is
//! a named, possibly nullable use of a kind inside a definition.

pub mod kinds;
pub mod registry;

mod decoding;
mod encoding;
mod nullable;

use crate::prelude::*;
use crate::translation::context::available_placeholders;
use errgen_definitions::error::TemplateError;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorArgKind {
    type_name: String,
    fmt_control_sequence: String,
    json_encoding: Strategy,
    json_decoding: Strategy,
    print_encoding: Strategy,
}

impl ErrorArgKind {
    pub const DEFAULT_FMT_CONTROL_SEQUENCE: &'static str = "~w";

    /// A kind translating every concern directly.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fmt_control_sequence: Self::DEFAULT_FMT_CONTROL_SEQUENCE.to_string(),
            json_encoding: Strategy::Direct,
            json_decoding: Strategy::Direct,
            print_encoding: Strategy::Direct,
        }
    }

    pub fn with_fmt_control_sequence(mut self, fmt_control_sequence: impl Into<String>) -> Self {
        self.fmt_control_sequence = fmt_control_sequence.into();
        self
    }

    pub fn with_json_encoding(mut self, strategy: Strategy) -> Self {
        self.json_encoding = strategy;
        self
    }

    pub fn with_json_decoding(mut self, strategy: Strategy) -> Self {
        self.json_decoding = strategy;
        self
    }

    pub fn with_print_encoding(mut self, strategy: Strategy) -> Self {
        self.print_encoding = strategy;
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fmt_control_sequence(&self) -> &str {
        &self.fmt_control_sequence
    }

    pub fn json_encoding(&self) -> &Strategy {
        &self.json_encoding
    }

    pub fn json_decoding(&self) -> &Strategy {
        &self.json_decoding
    }

    pub fn print_encoding(&self) -> &Strategy {
        &self.print_encoding
    }

    pub fn strategy(&self, concern: Concern) -> &Strategy {
        match concern {
            Concern::JsonEncoding => &self.json_encoding,
            Concern::JsonDecoding => &self.json_decoding,
            Concern::PrintEncoding => &self.print_encoding,
        }
    }

    /// Checks that every strategy fits its concern and that custom
    /// expressions only reference variables the concern provides.
    pub fn validate(&self) -> CodeGeneratorResult<()> {
        for concern in [
            Concern::JsonEncoding,
            Concern::JsonDecoding,
            Concern::PrintEncoding,
        ] {
            let strategy = self.strategy(concern);

            if strategy.kind() == StrategyKind::FromJson && concern != Concern::PrintEncoding {
                return Err(ConfigurationError::UnsupportedStrategy {
                    strategy: StrategyKind::FromJson,
                    concern,
                }
                .into());
            }

            let Some(expression) = strategy.expression() else {
                continue;
            };

            let available = available_placeholders(concern);
            if let Some(unknown) = expression
                .placeholders()
                .into_iter()
                .find(|placeholder| !available.contains(placeholder))
            {
                return Err(TemplateError::UnknownPlaceholder {
                    placeholder: unknown.to_string(),
                    template: format!("{} {concern} expression", self.type_name),
                    available: available.iter().map(|name| name.to_string()).collect(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Result of encoding one argument for `to_json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToJsonEncoding {
    /// Statements to emit before the JSON map, already indented.
    pub lines: Vec<String>,
    /// Variable holding the JSON value.
    pub json_var: String,
    /// Variable holding the printable value, if the argument is printed.
    pub print_var: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorArg {
    pub name: String,
    pub nullable: bool,
    pub kind: Arc<ErrorArgKind>,
}

impl ErrorArg {
    pub fn new(name: impl Into<String>, nullable: bool, kind: Arc<ErrorArgKind>) -> Self {
        Self {
            name: name.into(),
            nullable,
            kind,
        }
    }

    /// The argument name with its first letter uppercased.
    pub fn erlang_variable_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn fmt_control_sequence(&self) -> &str {
        self.kind.fmt_control_sequence()
    }

    /// Statements encoding this argument to JSON and, when `is_printed`, to
    /// its printable form.
    pub fn generate_to_json_encoding(
        &self,
        is_printed: bool,
        indent_level: usize,
    ) -> CodeGeneratorResult<ToJsonEncoding> {
        if self.nullable {
            nullable::encode(self, is_printed, indent_level)
        } else {
            encoding::encode(self, is_printed, indent_level)
        }
    }

    /// Statements binding this argument's variable from `details_var`.
    pub fn generate_from_json_decoding(
        &self,
        details_var: &str,
        indent_level: usize,
    ) -> CodeGeneratorResult<Vec<String>> {
        decoding::decode(self, details_var, indent_level)
    }
}
