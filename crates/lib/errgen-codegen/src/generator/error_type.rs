//! Assembly of one error module.

use crate::generator::http::to_http_code_callback;
use crate::prelude::*;
use crate::translation::line::{INDENT, indent};
use errgen_definitions::template::{Segment, Template};
use std::collections::HashMap;
use tracing::error;

const DETAILS_VAR: &str = "DetailsJson";

/// The generated callbacks of one error module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledError {
    pub to_json: String,
    pub from_json: String,
    pub to_http_code: String,
    pub to_errno: String,
}

#[tracing::instrument(skip_all, fields(error = %od_error.name))]
pub fn assemble_error(od_error: &OdError) -> CodeGeneratorResult<AssembledError> {
    Ok(AssembledError {
        to_json: to_json_callback(od_error)?,
        from_json: from_json_callback(od_error)?,
        to_http_code: to_http_code_callback(od_error)?,
        to_errno: to_errno_callback(od_error),
    })
}

/// Renders the module of `od_error` from the error template.
pub fn render_error_module(od_error: &OdError, template: &Template) -> CodeGeneratorResult<String> {
    let assembled = assemble_error(od_error)?;

    let includes = od_error
        .includes
        .iter()
        .map(|hrl| format!("-include(\"{hrl}\")."))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(template.render(&[
        ("includes", includes.as_str()),
        ("error_type", od_error.type_name.as_str()),
        ("to_json", assembled.to_json.as_str()),
        ("from_json", assembled.from_json.as_str()),
        ("to_http_code", assembled.to_http_code.as_str()),
        ("to_errno", assembled.to_errno.as_str()),
    ])?)
}

/// Format variables and control sequences of the description placeholders.
#[derive(Debug, Default)]
struct DescriptionFormat<'a> {
    placeholders: Vec<&'a str>,
    fmt_vars: HashMap<&'a str, String>,
    control_sequences: HashMap<&'a str, String>,
}

impl<'a> DescriptionFormat<'a> {
    fn new(od_error: &'a OdError) -> Self {
        let placeholders: Vec<&str> = od_error.description.placeholders().collect();
        let mut format = Self {
            placeholders,
            ..Self::default()
        };

        for macro_ref in &od_error.macros {
            if format.is_printed(&macro_ref.alias) {
                format
                    .fmt_vars
                    .insert(&macro_ref.alias, macro_ref.reference.clone());
                format
                    .control_sequences
                    .insert(&macro_ref.alias, macro_ref.fmt_control_sequence.clone());
            }
        }

        format
    }

    fn is_printed(&self, name: &str) -> bool {
        self.placeholders.iter().any(|placeholder| *placeholder == name)
    }
}

fn to_json_callback(od_error: &OdError) -> CodeGeneratorResult<String> {
    if let Some(to_json) = &od_error.to_json {
        return Ok(to_json.trim().to_string());
    }

    let mut format = DescriptionFormat::new(od_error);
    let mut encoding_lines = Vec::new();
    let mut details_entries = Vec::new();

    for arg in &od_error.args {
        let encoding = arg.generate_to_json_encoding(format.is_printed(&arg.name), 1)?;

        encoding_lines.extend(encoding.lines);
        details_entries.push(format!(
            "{}<<\"{}\">> => {}",
            indent(3),
            arg.name,
            encoding.json_var
        ));

        if let Some(print_var) = encoding.print_var {
            format.fmt_vars.insert(&arg.name, print_var);
            format
                .control_sequences
                .insert(&arg.name, arg.fmt_control_sequence().to_string());
        }
    }

    let mut lines = vec![format!("to_json(?{}) ->", od_error.error_macro())];

    if !encoding_lines.is_empty() {
        lines.extend(encoding_lines);
        lines.push(String::new());
    }

    lines.push(format!("{INDENT}#{{"));
    lines.push(format!(
        "{}<<\"id\">> => ?{},",
        indent(2),
        od_error.id_macro()
    ));

    if !details_entries.is_empty() {
        lines.push(format!("{}<<\"details\">> => #{{", indent(2)));
        lines.push(details_entries.join(",\n"));
        lines.push(format!("{}}},", indent(2)));
    }

    lines.push(format!(
        "{}<<\"description\">> => {}",
        indent(2),
        description_expression(od_error, &format)?
    ));
    lines.push(format!("{INDENT}}}."));

    Ok(lines.join("\n"))
}

/// A binary literal for static descriptions, otherwise a call to
/// `od_error:format_description/2`.
fn description_expression(
    od_error: &OdError,
    format: &DescriptionFormat<'_>,
) -> CodeGeneratorResult<String> {
    if format.placeholders.is_empty() {
        let text: String = od_error
            .description
            .segments()
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => escape_text(text),
                Segment::Placeholder(_) => String::new(),
            })
            .collect();

        return Ok(format!("<<\"{text}\">>"));
    }

    let mut fmt_string = String::new();
    for segment in od_error.description.segments() {
        match segment {
            Segment::Text(text) => fmt_string.push_str(&escape_text(text).replace('~', "~~")),
            Segment::Placeholder(name) => {
                fmt_string.push_str(lookup(od_error, &format.control_sequences, name)?)
            }
        }
    }

    let fmt_vars = format
        .placeholders
        .iter()
        .map(|name| lookup(od_error, &format.fmt_vars, name))
        .collect::<CodeGeneratorResult<Vec<_>>>()?
        .join(", ");

    Ok(format!(
        "od_error:format_description(\n{indent_3}\"{fmt_string}\",\n{indent_3}[{fmt_vars}]\n{indent_2})",
        indent_2 = indent(2),
        indent_3 = indent(3),
    ))
}

fn lookup<'m>(
    od_error: &OdError,
    values: &'m HashMap<&str, String>,
    name: &str,
) -> CodeGeneratorResult<&'m str> {
    values.get(name).map(String::as_str).ok_or_else(|| {
        error!(placeholder = %name, "Description placeholder has no printable value");
        CodeGeneratorError::UnknownDescriptionPlaceholder {
            error: od_error.name.clone(),
            placeholder: name.to_string(),
        }
    })
}

/// Escapes text for an Erlang string literal.
fn escape_text(text: &str) -> String {
    text.replace('\n', "\\n").replace('"', "\\\"")
}

fn from_json_callback(od_error: &OdError) -> CodeGeneratorResult<String> {
    if let Some(from_json) = &od_error.from_json {
        return Ok(from_json.trim().to_string());
    }

    let id_match = format!("#{{<<\"id\">> := ?{}}}", od_error.id_macro());

    if od_error.args.is_empty() {
        return Ok(format!(
            "from_json({id_match}) ->\n{INDENT}?{}.",
            od_error.error_macro()
        ));
    }

    let details_default = if od_error.args.iter().all(|arg| arg.nullable) {
        ", #{}"
    } else {
        ""
    };

    let mut lines = vec![
        format!("from_json(OdErrorJson = {id_match}) ->"),
        format!(
            "{INDENT}{DETAILS_VAR} = maps:get(<<\"details\">>, OdErrorJson{details_default}),"
        ),
        String::new(),
    ];

    for arg in &od_error.args {
        lines.extend(arg.generate_from_json_decoding(DETAILS_VAR, 1)?);
    }

    lines.push(String::new());
    lines.push(format!("{INDENT}?{}.", od_error.error_macro()));

    Ok(lines.join("\n"))
}

fn to_errno_callback(od_error: &OdError) -> String {
    if let Some(to_errno) = &od_error.to_errno {
        return to_errno.trim().to_string();
    }

    let errno = match &od_error.errno {
        Some(errno) => format!("?{errno}"),
        None => "undefined".to_string(),
    };

    format!("to_errno(_) ->\n{INDENT}{errno}.")
}
