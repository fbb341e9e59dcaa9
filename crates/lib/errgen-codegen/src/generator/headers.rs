use crate::prelude::*;

/// `%%` followed by 68 dashes.
pub fn horizontal_comment_line() -> String {
    format!("%%{}", "-".repeat(68))
}

/// The `{macros}` section of `errors.hrl`.
///
/// Each group opens with a banner. Every error contributes its id, type and
/// error macros followed by a blank line, and groups are separated by an
/// extra blank line.
pub fn errors_hrl_macros(groups: &[OdErrorGroup]) -> String {
    let mut lines = Vec::new();

    for group in groups {
        lines.push(horizontal_comment_line());
        lines.push(format!("%% {} errors", group.name));
        lines.push(horizontal_comment_line());

        for od_error in &group.errors {
            lines.push(id_macro_definition(od_error));
            lines.push(type_macro_definition(od_error));
            lines.push(error_macro_definition(od_error));
            lines.push(String::new());
        }

        lines.push(String::new());
    }

    // The last group needs no separator
    lines.pop();

    lines.join("\n")
}

fn id_macro_definition(od_error: &OdError) -> String {
    format!("-define({}, <<\"{}\">>).", od_error.id_macro(), od_error.id)
}

fn type_macro_definition(od_error: &OdError) -> String {
    format!("-define({}, {}).", od_error.type_macro(), od_error.type_name)
}

fn error_macro_definition(od_error: &OdError) -> String {
    let type_macro = format!("?{}", od_error.type_macro());

    let expansion = if od_error.args.is_empty() {
        format!("?ERROR({type_macro})")
    } else {
        format!(
            "?ERROR({type_macro}, {{{}}})",
            od_error.erlang_variable_names().join(", ")
        )
    };

    format!("-define({}, {expansion}).", od_error.error_macro())
}
