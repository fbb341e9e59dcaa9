use crate::prelude::*;

/// Encoding of a non-nullable argument.
///
/// Custom JSON encoding binds `<Var>Json`, custom print encoding binds
/// `<Var>Print`. Direct and from-JSON strategies reuse existing variables.
pub(super) fn encode(
    arg: &ErrorArg,
    is_printed: bool,
    indent_level: usize,
) -> CodeGeneratorResult<ToJsonEncoding> {
    let erl_var = arg.erlang_variable_name();
    let mut lines = Vec::new();

    let json_ctx = TranslationContext::json_encoding(&erl_var)
        .at_indent(indent_level)
        .assigning_to(format!("{erl_var}Json"));
    let json_encoding = arg.kind.json_encoding().prepare(&json_ctx)?;
    lines.extend(json_encoding.render(&json_ctx)?);
    let json_var = json_encoding.target_var;

    let print_var = if is_printed {
        let print_ctx = TranslationContext::print_encoding(&erl_var, &json_var)
            .at_indent(indent_level)
            .assigning_to(format!("{erl_var}Print"));
        let print_encoding = arg.kind.print_encoding().prepare(&print_ctx)?;
        lines.extend(print_encoding.render(&print_ctx)?);
        Some(print_encoding.target_var)
    } else {
        None
    };

    Ok(ToJsonEncoding {
        lines,
        json_var,
        print_var,
    })
}
