//! Encoding of nullable arguments.
//!
//! An absent value is `undefined` in Erlang and `null` on the wire. Custom
//! expressions must only run on present values, so any custom concern is
//! wrapped in a `case` on the argument. How much temporary plumbing the
//! `case` needs depends on which concerns are custom, hence one procedure per
//! (JSON strategy, print strategy) pair.

use crate::prelude::*;
use crate::translation::line::indent;
use crate::translation::strategy::tail_lines;
use tracing::error;

type NullableProcedure = fn(&ErrorArg, usize) -> CodeGeneratorResult<ToJsonEncoding>;

/// `print` is `None` when the argument does not appear in the description.
fn dispatch(json: StrategyKind, print: Option<StrategyKind>) -> Option<NullableProcedure> {
    use StrategyKind::*;

    let procedure: NullableProcedure = match (json, print) {
        (Direct, None) => direct_json,
        (Direct, Some(Direct | FromJson)) => direct_json_print_from_json,
        (Direct, Some(Custom)) => direct_json_custom_print,
        (Custom, None) => custom_json,
        (Custom, Some(FromJson)) => custom_json_print_from_json,
        (Custom, Some(Direct)) => custom_json_direct_print,
        (Custom, Some(Custom)) => custom_json_custom_print,
        (FromJson, _) => return None,
    };

    Some(procedure)
}

pub(super) fn encode(
    arg: &ErrorArg,
    is_printed: bool,
    indent_level: usize,
) -> CodeGeneratorResult<ToJsonEncoding> {
    let json = arg.kind.json_encoding().kind();
    let print = is_printed.then(|| arg.kind.print_encoding().kind());

    let procedure = dispatch(json, print).ok_or_else(|| {
        error!(
            arg = %arg.name,
            kind = %arg.kind.type_name(),
            ?json,
            ?print,
            "No nullable encoding for this strategy combination"
        );
        ConfigurationError::UnmappedNullableDispatch { json, print }
    })?;

    procedure(arg, indent_level)
}

fn direct_json(arg: &ErrorArg, indent_level: usize) -> CodeGeneratorResult<ToJsonEncoding> {
    let erl_var = arg.erlang_variable_name();
    let json_var = format!("{erl_var}Json");

    Ok(ToJsonEncoding {
        lines: vec![format!(
            "{}{json_var} = utils:undefined_to_null({erl_var}),",
            indent(indent_level)
        )],
        json_var,
        print_var: None,
    })
}

fn direct_json_print_from_json(
    arg: &ErrorArg,
    indent_level: usize,
) -> CodeGeneratorResult<ToJsonEncoding> {
    let encoding = direct_json(arg, indent_level)?;

    Ok(ToJsonEncoding {
        print_var: Some(encoding.json_var.clone()),
        ..encoding
    })
}

fn direct_json_custom_print(
    arg: &ErrorArg,
    indent_level: usize,
) -> CodeGeneratorResult<ToJsonEncoding> {
    let erl_var = arg.erlang_variable_name();
    let json_var = format!("{erl_var}Json");
    let print_var = format!("{erl_var}Print");
    let print_tmp_var = format!("{erl_var}PrintTmp");

    // The JSON value of a direct argument is the argument itself
    let print_ctx = TranslationContext::print_encoding(&erl_var, &erl_var)
        .at_indent(indent_level + 2)
        .assigning_to(&print_tmp_var);
    let present_lines = arg
        .kind
        .print_encoding()
        .prepare(&print_ctx)?
        .render(&print_ctx)?;

    let lines = NullableCase {
        erl_var: &erl_var,
        json_var: &json_var,
        print_var: Some(print_var.as_str()),
        indent_level,
        present_lines,
        present_result: Some((erl_var.as_str(), print_tmp_var.as_str())),
    }
    .render();

    Ok(ToJsonEncoding {
        lines,
        json_var,
        print_var: Some(print_var),
    })
}

fn custom_json(arg: &ErrorArg, indent_level: usize) -> CodeGeneratorResult<ToJsonEncoding> {
    let erl_var = arg.erlang_variable_name();
    let json_var = format!("{erl_var}Json");

    let json_ctx = TranslationContext::json_encoding(&erl_var).at_indent(indent_level + 2);
    let present_lines = tail_lines(arg.kind.json_encoding(), &json_ctx)?;

    let lines = NullableCase {
        erl_var: &erl_var,
        json_var: &json_var,
        print_var: None,
        indent_level,
        present_lines,
        present_result: None,
    }
    .render();

    Ok(ToJsonEncoding {
        lines,
        json_var,
        print_var: None,
    })
}

fn custom_json_print_from_json(
    arg: &ErrorArg,
    indent_level: usize,
) -> CodeGeneratorResult<ToJsonEncoding> {
    let encoding = custom_json(arg, indent_level)?;

    Ok(ToJsonEncoding {
        print_var: Some(encoding.json_var.clone()),
        ..encoding
    })
}

fn custom_json_direct_print(
    arg: &ErrorArg,
    indent_level: usize,
) -> CodeGeneratorResult<ToJsonEncoding> {
    let erl_var = arg.erlang_variable_name();
    let json_var = format!("{erl_var}Json");
    let json_tmp_var = format!("{erl_var}JsonTmp");
    let print_var = format!("{erl_var}Print");

    let json_ctx = TranslationContext::json_encoding(&erl_var)
        .at_indent(indent_level + 2)
        .assigning_to(&json_tmp_var);
    let present_lines = arg
        .kind
        .json_encoding()
        .prepare(&json_ctx)?
        .render(&json_ctx)?;

    let lines = NullableCase {
        erl_var: &erl_var,
        json_var: &json_var,
        print_var: Some(print_var.as_str()),
        indent_level,
        present_lines,
        present_result: Some((json_tmp_var.as_str(), erl_var.as_str())),
    }
    .render();

    Ok(ToJsonEncoding {
        lines,
        json_var,
        print_var: Some(print_var),
    })
}

fn custom_json_custom_print(
    arg: &ErrorArg,
    indent_level: usize,
) -> CodeGeneratorResult<ToJsonEncoding> {
    let erl_var = arg.erlang_variable_name();
    let json_var = format!("{erl_var}Json");
    let json_tmp_var = format!("{erl_var}JsonTmp");
    let print_var = format!("{erl_var}Print");
    let print_tmp_var = format!("{erl_var}PrintTmp");

    let json_ctx = TranslationContext::json_encoding(&erl_var)
        .at_indent(indent_level + 2)
        .assigning_to(&json_tmp_var);
    let mut present_lines = arg
        .kind
        .json_encoding()
        .prepare(&json_ctx)?
        .render(&json_ctx)?;

    // Printing sees the JSON value computed just above
    let print_ctx = TranslationContext::print_encoding(&erl_var, &json_tmp_var)
        .at_indent(indent_level + 2)
        .assigning_to(&print_tmp_var);
    present_lines.extend(
        arg.kind
            .print_encoding()
            .prepare(&print_ctx)?
            .render(&print_ctx)?,
    );

    let lines = NullableCase {
        erl_var: &erl_var,
        json_var: &json_var,
        print_var: Some(print_var.as_str()),
        indent_level,
        present_lines,
        present_result: Some((json_tmp_var.as_str(), print_tmp_var.as_str())),
    }
    .render();

    Ok(ToJsonEncoding {
        lines,
        json_var,
        print_var: Some(print_var),
    })
}

/// `Json = case Var of undefined -> null; Var -> ... end,` or, with a print
/// variable, the same binding a `{Json, Print}` tuple.
struct NullableCase<'a> {
    erl_var: &'a str,
    json_var: &'a str,
    print_var: Option<&'a str>,
    indent_level: usize,
    present_lines: Vec<String>,
    /// Tuple closing the present branch, as (JSON, print) variables.
    present_result: Option<(&'a str, &'a str)>,
}

impl NullableCase<'_> {
    fn render(self) -> Vec<String> {
        let indent_0 = indent(self.indent_level);
        let indent_1 = indent(self.indent_level + 1);
        let indent_2 = indent(self.indent_level + 2);

        let (bound, absent) = match self.print_var {
            Some(print_var) => (format!("{{{}, {print_var}}}", self.json_var), "{null, null}"),
            None => (self.json_var.to_string(), "null"),
        };

        let mut lines = vec![
            format!("{indent_0}{bound} = case {} of", self.erl_var),
            format!("{indent_1}undefined ->"),
            format!("{indent_2}{absent};"),
            format!("{indent_1}{} ->", self.erl_var),
        ];
        lines.extend(self.present_lines);

        if let Some((json_result, print_result)) = self.present_result {
            lines.push(format!("{indent_2}{{{json_result}, {print_result}}}"));
        }

        lines.push(format!("{indent_0}end,"));
        lines
    }
}
