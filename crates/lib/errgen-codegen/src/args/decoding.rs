use crate::prelude::*;
use crate::translation::line::indent;
use crate::translation::strategy::tail_lines;
use tracing::error;

/// Decoding of one argument from the details map.
///
/// Only one concern is involved, so nullability is a plain two-way split
/// rather than a dispatch over strategy combinations.
pub(super) fn decode(
    arg: &ErrorArg,
    details_var: &str,
    indent_level: usize,
) -> CodeGeneratorResult<Vec<String>> {
    let indent_0 = indent(indent_level);
    let indent_1 = indent(indent_level + 1);
    let indent_2 = indent(indent_level + 2);

    let erl_var = arg.erlang_variable_name();
    let maps_get = if arg.nullable {
        format!("maps:get(<<\"{}\">>, {details_var}, null)", arg.name)
    } else {
        format!("maps:get(<<\"{}\">>, {details_var})", arg.name)
    };

    let strategy = arg.kind.json_decoding();
    let mut lines = Vec::new();

    match (strategy, arg.nullable) {
        (Strategy::Direct, false) => {
            lines.push(format!("{indent_0}{erl_var} = {maps_get},"));
        }
        (Strategy::Direct, true) => {
            lines.push(format!(
                "{indent_0}{erl_var} = utils:null_to_undefined({maps_get}),"
            ));
        }
        (Strategy::Custom(_), false) => {
            let json_var = format!("{erl_var}Json");
            lines.push(format!("{indent_0}{json_var} = {maps_get},"));

            let ctx = TranslationContext::json_decoding(&json_var)
                .at_indent(indent_level)
                .assigning_to(&erl_var);
            lines.extend(strategy.prepare(&ctx)?.render(&ctx)?);
        }
        (Strategy::Custom(_), true) => {
            let json_var = format!("{erl_var}Json");
            lines.push(format!("{indent_0}{erl_var} = case {maps_get} of"));
            lines.push(format!("{indent_1}null ->"));
            lines.push(format!("{indent_2}undefined;"));
            lines.push(format!("{indent_1}{json_var} ->"));

            let ctx = TranslationContext::json_decoding(&json_var).at_indent(indent_level + 2);
            lines.extend(tail_lines(strategy, &ctx)?);

            lines.push(format!("{indent_0}end,"));
        }
        (Strategy::FromJson, _) => {
            error!(
                arg = %arg.name,
                kind = %arg.kind.type_name(),
                "JSON decoding cannot use the from-JSON strategy"
            );
            return Err(ConfigurationError::UnsupportedStrategy {
                strategy: StrategyKind::FromJson,
                concern: Concern::JsonDecoding,
            }
            .into());
        }
    }

    Ok(lines)
}
