//! Argument kinds available to every definition.

use crate::prelude::*;
use errgen_definitions::prelude::TemplateResult;

const DNS_DEFAULTS: &str = "<<\"system defaults\">>";

fn custom(template: &str) -> TemplateResult<Strategy> {
    Ok(Strategy::Custom(Expression::templated(template)?))
}

/// Prints the JSON list as comma separated values.
fn csv_of_json() -> TemplateResult<Strategy> {
    custom("od_error:format_csv({json_var})")
}

pub fn builtin_kinds() -> TemplateResult<Vec<ErrorArgKind>> {
    Ok(vec![
        // Plain values
        ErrorArgKind::new("Binary").with_fmt_control_sequence("~ts"),
        ErrorArgKind::new("Integer").with_fmt_control_sequence("~B"),
        ErrorArgKind::new("ErlangTerm").with_fmt_control_sequence("~tp"),
        ErrorArgKind::new("Atom")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom("atom_to_binary({erl_var}, utf8)")?)
            .with_json_decoding(custom("binary_to_existing_atom({json_var}, utf8)")?),
        ErrorArgKind::new("Json")
            .with_fmt_control_sequence("~ts")
            .with_print_encoding(custom("json_utils:encode({erl_var})")?),
        ErrorArgKind::new("Path")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom("str_utils:to_binary(filename:flatten({erl_var}))")?)
            .with_print_encoding(Strategy::FromJson),
        ErrorArgKind::new("ByteSize")
            .with_fmt_control_sequence("~ts")
            .with_print_encoding(custom("str_utils:format_byte_size({erl_var})")?),
        ErrorArgKind::new("Binaries")
            .with_fmt_control_sequence("~ts")
            .with_print_encoding(custom("od_error:format_csv({erl_var})")?),
        // AAI
        ErrorArgKind::new("AaiService")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom("aai:service_to_json({erl_var})")?)
            .with_print_encoding(custom("aai:service_to_printable({erl_var})")?)
            .with_json_decoding(custom("aai:service_from_json({json_var})")?),
        ErrorArgKind::new("AaiSubject")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(Strategy::Custom(Expression::fun_call(
                "aai",
                "subject_to_json",
                &["{erl_var}"],
            )?))
            .with_print_encoding(Strategy::Custom(Expression::fun_call(
                "aai",
                "subject_to_printable",
                &["{erl_var}"],
            )?))
            .with_json_decoding(Strategy::Custom(Expression::fun_call(
                "aai",
                "subject_from_json",
                &["{json_var}"],
            )?)),
        // Automation
        ErrorArgKind::new("AtmDataType")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom("atm_data_type:type_to_json({erl_var})")?)
            .with_json_decoding(custom("atm_data_type:type_from_json({json_var})")?),
        ErrorArgKind::new("AtmDataTypes")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(Strategy::Custom(Expression::function_ref_list(
                "atm_data_type",
                "type_to_json",
                "{erl_var}",
            )?))
            .with_print_encoding(csv_of_json()?)
            .with_json_decoding(Strategy::Custom(Expression::function_ref_list(
                "atm_data_type",
                "type_from_json",
                "{json_var}",
            )?)),
        ErrorArgKind::new("AtmStoreSchemaIds")
            .with_fmt_control_sequence("~ts")
            .with_print_encoding(csv_of_json()?),
        ErrorArgKind::new("AtmStoreTypes")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(Strategy::Custom(Expression::function_ref_list(
                "automation",
                "store_type_to_json",
                "{erl_var}",
            )?))
            .with_print_encoding(csv_of_json()?)
            .with_json_decoding(Strategy::Custom(Expression::function_ref_list(
                "automation",
                "store_type_from_json",
                "{json_var}",
            )?)),
        ErrorArgKind::new("AtmTaskArgumentValueBuilderType")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom(
                "atm_task_argument_value_builder:type_to_json({erl_var})",
            )?)
            .with_print_encoding(Strategy::FromJson)
            .with_json_decoding(custom(
                "atm_task_argument_value_builder:type_from_json({json_var})",
            )?),
        ErrorArgKind::new("AtmTaskArgumentValueBuilderTypes")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(Strategy::Custom(Expression::function_ref_list(
                "atm_task_argument_value_builder",
                "type_to_json",
                "{erl_var}",
            )?))
            .with_print_encoding(csv_of_json()?)
            .with_json_decoding(Strategy::Custom(Expression::function_ref_list(
                "atm_task_argument_value_builder",
                "type_from_json",
                "{json_var}",
            )?)),
        ErrorArgKind::new("AtmWorkflowSchemaIds")
            .with_fmt_control_sequence("~ts")
            .with_print_encoding(csv_of_json()?),
        // Tokens and caveats
        ErrorArgKind::new("CaveatUnverified")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom("caveats:to_json({erl_var})")?)
            .with_print_encoding(custom("caveats:unverified_description({erl_var})")?)
            .with_json_decoding(custom("caveats:from_json({json_var})")?),
        ErrorArgKind::new("InviteTokenType")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom("token_type:invite_type_to_str({erl_var})")?)
            .with_json_decoding(custom("token_type:invite_type_from_str({json_var})")?),
        ErrorArgKind::new("InviteTokenTypeWithAny")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(Strategy::Custom(Expression::case(
                "{erl_var}",
                vec![
                    ("any", Expression::templated("<<\"any\">>")?),
                    (
                        "_",
                        Expression::templated("token_type:invite_type_to_str({erl_var})")?,
                    ),
                ],
            )?))
            .with_json_decoding(Strategy::Custom(Expression::case(
                "{json_var}",
                vec![
                    ("<<\"any\">>", Expression::templated("any")?),
                    (
                        "_",
                        Expression::templated("token_type:invite_type_from_str({json_var})")?,
                    ),
                ],
            )?)),
        ErrorArgKind::new("TokenType")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom("token_type:to_str({erl_var})")?)
            .with_print_encoding(custom("token_type:to_printable({erl_var})")?)
            .with_json_decoding(custom("token_type:from_str({json_var})")?),
        // Networking
        ErrorArgKind::new("DnsServers")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(Strategy::Custom(Expression::mapped_list(
                vec![
                    ("default", Expression::templated(DNS_DEFAULTS)?),
                    (
                        "Ip",
                        Expression::templated("element(2, {{ok, _}} = ip_utils:to_binary(Ip))")?,
                    ),
                ],
                "{erl_var}",
            )?))
            .with_print_encoding(csv_of_json()?)
            .with_json_decoding(Strategy::Custom(Expression::mapped_list(
                vec![
                    (DNS_DEFAULTS, Expression::templated("default")?),
                    (
                        "Ip",
                        Expression::templated(
                            "element(2, {{ok, _}} = ip_utils:to_ip4_address(Ip))",
                        )?,
                    ),
                ],
                "{json_var}",
            )?)),
        // Graph resources
        ErrorArgKind::new("GriEntityType")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom("gri:serialize_type({erl_var})")?)
            .with_print_encoding(Strategy::FromJson)
            .with_json_decoding(custom("gri:deserialize_type({json_var})")?),
        ErrorArgKind::new("GriEntityTypeAsAtom")
            .with_fmt_control_sequence("~ts")
            .with_print_encoding(custom("gri:serialize_type({erl_var})")?),
        // Errors nested in errors
        ErrorArgKind::new("OnedataError")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom("errors:to_json({erl_var})")?)
            .with_print_encoding(custom("maps:get(<<\"description\">>, {json_var})")?)
            .with_json_decoding(custom("errors:from_json({json_var})")?),
        // Support stages
        ErrorArgKind::new("ProviderSupportStage")
            .with_json_encoding(Strategy::Custom(Expression::fun_call(
                "support_stage",
                "serialize",
                &["provider", "{erl_var}"],
            )?))
            .with_json_decoding(Strategy::Custom(Expression::fun_call(
                "support_stage",
                "deserialize",
                &["provider", "{json_var}"],
            )?)),
        ErrorArgKind::new("StorageSupportStage")
            .with_json_encoding(Strategy::Custom(Expression::fun_call(
                "support_stage",
                "serialize",
                &["storage", "{erl_var}"],
            )?))
            .with_json_decoding(Strategy::Custom(Expression::fun_call(
                "support_stage",
                "deserialize",
                &["storage", "{json_var}"],
            )?)),
        // Time series
        ErrorArgKind::new("MetricConfig")
            .with_fmt_control_sequence("~ts")
            .with_json_encoding(custom("jsonable_record:to_json({erl_var}, metric_config)")?)
            .with_print_encoding(custom("metric_config:to_binary({erl_var})")?)
            .with_json_decoding(custom(
                "jsonable_record:from_json({json_var}, metric_config)",
            )?),
        ErrorArgKind::new("TscLayout")
            .with_fmt_control_sequence("~ts")
            .with_print_encoding(Strategy::Custom(Expression::lines(vec![
                CodeLine::new(
                    "od_error:format_csv(maps:fold(fun(TimeSeriesName, MetricNames, Acc) ->",
                )?,
                CodeLine::new(
                    "Acc ++ [str_utils:format_bin(\"~ts -> [~ts]\", \
                     [TimeSeriesName, od_error:format_csv(MetricNames)])]",
                )?
                .with_extra_indent(1),
                CodeLine::new("end, [], {erl_var}))")?.with_ending(LineEnding::Comma),
            ]))),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_kinds_are_valid() {
        for kind in builtin_kinds().unwrap() {
            assert!(kind.validate().is_ok(), "{} is invalid", kind.type_name());
        }
    }

    #[test]
    fn test_builtin_kind_names_are_unique() {
        let kinds = builtin_kinds().unwrap();
        let names: HashSet<_> = kinds.iter().map(|kind| kind.type_name()).collect();

        assert_eq!(names.len(), kinds.len());
        assert_eq!(kinds.len(), 29);
    }

    #[test]
    fn test_plain_kinds_are_direct() {
        let kinds = builtin_kinds().unwrap();
        let binary = kinds
            .iter()
            .find(|kind| kind.type_name() == "Binary")
            .unwrap();

        assert_eq!(binary.fmt_control_sequence(), "~ts");
        assert_eq!(binary.json_encoding(), &Strategy::Direct);
        assert_eq!(binary.json_decoding(), &Strategy::Direct);
        assert_eq!(binary.print_encoding(), &Strategy::Direct);
    }
}
