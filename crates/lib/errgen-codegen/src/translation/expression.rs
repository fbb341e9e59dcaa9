use crate::prelude::*;
use crate::translation::line::terminate;
use errgen_definitions::prelude::TemplateResult;
use errgen_definitions::template::Template;

/// A line of raw code inside an [`Expression::Lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    pub template: Template,
    pub extra_indent: usize,
    pub ending: LineEnding,
}

impl CodeLine {
    pub fn new(template: &str) -> TemplateResult<Self> {
        Ok(Self {
            template: Template::parse(template)?,
            extra_indent: 0,
            ending: LineEnding::None,
        })
    }

    pub fn with_extra_indent(mut self, extra_indent: usize) -> Self {
        self.extra_indent = extra_indent;
        self
    }

    pub fn with_ending(mut self, ending: LineEnding) -> Self {
        self.ending = ending;
        self
    }
}

/// An Erlang expression producing a single value.
///
/// Built expressions end with a `,` so they can be used as statements.
/// Callers placing one in tail position strip that terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Generates no code.
    Noop,
    /// A single templated line.
    Templated(Template),
    /// `module:function(Args...)`.
    FunCall {
        module: String,
        function: String,
        args: Vec<Template>,
    },
    /// `lists:map(fun (Pattern) -> ...; ... end, Input)`.
    MappedList {
        clauses: Vec<(String, Expression)>,
        input: Template,
    },
    /// `lists:map(fun module:function/1, Input)`.
    FunctionRefList {
        module: String,
        function: String,
        input: Template,
    },
    /// `case Matched of Pattern -> ...; ... end`.
    Case {
        matched: Template,
        clauses: Vec<(String, Expression)>,
    },
    /// Raw multi-line code.
    Lines(Vec<CodeLine>),
}

impl Expression {
    pub fn templated(template: &str) -> TemplateResult<Self> {
        Ok(Expression::Templated(Template::parse(template)?))
    }

    pub fn fun_call(module: &str, function: &str, args: &[&str]) -> TemplateResult<Self> {
        Ok(Expression::FunCall {
            module: module.to_string(),
            function: function.to_string(),
            args: args
                .iter()
                .map(|arg| Template::parse(arg))
                .collect::<TemplateResult<Vec<_>>>()?,
        })
    }

    pub fn mapped_list(clauses: Vec<(&str, Expression)>, input: &str) -> TemplateResult<Self> {
        Ok(Expression::MappedList {
            clauses: Self::own_clauses(clauses),
            input: Template::parse(input)?,
        })
    }

    pub fn function_ref_list(module: &str, function: &str, input: &str) -> TemplateResult<Self> {
        Ok(Expression::FunctionRefList {
            module: module.to_string(),
            function: function.to_string(),
            input: Template::parse(input)?,
        })
    }

    pub fn case(matched: &str, clauses: Vec<(&str, Expression)>) -> TemplateResult<Self> {
        Ok(Expression::Case {
            matched: Template::parse(matched)?,
            clauses: Self::own_clauses(clauses),
        })
    }

    pub fn lines(lines: Vec<CodeLine>) -> Self {
        Expression::Lines(lines)
    }

    fn own_clauses(clauses: Vec<(&str, Expression)>) -> Vec<(String, Expression)> {
        clauses
            .into_iter()
            .map(|(pattern, expression)| (pattern.to_string(), expression))
            .collect()
    }

    /// Every placeholder referenced by this expression and its clauses.
    pub fn placeholders(&self) -> Vec<&str> {
        match self {
            Expression::Noop => vec![],
            Expression::Templated(template) => template.placeholders().collect(),
            Expression::FunCall { args, .. } => args
                .iter()
                .flat_map(|template| template.placeholders())
                .collect(),
            Expression::FunctionRefList { input, .. } => input.placeholders().collect(),
            Expression::MappedList { clauses, input } => clauses
                .iter()
                .flat_map(|(_, expression)| expression.placeholders())
                .chain(input.placeholders())
                .collect(),
            Expression::Case { matched, clauses } => matched
                .placeholders()
                .chain(
                    clauses
                        .iter()
                        .flat_map(|(_, expression)| expression.placeholders()),
                )
                .collect(),
            Expression::Lines(lines) => lines
                .iter()
                .flat_map(|line| line.template.placeholders())
                .collect(),
        }
    }

    /// Builds the expression, assigning its value to `ctx.assign_to` if set.
    pub fn build(&self, ctx: &TranslationContext) -> CodeGeneratorResult<Vec<Line>> {
        let mut lines = self.build_value(&ctx.without_assignment())?;

        if let (Some(target), Some(first)) = (&ctx.assign_to, lines.first_mut()) {
            first.content = format!("{target} = {}", first.content);
        }

        Ok(lines)
    }

    fn build_value(&self, ctx: &TranslationContext) -> CodeGeneratorResult<Vec<Line>> {
        let indent_level = ctx.indent_level;

        let lines = match self {
            Expression::Noop => vec![],
            Expression::Templated(template) => {
                vec![Line::new(ctx.format_template(template)?, indent_level).with_ending(LineEnding::Comma)]
            }
            Expression::FunCall {
                module,
                function,
                args,
            } => {
                let args = args
                    .iter()
                    .map(|arg| ctx.format_template(arg))
                    .collect::<CodeGeneratorResult<Vec<_>>>()?;

                vec![
                    Line::new(format!("{module}:{function}({})", args.join(", ")), indent_level)
                        .with_ending(LineEnding::Comma),
                ]
            }
            Expression::FunctionRefList {
                module,
                function,
                input,
            } => {
                let input = ctx.format_template(input)?;

                vec![
                    Line::new(
                        format!("lists:map(fun {module}:{function}/1, {input})"),
                        indent_level,
                    )
                    .with_ending(LineEnding::Comma),
                ]
            }
            Expression::MappedList { clauses, input } => {
                let mut lines = vec![Line::new("lists:map(fun", indent_level)];
                lines.extend(Self::build_clauses(clauses, ctx, |pattern| {
                    format!("({pattern}) ->")
                })?);

                let input = ctx.format_template(input)?;
                lines.push(
                    Line::new(format!("end, {input})"), indent_level).with_ending(LineEnding::Comma),
                );
                lines
            }
            Expression::Case { matched, clauses } => {
                let matched = ctx.format_template(matched)?;

                let mut lines = vec![Line::new(format!("case {matched} of"), indent_level)];
                lines.extend(Self::build_clauses(clauses, ctx, |pattern| {
                    format!("{pattern} ->")
                })?);
                lines.push(Line::new("end", indent_level).with_ending(LineEnding::Comma));
                lines
            }
            Expression::Lines(code_lines) => code_lines
                .iter()
                .map(|code_line| {
                    Ok(Line::new(
                        ctx.format_template(&code_line.template)?,
                        indent_level + code_line.extra_indent,
                    )
                    .with_ending(code_line.ending))
                })
                .collect::<CodeGeneratorResult<Vec<_>>>()?,
        };

        Ok(lines)
    }

    /// Clause heads one level deeper than `ctx`, bodies two levels deeper.
    /// Every clause body but the last ends with `;`.
    fn build_clauses(
        clauses: &[(String, Expression)],
        ctx: &TranslationContext,
        head: impl Fn(&str) -> String,
    ) -> CodeGeneratorResult<Vec<Line>> {
        let mut lines = Vec::new();
        let body_ctx = ctx.with_indent(2);

        for (i, (pattern, expression)) in clauses.iter().enumerate() {
            lines.push(Line::new(head(pattern.as_str()), ctx.indent_level + 1));

            let mut clause_lines = expression.build(&body_ctx)?;
            let ending = if i + 1 < clauses.len() {
                LineEnding::Semicolon
            } else {
                LineEnding::None
            };
            terminate(&mut clause_lines, ending);
            lines.extend(clause_lines);
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::line::format_lines;
    use pretty_assertions::assert_eq;

    fn render(expression: &Expression, ctx: &TranslationContext) -> Vec<String> {
        format_lines(&expression.build(ctx).unwrap())
    }

    #[test]
    fn test_templated_with_assignment() {
        let expression = Expression::templated("atom_to_binary({erl_var}, utf8)").unwrap();
        let ctx = TranslationContext::json_encoding("Reason").assigning_to("ReasonJson");

        assert_eq!(
            render(&expression, &ctx),
            vec!["    ReasonJson = atom_to_binary(Reason, utf8),"]
        );
    }

    #[test]
    fn test_fun_call() {
        let expression =
            Expression::fun_call("support_stage", "serialize", &["provider", "{erl_var}"]).unwrap();
        let ctx = TranslationContext::json_encoding("Stage").at_indent(2);

        assert_eq!(
            render(&expression, &ctx),
            vec!["        support_stage:serialize(provider, Stage),"]
        );
    }

    #[test]
    fn test_function_ref_list() {
        let expression =
            Expression::function_ref_list("automation", "store_type_to_json", "{erl_var}").unwrap();
        let ctx = TranslationContext::json_encoding("Types").assigning_to("TypesJson");

        assert_eq!(
            render(&expression, &ctx),
            vec!["    TypesJson = lists:map(fun automation:store_type_to_json/1, Types),"]
        );
    }

    #[test]
    fn test_mapped_list() {
        let expression = Expression::mapped_list(
            vec![
                ("default", Expression::templated("<<\"system defaults\">>").unwrap()),
                (
                    "Ip",
                    Expression::templated("element(2, {{ok, _}} = ip_utils:to_binary(Ip))").unwrap(),
                ),
            ],
            "{erl_var}",
        )
        .unwrap();
        let ctx = TranslationContext::json_encoding("Servers").assigning_to("ServersJson");

        assert_eq!(
            render(&expression, &ctx),
            vec![
                "    ServersJson = lists:map(fun",
                "        (default) ->",
                "            <<\"system defaults\">>;",
                "        (Ip) ->",
                "            element(2, {ok, _} = ip_utils:to_binary(Ip))",
                "    end, Servers),",
            ]
        );
    }

    #[test]
    fn test_case() {
        let expression = Expression::case(
            "{json_var}",
            vec![
                ("<<\"any\">>", Expression::templated("any").unwrap()),
                (
                    "_",
                    Expression::templated("token_type:invite_type_from_str({json_var})").unwrap(),
                ),
            ],
        )
        .unwrap();
        let ctx = TranslationContext::json_decoding("TypeJson").assigning_to("Type");

        assert_eq!(
            render(&expression, &ctx),
            vec![
                "    Type = case TypeJson of",
                "        <<\"any\">> ->",
                "            any;",
                "        _ ->",
                "            token_type:invite_type_from_str(TypeJson)",
                "    end,",
            ]
        );
    }

    #[test]
    fn test_raw_lines() {
        let expression = Expression::lines(vec![
            CodeLine::new("od_error:format_csv(maps:fold(fun(K, V, Acc) ->").unwrap(),
            CodeLine::new("Acc ++ [K]").unwrap().with_extra_indent(1),
            CodeLine::new("end, [], {erl_var}))")
                .unwrap()
                .with_ending(LineEnding::Comma),
        ]);
        let ctx = TranslationContext::print_encoding("Layout", "LayoutJson")
            .at_indent(3)
            .assigning_to("LayoutPrint");

        assert_eq!(
            render(&expression, &ctx),
            vec![
                "            LayoutPrint = od_error:format_csv(maps:fold(fun(K, V, Acc) ->",
                "                Acc ++ [K]",
                "            end, [], Layout)),",
            ]
        );
    }

    #[test]
    fn test_noop_builds_nothing() {
        let ctx = TranslationContext::json_encoding("Reason").assigning_to("ReasonJson");
        assert!(Expression::Noop.build(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_placeholders_are_collected_from_clauses() {
        let expression = Expression::case(
            "{erl_var}",
            vec![("_", Expression::templated("f({json_var})").unwrap())],
        )
        .unwrap();

        assert_eq!(expression.placeholders(), vec!["erl_var", "json_var"]);
    }
}
