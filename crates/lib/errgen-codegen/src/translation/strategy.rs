use crate::prelude::*;
use crate::translation::line::{format_lines, terminate};
use std::fmt;

static NOOP: Expression = Expression::Noop;

/// The three independent concerns of an argument kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concern {
    JsonEncoding,
    JsonDecoding,
    PrintEncoding,
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concern::JsonEncoding => f.write_str("JSON encoding"),
            Concern::JsonDecoding => f.write_str("JSON decoding"),
            Concern::PrintEncoding => f.write_str("print encoding"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Direct,
    FromJson,
    Custom,
}

/// How one concern of an argument is translated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Use the input variable as is.
    #[default]
    Direct,
    /// Print the JSON representation. Only valid for print encoding.
    FromJson,
    /// Compute the value with an expression.
    Custom(Expression),
}

/// An expression together with the variable holding its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedExpression<'a> {
    pub expression: &'a Expression,
    pub target_var: String,
}

impl PreparedExpression<'_> {
    /// Renders the expression as a statement assigning `target_var`.
    pub fn render(&self, ctx: &TranslationContext) -> CodeGeneratorResult<Vec<String>> {
        let mut lines = self
            .expression
            .build(&ctx.clone().assigning_to(self.target_var.clone()))?;
        terminate(&mut lines, LineEnding::Comma);

        Ok(format_lines(&lines))
    }
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Direct => StrategyKind::Direct,
            Strategy::FromJson => StrategyKind::FromJson,
            Strategy::Custom(_) => StrategyKind::Custom,
        }
    }

    pub fn expression(&self) -> Option<&Expression> {
        match self {
            Strategy::Custom(expression) => Some(expression),
            Strategy::Direct | Strategy::FromJson => None,
        }
    }

    /// Decides which expression to run for the concern of `ctx` and which
    /// variable ends up holding the result.
    pub fn prepare(
        &self,
        ctx: &TranslationContext,
    ) -> Result<PreparedExpression<'_>, ConfigurationError> {
        let concern = ctx.concern();

        let (expression, target_var) = match (self, &ctx.vars) {
            (Strategy::Direct, ContextVars::JsonEncoding { erl_var })
            | (Strategy::Direct, ContextVars::PrintEncoding { erl_var, .. }) => {
                (&NOOP, erl_var.clone())
            }
            (Strategy::Direct, ContextVars::JsonDecoding { json_var })
            | (Strategy::FromJson, ContextVars::PrintEncoding { json_var, .. }) => {
                (&NOOP, json_var.clone())
            }
            (Strategy::FromJson, _) => {
                return Err(ConfigurationError::UnsupportedStrategy {
                    strategy: StrategyKind::FromJson,
                    concern,
                });
            }
            (Strategy::Custom(expression), _) => {
                let target_var = ctx
                    .assign_to
                    .clone()
                    .ok_or(ConfigurationError::MissingAssignTarget { concern })?;
                (expression, target_var)
            }
        };

        Ok(PreparedExpression {
            expression,
            target_var,
        })
    }
}

/// Lines computing `strategy`'s value in tail position: no assignment and no
/// terminator on the last line. Non-custom strategies yield no lines.
pub fn tail_lines(strategy: &Strategy, ctx: &TranslationContext) -> CodeGeneratorResult<Vec<String>> {
    let expression = strategy.expression().unwrap_or(&NOOP);

    let mut lines = expression.build(&ctx.without_assignment())?;
    terminate(&mut lines, LineEnding::None);

    Ok(format_lines(&lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(template: &str) -> Strategy {
        Strategy::Custom(Expression::templated(template).unwrap())
    }

    #[test]
    fn test_direct_uses_input_variable() {
        let encode = TranslationContext::json_encoding("Reason");
        let decode = TranslationContext::json_decoding("ReasonJson");
        let print = TranslationContext::print_encoding("Reason", "ReasonJson");

        assert_eq!(Strategy::Direct.prepare(&encode).unwrap().target_var, "Reason");
        assert_eq!(Strategy::Direct.prepare(&decode).unwrap().target_var, "ReasonJson");
        assert_eq!(Strategy::Direct.prepare(&print).unwrap().target_var, "Reason");
        assert_eq!(
            Strategy::Direct.prepare(&encode).unwrap().expression,
            &Expression::Noop
        );
    }

    #[test]
    fn test_from_json_prints_the_json_variable() {
        let print = TranslationContext::print_encoding("Path", "PathJson");

        let prepared = Strategy::FromJson.prepare(&print).unwrap();

        assert_eq!(prepared.target_var, "PathJson");
        assert!(prepared.render(&print).unwrap().is_empty());
    }

    #[test]
    fn test_from_json_is_rejected_outside_printing() {
        let encode = TranslationContext::json_encoding("Path");

        let result = Strategy::FromJson.prepare(&encode);

        assert_eq!(
            result,
            Err(ConfigurationError::UnsupportedStrategy {
                strategy: StrategyKind::FromJson,
                concern: Concern::JsonEncoding,
            })
        );
    }

    #[test]
    fn test_custom_requires_assign_target() {
        let strategy = custom("atom_to_binary({erl_var}, utf8)");
        let encode = TranslationContext::json_encoding("Reason");

        let result = strategy.prepare(&encode);

        assert_eq!(
            result,
            Err(ConfigurationError::MissingAssignTarget {
                concern: Concern::JsonEncoding
            })
        );
    }

    #[test]
    fn test_custom_renders_assignment() {
        let strategy = custom("atom_to_binary({erl_var}, utf8)");
        let encode = TranslationContext::json_encoding("Reason").assigning_to("ReasonJson");

        let prepared = strategy.prepare(&encode).unwrap();

        assert_eq!(prepared.target_var, "ReasonJson");
        assert_eq!(
            prepared.render(&encode).unwrap(),
            vec!["    ReasonJson = atom_to_binary(Reason, utf8),"]
        );
    }

    #[test]
    fn test_tail_lines_drop_terminator() {
        let strategy = custom("atom_to_binary({erl_var}, utf8)");
        let encode = TranslationContext::json_encoding("Reason")
            .at_indent(3)
            .assigning_to("Ignored");

        assert_eq!(
            tail_lines(&strategy, &encode).unwrap(),
            vec!["            atom_to_binary(Reason, utf8)"]
        );
        assert!(tail_lines(&Strategy::Direct, &encode).unwrap().is_empty());
    }
}
