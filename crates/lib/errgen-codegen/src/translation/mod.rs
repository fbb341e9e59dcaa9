//! Building blocks for Erlang code fragments.
//!
//! Code is assembled as indented [`line::Line`]s rather than through an AST:
//! expressions render themselves against a [`context::TranslationContext`],
//! and strategies decide whether an expression is needed at all.

pub mod context;
pub mod expression;
pub mod line;
pub mod strategy;
