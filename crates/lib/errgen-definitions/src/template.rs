//! Text templates with named `{placeholder}` tokens.
//!
//! `{{` and `}}` render as literal braces. A brace that neither opens a
//! placeholder nor belongs to an escape is kept as text, so Erlang maps such
//! as `#{}` survive inside templates untouched.

use crate::prelude::*;
use pest::Parser as PestParserTrait;
use pest::iterators::Pair;
use std::fmt;
use std::str::FromStr;

#[derive(pest_derive::Parser)]
#[grammar = "grammars/template.pest"]
pub struct TemplateParser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> TemplateResult<Self> {
        let pairs = TemplateParser::parse(Rule::template, source)
            .map_err(|error| TemplateError::Parse(Box::new(error)))?;

        let template_pair = pairs
            .peek()
            .ok_or_else(|| TemplateError::MissingElement("template".to_string()))?;

        Ok(Self {
            source: source.to_string(),
            segments: Self::parse_segments(template_pair)?,
        })
    }

    fn parse_segments(pair: Pair<'_, Rule>) -> TemplateResult<Vec<Segment>> {
        if pair.as_rule() != Rule::template {
            return Err(TemplateError::UnexpectedRule {
                expected: "template".to_string(),
                found: format!("{:?}", pair.as_rule()),
            });
        }

        let mut segments = Vec::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::placeholder => {
                    // Strip the surrounding braces
                    let raw_str = inner_pair.as_str();
                    let name = &raw_str[1..raw_str.len() - 1];
                    segments.push(Segment::Placeholder(name.to_string()));
                }
                Rule::open_brace => Self::push_text(&mut segments, "{"),
                Rule::close_brace => Self::push_text(&mut segments, "}"),
                Rule::text | Rule::stray_brace => {
                    Self::push_text(&mut segments, inner_pair.as_str())
                }
                Rule::EOI => {
                    // End of input, ignore
                }
                _ => {
                    return Err(TemplateError::UnexpectedRule {
                        expected: "placeholder, escaped brace or text".to_string(),
                        found: format!("{:?}", inner_pair.as_rule()),
                    });
                }
            }
        }

        Ok(segments)
    }

    /// Appends text, merging it with a preceding text segment.
    fn push_text(segments: &mut Vec<Segment>, text: &str) {
        match segments.last_mut() {
            Some(Segment::Text(previous)) => previous.push_str(text),
            _ => segments.push(Segment::Text(text.to_string())),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in order of appearance, duplicates included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// Substitutes every placeholder with its value from `vars`.
    pub fn render(&self, vars: &[(&str, &str)]) -> TemplateResult<String> {
        let mut rendered = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => rendered.push_str(text),
                Segment::Placeholder(name) => {
                    let value = vars
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| TemplateError::UnknownPlaceholder {
                            placeholder: name.clone(),
                            template: self.source.clone(),
                            available: vars.iter().map(|(key, _)| key.to_string()).collect(),
                        })?;
                    rendered.push_str(value);
                }
            }
        }

        Ok(rendered)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_placeholders_and_text() {
        let template = Template::parse("Bad value: {key} must be {expected}").unwrap();

        assert_eq!(
            template.segments(),
            &[
                Segment::Text("Bad value: ".to_string()),
                Segment::Placeholder("key".to_string()),
                Segment::Text(" must be ".to_string()),
                Segment::Placeholder("expected".to_string()),
            ]
        );
        assert_eq!(
            template.placeholders().collect::<Vec<_>>(),
            vec!["key", "expected"]
        );
    }

    #[test]
    fn test_escaped_braces_are_literal() {
        let template = Template::parse("{{not_a_placeholder}} {name}").unwrap();

        assert_eq!(
            template.segments(),
            &[
                Segment::Text("{not_a_placeholder} ".to_string()),
                Segment::Placeholder("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_stray_braces_are_kept_as_text() {
        let template = Template::parse("maps:get(<<\"a\">>, Json, #{})").unwrap();

        assert!(!template.has_placeholders());
        assert_eq!(
            template.render(&[]).unwrap(),
            "maps:get(<<\"a\">>, Json, #{})"
        );
    }

    #[test]
    fn test_empty_template() {
        let template = Template::parse("").unwrap();

        assert!(template.segments().is_empty());
        assert_eq!(template.render(&[]).unwrap(), "");
    }

    #[test]
    fn test_render_substitutes_values() {
        let template = Template::parse("atom_to_binary({erl_var}, utf8)").unwrap();

        let rendered = template.render(&[("erl_var", "Reason")]).unwrap();

        assert_eq!(rendered, "atom_to_binary(Reason, utf8)");
    }

    #[test]
    fn test_render_unknown_placeholder() {
        let template = Template::parse("{json_var}").unwrap();

        let result = template.render(&[("erl_var", "Reason")]);

        assert!(matches!(
            result,
            Err(TemplateError::UnknownPlaceholder { ref placeholder, .. }) if placeholder == "json_var"
        ));
    }

    #[test]
    fn test_display_returns_source() {
        let template: Template = "{{x}} {y}".parse().unwrap();

        assert_eq!(template.to_string(), "{{x}} {y}");
    }
}
