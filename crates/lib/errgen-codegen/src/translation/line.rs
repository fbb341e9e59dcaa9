pub const INDENT: &str = "    ";

/// Returns the whitespace for `level` indentation steps.
pub fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    None,
    Comma,
    Semicolon,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::None => "",
            LineEnding::Comma => ",",
            LineEnding::Semicolon => ";",
        }
    }
}

/// A single line of Erlang code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub content: String,
    pub indent_level: usize,
    pub ending: LineEnding,
}

impl Line {
    pub fn new(content: impl Into<String>, indent_level: usize) -> Self {
        Self {
            content: content.into(),
            indent_level,
            ending: LineEnding::None,
        }
    }

    pub fn with_ending(mut self, ending: LineEnding) -> Self {
        self.ending = ending;
        self
    }

    pub fn render(&self) -> String {
        format!(
            "{}{}{}",
            indent(self.indent_level),
            self.content,
            self.ending.as_str()
        )
    }
}

/// Renders lines into indented strings, without trailing newlines.
pub fn format_lines(lines: &[Line]) -> Vec<String> {
    lines.iter().map(Line::render).collect()
}

/// Replaces the ending of the last line, if any.
pub fn terminate(lines: &mut [Line], ending: LineEnding) {
    if let Some(last) = lines.last_mut() {
        last.ending = ending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_line() {
        let line = Line::new("Reason = foo()", 2).with_ending(LineEnding::Comma);
        assert_eq!(line.render(), "        Reason = foo(),");
    }

    #[test]
    fn test_terminate_only_touches_last_line() {
        let mut lines = vec![
            Line::new("case X of", 1),
            Line::new("end", 1).with_ending(LineEnding::Comma),
        ];

        terminate(&mut lines, LineEnding::None);

        assert_eq!(format_lines(&lines), vec!["    case X of", "    end"]);
    }

    #[test]
    fn test_terminate_empty() {
        let mut lines: Vec<Line> = vec![];
        terminate(&mut lines, LineEnding::Semicolon);
        assert!(lines.is_empty());
    }
}
