//! Presentation coloring for the generated CSS.
//!
//! This is a line-oriented lexical pass tailored to the output of
//! [`crate::css`], not a CSS parser.

use crate::color::ColorMap;

/// Punctuation, unknown words and the text around quoted rows.
pub const MUTED: &str = "#78716C";
/// Property names.
pub const PROPERTY: &str = "#FBBF24";
/// Property values and non-class selector lines.
pub const VALUE: &str = "#D6D3D1";
/// Class selector lines.
pub const CLASS_SELECTOR: &str = "#87CEEB";

/// What a highlighted fragment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Quotes and the text around a quoted row.
    Punctuation,
    /// A word inside a quoted `grid-template-areas` row.
    AreaName,
    /// Indentation before a property.
    Whitespace,
    Property,
    Colon,
    Value,
    /// A line opening or closing a rule.
    Selector,
    Plain,
}

/// One highlighted fragment of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Foreground color; `None` inherits the surrounding color.
    pub color: Option<String>,
}

impl Token {
    fn new(kind: TokenKind, text: &str, color: Option<&str>) -> Self {
        Self {
            kind,
            text: text.to_string(),
            color: color.map(str::to_string),
        }
    }
}

/// Highlight `css`, returning one token list per line.
pub fn highlight_css(css: &str, colors: &ColorMap) -> Vec<Vec<Token>> {
    css.split('\n').map(|line| highlight_line(line, colors)).collect()
}

/// Highlight a single line.
pub fn highlight_line(line: &str, colors: &ColorMap) -> Vec<Token> {
    let quoted = quoted_spans(line);
    if !quoted.is_empty() {
        return highlight_quoted(line, &quoted, colors);
    }

    if let Some((indent, name)) = split_property(line) {
        let rest = &line[indent.len() + name.len() + 1..];
        return vec![
            Token::new(TokenKind::Whitespace, indent, None),
            Token::new(TokenKind::Property, name, Some(PROPERTY)),
            Token::new(TokenKind::Colon, ":", Some(MUTED)),
            Token::new(TokenKind::Value, rest, Some(VALUE)),
        ];
    }

    if line.contains('{') || line.contains('}') {
        let color = if line.starts_with('.') { CLASS_SELECTOR } else { VALUE };
        return vec![Token::new(TokenKind::Selector, line, Some(color))];
    }

    vec![Token::new(TokenKind::Plain, line, None)]
}

/// Byte ranges `(open, close)` of each `"…"` pair with non-empty content.
fn quoted_spans(line: &str) -> Vec<(usize, usize)> {
    let quotes: Vec<usize> = line.match_indices('"').map(|(i, _)| i).collect();
    let mut spans = Vec::new();
    let mut i = 0;
    while i + 1 < quotes.len() {
        let (open, close) = (quotes[i], quotes[i + 1]);
        if close == open + 1 {
            // `""` cannot match; the second quote may open the next pair.
            i += 1;
        } else {
            spans.push((open, close));
            i += 2;
        }
    }
    spans
}

fn highlight_quoted(line: &str, spans: &[(usize, usize)], colors: &ColorMap) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for &(open, close) in spans {
        push_nonempty(&mut tokens, TokenKind::Punctuation, &line[last..open], Some(MUTED));
        tokens.push(Token::new(TokenKind::Punctuation, "\"", Some(MUTED)));
        for (i, word) in line[open + 1..close].split(' ').enumerate() {
            if i > 0 {
                tokens.push(Token::new(TokenKind::Punctuation, " ", Some(MUTED)));
            }
            let color = colors.get(word).map_or(MUTED, |c| c.bg.as_str());
            push_nonempty(&mut tokens, TokenKind::AreaName, word, Some(color));
        }
        tokens.push(Token::new(TokenKind::Punctuation, "\"", Some(MUTED)));
        last = close + 1;
    }
    push_nonempty(&mut tokens, TokenKind::Punctuation, &line[last..], Some(MUTED));
    tokens
}

fn push_nonempty(tokens: &mut Vec<Token>, kind: TokenKind, text: &str, color: Option<&str>) {
    if !text.is_empty() {
        tokens.push(Token::new(kind, text, color));
    }
}

/// Match `^(\s*)([\w-]+):` and return the indentation and property name.
fn split_property(line: &str) -> Option<(&str, &str)> {
    let name_start = line.len() - line.trim_start().len();
    let after_indent = &line[name_start..];
    let name_len = after_indent
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(after_indent.len());
    if name_len == 0 || !after_indent[name_len..].starts_with(':') {
        return None;
    }
    Some((&line[..name_start], &after_indent[..name_len]))
}
