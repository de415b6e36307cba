//! Display categories for the workbench editor.
//!
//! Classification is an ordered rule set over the token stream: keywords,
//! then the `pi` atom, then arrows, then braces, comments, strings and
//! numbers. Whitespace is uncategorized, and any input the lexer cannot
//! match advances one character with no category. Gate names such as `h`
//! or `cx` are ordinary identifiers and stay uncategorized.

use logos::Logos;

use crate::lexer::Token;

/// Display category assigned to a source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Keyword,
    Atom,
    Operator,
    Bracket,
    Comment,
    String,
    Number,
}

impl Category {
    /// Stable lowercase name, e.g. for structured output.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Keyword => "keyword",
            Category::Atom => "atom",
            Category::Operator => "operator",
            Category::Bracket => "bracket",
            Category::Comment => "comment",
            Category::String => "string",
            Category::Number => "number",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified region of the source.
///
/// Spans are emitted in source order and never overlap; whitespace between
/// tokens is simply absent from the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Byte range into the source string.
    pub span: std::ops::Range<usize>,
    /// Display category, or `None` for uncategorized input.
    pub category: Option<Category>,
}

fn categorize(token: &Token) -> Option<Category> {
    match token {
        Token::OpenQasm
        | Token::Include
        | Token::QReg
        | Token::CReg
        | Token::Gate
        | Token::Measure
        | Token::Reset
        | Token::Barrier
        | Token::If
        | Token::GateU
        | Token::GateCX => Some(Category::Keyword),
        Token::Pi => Some(Category::Atom),
        Token::Arrow | Token::FatArrow => Some(Category::Operator),
        Token::LBrace | Token::RBrace => Some(Category::Bracket),
        Token::Comment => Some(Category::Comment),
        Token::StringLiteral(_) => Some(Category::String),
        Token::IntLiteral(_) | Token::FloatLiteral(_) => Some(Category::Number),
        _ => None,
    }
}

/// Classify a QASM2 source string into display spans.
pub fn highlight(source: &str) -> Vec<HighlightSpan> {
    let mut lexer = Token::lexer(source);
    let mut spans = Vec::new();

    while let Some(result) = lexer.next() {
        let category = match result {
            Ok(token) => categorize(&token),
            // Unmatched input: the span advances with no category.
            Err(()) => None,
        };
        spans.push(HighlightSpan {
            span: lexer.span(),
            category,
        });
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_of<'a>(source: &'a str, needle: &str) -> Option<Category> {
        let start = source.find(needle).expect("needle in source");
        let range = start..start + needle.len();
        highlight(source)
            .into_iter()
            .find(|s| s.span == range)
            .and_then(|s| s.category)
    }

    #[test]
    fn test_qreg_is_keyword() {
        assert_eq!(
            category_of("qreg q[2];", "qreg"),
            Some(Category::Keyword)
        );
    }

    #[test]
    fn test_h_is_not_keyword() {
        // `h` is a gate from qelib1, not part of the keyword set.
        assert_eq!(category_of("h q[0];", "h"), None);
    }

    #[test]
    fn test_comment_spans_to_end_of_line() {
        let source = "//comment here\nqreg q[1];";
        let spans = highlight(source);
        assert_eq!(spans[0].category, Some(Category::Comment));
        assert_eq!(spans[0].span, 0..source.find('\n').unwrap());
    }

    #[test]
    fn test_pi_is_atom() {
        assert_eq!(category_of("rx(pi) q[0];", "pi"), Some(Category::Atom));
    }

    #[test]
    fn test_arrow_is_operator() {
        assert_eq!(
            category_of("measure q[0] -> c[0];", "->"),
            Some(Category::Operator)
        );
    }

    #[test]
    fn test_braces_are_brackets_square_are_not() {
        let source = "gate foo a { h a; }";
        assert_eq!(category_of(source, "{"), Some(Category::Bracket));
        assert_eq!(category_of(source, "}"), Some(Category::Bracket));
        assert_eq!(category_of("h q[0];", "["), None);
    }

    #[test]
    fn test_string_and_number() {
        let source = r#"OPENQASM 2.0; include "qelib1.inc";"#;
        assert_eq!(category_of(source, "2.0"), Some(Category::Number));
        assert_eq!(
            category_of(source, "\"qelib1.inc\""),
            Some(Category::String)
        );
    }

    #[test]
    fn test_spans_are_ordered_and_disjoint() {
        let source = "OPENQASM 2.0;\nqreg q[2];\nh q[0]; // tail";
        let spans = highlight(source);
        for pair in spans.windows(2) {
            assert!(pair[0].span.end <= pair[1].span.start);
        }
    }
}
