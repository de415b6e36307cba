//! Property tests for the highlighter.
//!
//! The highlighter must behave on arbitrary input, not just valid QASM:
//! the workbench runs it on every keystroke of a buffer that is usually
//! mid-edit.

use bragi_qasm::{Category, highlight};
use proptest::prelude::*;

proptest! {
    /// Spans are in source order, disjoint, and inside the source.
    #[test]
    fn spans_are_ordered_and_in_bounds(source in ".*") {
        let spans = highlight(&source);
        let mut cursor = 0;
        for span in &spans {
            prop_assert!(span.span.start >= cursor);
            prop_assert!(span.span.end <= source.len());
            prop_assert!(span.span.start < span.span.end);
            cursor = span.span.end;
        }
    }

    /// Comment spans never contain a newline.
    #[test]
    fn comments_stop_at_end_of_line(source in ".*") {
        for span in highlight(&source) {
            if span.category == Some(Category::Comment) {
                prop_assert!(!source[span.span.clone()].contains('\n'));
            }
        }
    }

    /// Keywords classify the same way regardless of surrounding context.
    #[test]
    fn qreg_always_keyword(prefix in "[ \t\n]*", suffix in "[ \t\n]+[a-z][a-z0-9]*") {
        let source = format!("{prefix}qreg{suffix}");
        let spans = highlight(&source);
        let keyword = spans.iter().find(|s| &source[s.span.clone()] == "qreg");
        prop_assert_eq!(keyword.and_then(|s| s.category), Some(Category::Keyword));
    }
}
