//! Source line analysis.
//!
//! Splitting is an ordered sequence of delimiter-based transforms: the
//! trailing comment is stripped first, then the leading label, then the
//! remaining instruction text is trimmed. Comment stripping must stay ahead
//! of label stripping so a `:` inside a comment is never taken for a label
//! delimiter.

/// Comment delimiter; everything after the first occurrence is comment text.
const COMMENT_DELIMITER: char = ';';
/// Label delimiter; everything before the first occurrence is label text.
const LABEL_DELIMITER: char = ':';

/// The split parts of one raw source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineParts {
    /// Label text before the first `:`, untrimmed. `None` when the line has
    /// no label delimiter.
    pub label: Option<String>,
    /// Instruction text with surrounding whitespace removed; empty for
    /// comment-only, label-only, and blank lines.
    pub text: String,
    /// Comment text after the first `;`, untrimmed; empty when absent.
    pub comment: String,
}

impl LineParts {
    /// Returns true when the line carries no instruction text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Splits a raw source line into comment, label, and instruction text.
#[must_use]
pub fn split_line(raw: &str) -> LineParts {
    let (code, comment) = raw.find(COMMENT_DELIMITER).map_or((raw, ""), |pos| {
        (&raw[..pos], &raw[pos + COMMENT_DELIMITER.len_utf8()..])
    });

    let (label, rest) = code.find(LABEL_DELIMITER).map_or((None, code), |pos| {
        (
            Some(code[..pos].to_string()),
            &code[pos + LABEL_DELIMITER.len_utf8()..],
        )
    });

    LineParts {
        label,
        text: rest.trim().to_string(),
        comment: comment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{split_line, LineParts};

    #[test]
    fn plain_instruction_line() {
        assert_eq!(
            split_line("add r0 r1 r2"),
            LineParts {
                label: None,
                text: "add r0 r1 r2".to_string(),
                comment: String::new(),
            }
        );
    }

    #[test]
    fn full_line_with_label_instruction_and_comment() {
        assert_eq!(
            split_line("loop:   and r3 r0 r0    ; r3 now has zero"),
            LineParts {
                label: Some("loop".to_string()),
                text: "and r3 r0 r0".to_string(),
                comment: " r3 now has zero".to_string(),
            }
        );
    }

    #[test]
    fn blank_and_comment_only_lines_have_no_text() {
        assert!(split_line("").is_empty());
        assert!(split_line("   \t ").is_empty());
        assert!(split_line("; nothing here").is_empty());
    }

    #[test]
    fn label_only_line() {
        let parts = split_line("start:");
        assert_eq!(parts.label.as_deref(), Some("start"));
        assert!(parts.is_empty());
    }

    #[test]
    fn colon_inside_comment_is_not_a_label_delimiter() {
        let parts = split_line("not r0 r1 ; note: inverted");
        assert_eq!(parts.label, None);
        assert_eq!(parts.text, "not r0 r1");
        assert_eq!(parts.comment, " note: inverted");
    }

    #[test]
    fn label_text_is_kept_untrimmed() {
        // Whatever precedes the first ':' is the label, verbatim; the
        // duplicate check compares this exact text.
        let parts = split_line("  spin : bnz spin");
        assert_eq!(parts.label.as_deref(), Some("  spin "));
        assert_eq!(parts.text, "bnz spin");
    }

    #[test]
    fn only_first_colon_splits_the_label() {
        let parts = split_line("a:b: add r0 r0 r0");
        assert_eq!(parts.label.as_deref(), Some("a"));
        assert_eq!(parts.text, "b: add r0 r0 r0");
    }

    #[test]
    fn only_first_semicolon_starts_the_comment() {
        let parts = split_line("bnz top ; outer ; inner");
        assert_eq!(parts.comment, " outer ; inner");
    }
}
