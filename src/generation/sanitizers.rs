//! Sanitizers for document text embedded in generated TypeScript
//!
//! Summaries and descriptions come straight from the API document and end up
//! inside `/** ... */` blocks, so they must never terminate the comment early.

use once_cell::sync::Lazy;
use regex::Regex;

static UNICODE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2014}]").expect("valid unicode regex")
});

static TRAILING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+$").expect("valid whitespace regex"));

/// Sanitizes free text for use inside a JSDoc block.
///
/// This function:
/// - Replaces smart quotes and em-dashes with ASCII equivalents
/// - Escapes `*/` so the text cannot close the surrounding comment
/// - Trims trailing whitespace and drops leading/trailing blank lines
/// - Prefixes continuation lines with `indent` followed by ` * `
///
/// # Examples
/// ```
/// use openapi_ts_gen::generation::sanitizers::sanitize_doc_comment;
///
/// assert_eq!(sanitize_doc_comment("Ends here */ or not", ""), "Ends here *\\/ or not");
/// assert_eq!(sanitize_doc_comment("one\ntwo", ""), "one\n * two");
/// ```
pub fn sanitize_doc_comment(input: &str, indent: &str) -> String {
    let lines: Vec<String> = input
        .lines()
        .map(|line| {
            let line = UNICODE_PUNCTUATION.replace_all(line, |caps: &regex::Captures| {
                match &caps[0] {
                    "\u{2018}" | "\u{2019}" => "'",
                    "\u{201C}" | "\u{201D}" => "\"",
                    _ => "-",
                }
            });
            let line = line.replace("*/", "*\\/");
            TRAILING_WHITESPACE.replace(&line, "").into_owned()
        })
        .collect();

    let start = lines.iter().position(|line| !line.is_empty());
    let end = lines.iter().rposition(|line| !line.is_empty());
    let (Some(start), Some(end)) = (start, end) else {
        return String::new();
    };

    lines[start..=end]
        .iter()
        .map(|line| line.trim_start().to_string())
        .collect::<Vec<_>>()
        .join(&format!("\n{indent} * "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_doc_comment_escapes_terminator() {
        assert_eq!(
            sanitize_doc_comment("glob like /api/*/items", ""),
            "glob like /api/*\\/items"
        );
    }

    #[test]
    fn test_sanitize_doc_comment_unicode() {
        assert_eq!(
            sanitize_doc_comment("\u{201C}smart\u{201D} \u{2018}quotes\u{2019}\u{2014}dash", ""),
            "\"smart\" 'quotes'-dash"
        );
    }

    #[test]
    fn test_sanitize_doc_comment_multiline() {
        assert_eq!(
            sanitize_doc_comment("\n\nFirst line  \n\n  Second line\n\n", "    "),
            "First line\n     * \n     * Second line"
        );
    }

    #[test]
    fn test_sanitize_doc_comment_blank() {
        assert_eq!(sanitize_doc_comment("", ""), "");
        assert_eq!(sanitize_doc_comment("  \n \n", ""), "");
    }
}
