//! LaTeX equation escaping.
//!
//! Equation spans are `$$...$$` (display, may span lines) and `$...$`
//! (inline, single line). Matching is non-greedy and nesting is not
//! supported: the first closing delimiter ends the span. An inline span
//! must open on a non-space, non-digit character and close on a non-space
//! character not followed by a digit, so dollar amounts such as
//! "$5 and $6" stay prose. Inside a span,
//! backslashes are doubled and bare underscores are escaped so Markdown
//! emphasis cannot eat subscripts. Text outside spans is never touched.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Display math first so `$$a$$` is not read as two empty inline spans.
static EQUATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s:\$\$.+?\$\$)|\$[^\s$\d](?:[^$\n]*[^\s$])?\$").unwrap()
});

/// Byte ranges of delimited equation spans, delimiters included.
pub fn find_equations(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(m) = EQUATION_RE.find_at(text, from) {
        let inline = !m.as_str().starts_with("$$");
        let digit_follows = text[m.end()..].starts_with(|c: char| c.is_ascii_digit());
        if inline && digit_follows {
            // "$x$5" is a price, not math; retry from the closing dollar.
            from = m.end() - 1;
            continue;
        }
        spans.push(m.range());
        from = m.end();
    }
    spans
}

/// Rewrite every equation span in `text`.
pub fn format_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in find_equations(text) {
        out.push_str(&text[cursor..range.start]);
        out.push_str(&escape_latex(&text[range.clone()]));
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Escape one equation span: `\` becomes `\\`, `_` becomes `\_` unless
/// it was already escaped in the source.
pub fn escape_latex(span: &str) -> String {
    let mut out = String::with_capacity(span.len() + span.len() / 4);
    let mut prev = None;
    for c in span.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '_' if prev == Some('\\') => out.push('_'),
            '_' => out.push_str("\\_"),
            _ => out.push(c),
        }
        prev = Some(c);
    }
    out
}

/// Wrap equation-flagged text in inline delimiters unless it already has them.
pub fn delimit_equation(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('$') && trimmed.ends_with('$') {
        text.to_string()
    } else {
        format!("${}$", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_subscripts_escaped() {
        assert_eq!(
            format_latex("Sum $x_1 + x_2$ here"),
            "Sum $x\\_1 + x\\_2$ here"
        );
    }

    #[test]
    fn test_backslashes_doubled() {
        assert_eq!(
            format_latex(r"gradient $|\nabla \mathcal{L}|$ grows"),
            r"gradient $|\\nabla \\mathcal{L}|$ grows"
        );
    }

    #[test]
    fn test_escaped_underscore_not_double_escaped() {
        assert_eq!(escape_latex(r"$a\_b$"), r"$a\\_b$");
    }

    #[test]
    fn test_display_math_spans_lines() {
        let text = "Before\n$$\n\\alpha_t = 1\n$$\nafter_text";
        let out = format_latex(text);
        assert_eq!(out, "Before\n$$\n\\\\alpha\\_t = 1\n$$\nafter_text");
    }

    #[test]
    fn test_non_greedy_matching() {
        let text = "$a_1$ and plain_word and $b_2$";
        assert_eq!(find_equations(text), vec![0..5, 25..30]);
        assert_eq!(format_latex(text), "$a\\_1$ and plain_word and $b\\_2$");
    }

    #[test]
    fn test_prose_outside_untouched() {
        let text = "snake_case names and C:\\paths stay";
        assert_eq!(format_latex(text), text);
        assert!(find_equations(text).is_empty());
    }

    #[test]
    fn test_inline_does_not_cross_lines() {
        let text = "costs $5\nand $6";
        assert!(find_equations(text).is_empty());
    }

    #[test]
    fn test_dollar_amounts_are_prose() {
        let text = "Costs $5 for snake_case users and $6 otherwise.";
        assert!(find_equations(text).is_empty());
        assert_eq!(format_latex(text), text);

        let text = "Revenue hit $5 billion in 2023, up from $3 billion.";
        assert!(find_equations(text).is_empty());
    }

    #[test]
    fn test_spaced_delimiters_are_not_math() {
        assert!(find_equations("between $ x_1 $ here").is_empty());
        assert!(find_equations("price a$b_c$5 later").is_empty());
    }

    #[test]
    fn test_currency_beside_equation() {
        let text = "Pay $5 when $x_1$ holds";
        assert_eq!(find_equations(text), vec![12..17]);
        assert_eq!(format_latex(text), "Pay $5 when $x\\_1$ holds");
    }

    #[test]
    fn test_delimit_equation() {
        assert_eq!(delimit_equation("x_1"), "$x_1$");
        assert_eq!(delimit_equation("$y$"), "$y$");
        assert_eq!(delimit_equation(" z "), "$z$");
    }
}
