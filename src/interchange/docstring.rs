//! Docstring rendering.
//!
//! Docstrings are stored as plain comment text. Exporters hand them to a
//! [`DocFormatter`] before emitting; the default [`RdocHtmlFormatter`] covers
//! the small slice of RDoc markup that shows up in doc comments in practice.

use super::error::FormatError;

/// Turns a raw docstring into its rendered form.
pub trait DocFormatter {
    fn format(&self, docstring: &str) -> Result<String, FormatError>;
}

/// Renders RDoc paragraphs as HTML.
///
/// - blank lines separate `<p>` paragraphs
/// - `+code+` becomes `<tt>code</tt>`
/// - everything else is HTML-escaped
#[derive(Debug, Clone, Copy, Default)]
pub struct RdocHtmlFormatter;

impl DocFormatter for RdocHtmlFormatter {
    fn format(&self, docstring: &str) -> Result<String, FormatError> {
        let mut html = String::new();
        for (offset, paragraph) in paragraphs(docstring) {
            if !html.is_empty() {
                html.push('\n');
            }
            html.push_str("<p>");
            render_inline(paragraph, offset, &mut html)?;
            html.push_str("</p>");
        }
        Ok(html)
    }
}

/// Split on blank lines, returning each paragraph with its byte offset.
fn paragraphs(text: &str) -> Vec<(usize, &str)> {
    let mut result = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut pos = 0;

    for line in text.split('\n') {
        let line_end = pos + line.len();
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                result.push((s, &text[s..end]));
            }
        } else {
            start.get_or_insert(pos);
            end = line_end;
        }
        pos = line_end + 1;
    }
    if let Some(s) = start {
        result.push((s, &text[s..end]));
    }
    result
}

fn render_inline(text: &str, base: usize, out: &mut String) -> Result<(), FormatError> {
    let mut i = 0;
    while let Some(found) = text[i..].find('+') {
        let at = i + found;
        escape_into(&text[i..at], out);
        if !opens_code(text, at) {
            out.push('+');
            i = at + 1;
            continue;
        }
        let start = at + 1;
        let Some(len) = text[start..].find('+') else {
            return Err(FormatError::Unterminated {
                marker: '+',
                offset: base + at,
            });
        };
        out.push_str("<tt>");
        escape_into(&text[start..start + len], out);
        out.push_str("</tt>");
        i = start + len + 1;
    }
    escape_into(&text[i..], out);
    Ok(())
}

/// A `+` opens code when it starts a word and is followed by a non-blank.
fn opens_code(text: &str, at: usize) -> bool {
    let before = text[..at].chars().next_back();
    let after = text[at + 1..].chars().next();
    let starts_word = before.is_none_or(|c| !c.is_alphanumeric() && c != '+');
    let has_content = after.is_some_and(|c| !c.is_whitespace() && c != '+');
    starts_word && has_content
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn render(text: &str) -> Result<String, FormatError> {
        RdocHtmlFormatter.format(text)
    }

    #[test]
    fn test_single_paragraph() {
        assert_eq!(render("Runs the thing.").unwrap(), "<p>Runs the thing.</p>");
    }

    #[test]
    fn test_blank_lines_split_paragraphs() {
        let html = render("First line\nstill first.\n\n\nSecond.").unwrap();
        assert_eq!(html, "<p>First line\nstill first.</p>\n<p>Second.</p>");
    }

    #[test]
    fn test_empty_docstring_renders_nothing() {
        assert_eq!(render("").unwrap(), "");
        assert_eq!(render("\n  \n").unwrap(), "");
    }

    #[rstest]
    #[case::code("Call +run+ first.", "<p>Call <tt>run</tt> first.</p>")]
    #[case::escaped_code("Use +a<b+", "<p>Use <tt>a&lt;b</tt></p>")]
    #[case::escapes("a < b && \"c\"", "<p>a &lt; b &amp;&amp; &quot;c&quot;</p>")]
    #[case::binary_plus("x + y", "<p>x + y</p>")]
    #[case::inside_word("x+1", "<p>x+1</p>")]
    #[case::doubled("C++ rocks", "<p>C++ rocks</p>")]
    fn test_inline_markup(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(render(input).unwrap(), expected);
    }

    #[test]
    fn test_unterminated_code_is_an_error() {
        let err = render("Fine.\n\nCall +run now").unwrap_err();
        assert_eq!(
            err,
            FormatError::Unterminated {
                marker: '+',
                offset: 12
            }
        );
    }
}
