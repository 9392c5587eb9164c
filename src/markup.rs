//! Text rendering policies for bot answers.
//!
//! Exactly one [`TextPolicy`] is active per widget.  Both produce an HTML
//! fragment that is safe to assign to `innerHTML`: neither lets raw markup
//! from the answer through.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextPolicy {
    /// CommonMark (plus tables and strikethrough) with raw HTML escaped.
    Markdown,
    /// Escape everything, turn `\n` into `<br>`.
    LineBreaks,
}

impl TextPolicy {
    pub fn from_markdown_flag(markdown_enabled: bool) -> Self {
        if markdown_enabled {
            TextPolicy::Markdown
        } else {
            TextPolicy::LineBreaks
        }
    }

    pub fn render(self, text: &str) -> String {
        match self {
            TextPolicy::Markdown => render_markdown(text),
            TextPolicy::LineBreaks => escape_html(text).replace('\n', "<br>"),
        }
    }
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(text, options).map(|event| match event {
        // Raw HTML is shown as typed, never interpreted.
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_script_url(&url) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// `url` with script-capable schemes replaced by `#`.
pub(crate) fn safe_href(url: &str) -> &str {
    if is_script_url(url) {
        "#"
    } else {
        url
    }
}

/// Browsers drop ASCII tabs and newlines anywhere in a URL and trim leading
/// control characters and spaces, so `java\tscript:` still runs.  Compare the
/// scheme the way the browser will see it.
fn is_script_url(url: &str) -> bool {
    let scheme: String = url
        .trim_start_matches(|c: char| c.is_ascii_control() || c == ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .take_while(|c| *c != ':')
        .chain(std::iter::once(':'))
        .collect::<String>()
        .to_ascii_lowercase();
    ["javascript:", "vbscript:", "data:"].contains(&scheme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_breaks_become_br_and_nothing_else_is_markup() {
        let html = TextPolicy::LineBreaks.render("Hello\n<b>world</b> & **friends**");
        assert_eq!(
            html,
            "Hello<br>&lt;b&gt;world&lt;/b&gt; &amp; **friends**"
        );
    }

    #[test]
    fn markdown_formats_emphasis_and_lists() {
        let html = TextPolicy::Markdown.render("Some **bold** text\n\n- one\n- two");
        assert!(html.contains("<strong>bold</strong>"), "{html}");
        assert!(html.contains("<li>one</li>"), "{html}");
        assert!(!html.contains("<br>"));
    }

    #[test]
    fn markdown_escapes_raw_html() {
        let html = TextPolicy::Markdown.render("<script>alert(1)</script>\n\nok <em>inline</em>");
        assert!(!html.contains("<script>"), "{html}");
        assert!(html.contains("&lt;script&gt;"), "{html}");
        assert!(!html.contains("<em>"), "{html}");
    }

    #[test]
    fn markdown_neutralises_script_links() {
        let html = TextPolicy::Markdown.render("[click](javascript:alert(1)) [docs](https://example.com)");
        assert!(html.contains(r##"href="#""##), "{html}");
        assert!(html.contains(r#"href="https://example.com""#), "{html}");
        assert!(!html.contains("javascript:"), "{html}");
    }

    #[test]
    fn script_schemes_are_caught_through_whitespace_and_case() {
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href("  JavaScript:alert(1)"), "#");
        assert_eq!(safe_href("java\tscr\nipt:alert(1)"), "#");
        assert_eq!(safe_href("\u{1}vbscript:msgbox(1)"), "#");
        assert_eq!(safe_href("data:text/html,<script>"), "#");
        assert_eq!(safe_href("https://example.com/a?b=javascript:"), "https://example.com/a?b=javascript:");
        assert_eq!(safe_href("/relative/path"), "/relative/path");
    }

    #[test]
    fn flag_selects_exactly_one_policy() {
        assert_eq!(TextPolicy::from_markdown_flag(true), TextPolicy::Markdown);
        assert_eq!(TextPolicy::from_markdown_flag(false), TextPolicy::LineBreaks);
    }
}
