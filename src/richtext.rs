//! Helpers for the admin-authored rich text fields (descriptions, sections).
//!
//! Descriptions are edited as HTML in the dashboard and rendered as-is on the
//! storefront, so everything that reaches a page goes through [`sanitize`].

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\s*(/?)\s*([a-zA-Z][a-zA-Z0-9]*)([^<>]*)>").unwrap());
static SCRIPT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<\s*script[^>]*>.*?<\s*/\s*script\s*>").unwrap());
static STYLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<\s*style[^>]*>.*?<\s*/\s*style\s*>").unwrap());
static COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static HREF_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});
static ENTITY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^&(?:[a-zA-Z][a-zA-Z0-9]{1,31}|#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6});").unwrap());
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "b", "strong", "i", "em", "u", "s", "ul", "ol", "li", "h1", "h2", "h3", "h4",
    "h5", "h6", "blockquote", "span", "a",
];
const VOID_TAGS: &[&str] = &["br"];

/// Escapes text for use inside element content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes text but keeps well-formed character references intact.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, ch) in text.char_indices() {
        match ch {
            '&' if ENTITY_REGEX.is_match(&text[index..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

fn safe_href(attributes: &str) -> Option<String> {
    let captures = HREF_REGEX.captures(attributes)?;
    let href = captures
        .get(1)
        .or_else(|| captures.get(2))
        .or_else(|| captures.get(3))?
        .as_str()
        .trim();
    let lower = href.to_lowercase();
    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || href.starts_with('/')
    {
        Some(href.to_string())
    } else {
        None
    }
}

/// Keeps a small set of formatting tags (attributes dropped, links limited to
/// safe schemes) and escapes everything else. Unclosed tags are closed.
pub fn sanitize(html: &str) -> String {
    let html = SCRIPT_REGEX.replace_all(html, "");
    let html = STYLE_REGEX.replace_all(&html, "");
    let html = COMMENT_REGEX.replace_all(&html, "");

    let mut out = String::with_capacity(html.len());
    let mut open: Vec<String> = Vec::new();
    let mut cursor = 0;

    for captures in TAG_REGEX.captures_iter(&html) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        out.push_str(&escape_text(&html[cursor..whole.start()]));
        cursor = whole.end();

        let closing = !captures[1].is_empty();
        let name = captures[2].to_lowercase();
        if !ALLOWED_TAGS.contains(&name.as_str()) {
            continue;
        }

        if closing {
            if let Some(position) = open.iter().rposition(|tag| *tag == name) {
                while open.len() > position {
                    if let Some(tag) = open.pop() {
                        out.push_str(&format!("</{tag}>"));
                    }
                }
            }
            continue;
        }

        if VOID_TAGS.contains(&name.as_str()) {
            out.push_str(&format!("<{name}>"));
            continue;
        }

        if name == "a" {
            match safe_href(&captures[3]) {
                Some(href) => out.push_str(&format!(
                    "<a href=\"{}\" rel=\"nofollow noopener\">",
                    escape(&href)
                )),
                None => out.push_str("<a>"),
            }
        } else {
            out.push_str(&format!("<{name}>"));
        }
        open.push(name);
    }

    out.push_str(&escape_text(&html[cursor..]));
    while let Some(tag) = open.pop() {
        out.push_str(&format!("</{tag}>"));
    }
    out
}

/// Visible text of a rich text field, whitespace collapsed.
pub fn plain_text(html: &str) -> String {
    let html = SCRIPT_REGEX.replace_all(html, " ");
    let html = STYLE_REGEX.replace_all(&html, " ");
    let html = COMMENT_REGEX.replace_all(&html, " ");
    let text = TAG_REGEX.replace_all(&html, " ");
    let text = text.replace("&nbsp;", " ");
    WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}

/// Plain text cut to `max` characters, with an ellipsis when shortened.
pub fn excerpt(html: &str, max: usize) -> String {
    let text = plain_text(html);
    if text.chars().count() <= max {
        return text;
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}
