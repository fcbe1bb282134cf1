//! Inline markup handling for flashcard text
//!
//! Card fronts and backs may carry a small allow-listed set of inline
//! tags: `<strong>`, `<em>`, `<mark>`. Everything else is stripped
//! when cards are ingested from the AI response, not only at render
//! time. Exports strip all markup down to plain text.

use regex::Regex;

/// Reduce rich text to the allow-listed inline tags.
///
/// Script and style bodies are dropped entirely. Allow-listed tags are
/// normalized (attributes removed); any other tag is removed while its
/// text content is kept.
pub fn sanitize_inline_markup(input: &str) -> String {
    let script_re = Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)>").unwrap();
    let text = script_re.replace_all(input, "").to_string();

    let tag_re = Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)[^>]*>").unwrap();
    tag_re
        .replace_all(&text, |caps: &regex::Captures| {
            let closing = &caps[1];
            let name = caps[2].to_lowercase();
            match name.as_str() {
                "strong" | "em" | "mark" => format!("<{}{}>", closing, name),
                _ => String::new(),
            }
        })
        .to_string()
}

/// Strip all markup and decode common entities, for plain-text output
pub fn strip_markup(input: &str) -> String {
    let tag_re = Regex::new(r"<[^>]+>").unwrap();
    let text = tag_re.replace_all(input, "").to_string();

    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}
