//! Allow-list markup filter applied to every text output before display.
//!
//! Content comes from trusted templates, so plain text passes through
//! untouched. Tags are checked against [`ALLOWED_TAGS`] and their attributes
//! against [`ALLOWED_ATTRIBUTES`]; anything else is escaped into literal text
//! rather than dropped.

use regex::Regex;
use std::sync::LazyLock;

pub const ALLOWED_TAGS: &[&str] = &["span", "br", "div", "a", "strong", "em", "i", "svg", "path", "rect"];

pub const ALLOWED_ATTRIBUTES: &[&str] =
    &["class", "href", "target", "rel", "width", "height", "fill", "viewBox", "style", "d", "xmlns", "color", "rx"];

/// Inline marker replaced by [`LINKEDIN_ICON`]
pub const LINKEDIN_MARKER: &str = "{linkedinIcon}";

pub const LINKEDIN_ICON: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 448 448" style="vertical-align:middle;">"#,
    r##"<rect width="448" height="448" rx="64" fill="#0A66C2"/>"##,
    r##"<path d="M100.28 150.64h60.84v195.82h-60.84zM130.7 75.85c19.43 0 35.17 15.75 35.17 35.17s-15.74 35.17-35.17 35.17-35.17-15.75-35.17-35.17 15.74-35.17 35.17-35.17zm69.43 74.79h58.34v26.77h.83c8.12-15.38 27.98-31.59 57.57-31.59 61.56 0 72.93 40.52 72.93 93.21v107.43h-60.62V251.8c0-22.68-.43-51.83-31.59-51.83-31.63 0-36.45 24.69-36.45 50.18v96.31h-60.41V150.64z" fill="#fff"/>"##,
    "</svg>",
);

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));

static TAG_PARTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(/?)([A-Za-z][A-Za-z0-9]*)([^>]*?)(/?)>$").expect("tag parts pattern"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).expect("attribute pattern")
});

/// Escape `& < > " '` for literal display
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Filter markup through the tag and attribute allow-lists
pub fn sanitize(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut last = 0;

    for tag in TAG.find_iter(markup) {
        out.push_str(&markup[last..tag.start()]);
        out.push_str(&filter_tag(tag.as_str()));
        last = tag.end();
    }
    out.push_str(&markup[last..]);
    out
}

/// Sanitize around the icon marker and splice the icon in unsanitized
pub fn render_safe(markup: &str) -> String {
    markup.split(LINKEDIN_MARKER).map(sanitize).collect::<Vec<_>>().join(LINKEDIN_ICON)
}

struct Attribute<'a> {
    name: &'a str,
    value: Option<&'a str>,
}

impl Attribute<'_> {
    fn is_allowed(&self) -> bool {
        if !ALLOWED_ATTRIBUTES.iter().any(|a| a.eq_ignore_ascii_case(self.name)) {
            return false;
        }
        !(self.name.eq_ignore_ascii_case("href") && self.value.is_some_and(is_script_url))
    }
}

fn is_script_url(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace() && !c.is_control()).collect();
    compact.to_ascii_lowercase().starts_with("javascript:")
}

fn filter_tag(tag: &str) -> String {
    let Some(parts) = TAG_PARTS.captures(tag) else {
        tracing::trace!(tag, "escaping unparseable tag");
        return escape_html(tag);
    };

    let name = &parts[2];
    if !ALLOWED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name)) {
        tracing::debug!(tag = name, "escaping disallowed tag");
        return escape_html(tag);
    }

    let closing = !parts[1].is_empty();
    let self_closing = !parts[4].is_empty();
    let attributes: Vec<Attribute> = ATTRIBUTE
        .captures_iter(&parts[3])
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)).map(|m| m.as_str());
            Some(Attribute { name, value })
        })
        .collect();

    if attributes.iter().all(Attribute::is_allowed) && !(closing && !attributes.is_empty()) {
        return tag.to_string();
    }

    if closing {
        return format!("</{}>", name);
    }

    let mut rebuilt = format!("<{}", name);
    for attribute in attributes.iter().filter(|a| a.is_allowed()) {
        match attribute.value {
            Some(value) => rebuilt.push_str(&format!(" {}=\"{}\"", attribute.name, value.replace('"', "&quot;"))),
            None => rebuilt.push_str(&format!(" {}", attribute.name)),
        }
    }
    rebuilt.push_str(if self_closing { "/>" } else { ">" });
    rebuilt
}
