//! Auto-escaping HTML fragment builder
//!
//! Tag and attribute names are `&'static str`, so they can only come from code.
//! Every text node and attribute value passes through [`escape`]; the builder is
//! the only thing that ever writes raw markup.

use std::fmt::Write;

#[derive(Debug, Default)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<tag attrs>` + body + `</tag>`
    pub fn elem<F>(&mut self, tag: &'static str, attrs: &[(&'static str, &str)], body: F) -> &mut Self
    where
        F: FnOnce(&mut Markup),
    {
        self.open_tag(tag, attrs);
        body(self);
        let _ = write!(self.buf, "</{}>", tag);
        self
    }

    /// Element whose only child is escaped text
    pub fn text_elem(
        &mut self,
        tag: &'static str,
        attrs: &[(&'static str, &str)],
        text: &str,
    ) -> &mut Self {
        self.elem(tag, attrs, |m| {
            m.text(text);
        })
    }

    /// Element without children or closing tag (`img`, `br`, `hr`)
    pub fn void_elem(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) -> &mut Self {
        self.open_tag(tag, attrs);
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        escape_into(&mut self.buf, text);
        self
    }

    /// Escaped text with line breaks preserved as `<br>`
    pub fn multiline(&mut self, text: &str) -> &mut Self {
        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                self.buf.push_str("<br>");
            }
            escape_into(&mut self.buf, line);
        }
        self
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn open_tag(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            escape_into(&mut self.buf, value);
            self.buf.push('"');
        }
        self.buf.push('>');
    }
}

/// Escape text for use in element content or a quoted attribute value
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    escape_into(&mut out, input);
    out
}

fn escape_into(out: &mut String, input: &str) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
}

/// Accept only http(s) URLs and site-relative paths for `href`/`src`
pub fn safe_url(url: &str) -> Option<&str> {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        return Some(url);
    }
    if !url.is_empty() && !url.starts_with("//") && !lower.contains(':') {
        return Some(url);
    }
    None
}
