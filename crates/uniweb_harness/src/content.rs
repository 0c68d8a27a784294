//! Declarative builder for section documents (front matter + markdown body).
//!
//! ```
//! use uniweb_harness::ContentBuilder;
//!
//! let doc = ContentBuilder::new()
//!     .component("Hero")
//!     .title("Welcome")
//!     .paragraph("Hello there.")
//!     .build();
//!
//! assert_eq!(doc, "---\ncomponent: Hero\n---\n\n# Welcome\n\nHello there.");
//! ```

use std::fmt;

/// Builds a content document. Rendering is deterministic: front matter keys
/// keep their first-declaration order and body blocks keep call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBuilder {
    front_matter: Vec<(String, String)>,
    blocks: Vec<String>,
}

impl ContentBuilder {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `component` front matter key.
    pub fn component(self, name: &str) -> Self {
        self.param("component", name)
    }

    /// Set a front matter key. A repeated key keeps its position and takes
    /// the latest value.
    pub fn param(mut self, key: &str, value: impl fmt::Display) -> Self {
        let value = value.to_string();
        match self.front_matter.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.front_matter.push((key.to_string(), value)),
        }
        self
    }

    /// `# text`
    pub fn title(self, text: &str) -> Self {
        self.heading(1, text)
    }

    /// `level` hashes, a space, then `text`.
    pub fn heading(mut self, level: usize, text: &str) -> Self {
        self.blocks.push(format!("{} {}", "#".repeat(level.max(1)), text));
        self
    }

    /// A paragraph, verbatim.
    pub fn paragraph(mut self, text: &str) -> Self {
        self.blocks.push(text.to_string());
        self
    }

    /// One `- item` line per element.
    pub fn list<S: AsRef<str>>(mut self, items: &[S]) -> Self {
        let lines: Vec<String> = items.iter().map(|i| format!("- {}", i.as_ref())).collect();
        self.blocks.push(lines.join("\n"));
        self
    }

    /// `![alt](src)`
    pub fn image(mut self, src: &str, alt: &str) -> Self {
        self.blocks.push(format!("![{}]({})", alt, src));
        self
    }

    /// `[text](url)`, suffixed with `{key=value ...}` when `attrs` is non-empty.
    pub fn link(mut self, text: &str, url: &str, attrs: &[(&str, &str)]) -> Self {
        let mut block = format!("[{}]({})", text, url);
        if !attrs.is_empty() {
            let rendered: Vec<String> = attrs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            block.push_str(&format!("{{{}}}", rendered.join(" ")));
        }
        self.blocks.push(block);
        self
    }

    /// A fenced code block.
    pub fn code(mut self, lang: &str, source: &str) -> Self {
        self.blocks.push(format!("```{}\n{}\n```", lang, source));
        self
    }

    /// A block inserted as-is.
    pub fn raw(mut self, text: &str) -> Self {
        self.blocks.push(text.to_string());
        self
    }

    /// Render the document.
    ///
    /// With front matter: `---`, one `key: value` line per key, `---`, a blank
    /// line, then the body. Without: just the body. Body blocks are separated
    /// by one blank line.
    pub fn build(&self) -> String {
        let body = self.blocks.join("\n\n");
        if self.front_matter.is_empty() {
            return body;
        }

        let mut out = String::from("---\n");
        for (key, value) in &self.front_matter {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        out.push_str("---\n\n");
        out.push_str(&body);
        out
    }
}

impl fmt::Display for ContentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
