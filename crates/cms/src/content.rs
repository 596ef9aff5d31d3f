//! Turns raw document bytes into a response body based on the file extension.

use std::path::Path;

use pulldown_cmark::{html, Options, Parser};

/// How a document is presented, picked from its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    PlainText,
    Html,
    Unsupported,
}

impl ContentKind {
    pub fn from_name(name: &str) -> Self {
        match Path::new(name).extension().and_then(|ext| ext.to_str()) {
            Some("txt") => ContentKind::PlainText,
            Some("md") => ContentKind::Html,
            _ => ContentKind::Unsupported,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub kind: ContentKind,
    pub content_type: &'static str,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("This file type is not supported.")]
pub struct UnsupportedContent;

/// Render `raw` for display.
///
/// Markdown output is not sanitized; any HTML embedded in a document is
/// passed through as written.
pub fn render(name: &str, raw: &[u8]) -> Result<RenderedContent, UnsupportedContent> {
    let kind = ContentKind::from_name(name);
    let text = String::from_utf8_lossy(raw);

    let (content_type, body) = match kind {
        ContentKind::PlainText => ("text/plain", text.into_owned()),
        ContentKind::Html => ("text/html", markdown_to_html(&text)),
        ContentKind::Unsupported => return Err(UnsupportedContent),
    };

    Ok(RenderedContent {
        kind,
        content_type,
        body,
    })
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
