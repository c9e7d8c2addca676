//! Conversions between the rich-text surface's HTML and markdown.
//!
//! The editor only depends on the [`Converter`] trait; [`ComrakConverter`]
//! is the default implementation built on comrak. The preview renderer is a
//! separate function because its output is for display only and uses a
//! different option set from the editing conversion.

mod to_html;
mod to_markdown;

use std::fmt;

use thiserror::Error;

pub use to_html::{markdown_to_html, preview_options, render_markdown_to_html};
pub use to_markdown::{document_to_markdown, html_to_markdown};

/// Direction of a conversion, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    HtmlToMarkdown,
    MarkdownToHtml,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlToMarkdown => f.write_str("HTML to markdown"),
            Self::MarkdownToHtml => f.write_str("markdown to HTML"),
        }
    }
}

/// A conversion that could not produce output.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to serialize markdown: {0}")]
    Serialize(#[from] std::io::Error),

    #[error("converted output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{direction} conversion failed: {reason}")]
    Failed {
        direction: Conversion,
        reason: String,
    },
}

impl ConvertError {
    pub fn failed(direction: Conversion, reason: impl Into<String>) -> Self {
        Self::Failed {
            direction,
            reason: reason.into(),
        }
    }
}

/// The two editing conversions the editor widget performs on mode toggles.
pub trait Converter {
    /// Convert rich-text HTML into markdown with ATX headings.
    fn html_to_markdown(&self, html: &str) -> Result<String, ConvertError>;

    /// Convert markdown into HTML the rich-text surface can load.
    fn markdown_to_html(&self, markdown: &str) -> Result<String, ConvertError>;
}

/// Default converter backed by comrak.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakConverter;

impl Converter for ComrakConverter {
    fn html_to_markdown(&self, html: &str) -> Result<String, ConvertError> {
        html_to_markdown(html)
    }

    fn markdown_to_html(&self, markdown: &str) -> Result<String, ConvertError> {
        Ok(markdown_to_html(markdown))
    }
}

#[cfg(test)]
mod tests;
