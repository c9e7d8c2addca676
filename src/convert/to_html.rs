//! Markdown to HTML, for editing and for the preview pane.

use comrak::Options;

/// Options for the editing conversion.
///
/// Raw HTML passes through: the output only feeds the rich-text surface,
/// whose reader keeps the supported subset and drops the rest.
fn editing_options() -> Options {
    let mut options = Options::default();
    options.render.unsafe_ = true;
    options
}

/// Options for the read-only preview.
pub fn preview_options() -> Options {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    options
}

/// Convert markdown to HTML for the rich-text surface.
pub fn markdown_to_html(markdown: &str) -> String {
    let html = comrak::markdown_to_html(markdown, &editing_options());
    html.trim_end().to_string()
}

/// Render markdown to HTML for display in the preview pane.
///
/// Raw HTML in the source is omitted.
pub fn render_markdown_to_html(markdown: &str) -> String {
    comrak::markdown_to_html(markdown, &preview_options())
}
