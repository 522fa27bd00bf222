//! crates/site_builder_core/src/components/preview_frame.rs
//!
//! Live preview: the fetched document inside an isolated frame.

use crate::markup::escape_html;

/// Reset stylesheet placed ahead of every previewed document.
pub const RESET_STYLES: &str = r#"<style>
  html, body {
    margin: 0;
    padding: 0;
    height: 100%;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    overflow-x: hidden;
  }
  body {
    display: flex;
    flex-direction: column;
    align-items: center;
    padding: 10px 20px;
    box-sizing: border-box;
    min-height: 100vh;
  }
  body > * {
    margin-top: 0 !important;
  }
  body > *:first-child {
    margin-top: 0 !important;
    padding-top: 0 !important;
  }
</style>
"#;

pub const FRAME_TITLE: &str = "Live Preview";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewFrame {
    Loading,
    /// Nothing generated yet.
    Placeholder,
    Document { srcdoc: String },
}

impl PreviewFrame {
    pub fn from_state(loading: bool, document: &str) -> Self {
        if loading {
            PreviewFrame::Loading
        } else if document.trim().is_empty() {
            PreviewFrame::Placeholder
        } else {
            PreviewFrame::Document {
                srcdoc: format!("{}{}", RESET_STYLES, document),
            }
        }
    }

    /// Markup for embedding the frame in a page.
    pub fn to_html(&self) -> String {
        match self {
            PreviewFrame::Loading => r#"<div class="preview-loading">Loading preview...</div>"#.to_string(),
            PreviewFrame::Placeholder => {
                r#"<div class="preview-empty">No preview yet - generate some code in the chat first</div>"#
                    .to_string()
            }
            PreviewFrame::Document { srcdoc } => format!(
                r#"<iframe title="{}" srcdoc="{}" style="border:0;width:100%;height:100%;background-color:white;min-height:100%"></iframe>"#,
                FRAME_TITLE,
                escape_html(srcdoc)
            ),
        }
    }
}
