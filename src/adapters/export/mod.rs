//! Export adapters - Renderers for the document export ports.
//!
//! - `PdfRenderer` - Blocks to PDF (`printpdf`)
//! - `WordRenderer` - Blocks to .docx (`docx-rs`)
//! - `HtmlPreviewRenderer` - Markdown to an HTML fragment (`pulldown-cmark`)

mod html_preview;
mod pdf_renderer;
mod word_renderer;

pub use html_preview::HtmlPreviewRenderer;
pub use pdf_renderer::{PdfLayout, PdfRenderer};
pub use word_renderer::WordRenderer;
