//! Export and preview handlers.

mod export_document;
mod preview_document;

pub use export_document::{ExportDocumentCommand, ExportDocumentHandler, ExportSource};
pub use preview_document::{PreviewDocumentHandler, PreviewDocumentQuery};
