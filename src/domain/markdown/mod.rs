//! Markdown block model shared by the exporters.

mod block;
mod parser;

pub use block::Block;
pub use parser::parse_blocks;
