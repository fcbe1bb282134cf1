//! Export formats for card sets

pub mod document;
pub mod text;

pub use document::{build_document, render_document, CardPage, OptionLine, PrintDocument};
pub use text::export_text;
