//! File Converter Library
//!
//! Classifies files into coarse type labels, resolves which output formats
//! each label may be converted to, and runs the conversion: images are
//! re-encoded with `image`, PDFs are rewritten page-for-page with `lopdf`.

pub mod cli;
pub mod converter;
pub mod file_handler;
pub mod formats;
pub mod image_processor;
pub mod interactive;
pub mod output;
pub mod pdf_processor;
pub mod session;
pub mod types;

pub use converter::FileConverter;
pub use file_handler::{FileEntry, FileList};
pub use formats::resolve;
pub use session::{ConversionSession, OutputOptions, SelectionError};
pub use types::*;
