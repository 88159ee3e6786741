//! Message extraction for catalog generation.
//!
//! - `extractor`: walks event streams and yields [`ExtractedMessage`]s
//! - `scanner`: finds gettext calls inside embedded expressions

pub mod extractor;
pub mod scanner;

pub use extractor::{ExtractedMessage, Extraction, Extractor, Message};
pub use scanner::{GETTEXT_FUNCTIONS, scan};
