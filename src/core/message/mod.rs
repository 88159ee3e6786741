//! Message identifiers for mixed-content elements.

pub mod buffer;
pub mod parse;

pub use buffer::{MessageBuffer, Replay};
pub use parse::parse_msg;
