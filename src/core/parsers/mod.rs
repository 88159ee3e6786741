//! File parsers for stream and catalog files.
//!
//! - `stream`: JSON event-stream files (`*.stream.json`)
//! - `catalog`: JSON message catalogs used by `translate`

pub mod catalog;
pub mod stream;
