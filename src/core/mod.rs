//! Core i18n engine for markup event streams.
//!
//! ## Module Structure
//!
//! - `stream`, `code`, `directives`: the event data model
//! - `message`: message identifiers for mixed-content elements
//! - `extract`: pulling translatable messages out of a stream
//! - `translate`: translating a stream and expanding i18n directives
//! - `parsers`, `file_scanner`, `context`: loading files and running
//!   extraction over a source tree

pub mod code;
pub mod context;
pub mod directives;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod message;
pub mod options;
pub mod parsers;
pub mod stream;
pub mod translate;

pub use code::Code;
pub use directives::Directive;
pub use error::I18nError;
pub use options::Options;
pub use stream::{AttrValue, Attrs, Event, Pos, QName};
