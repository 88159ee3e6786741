//! Glossa - message extraction and translation for markup event streams
//!
//! Glossa is a CLI tool and library that finds translatable text in compiled
//! template streams and translates those streams. Mixed-content elements
//! marked with `i18n:msg` become single messages such as
//! `"Please see [1:Help] for details."`, so translators can reorder markup.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction and translation engine
//! - `issues`: Issue type definitions and reporting
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
