//! geosearch CLI library.
//!
//! Command handlers, output rendering, and terminal styling for the
//! `geosearch-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
