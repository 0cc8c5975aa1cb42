//! Low-level parsing infrastructure for tree text.
//!
//! This module provides byte-level reading ([byte_parser]), the byte source
//! abstraction it reads from, and the [ParsingError] reported by the
//! [Newick parser](crate::newick::NewickParser).

pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;
pub mod utils;

pub use parsing_error::{ParsingError, ParsingErrorType};
