//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse a Newick string into a
//! tree structure through a [TreeBuilder](crate::model::TreeBuilder), and
//! [to_newick] to write a [PhyloTree] back.
//!
//! # Quick API
//! * [`parse_str`] - parses a single string, returns a [PhyloTree]
//! * [`parse_file`] - parses a file holding one tree, returns a [PhyloTree]
//!
//! # Format
//! The accepted grammar:
//! * `tree ::= vertex [';']`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [name] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace and newlines can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels can be single-quoted, with `''` for a literal quote
//! * Comments are square brackets and can occur anywhere whitespace can;
//!   extended Newick annotations like `[&rate=0.5]` are treated as comments
//! * Leaf labels are mandatory and unique; internal names are optional
//! * Branch lengths are kept on vertices but play no role in the
//!   [cladogram layout](crate::layout)

mod defs;
pub mod parser;
pub mod writer;

pub use parser::NewickParser;
pub use writer::to_newick;

use crate::model::PhyloTree;
use crate::parser::byte_parser::ByteParser;
use crate::parser::ParsingError;
use log::info;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [PhyloTree].
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * [PhyloTree] - Tree parsed from the string
/// * [ParsingError] - If the string is not valid Newick format or leaf
///   labels are not unique
///
/// # Example
/// ```
/// use cladeview::newick::parse_str;
///
/// let tree = parse_str("(IGIB_01,(IGIB_02,IGIB_03));")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::default().parse_str(&mut byte_parser)
}

/// Parses a file containing a single Newick tree.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [PhyloTree] - Tree parsed from the file
/// * [ParsingError] - If file reading fails or the Newick format is invalid
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::from_file(&path)?;
    let tree = NewickParser::default().parse_str(&mut byte_parser)?;
    info!(
        "Loaded tree from {} with {} leaves ({} vertices)",
        path.as_ref().display(),
        tree.num_leaves(),
        tree.num_vertices()
    );
    Ok(tree)
}
