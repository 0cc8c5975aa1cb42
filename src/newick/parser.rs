//! Structs and logic to parse a Newick string.
//!
//! This module provides the [NewickParser] struct, which builds one tree
//! from a [ByteParser] through a [TreeBuilder].

use crate::model::sample_id::SampleId;
use crate::model::tree_builder::TreeBuilder;
use crate::model::vertex::BranchLength;
use crate::model::PhyloTreeBuilder;
use crate::newick::defs::{DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use log::debug;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for a single rooted Newick tree with any number of
/// children per vertex.
///
/// Generic over [TreeBuilder] (construction).
///
/// # Construction
/// * [`new(tree_builder)`](Self::new) — generic constructor
/// * [`default()`](Self::default) — uses [PhyloTreeBuilder]
///
/// # Configuration
/// * [`with_num_leaves(num_leaves)`](Self::with_num_leaves)
///     - Capacity hint for the number of leaves in the tree to parse
///
/// # Parsing
/// The parser does not recurse: open parentheses are kept on an explicit
/// stack, so trees of any height parse without exhausting the call stack.
///
/// # Example
/// ```
/// use cladeview::newick::NewickParser;
/// use cladeview::parser::byte_parser::ByteParser;
///
/// let input = "(A:0.1,(B:0.2,C:0.3):0.15):0.0";
/// let mut byte_parser = ByteParser::for_str(input);
/// let tree = NewickParser::default().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub struct NewickParser<T: TreeBuilder> {
    num_leaves: usize,
    tree_builder: T,
}

/// An open `(` whose children are still being read.
struct OpenVertex<V> {
    children: Vec<V>,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Creates a new [NewickParser] with the given tree builder.
    pub fn new(tree_builder: T) -> Self {
        Self {
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
            tree_builder,
        }
    }

    /// Sets the expected number of leaves in the parsed tree.
    ///
    /// Only used to pre-allocate the tree; a wrong guess is harmless.
    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves = num_leaves;
        self
    }
}

impl Default for NewickParser<PhyloTreeBuilder> {
    fn default() -> Self {
        Self::new(PhyloTreeBuilder::new())
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// The terminating `;` is optional. After the tree only whitespace and
    /// comments may follow.
    ///
    /// # Returns
    /// * `Ok(T::Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid or a leaf
    ///   label is used twice
    pub fn parse_str<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::Tree, ParsingError> {
        self.tree_builder.init_next(self.num_leaves);

        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::empty_input(parser));
        }

        let root = self.parse_vertices(parser)?;
        self.parse_end(parser)?;
        debug!("Parsed Newick tree of {} bytes", parser.position());

        self.tree_builder
            .finish_tree(root)
            .ok_or_else(|| ParsingError::unexpected_eof(parser))
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses the whole vertex structure and returns the root:
    /// - `(` opens a vertex and pushes it on the stack
    /// - a label starts a leaf
    /// - `,` attaches the finished vertex to the innermost open vertex
    /// - `)` attaches it and closes the innermost open vertex, which is
    ///   then finished with its optional name and branch length
    fn parse_vertices<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::VertexIdx, ParsingError> {
        let mut open: Vec<OpenVertex<T::VertexIdx>> = Vec::new();

        loop {
            // Expect start of a vertex
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b'(') {
                open.push(OpenVertex { children: Vec::new() });
                continue;
            }
            let mut finished = self.parse_leaf(parser, open.last())?;

            // Attach finished vertices until a sibling follows or the root is done
            loop {
                parser.skip_comment_and_whitespace()?;
                let Some(top) = open.last_mut() else {
                    return Ok(finished);
                };

                match parser.peek() {
                    Some(b',') => {
                        parser.next_byte();
                        top.children.push(finished);
                        break;
                    }
                    Some(b')') => {
                        parser.next_byte();
                        top.children.push(finished);
                        let children = open.pop().map(|v| v.children).unwrap_or_default();
                        finished = self.parse_internal_suffix(parser, children)?;
                    }
                    None => return Err(ParsingError::unexpected_eof(parser)),
                    Some(b) => {
                        return Err(ParsingError::invalid_newick_string(
                            parser,
                            format!("Expected ',' or ')' after vertex but found {:?}", char::from(b)),
                        ));
                    }
                }
            }
        }
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `label[:branch_length]`
    /// - Expects parser at start of label
    ///
    /// `parent` is the innermost open vertex, used to tell an empty child
    /// list `()` apart from a missing label.
    fn parse_leaf<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        parent: Option<&OpenVertex<T::VertexIdx>>,
    ) -> Result<T::VertexIdx, ParsingError> {
        match parser.peek() {
            None => return Err(ParsingError::unexpected_eof(parser)),
            Some(b')') if parent.is_some_and(|p| p.children.is_empty()) => {
                return Err(ParsingError::empty_child_list(parser));
            }
            _ => {}
        }

        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let sample_id = SampleId::new(label).ok_or_else(|| ParsingError::empty_label(parser))?;
        let branch_length = self.parse_branch_length(parser)?;

        self.tree_builder
            .add_leaf(sample_id, branch_length)
            .map_err(|e| ParsingError::duplicate_label(parser, e.id.to_string()))
    }

    /// Parses what follows a closing `)`, i.e. `[name][:branch_length]`,
    /// and adds the internal vertex to the tree.
    fn parse_internal_suffix<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        children: Vec<T::VertexIdx>,
    ) -> Result<T::VertexIdx, ParsingError> {
        let name = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let name = if name.is_empty() { None } else { Some(name) };
        let branch_length = self.parse_branch_length(parser)?;
        Ok(self.tree_builder.add_internal(children, name, branch_length))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a branch length and was able to parse it
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if the value is not a finite number; negative values
    ///   are accepted
    fn parse_branch_length<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                branch_length_str.push(char::from(b));
                parser.next_byte();
            } else {
                break;
            }
        }

        branch_length_str
            .parse::<f64>()
            .ok()
            .and_then(BranchLength::new)
            .map(Some)
            .ok_or_else(|| ParsingError::invalid_branch_length(parser, branch_length_str))
    }

    /// Consumes the optional terminating `;` and checks nothing but
    /// whitespace and comments follows.
    fn parse_end<B: ByteSource>(&mut self, parser: &mut ByteParser<B>) -> Result<(), ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.peek_is(b')') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                "Unbalanced ')' without matching '('".to_string(),
            ));
        }
        parser.consume_if(b';');
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            Ok(())
        } else {
            Err(ParsingError::trailing_content(parser))
        }
    }
}
