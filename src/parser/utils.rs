//! Label escaping for writing Newick text.
//!
//! Sample identifiers are join keys and must survive a write/parse round
//! trip byte for byte. Unlike many Newick writers, spaces are therefore
//! never turned into underscores; such labels get quoted instead.

/// Characters that cannot appear in an unquoted Newick label.
const SPECIAL_CHARS: &[char] = &[' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Checks whether a label has to be wrapped in single quotes.
///
/// # Examples
/// ```
/// # use cladeview::parser::utils::needs_quoting;
/// assert!(!needs_quoting("IGIB_0042"));
/// assert!(needs_quoting("Chennai 2019"));
/// assert!(needs_quoting("DENV-2:AA"));
/// assert!(needs_quoting(""));
/// ```
pub fn needs_quoting(label: &str) -> bool {
    label.is_empty() || label.contains(SPECIAL_CHARS)
}

/// Escapes a label for safe use in a Newick string.
///
/// Labels containing special characters are wrapped in single quotes and
/// internal single quotes are doubled; all other labels are returned as-is.
///
/// # Examples
/// ```
/// # use cladeview::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quoting(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
