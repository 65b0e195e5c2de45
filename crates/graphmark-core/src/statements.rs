//! Statement-file parsing.

use std::fs;
use std::path::Path;

/// Split a statement file into trimmed, non-empty statements.
///
/// Statements are separated by `;`; surrounding whitespace (spaces, tabs,
/// CR, LF) is stripped, empty fragments are dropped, and file order is
/// preserved. A missing or unreadable file yields an empty vector rather
/// than an error; callers treat an empty result as a setup failure.
///
/// The format has no escaping: a `;` inside a string literal splits the
/// statement. Documented limitation.
pub fn parse_statement_file(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(text) => parse_statements(&text),
        Err(_) => Vec::new(),
    }
}

/// Split already-loaded statement text (see [`parse_statement_file`]).
pub fn parse_statements(text: &str) -> Vec<String> {
    text.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
