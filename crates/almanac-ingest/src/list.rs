//! Pipe-delimited list cells.
//!
//! Entity lists are split naively. Source lists use a quoted dialect so that
//! a citation may contain a literal `|`:
//!
//! ```text
//! https://a.example | "Minutes, item 4 | annex" | "He said ""no"""
//! ```
//!
//! A field that starts with `"` (after optional spaces) runs to the next
//! unescaped `"`, with `""` standing for one quote character.

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{alt, cut_err, preceded, repeat, separated, terminated},
    error::ModalResult,
    token::{none_of, take_till},
};

const DELIMITER: char = '|';

/// Splits an entity list on `|`, trimming items and dropping blanks.
pub(crate) fn split_entities(text: &str) -> Vec<String> {
    text.split(DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// The outcome of reading a source list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceList {
    pub items: Vec<String>,
    /// `true` when the quoted parse failed and the naive split was used.
    pub fell_back: bool,
}

/// Reads a source list, falling back to a naive split if quoting is broken.
pub(crate) fn split_sources(text: &str) -> SourceList {
    let (fields, fell_back) = match record.parse(text) {
        Ok(fields) => (fields, false),
        Err(_) => (text.split(DELIMITER).map(str::to_string).collect(), true),
    };

    let items = fields
        .iter()
        .map(|field| strip_quotes(field.trim()))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    SourceList { items, fell_back }
}

/// Removes one pair of enclosing quotes left over from a naive split.
fn strip_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(text)
}

/// `"..."` with `""` as an escaped quote.
fn quoted_field(input: &mut &str) -> ModalResult<String> {
    let content = repeat(0.., alt(("\"\"".value('"'), none_of('"')))).fold(
        String::new,
        |mut acc, ch| {
            acc.push(ch);
            acc
        },
    );

    // Commit after the opening quote so an unterminated field fails the record.
    preceded('"', cut_err(terminated(content, '"'))).parse_next(input)
}

fn unquoted_field(input: &mut &str) -> ModalResult<String> {
    take_till(0.., DELIMITER)
        .map(str::to_string)
        .parse_next(input)
}

fn field(input: &mut &str) -> ModalResult<String> {
    preceded(space0, alt((terminated(quoted_field, space0), unquoted_field))).parse_next(input)
}

fn record(input: &mut &str) -> ModalResult<Vec<String>> {
    separated(0.., field, DELIMITER).parse_next(input)
}
