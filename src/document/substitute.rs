//! Placeholder substitution over a document tree.
//!
//! Tokens (e.g. `[company_name]`, bracket delimiters included) are replaced
//! with their values in every body paragraph and in every paragraph of every
//! table cell. Substitution works on the concatenated paragraph text, so a
//! token split across run boundaries is still found; a paragraph that
//! changes collapses its text into the first run. Tokens with no map entry
//! are left in place, silently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::node::{Document, Paragraph, Table};

/// An ordered token-to-replacement map.
///
/// Tokens carry their bracket delimiters. Entries iterate in token order,
/// but since each pass replaces every occurrence of every token, insertion
/// order never affects the outcome.
///
/// # Example
///
/// ```
/// use invoice_engine::document::PlaceholderMap;
///
/// let mut placeholders = PlaceholderMap::new();
/// placeholders.insert("[company_name]", "Acme Exports");
/// assert_eq!(placeholders.get("[company_name]"), Some("Acme Exports"));
/// assert_eq!(placeholders.get("[GST]"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderMap {
    entries: BTreeMap<String, String>,
}

impl PlaceholderMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        PlaceholderMap::default()
    }

    /// Inserts a token/replacement pair, overwriting any previous value.
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(token.into(), value.into());
    }

    /// Looks up the replacement for a token.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Iterates over `(token, replacement)` pairs in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(token, value)| (token.as_str(), value.as_str()))
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaceholderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PlaceholderMap::new();
        for (token, value) in iter {
            map.insert(token, value);
        }
        map
    }
}

/// Substitutes placeholders in one paragraph.
///
/// Returns true when the paragraph text changed. The replacement text is
/// written back through [`Paragraph::set_text`], so an untouched paragraph
/// keeps its run structure intact.
pub fn substitute_paragraph(paragraph: &mut Paragraph, placeholders: &PlaceholderMap) -> bool {
    let original = paragraph.text();
    let mut text = original.clone();
    for (token, value) in placeholders.iter() {
        if text.contains(token) {
            text = text.replace(token, value);
        }
    }
    if text == original {
        return false;
    }
    paragraph.set_text(&text);
    true
}

fn substitute_table(table: &mut Table, placeholders: &PlaceholderMap) {
    for row in &mut table.rows {
        for cell in &mut row.cells {
            for paragraph in &mut cell.paragraphs {
                substitute_paragraph(paragraph, placeholders);
            }
        }
    }
}

/// Substitutes placeholders across the whole document tree.
///
/// One pass replaces every occurrence of every token in body paragraphs and
/// table cells. Callers expanding employee rows must do so before this pass
/// so the cloned rows are substituted too.
///
/// # Example
///
/// ```
/// use invoice_engine::document::{Document, Paragraph, PlaceholderMap, substitute};
///
/// let mut document = Document {
///     paragraphs: vec![Paragraph::from_text("Bill to [company_name]")],
///     tables: vec![],
/// };
/// let placeholders = PlaceholderMap::from_iter([("[company_name]", "Acme Exports")]);
///
/// substitute(&mut document, &placeholders);
/// assert_eq!(document.paragraphs[0].text(), "Bill to Acme Exports");
/// ```
pub fn substitute(document: &mut Document, placeholders: &PlaceholderMap) {
    for paragraph in &mut document.paragraphs {
        substitute_paragraph(paragraph, placeholders);
    }
    for table in &mut document.tables {
        substitute_table(table, placeholders);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::{Run, TableCell, TableRow};
    use proptest::prelude::*;

    fn sample_map() -> PlaceholderMap {
        PlaceholderMap::from_iter([
            ("[company_name]", "Acme Exports"),
            ("[PO number]", "PO-2026-001"),
            ("[TIA]", "₹472.00"),
        ])
    }

    /// SUB-001: a token split across run boundaries is still replaced.
    #[test]
    fn test_token_split_across_runs_is_replaced() {
        let mut paragraph = Paragraph {
            style: None,
            runs: vec![
                Run::new("Bill to [comp"),
                Run::new("any_"),
                Run::new("name], thanks"),
            ],
        };

        let changed = substitute_paragraph(&mut paragraph, &sample_map());

        assert!(changed);
        assert_eq!(paragraph.text(), "Bill to Acme Exports, thanks");
        assert_eq!(paragraph.runs.len(), 3);
        assert_eq!(paragraph.runs[1].text, "");
    }

    /// SUB-002: every occurrence of a token is replaced in one pass.
    #[test]
    fn test_repeated_token_fully_replaced() {
        let mut paragraph = Paragraph::from_text("[PO number] / ref [PO number]");
        substitute_paragraph(&mut paragraph, &sample_map());
        assert_eq!(paragraph.text(), "PO-2026-001 / ref PO-2026-001");
    }

    /// SUB-003: tokens without a map entry survive literally.
    #[test]
    fn test_unmatched_token_left_in_place() {
        let mut paragraph = Paragraph::from_text("GSTIN: [GST]");
        let changed = substitute_paragraph(&mut paragraph, &sample_map());
        assert!(!changed);
        assert_eq!(paragraph.text(), "GSTIN: [GST]");
    }

    #[test]
    fn test_untouched_paragraph_keeps_run_structure() {
        let mut paragraph = Paragraph {
            style: None,
            runs: vec![Run::new("plain "), Run::new("text")],
        };
        substitute_paragraph(&mut paragraph, &sample_map());
        assert_eq!(paragraph.runs[0].text, "plain ");
        assert_eq!(paragraph.runs[1].text, "text");
    }

    #[test]
    fn test_substitute_reaches_table_cells() {
        let mut document = Document {
            paragraphs: vec![Paragraph::from_text("Total: [TIA]")],
            tables: vec![Table {
                style: None,
                rows: vec![TableRow {
                    cells: vec![
                        TableCell::from_text("PO: [PO number]"),
                        TableCell::from_text("[TIA]"),
                    ],
                }],
            }],
        };

        substitute(&mut document, &sample_map());

        assert_eq!(document.paragraphs[0].text(), "Total: ₹472.00");
        assert_eq!(document.tables[0].rows[0].cells[0].text(), "PO: PO-2026-001");
        assert_eq!(document.tables[0].rows[0].cells[1].text(), "₹472.00");
    }

    #[test]
    fn test_empty_map_is_a_no_op() {
        let mut document = Document {
            paragraphs: vec![Paragraph::from_text("Bill to [company_name]")],
            tables: vec![],
        };
        substitute(&mut document, &PlaceholderMap::new());
        assert_eq!(document.paragraphs[0].text(), "Bill to [company_name]");
    }

    /// SUB-004: a second pass changes nothing when no replacement value
    /// contains a token.
    #[test]
    fn test_second_pass_is_idempotent() {
        let mut document = Document {
            paragraphs: vec![
                Paragraph::from_text("[company_name] / [PO number]"),
                Paragraph::from_text("Total [TIA] ([TIA])"),
            ],
            tables: vec![],
        };

        substitute(&mut document, &sample_map());
        let after_first = document.clone();
        substitute(&mut document, &sample_map());

        assert_eq!(document, after_first);
    }

    proptest! {
        /// SUB-005: with values that can never embed a token, one pass
        /// replaces everything and a second pass is a no-op.
        #[test]
        fn prop_single_pass_replaces_everything(
            values in proptest::collection::vec("[A-Za-z0-9 ]{0,12}", 3),
            pieces in proptest::collection::vec(
                prop_oneof![
                    (0usize..3).prop_map(Piece::Token),
                    "[A-Za-z0-9 .,:]{0,10}".prop_map(Piece::Literal),
                ],
                0..8,
            ),
        ) {
            let tokens = ["[alpha]", "[beta]", "[gamma]"];
            let placeholders: PlaceholderMap = tokens
                .iter()
                .zip(values.iter())
                .map(|(token, value)| (token.to_string(), value.clone()))
                .collect();

            let mut template = String::new();
            let mut expected = String::new();
            for piece in &pieces {
                match piece {
                    Piece::Token(i) => {
                        template.push_str(tokens[*i]);
                        expected.push_str(&values[*i]);
                    }
                    Piece::Literal(text) => {
                        template.push_str(text);
                        expected.push_str(text);
                    }
                }
            }

            let mut paragraph = Paragraph::from_text(template);
            substitute_paragraph(&mut paragraph, &placeholders);
            prop_assert_eq!(paragraph.text(), expected);

            let before_second = paragraph.clone();
            substitute_paragraph(&mut paragraph, &placeholders);
            prop_assert_eq!(paragraph, before_second);
        }
    }

    #[derive(Debug, Clone)]
    enum Piece {
        Token(usize),
        Literal(String),
    }
}
