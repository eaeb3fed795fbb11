//! The owned invoice document tree.
//!
//! Templates and rendered invoices are explicit trees of paragraphs, runs,
//! tables, rows and cells. The tree is fully owned and deep-clonable, so
//! cloning a [`TableRow`] copies every cell, paragraph and run beneath it;
//! it is also serde-serializable, which is how templates are loaded and how
//! rendered documents are written out. It deliberately models only what the
//! engine touches: text content plus the minimal formatting that must
//! survive substitution and row cloning.

use serde::{Deserialize, Serialize};

/// A contiguous span of text carrying its own formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// The text content of the span.
    #[serde(default)]
    pub text: String,
    /// Bold formatting flag.
    #[serde(default)]
    pub bold: bool,
    /// Italic formatting flag.
    #[serde(default)]
    pub italic: bool,
}

impl Run {
    /// Creates an unformatted run with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            ..Run::default()
        }
    }
}

/// A paragraph: an ordered sequence of runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Named paragraph style, when the template carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// The runs making up the paragraph text.
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Creates a paragraph holding a single unformatted run.
    pub fn from_text(text: impl Into<String>) -> Self {
        Paragraph {
            style: None,
            runs: vec![Run::new(text)],
        }
    }

    /// The full paragraph text: the concatenation of all run texts.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Replaces the paragraph text.
    ///
    /// Every existing run keeps its place but has its text cleared; the new
    /// text lands in the first run so that run's formatting survives. A
    /// paragraph with no runs gains one.
    pub fn set_text(&mut self, text: &str) {
        for run in &mut self.runs {
            run.text.clear();
        }
        match self.runs.first_mut() {
            Some(first) => first.text.push_str(text),
            None => self.runs.push(Run::new(text)),
        }
    }
}

/// A single table cell: an ordered sequence of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// The paragraphs inside the cell.
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    /// Creates a cell holding a single paragraph of unformatted text.
    pub fn from_text(text: impl Into<String>) -> Self {
        TableCell {
            paragraphs: vec![Paragraph::from_text(text)],
        }
    }

    /// The full cell text: paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Writes a value into the cell.
    ///
    /// Every paragraph of the cell receives the value through
    /// [`Paragraph::set_text`], so per-paragraph formatting survives. A cell
    /// with no paragraphs gains one.
    pub fn set_text(&mut self, text: &str) {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::from_text(text));
            return;
        }
        for paragraph in &mut self.paragraphs {
            paragraph.set_text(text);
        }
    }
}

/// A table row: an ordered sequence of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// The cells of the row, left to right.
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Creates a row of single-paragraph cells from the given texts.
    pub fn from_texts<T: Into<String>>(texts: impl IntoIterator<Item = T>) -> Self {
        TableRow {
            cells: texts.into_iter().map(TableCell::from_text).collect(),
        }
    }
}

/// A table: an ordered sequence of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Named table style, when the template carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// The rows of the table, top to bottom.
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

/// A complete document: body paragraphs followed by tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Body paragraphs, in order.
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    /// Tables, in order.
    #[serde(default)]
    pub tables: Vec<Table>,
}
