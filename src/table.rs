//! In-memory table model shared by the loader, the projectors and the writer.
//!
//! A [`Table`] is an ordered list of column headers plus rows of
//! `serde_json::Value` cells. Positions matter: the upload schema fixes
//! both the column order and the full column set of every output sheet,
//! and reserved columns may all carry the same (empty) header, so columns
//! are addressed by index internally and by header text at the seams.
//!
//! Cell coercion helpers live here too. They are lenient by design:
//! numbers may arrive as strings with thousands separators, and anything
//! that cannot be coerced yields `None` rather than an error.

use serde_json::Value;

static NULL: Value = Value::Null;

/// A named, ordered, in-memory table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given ordered headers.
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ordered column headers.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in original order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Index of the first column with this exact header text.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell by row index and header text. Missing columns and ragged rows
    /// read as null, never as an error.
    pub fn cell(&self, row: usize, name: &str) -> &Value {
        self.column_index(name)
            .and_then(|col| self.rows.get(row).and_then(|r| r.get(col)))
            .unwrap_or(&NULL)
    }

    /// Append a row, padding or truncating to the table width.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// Overwrite one cell by position.
    pub fn set_cell(&mut self, row: usize, col: usize, value: Value) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    /// Rewrite a column header in place, preserving its position.
    pub fn rename_column(&mut self, index: usize, name: impl Into<String>) {
        if let Some(col) = self.columns.get_mut(index) {
            *col = name.into();
        }
    }

    /// All values of one column, null-padded to the table length.
    pub fn column_values(&self, name: &str) -> Vec<&Value> {
        match self.column_index(name) {
            Some(col) => self
                .rows
                .iter()
                .map(|r| r.get(col).unwrap_or(&NULL))
                .collect(),
            None => vec![&NULL; self.rows.len()],
        }
    }
}

// =============================================================================
// Cell coercion helpers
// =============================================================================

/// The text of a cell, if it is text.
pub fn cell_text(value: &Value) -> Option<&str> {
    value.as_str()
}

/// Numeric view of a cell: numbers directly, numeric strings leniently
/// (whitespace and thousands separators stripped).
pub fn cell_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

/// Render a cell for concatenation: nulls become the empty string, not
/// sentinel text like "nan".
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Build a number cell, mapping non-finite results to null.
pub fn number_cell(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// True if the cell is null or blank text.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
