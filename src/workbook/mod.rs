//! Spreadsheet I/O: the Table Loader and the workbook writer.
//!
//! The loader reads the two named input sheets (`Sheet1`, `Sheet2`) into
//! [`Table`] values, preserving row order and column headers and
//! performing no transformation. The writer serializes a set of named
//! output tables into a fresh xlsx workbook, headers first, with no
//! styling — presentation belongs to the surrounding system.
//!
//! File handles are scoped to these calls; nothing stays open after a
//! read or write returns, on success or failure.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};
use log::debug;
use serde_json::Value;

use crate::error::{SourceFormatError, WorkbookResult};
use crate::table::Table;

/// Name of the transactions sheet in the source workbook.
pub const SHEET1: &str = "Sheet1";
/// Name of the tranches sheet in the source workbook.
pub const SHEET2: &str = "Sheet2";

// Excel's day-serial epoch (1900 date system).
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Read the two named input tables from a source workbook.
///
/// Fails with [`SourceFormatError::MissingSheet`] if either sheet is
/// absent. Everything else is left to the conversion core.
pub fn read_source_workbook(path: &Path) -> WorkbookResult<(Table, Table)> {
    let mut workbook = open_workbook_auto(path)?;

    let names = workbook.sheet_names().to_vec();
    for required in [SHEET1, SHEET2] {
        if !names.iter().any(|n| n == required) {
            return Err(SourceFormatError::MissingSheet(required.to_string()).into());
        }
    }

    let sheet1 = read_sheet(&mut workbook, SHEET1)?;
    let sheet2 = read_sheet(&mut workbook, SHEET2)?;
    debug!(
        "loaded {}: {} rows, {}: {} rows",
        SHEET1,
        sheet1.len(),
        SHEET2,
        sheet2.len()
    );
    Ok((sheet1, sheet2))
}

fn read_sheet<R>(workbook: &mut calamine::Sheets<R>, name: &str) -> WorkbookResult<Table>
where
    R: std::io::Read + std::io::Seek,
{
    let range = workbook.worksheet_range(name)?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| SourceFormatError::NoHeaders(name.to_string()))?;

    let headers: Vec<String> = header_row.iter().map(header_text).collect();
    let mut table = Table::new(headers);

    for row in rows {
        let cells: Vec<Value> = row.iter().map(cell_value).collect();
        // Fully-empty trailing rows carry no data.
        if cells.iter().all(Value::is_null) {
            continue;
        }
        table.push_row(cells);
    }

    Ok(table)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Convert a calamine cell into the pipeline's cell currency.
///
/// Blank text reads as null (the source treats empty cells and empty
/// strings interchangeably). Date-typed cells become ISO date strings;
/// downstream date coercion re-parses them alongside free-text dates.
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Null
            } else {
                Value::String(trimmed.to_string())
            }
        }
        Data::Float(f) => crate::table::number_cell(*f),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match serial_to_date(dt.as_f64()) {
            Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            None => Value::Null,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

/// Excel day serial to a calendar date. Serials at or below zero and
/// out-of-range values read as none.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= 0.0 {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

// =============================================================================
// Writer
// =============================================================================

/// Write named tables to a new xlsx workbook, one sheet per table, in
/// the given order. Every sheet gets its header row even when empty.
pub fn write_workbook(path: &Path, tables: &[(String, Table)]) -> WorkbookResult<()> {
    let mut workbook = rust_xlsxwriter::Workbook::new();

    for (name, table) in tables {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;

        for (col, header) in table.columns().iter().enumerate() {
            worksheet.write_string(0, col as u16, header)?;
        }

        for (row_idx, row) in table.rows().iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Value::Null => {}
                    Value::String(s) => {
                        worksheet.write_string(excel_row, col, s)?;
                    }
                    Value::Number(n) => {
                        if let Some(f) = n.as_f64() {
                            worksheet.write_number(excel_row, col, f)?;
                        }
                    }
                    Value::Bool(b) => {
                        worksheet.write_boolean(excel_row, col, *b)?;
                    }
                    other => {
                        worksheet.write_string(excel_row, col, &other.to_string())?;
                    }
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
