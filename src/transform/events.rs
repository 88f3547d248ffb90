//! Event Unifier: six date-stamped sources into one deduplicated Events table.
//!
//! Each source contributes sub-rows of identical shape
//! `(transactionId, eventDate, eventType, eventTitle=null)`. Sub-tables
//! are concatenated in the fixed listed order, dates are coerced (parse
//! failures become null, never errors), null and `N/A` dates are
//! dropped, the event-type relabeling table is applied (empty string
//! suppresses the row), and exact duplicates are removed keeping the
//! first occurrence.

use std::collections::HashSet;

use chrono::NaiveDate;
use log::debug;
use serde_json::Value;

use crate::rules::tables::relabel_event_type;
use crate::table::{display_string, is_blank, Table};
use crate::workbook::serial_to_date;

/// Output columns of the Events sheet.
pub static EVENT_COLUMNS: &[&str] = &[
    "Transaction Upload ID",
    "Event Date",
    "Event Type",
    "Event Title",
];

/// Which sheet a source reads from.
#[derive(Debug, Clone, Copy)]
enum SourceSheet {
    Transactions,
    Tranches,
}

/// How a source determines its event type.
#[derive(Debug, Clone, Copy)]
enum EventType {
    /// Read from a column of the same row.
    Column(&'static str),
    /// Fixed label for every row of this source.
    Constant(&'static str),
}

struct EventSource {
    sheet: SourceSheet,
    date_column: &'static str,
    event_type: EventType,
}

/// The six sources, in concatenation order.
static EVENT_SOURCES: &[EventSource] = &[
    EventSource {
        sheet: SourceSheet::Transactions,
        date_column: "Latest Event Date",
        event_type: EventType::Column("Latest Event Type"),
    },
    EventSource {
        sheet: SourceSheet::Transactions,
        date_column: "Financial Close Date",
        event_type: EventType::Constant("Financial Close"),
    },
    EventSource {
        sheet: SourceSheet::Tranches,
        date_column: "Date Announced",
        event_type: EventType::Constant("Announced"),
    },
    EventSource {
        sheet: SourceSheet::Tranches,
        date_column: "Date RFP",
        event_type: EventType::Constant("Request for Proposals"),
    },
    EventSource {
        sheet: SourceSheet::Tranches,
        date_column: "Date Tender",
        event_type: EventType::Constant("Tender"),
    },
    EventSource {
        sheet: SourceSheet::Tranches,
        date_column: "Date Preferred Bidder",
        event_type: EventType::Constant("Preferred Bidder"),
    },
];

/// Build the unified Events table from both input sheets.
pub fn unify_events(sheet1: &Table, sheet2: &Table) -> Table {
    let mut out = Table::new(EVENT_COLUMNS.to_vec());
    let mut seen: HashSet<String> = HashSet::new();
    let mut dropped = 0usize;

    for source in EVENT_SOURCES {
        let table = match source.sheet {
            SourceSheet::Transactions => sheet1,
            SourceSheet::Tranches => sheet2,
        };
        for row in 0..table.len() {
            let raw_date = table.cell(row, source.date_column);
            let Some(date) = coerce_date(raw_date) else {
                dropped += 1;
                continue;
            };

            let raw_type = match source.event_type {
                EventType::Constant(label) => label.to_string(),
                EventType::Column(col) => display_string(table.cell(row, col)),
            };
            let event_type = relabel_event_type(raw_type.trim()).to_string();
            if event_type.is_empty() {
                dropped += 1;
                continue;
            }

            let id = table.cell(row, "Realfin INFRA Transaction Upload ID").clone();
            let cells = vec![
                id,
                Value::String(date.format("%Y-%m-%d").to_string()),
                Value::String(event_type),
                Value::Null,
            ];

            let key = serde_json::to_string(&cells).unwrap_or_default();
            if seen.insert(key) {
                out.push_row(cells);
            }
        }
    }

    debug!("unified {} events ({} source rows dropped)", out.len(), dropped);
    out
}

/// Coerce a cell to a calendar date. Accepts ISO strings, common
/// day-first and month-first formats, and Excel day serials. The `N/A`
/// sentinel and anything unparseable read as none.
pub fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => serial_to_date(n.as_f64()?),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
                return None;
            }
            for format in ["%Y-%m-%d", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y", "%m/%d/%Y", "%d-%b-%Y"] {
                if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                    return Some(date);
                }
            }
            None
        }
        _ if is_blank(value) => None,
        _ => None,
    }
}
