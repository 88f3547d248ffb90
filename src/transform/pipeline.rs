//! High-level conversion pipeline and output assembly.
//!
//! This module combines the projectors into the seven-sheet destination
//! workbook: Transaction, Underlying_Asset, Events, Bidders_Any,
//! Tranches, Tranche_Pricings, Tranche_Roles_Any, in that order.
//!
//! The core entry point, [`convert`], is pure and synchronous: two
//! in-memory tables in, one [`OutputWorkbook`] out. Any error aborts the
//! whole conversion; there is no partial output. [`convert_file`] wraps
//! it with workbook reading and writing for the CLI.
//!
//! # Example
//!
//! ```rust,ignore
//! use infracurate::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! let summary = convert_file(
//!     Path::new("source.xlsx"),
//!     Path::new("destination.xlsx"),
//!     &ConvertOptions::default(),
//! )?;
//! println!("wrote {} transactions", summary.transactions);
//! ```

use std::collections::HashSet;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConvertResult;
use crate::table::{is_blank, Table};
use crate::workbook::{read_source_workbook, write_workbook};

use super::events::unify_events;
use super::roles::{project_bidders, project_tranche_roles};
use super::tranches::summarize_tranches;
use super::transaction::project_transactions;

/// How the reserved Transaction columns are headed on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderConvention {
    /// Empty-string headers, positions only.
    #[default]
    Blank,
    /// Human-readable provisional names.
    Provisional,
}

/// Options for the conversion pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Header convention for the reserved Transaction columns.
    pub headers: HeaderConvention,
}

/// The assembled destination workbook: seven named tables in fixed order.
#[derive(Debug, Clone)]
pub struct OutputWorkbook {
    pub sheets: Vec<(String, Table)>,
}

impl OutputWorkbook {
    /// Table by sheet name.
    pub fn sheet(&self, name: &str) -> Option<&Table> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }
}

/// Row counts of a completed conversion, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertSummary {
    pub transactions: usize,
    pub events: usize,
    pub bidders: usize,
    pub tranches: usize,
    pub tranche_pricings: usize,
    pub tranche_roles: usize,
}

impl ConvertSummary {
    fn of(workbook: &OutputWorkbook) -> Self {
        let count = |name: &str| workbook.sheet(name).map(Table::len).unwrap_or(0);
        Self {
            transactions: count("Transaction"),
            events: count("Events"),
            bidders: count("Bidders_Any"),
            tranches: count("Tranches"),
            tranche_pricings: count("Tranche_Pricings"),
            tranche_roles: count("Tranche_Roles_Any"),
        }
    }
}

/// Run the full conversion over two in-memory source tables.
pub fn convert(
    sheet1: &Table,
    sheet2: &Table,
    options: &ConvertOptions,
) -> ConvertResult<OutputWorkbook> {
    info!(
        "converting {} transactions, {} tranche rows",
        sheet1.len(),
        sheet2.len()
    );

    let transactions = project_transactions(sheet1, sheet2, options.headers);
    let events = unify_events(sheet1, sheet2);
    let bidders = project_bidders(sheet2);
    let tranches = summarize_tranches(sheet1, sheet2);
    let pricings = project_tranche_pricings(sheet2);
    let tranche_roles = project_tranche_roles(sheet2, &tranches);

    let workbook = OutputWorkbook {
        sheets: vec![
            ("Transaction".to_string(), transactions),
            ("Underlying_Asset".to_string(), underlying_asset_stub()),
            ("Events".to_string(), events),
            ("Bidders_Any".to_string(), bidders),
            ("Tranches".to_string(), tranches.table),
            ("Tranche_Pricings".to_string(), pricings),
            ("Tranche_Roles_Any".to_string(), tranche_roles),
        ],
    };

    info!("assembled {} output sheets", workbook.sheets.len());
    Ok(workbook)
}

/// File-to-file conversion: read, convert, write.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> ConvertResult<ConvertSummary> {
    let (sheet1, sheet2) = read_source_workbook(input)?;
    let workbook = convert(&sheet1, &sheet2, options)?;
    write_workbook(output, &workbook.sheets)?;

    let summary = ConvertSummary::of(&workbook);
    info!(
        "wrote {}: {} transactions, {} events, {} tranches",
        output.display(),
        summary.transactions,
        summary.events,
        summary.tranches
    );
    Ok(summary)
}

/// The Underlying_Asset sheet ships headers only; asset linkage is
/// completed downstream by hand.
fn underlying_asset_stub() -> Table {
    Table::new(vec!["Transaction Upload ID", "Asset Upload ID"])
}

/// Output columns of the Tranche_Pricings sheet.
pub static PRICING_COLUMNS: &[&str] = &[
    "Transaction Upload ID",
    "Tranche Benchmark",
    "Basis Point From",
    "Basis Point To",
    "Period From",
    "Period To",
    "Period Duration",
    "Comment",
];

/// One pricing row per Sheet2 row with a non-null benchmark, exact
/// duplicates removed keeping the first occurrence.
fn project_tranche_pricings(sheet2: &Table) -> Table {
    let mut out = Table::new(PRICING_COLUMNS.to_vec());
    let mut seen: HashSet<String> = HashSet::new();

    for row in 0..sheet2.len() {
        let benchmark = sheet2.cell(row, "Tranche Benchmark");
        if is_blank(benchmark) {
            continue;
        }

        let cells = vec![
            sheet2.cell(row, "Realfin INFRA Transaction Upload ID").clone(),
            benchmark.clone(),
            sheet2.cell(row, "Basis Point From").clone(),
            sheet2.cell(row, "Basis Point To").clone(),
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
        ];

        let key = serde_json::to_string(&cells).unwrap_or_default();
        if seen.insert(key) {
            out.push_row(cells);
        }
    }

    out
}
