//! Transaction Projector: Sheet1 rows into the canonical Transaction table.
//!
//! The column plan is data, not code: an ordered static list pairing each
//! target column with its source — a named Sheet1 column, a constant, a
//! reserved blank, the sector/sub-sector concatenation, or the SPV
//! cross-reference from Sheet2. A missing source column yields an
//! all-null target column of the right length, never an error.

use std::collections::HashMap;

use serde_json::Value;

use crate::rules::{self, tables};
use crate::table::{display_string, is_blank, Table};

use super::pipeline::HeaderConvention;

/// Where a Transaction column's data comes from.
#[derive(Debug, Clone, Copy)]
enum ColumnSpec {
    /// Direct copy of a named Sheet1 column.
    Source(&'static str),
    /// Fixed value repeated for every row.
    Constant(&'static str),
    /// Reserved for manual completion downstream; always null.
    Blank(&'static str),
    /// `"{sector}, {subsector}"` concatenation.
    SectorPair,
    /// Sheet2 `Transaction Upload ID -> SPV` lookup.
    SpvLookup,
}

/// Ordered target columns of the Transaction sheet. Blank entries carry
/// their provisional header; the blank convention erases it on output.
static TRANSACTION_COLUMNS: &[(&str, ColumnSpec)] = &[
    ("Transaction ID", ColumnSpec::Source("Realfin INFRA Transaction Upload ID")),
    ("Transaction Name", ColumnSpec::Source("Transaction Name")),
    ("Asset Class", ColumnSpec::Constant("Infrastructure")),
    ("Transaction Status", ColumnSpec::Source("Transaction Stage")),
    ("Finance Type", ColumnSpec::Source("Finance Type")),
    ("Transaction Type", ColumnSpec::Source("Transaction Type")),
    ("", ColumnSpec::Blank("Transaction Sub-status")),
    ("", ColumnSpec::Blank("Transaction Summary")),
    ("Transaction Local Currency", ColumnSpec::Source("Transaction Currency")),
    (
        "Transaction Value (Local Currency)",
        ColumnSpec::Source("Transaction Value (Local Currency m)"),
    ),
    (
        "Transaction Debt (Local Currency)",
        ColumnSpec::Source("Transaction Debt (Local Currency m)"),
    ),
    (
        "Transaction Equity (Local Currency)",
        ColumnSpec::Source("Transaction Equity (Local Currency m)"),
    ),
    ("Debt/Equity Ratio", ColumnSpec::Source("Debt/Equity Ratio")),
    ("", ColumnSpec::Blank("Value Notes")),
    ("Region - Country", ColumnSpec::Source("Transaction Country/Region")),
    ("", ColumnSpec::Blank("State/Province")),
    ("", ColumnSpec::Blank("City")),
    ("Any Level Sectors", ColumnSpec::SectorPair),
    ("PPP", ColumnSpec::Source("PPP")),
    ("Concession Period", ColumnSpec::Source("Concession Period")),
    ("Contract", ColumnSpec::Source("Contract")),
    ("SPV", ColumnSpec::SpvLookup),
    ("Active", ColumnSpec::Constant("True")),
    ("", ColumnSpec::Blank("Comment 1")),
    ("", ColumnSpec::Blank("Comment 2")),
    ("", ColumnSpec::Blank("Comment 3")),
];

/// Build the Transaction table from Sheet1 plus the Sheet2 SPV lookup.
///
/// One output row per Sheet1 row, in original order.
pub fn project_transactions(
    sheet1: &Table,
    sheet2: &Table,
    headers: HeaderConvention,
) -> Table {
    let spv_map = build_spv_map(sheet2);

    let column_names: Vec<String> = TRANSACTION_COLUMNS
        .iter()
        .map(|(name, spec)| match (headers, spec) {
            (HeaderConvention::Provisional, ColumnSpec::Blank(provisional)) => {
                provisional.to_string()
            }
            _ => name.to_string(),
        })
        .collect();
    let mut out = Table::new(column_names);

    for row in 0..sheet1.len() {
        let id = sheet1.cell(row, "Realfin INFRA Transaction Upload ID");
        let cells: Vec<Value> = TRANSACTION_COLUMNS
            .iter()
            .map(|(_, spec)| match spec {
                ColumnSpec::Source(col) => sheet1.cell(row, col).clone(),
                ColumnSpec::Constant(v) => Value::String((*v).to_string()),
                ColumnSpec::Blank(_) => Value::Null,
                ColumnSpec::SectorPair => sector_pair(
                    sheet1.cell(row, "Transaction Sector"),
                    sheet1.cell(row, "Transaction Sub-sector"),
                ),
                ColumnSpec::SpvLookup => lookup_spv(&spv_map, id),
            })
            .collect();
        out.push_row(cells);
    }

    normalize_columns(&mut out);
    out
}

/// `Transaction Upload ID -> SPV` from Sheet2. Null SPVs are dropped
/// before the map is built; on conflicting values the last one wins.
fn build_spv_map(sheet2: &Table) -> HashMap<String, Value> {
    let mut map = HashMap::new();
    for row in 0..sheet2.len() {
        let spv = sheet2.cell(row, "SPV");
        if is_blank(spv) {
            continue;
        }
        let id = sheet2.cell(row, "Realfin INFRA Transaction Upload ID");
        if !is_blank(id) {
            map.insert(display_string(id), spv.clone());
        }
    }
    map
}

fn lookup_spv(map: &HashMap<String, Value>, id: &Value) -> Value {
    if is_blank(id) {
        return Value::Null;
    }
    map.get(&display_string(id)).cloned().unwrap_or(Value::Null)
}

/// Concatenate sector and sub-sector. Nulls render as empty string; a
/// one-sided null drops the dangling separator, a fully-null pair stays
/// null.
fn sector_pair(sector: &Value, subsector: &Value) -> Value {
    match (is_blank(sector), is_blank(subsector)) {
        (true, true) => Value::Null,
        (false, true) => Value::String(display_string(sector)),
        (true, false) => Value::String(display_string(subsector)),
        (false, false) => Value::String(format!(
            "{}, {}",
            display_string(sector),
            display_string(subsector)
        )),
    }
}

/// Taxonomy passes over the projected columns.
fn normalize_columns(table: &mut Table) {
    apply_to_column(table, "Transaction Name", |v| {
        rules::apply_rules_cell(&rules::collapse_whitespace_cell(v), tables::NAME_RULES)
    });
    apply_to_column(table, "Transaction Status", |v| {
        rules::apply_rules_cell(v, tables::STATUS_RULES)
    });
    apply_to_column(table, "Finance Type", |v| {
        rules::apply_rules_cell(v, tables::FINANCE_TYPE_RULES)
    });
    apply_to_column(table, "Transaction Type", |v| {
        rules::apply_rules_cell(v, tables::TRANSACTION_TYPE_RULES)
    });
    apply_to_column(table, "Region - Country", |v| {
        rules::apply_rules_cell(v, tables::COUNTRY_RULES)
    });
    apply_to_column(table, "Contract", |v| {
        rules::apply_rules_cell(v, tables::CONTRACT_RULES)
    });
    apply_to_column(table, "Any Level Sectors", |v| {
        rules::apply_rules_cell(v, tables::SECTOR_RULES)
    });
}

fn apply_to_column(table: &mut Table, name: &str, f: impl Fn(&Value) -> Value) {
    let Some(col) = table.column_index(name) else {
        return;
    };
    let updated: Vec<Value> = table.rows().iter().map(|r| f(&r[col])).collect();
    for (row, value) in updated.into_iter().enumerate() {
        table.set_cell(row, col, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sheet1() -> Table {
        let mut t = Table::new(vec![
            "Realfin INFRA Transaction Upload ID",
            "Transaction Name",
            "Transaction Stage",
            "Transaction Sector",
            "Transaction Sub-sector",
        ]);
        t.push_row(vec![
            json!("T-1"),
            json!("Acquisition of  Alpha Road and Bridge"),
            json!("Financial close"),
            json!("Coal-fired"),
            json!("Biomass"),
        ]);
        t.push_row(vec![
            json!("T-2"),
            json!("Beta Port"),
            Value::Null,
            Value::Null,
            Value::Null,
        ]);
        t
    }

    fn sheet2() -> Table {
        let mut t = Table::new(vec!["Realfin INFRA Transaction Upload ID", "SPV"]);
        t.push_row(vec![json!("T-1"), Value::Null]);
        t.push_row(vec![json!("T-1"), json!("Alpha SPV Ltd")]);
        t
    }

    #[test]
    fn test_row_count_and_order_preserved() {
        let out = project_transactions(&sheet1(), &sheet2(), HeaderConvention::Blank);
        assert_eq!(out.len(), 2);
        assert_eq!(out.cell(0, "Transaction ID"), &json!("T-1"));
        assert_eq!(out.cell(1, "Transaction ID"), &json!("T-2"));
    }

    #[test]
    fn test_constants_and_blanks() {
        let out = project_transactions(&sheet1(), &sheet2(), HeaderConvention::Blank);
        assert_eq!(out.cell(0, "Asset Class"), &json!("Infrastructure"));
        assert_eq!(out.cell(1, "Active"), &json!("True"));
        // Blank convention erases provisional headers, keeping positions.
        assert_eq!(out.columns()[6], "");
        assert_eq!(out.columns().len(), 26);
    }

    #[test]
    fn test_provisional_headers() {
        let out = project_transactions(&sheet1(), &sheet2(), HeaderConvention::Provisional);
        assert_eq!(out.columns()[6], "Transaction Sub-status");
        assert_eq!(out.columns().len(), 26);
        assert_eq!(out.cell(0, "Transaction Sub-status"), &Value::Null);
    }

    #[test]
    fn test_missing_source_column_yields_null_column() {
        // sheet1() has no "PPP" column.
        let out = project_transactions(&sheet1(), &sheet2(), HeaderConvention::Blank);
        assert!(out.has_column("PPP"));
        assert_eq!(out.cell(0, "PPP"), &Value::Null);
        assert_eq!(out.cell(1, "PPP"), &Value::Null);
    }

    #[test]
    fn test_spv_lookup() {
        let out = project_transactions(&sheet1(), &sheet2(), HeaderConvention::Blank);
        // Null SPV rows are dropped before the map is built, so the
        // non-null value wins for T-1.
        assert_eq!(out.cell(0, "SPV"), &json!("Alpha SPV Ltd"));
        // No Sheet2 row for T-2.
        assert_eq!(out.cell(1, "SPV"), &Value::Null);
    }

    #[test]
    fn test_sector_pair_and_normalization() {
        let out = project_transactions(&sheet1(), &sheet2(), HeaderConvention::Blank);
        assert_eq!(
            out.cell(0, "Any Level Sectors"),
            &json!("Coal-Fired Power, Biofuels/Biomass")
        );
        // Fully-null pair stays null rather than leaking sentinel text.
        assert_eq!(out.cell(1, "Any Level Sectors"), &Value::Null);
    }

    #[test]
    fn test_name_cleanup() {
        let out = project_transactions(&sheet1(), &sheet2(), HeaderConvention::Blank);
        assert_eq!(
            out.cell(0, "Transaction Name"),
            &json!("Alpha Road & Bridge")
        );
    }

    #[test]
    fn test_status_normalization() {
        let out = project_transactions(&sheet1(), &sheet2(), HeaderConvention::Blank);
        assert_eq!(out.cell(0, "Transaction Status"), &json!("Financial Close"));
        assert_eq!(out.cell(1, "Transaction Status"), &Value::Null);
    }
}
