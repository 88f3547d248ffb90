//! Tranche Financials Calculator: the Tranches table and the per-tranche
//! local-currency values consumed by the roles projector.
//!
//! Sheet2 carries one row per tranche/role-holder; the Tranches sheet
//! wants one row per distinct tranche, so the first row seen for a
//! tranche ID wins. The canonical per-tranche value is
//! `trancheValueUSD / transactionValueUSD * transactionValueLocalCurrency`,
//! with a null or zero denominator degrading to null and propagating as
//! null through downstream joins.

use std::collections::{HashMap, HashSet};

use log::debug;
use serde_json::Value;

use crate::rules::{self, tables};
use crate::table::{cell_f64, display_string, is_blank, number_cell, Table};

/// Output columns of the Tranches sheet.
pub static TRANCHE_COLUMNS: &[&str] = &[
    "Transaction Upload ID",
    "Tranche Upload ID",
    "Tranche Primary Type",
    "Tranche Secondary Type",
    "Tranche Tertiary Type",
    "Value",
    "Maturity Start Date",
    "Maturity End Date",
    "Tenor",
    "Tranche ESG Type",
];

/// The Tranches table plus the computed local-currency value per tranche
/// ID, kept for the Tranche_Roles_Any join.
pub struct TrancheSummary {
    pub table: Table,
    local_values: HashMap<String, f64>,
}

impl TrancheSummary {
    /// Computed local-currency value for a tranche ID; none when the
    /// tranche is unknown or its value degraded to null.
    pub fn local_value(&self, tranche_id: &str) -> Option<f64> {
        self.local_values.get(tranche_id).copied()
    }
}

/// Build the Tranches table from Sheet2, joining Sheet1 for the
/// transaction-level USD and local-currency values.
pub fn summarize_tranches(sheet1: &Table, sheet2: &Table) -> TrancheSummary {
    let transaction_values = build_transaction_values(sheet1);

    let mut table = Table::new(TRANCHE_COLUMNS.to_vec());
    let mut local_values = HashMap::new();
    let mut seen: HashSet<String> = HashSet::new();

    for row in 0..sheet2.len() {
        let tranche_id = sheet2.cell(row, "Realfin INFRA Tranche Upload ID");
        if is_blank(tranche_id) {
            continue;
        }
        let tranche_key = display_string(tranche_id);
        // One row per distinct tranche; the first role-holder row wins.
        if !seen.insert(tranche_key.clone()) {
            continue;
        }

        let transaction_id = sheet2.cell(row, "Realfin INFRA Transaction Upload ID");
        let value = compute_local_value(
            cell_f64(sheet2.cell(row, "Tranche Value (USD m)")),
            transaction_values.get(&display_string(transaction_id)),
        );
        if let Some(v) = value {
            local_values.insert(tranche_key, v);
        }

        let esg = classify_esg(
            sheet2.cell(row, "Helper_Tranche Name"),
            sheet2.cell(row, "Tranche Tertiary Type"),
        );

        table.push_row(vec![
            transaction_id.clone(),
            tranche_id.clone(),
            sheet2.cell(row, "Tranche Primary Type").clone(),
            rules::apply_rules_cell(
                sheet2.cell(row, "Tranche Secondary Type"),
                tables::TRANCHE_SECONDARY_RULES,
            ),
            rules::apply_rules_cell(
                sheet2.cell(row, "Tranche Tertiary Type"),
                tables::TRANCHE_TERTIARY_RULES,
            ),
            value.map(number_cell).unwrap_or(Value::Null),
            sheet2.cell(row, "Maturity Start Date").clone(),
            sheet2.cell(row, "Maturity End Date").clone(),
            sheet2.cell(row, "Tenor").clone(),
            esg.map(|c| Value::String(c.to_string())).unwrap_or(Value::Null),
        ]);
    }

    debug!("summarized {} tranches", table.len());
    TrancheSummary { table, local_values }
}

/// `Transaction Upload ID -> (value USD, value local currency)` from Sheet1.
fn build_transaction_values(sheet1: &Table) -> HashMap<String, (Option<f64>, Option<f64>)> {
    let mut map = HashMap::new();
    for row in 0..sheet1.len() {
        let id = sheet1.cell(row, "Realfin INFRA Transaction Upload ID");
        if is_blank(id) {
            continue;
        }
        map.insert(
            display_string(id),
            (
                cell_f64(sheet1.cell(row, "Transaction Value (USD m)")),
                cell_f64(sheet1.cell(row, "Transaction Value (Local Currency m)")),
            ),
        );
    }
    map
}

/// `trancheUSD / transactionUSD * transactionLC`. Null or zero anywhere
/// in the chain yields none.
fn compute_local_value(
    tranche_usd: Option<f64>,
    transaction: Option<&(Option<f64>, Option<f64>)>,
) -> Option<f64> {
    let (transaction_usd, transaction_lc) = transaction?;
    let tranche_usd = tranche_usd?;
    let transaction_usd = (*transaction_usd)?;
    let transaction_lc = (*transaction_lc)?;
    if transaction_usd == 0.0 {
        return None;
    }
    let value = tranche_usd / transaction_usd * transaction_lc;
    value.is_finite().then_some(value)
}

/// Keyword-driven ESG classification. The name scan runs first in table
/// order with later matches overwriting earlier ones; the tertiary-type
/// scan runs second and may overwrite again.
fn classify_esg(name: &Value, tertiary: &Value) -> Option<&'static str> {
    let mut result = None;
    if let Some(name) = name.as_str() {
        let lower = name.to_lowercase();
        for (fragment, category) in tables::ESG_NAME_KEYWORDS {
            if lower.contains(fragment) {
                result = Some(*category);
            }
        }
    }
    if let Some(tertiary) = tertiary.as_str() {
        let lower = tertiary.to_lowercase();
        for (fragment, category) in tables::ESG_TERTIARY_KEYWORDS {
            if lower.contains(fragment) {
                result = Some(*category);
            }
        }
    }
    result
}
