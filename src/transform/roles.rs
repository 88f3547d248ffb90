//! Bidders & Roles Projector: the participant-role tables.
//!
//! Bidders_Any is a straight projection of Sheet2 role-holders with role
//! and counterparty substitutions and a filter on unusable roles.
//! Tranche_Roles_Any reclassifies roles conditioned on the tranche's
//! primary instrument type, then joins each row back to the computed
//! per-tranche local-currency value to derive a role-level monetary
//! value.

use log::debug;
use serde_json::Value;

use crate::rules::{self, tables};
use crate::table::{cell_f64, display_string, is_blank, number_cell, Table};

use super::tranches::TrancheSummary;

/// Output columns of the Bidders_Any sheet.
pub static BIDDER_COLUMNS: &[&str] = &[
    "Transaction Upload ID",
    "Role Type",
    "Role Subtype",
    "Company",
    "Fund",
    "Bidder Status",
    "Client Counterparty",
    "Client Company Name",
    "Fund Name",
];

/// Output columns of the Tranche_Roles_Any sheet.
pub static TRANCHE_ROLE_COLUMNS: &[&str] = &[
    "Transaction Upload ID",
    "Tranche Upload ID",
    "Tranche Role Type",
    "Company",
    "Fund",
    "Value",
    "Percentage",
    "Comment",
];

/// Build the Bidders_Any table from Sheet2.
///
/// Rows with a null/empty role, or a role containing `Other`
/// (case-sensitive substring test), are dropped.
pub fn project_bidders(sheet2: &Table) -> Table {
    let mut out = Table::new(BIDDER_COLUMNS.to_vec());
    let mut dropped = 0usize;

    for row in 0..sheet2.len() {
        let role = rules::apply_rules_cell(sheet2.cell(row, "Tranche Role Type"), tables::ROLE_RULES);
        let keep = match role.as_str() {
            None => false,
            Some(r) => !r.trim().is_empty() && !r.contains("Other"),
        };
        if !keep {
            dropped += 1;
            continue;
        }

        out.push_row(vec![
            sheet2.cell(row, "Realfin INFRA Transaction Upload ID").clone(),
            role,
            Value::Null,
            sheet2.cell(row, "Company").clone(),
            Value::Null,
            Value::String("Successful".to_string()),
            rules::apply_rules_cell(
                sheet2.cell(row, "Client Counterparty"),
                tables::COUNTERPARTY_RULES,
            ),
            sheet2.cell(row, "Client Company Name").clone(),
            Value::Null,
        ]);
    }

    debug!("projected {} bidders ({} rows dropped)", out.len(), dropped);
    out
}

/// Build the Tranche_Roles_Any table: one row per Sheet2 role-holder.
pub fn project_tranche_roles(sheet2: &Table, tranches: &TrancheSummary) -> Table {
    let mut out = Table::new(TRANCHE_ROLE_COLUMNS.to_vec());

    for row in 0..sheet2.len() {
        let tranche_id = sheet2.cell(row, "Realfin INFRA Tranche Upload ID");
        if is_blank(tranche_id) {
            continue;
        }

        let primary = display_string(sheet2.cell(row, "Tranche Primary Type"));
        let role = reclassify_role(
            &display_string(sheet2.cell(row, "Tranche Role Type")),
            &primary,
        );
        let role = rules::apply_rules(&role, tables::ROLE_RULES);

        let value = role_value(sheet2, row, &primary, tranches, &display_string(tranche_id));

        out.push_row(vec![
            sheet2.cell(row, "Realfin INFRA Transaction Upload ID").clone(),
            tranche_id.clone(),
            if role.is_empty() {
                Value::Null
            } else {
                Value::String(role)
            },
            sheet2.cell(row, "Company").clone(),
            Value::Null,
            value.map(number_cell).unwrap_or(Value::Null),
            Value::Null,
            Value::Null,
        ]);
    }

    out
}

/// Reclassify institutional-investor roles by instrument primary type:
/// `Equity` maps the equity set to "Sponsor", `Debt` maps the (superset)
/// debt set to "Debt Provider". Anything else passes through.
fn reclassify_role(role: &str, primary_type: &str) -> String {
    let trimmed = role.trim();
    match primary_type {
        "Equity" if tables::EQUITY_SPONSOR_ROLES.contains(&trimmed) => "Sponsor".to_string(),
        "Debt" if tables::DEBT_PROVIDER_ROLES.contains(&trimmed) => "Debt Provider".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Role-level monetary value.
///
/// Equity: `sponsorEquityUSD * trancheValueUSD`, preserved exactly as the
/// upstream computes it. Debt: `accreditedUSD / trancheUSD` applied to
/// the tranche's computed local-currency value. Null anywhere degrades
/// to null.
fn role_value(
    sheet2: &Table,
    row: usize,
    primary_type: &str,
    tranches: &TrancheSummary,
    tranche_id: &str,
) -> Option<f64> {
    let tranche_usd = cell_f64(sheet2.cell(row, "Tranche Value (USD m)"));
    match primary_type {
        "Equity" => {
            let sponsor_equity = cell_f64(sheet2.cell(row, "Sponsor Equity (USD m)"))?;
            let value = sponsor_equity * tranche_usd?;
            value.is_finite().then_some(value)
        }
        "Debt" => {
            let accredited = cell_f64(sheet2.cell(row, "Accredited Value (USD m)"))?;
            let tranche_usd = tranche_usd?;
            if tranche_usd == 0.0 {
                return None;
            }
            let local = tranches.local_value(tranche_id)?;
            let value = accredited / tranche_usd * local;
            value.is_finite().then_some(value)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::tranches::summarize_tranches;
    use serde_json::json;

    fn sheet1() -> Table {
        let mut t = Table::new(vec![
            "Realfin INFRA Transaction Upload ID",
            "Transaction Value (USD m)",
            "Transaction Value (Local Currency m)",
        ]);
        t.push_row(vec![json!("T-1"), json!(200.0), json!(1000.0)]);
        t
    }

    fn sheet2() -> Table {
        let mut t = Table::new(vec![
            "Realfin INFRA Transaction Upload ID",
            "Realfin INFRA Tranche Upload ID",
            "Tranche Primary Type",
            "Tranche Role Type",
            "Company",
            "Client Counterparty",
            "Client Company Name",
            "Tranche Value (USD m)",
            "Accredited Value (USD m)",
            "Sponsor Equity (USD m)",
        ]);
        // Debt role-holder: Fund reclassifies to Debt Provider.
        t.push_row(vec![
            json!("T-1"),
            json!("TR-1"),
            json!("Debt"),
            json!("Fund"),
            json!("Northern Credit"),
            json!("Grantor"),
            json!("Alpha Authority"),
            json!(50.0),
            json!(10.0),
            Value::Null,
        ]);
        // Equity role-holder.
        t.push_row(vec![
            json!("T-1"),
            json!("TR-2"),
            json!("Equity"),
            json!("Fund"),
            json!("Southern Capital"),
            Value::Null,
            Value::Null,
            json!(50.0),
            Value::Null,
            json!(0.4),
        ]);
        // Role filtered out of Bidders.
        t.push_row(vec![
            json!("T-1"),
            json!("TR-1"),
            json!("Debt"),
            json!("Other Adviser"),
            json!("Grey Partners"),
            Value::Null,
            Value::Null,
            json!(50.0),
            Value::Null,
            Value::Null,
        ]);
        t
    }

    #[test]
    fn test_role_reclassification() {
        assert_eq!(reclassify_role("Fund", "Equity"), "Sponsor");
        assert_eq!(reclassify_role("Fund", "Debt"), "Debt Provider");
        assert_eq!(reclassify_role("Bank", "Debt"), "Debt Provider");
        // Lenders are not in the equity set.
        assert_eq!(reclassify_role("Bank", "Equity"), "Bank");
        assert_eq!(reclassify_role("Legal Adviser", "Debt"), "Legal Adviser");
    }

    #[test]
    fn test_bidders_projection() {
        let out = project_bidders(&sheet2());
        // "Other Adviser" is dropped.
        assert_eq!(out.len(), 2);
        assert_eq!(out.cell(0, "Bidder Status"), &json!("Successful"));
        assert_eq!(out.cell(0, "Client Counterparty"), &json!("Public Authority"));
        assert_eq!(out.cell(0, "Role Subtype"), &Value::Null);
    }

    #[test]
    fn test_tranche_roles_debt_value() {
        // TR-1 local value = 50/200*1000 = 250; debt share 10/50 of it = 50.
        let tranches = summarize_tranches(&sheet1(), &sheet2());
        let out = project_tranche_roles(&sheet2(), &tranches);
        assert_eq!(out.cell(0, "Tranche Role Type"), &json!("Debt Provider"));
        assert_eq!(out.cell(0, "Value"), &json!(50.0));
    }

    #[test]
    fn test_tranche_roles_equity_value_preserved_as_coded() {
        // 0.4 * 50 = 20: the product of two USD figures, as upstream.
        let tranches = summarize_tranches(&sheet1(), &sheet2());
        let out = project_tranche_roles(&sheet2(), &tranches);
        assert_eq!(out.cell(1, "Tranche Role Type"), &json!("Sponsor"));
        assert_eq!(out.cell(1, "Value"), &json!(20.0));
    }

    #[test]
    fn test_join_miss_yields_null_not_dropped_row() {
        let mut s2 = sheet2();
        // A debt row whose tranche has no computed local value.
        s2.push_row(vec![
            json!("T-9"),
            json!("TR-9"),
            json!("Debt"),
            json!("Bank"),
            json!("Lone Bank"),
            Value::Null,
            Value::Null,
            json!(30.0),
            json!(5.0),
            Value::Null,
        ]);
        let tranches = summarize_tranches(&sheet1(), &s2);
        let out = project_tranche_roles(&s2, &tranches);
        assert_eq!(out.len(), 4);
        let last = out.rows().last().unwrap();
        assert_eq!(last[2], json!("Debt Provider"));
        assert!(last[5].is_null());
    }

    #[test]
    fn test_mla_substitution() {
        let mut t = Table::new(vec![
            "Realfin INFRA Transaction Upload ID",
            "Realfin INFRA Tranche Upload ID",
            "Tranche Primary Type",
            "Tranche Role Type",
        ]);
        t.push_row(vec![json!("T-1"), json!("TR-1"), json!("Debt"), json!("MLA")]);
        let tranches = summarize_tranches(&sheet1(), &t);
        let out = project_tranche_roles(&t, &tranches);
        assert_eq!(
            out.cell(0, "Tranche Role Type"),
            &json!("Mandated Lead Arranger")
        );
    }
}
