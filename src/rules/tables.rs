//! Static domain rule tables.
//!
//! Every table is immutable configuration loaded once at process start.
//! Ordering inside a table is load-bearing wherever a rule's matcher or
//! replacement overlaps another rule's text; those constraints are noted
//! inline and pinned by the tests in `rules/mod.rs`.

use super::{lit, word, Rule};
use once_cell::sync::Lazy;
use std::collections::HashMap;

// =============================================================================
// Transaction name cleanup
// =============================================================================

/// Applied after a whitespace-collapse pass.
pub static NAME_RULES: &[Rule] = &[
    lit("Acquisition of ", ""),
    lit("Acquisition Of ", ""),
    lit("Refinancing of ", ""),
    lit("Sale of ", ""),
    lit("Purchase of ", ""),
    lit(" and ", " & "),
];

// =============================================================================
// Transaction status
// =============================================================================

pub static STATUS_RULES: &[Rule] = &[
    lit("Financial close", "Financial Close"),
    lit("Pre-financing", "Financing"),
    lit("In financing", "Financing"),
    lit("Post-financing", "Financial Close"),
    lit("Transaction launch", "Announced"),
];

// =============================================================================
// Finance type
// =============================================================================

pub static FINANCE_TYPE_RULES: &[Rule] = &[
    lit("Project finance", "Project Finance"),
    lit("Corporate finance", "Corporate Finance"),
    lit("Public financing", "Public Finance"),
    lit("Portfolio financing", "Portfolio Finance"),
];

// =============================================================================
// Transaction type
// =============================================================================

pub static TRANSACTION_TYPE_RULES: &[Rule] = &[
    lit("Greenfield", "Primary Financing"),
    lit("Brownfield", "Acquisition"),
    lit("Privatisation", "Acquisition"),
    word("M&A", "Acquisition"),
    lit("Additional financing", "Additional Facility"),
];

// =============================================================================
// Country / region
// =============================================================================

/// Short country codes are whole-word so they cannot corrupt longer
/// names (`UK` inside `Ukraine`).
pub static COUNTRY_RULES: &[Rule] = &[
    word("USA", "United States"),
    word("UK", "United Kingdom"),
    word("UAE", "United Arab Emirates"),
    lit("Viet Nam", "Vietnam"),
    lit("Korea, South", "South Korea"),
    lit("Russian Federation", "Russia"),
    lit("Czech Republic", "Czechia"),
    lit("Ivory Coast", "Cote d'Ivoire"),
];

// =============================================================================
// Contract
// =============================================================================

/// DBFOM before DBFO before DBF-ish substrings; abbreviations are
/// whole-word so they cannot fire inside other tokens.
pub static CONTRACT_RULES: &[Rule] = &[
    word("DBFOM", "Design-Build-Finance-Operate-Maintain"),
    word("DBFO", "Design-Build-Finance-Operate"),
    word("DBOM", "Design-Build-Operate-Maintain"),
    word("BOOT", "Build-Own-Operate-Transfer"),
    word("BOT", "Build-Operate-Transfer"),
    word("O&M", "Operations & Maintenance"),
];

// =============================================================================
// Sectors
// =============================================================================

/// The full ordered sector pipeline. Three placeholder-protected phases
/// (coal, power, biofuels) followed by the keyword remap table.
///
/// Phase constraints:
/// - "Coal-Fired Power" is tokenized before anything else so the bare
///   "Coal" rule and the word-boundary "Power" rule never see it; the
///   token is restored only after both generic rules have run.
/// - "Other Power" is tokenized before the generic "Power" rule, which
///   itself produces "Other Power"; re-running the list re-tokenizes it.
/// - "Biofuels/Biomass" is tokenized before "Biofuels" and "Biomass" map
///   to the same token, so an already-combined value is substituted once.
/// - The remap table's "Other Beyond Infrastructure" entry runs first,
///   and no later matcher may hit a substring of its replacement.
pub static SECTOR_RULES: &[Rule] = &[
    // -- coal / power disambiguation --
    lit("Coal-Fired Power", "@@COAL_FIRED@@"),
    lit("Coal-fired", "@@COAL_FIRED@@"),
    lit("Coal fired", "@@COAL_FIRED@@"),
    lit("Coal", "Mineral Mining"),
    lit("Other Power", "@@OTHER_POWER@@"),
    word("Power", "Other Power"),
    lit("@@OTHER_POWER@@", "Other Power"),
    lit("@@COAL_FIRED@@", "Coal-Fired Power"),
    // -- biofuels / biomass --
    lit("Biofuels/Biomass", "@@BIOMASS@@"),
    lit("Biofuels", "@@BIOMASS@@"),
    lit("Biomass", "@@BIOMASS@@"),
    lit("@@BIOMASS@@", "Biofuels/Biomass"),
    // -- keyword remap --
    lit("Non-core", "Other Beyond Infrastructure"),
    lit("Waste-to-energy", "Waste"),
    lit("Desalination", "Water"),
    lit("Water treatment", "Water"),
    lit("Broadband", "Telecoms"),
    lit("Fibre", "Telecoms"),
    lit("Data Centres", "Telecoms"),
    lit("Data Centre", "Telecoms"),
    lit("Rolling Stock", "Rail"),
    lit("Light Rail", "Rail"),
    lit("Heavy Rail", "Rail"),
    lit("Tramway", "Rail"),
    lit("Metro", "Rail"),
    lit("Motorway", "Roads"),
    lit("Highway", "Roads"),
    lit("Toll Road", "Roads"),
    lit("Bridges", "Roads"),
    lit("Tunnels", "Roads"),
    lit("Street Lighting", "Roads"),
    lit("Harbour", "Ports"),
    lit("Container Terminal", "Ports"),
    lit("Hospitals", "Healthcare"),
    lit("Clinics", "Healthcare"),
    lit("Schools", "Education"),
    lit("Student Accommodation", "Education"),
    lit("Prisons", "Justice"),
    lit("Courthouses", "Justice"),
];

// =============================================================================
// Events
// =============================================================================

/// Whole-value relabeling of legacy event types. Empty string means the
/// event is suppressed (its row is dropped). Unmapped labels pass through.
pub static EVENT_TYPE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Transaction Launch", "Announced"),
        ("Launch", "Announced"),
        ("Announcement", "Announced"),
        ("Expressions of Interest", "Request for Proposals"),
        ("EOI", "Request for Proposals"),
        ("Request for Qualifications", "Request for Proposals"),
        ("RFQ", ""),
        ("RFP Returned", ""),
        ("Shortlist Announced", ""),
        ("Shortlisted", ""),
        ("Preferred Bidder Announced", "Preferred Bidder"),
        ("Preferred Proponent", "Preferred Bidder"),
        ("Commercial Close", ""),
        ("Financial close", "Financial Close"),
        ("Financing Agreed", "Financial Close"),
        ("Cancelled", ""),
        ("On Hold", ""),
        ("Under Construction", ""),
        ("Operational", ""),
    ])
});

/// Relabel an event type. Returns the mapped label, the original when
/// unmapped, or `""` when the map suppresses it.
pub fn relabel_event_type(label: &str) -> &str {
    EVENT_TYPE_MAP.get(label).copied().unwrap_or(label)
}

// =============================================================================
// Roles
// =============================================================================

/// Institutional-investor roles that become "Sponsor" on Equity tranches.
pub static EQUITY_SPONSOR_ROLES: &[&str] = &[
    "Fund",
    "Fund Manager",
    "Institutional Investor",
    "Pension Fund",
    "Insurance Company",
    "Sovereign Wealth Fund",
    "Infrastructure Fund",
    "Asset Manager",
    "Private Equity Firm",
];

/// Roles that become "Debt Provider" on Debt tranches. Superset of the
/// equity list: lenders plus the institutional investors.
pub static DEBT_PROVIDER_ROLES: &[&str] = &[
    "Fund",
    "Fund Manager",
    "Institutional Investor",
    "Pension Fund",
    "Insurance Company",
    "Sovereign Wealth Fund",
    "Infrastructure Fund",
    "Asset Manager",
    "Private Equity Firm",
    "Bank",
    "Commercial Bank",
    "Investment Bank",
    "Development Bank",
    "Multilateral Agency",
    "Export Credit Agency",
    "Debt Fund",
];

/// Literal role substitutions applied after the reclassification sets.
pub static ROLE_RULES: &[Rule] = &[
    word("MLA", "Mandated Lead Arranger"),
    lit("Participant", "Debt Provider"),
];

/// Client counterparty normalization for the Bidders table.
pub static COUNTERPARTY_RULES: &[Rule] = &[
    lit("Grantor", "Public Authority"),
    lit("Procuring Authority", "Public Authority"),
    lit("Contracting Authority", "Public Authority"),
];

// =============================================================================
// Tranche instrument types
// =============================================================================

pub static TRANCHE_SECONDARY_RULES: &[Rule] = &[
    lit("Term Loan A", "Term Loan"),
    lit("Term Loan B", "Term Loan"),
    word("RCF", "Revolving Credit Facility"),
    lit("Capex Facility", "Capital Expenditure Facility"),
    lit("ECA Facility", "Export Credit Facility"),
];

pub static TRANCHE_TERTIARY_RULES: &[Rule] = &[
    lit("Sustainability Linked", "Sustainability-Linked"),
    lit("Islamic Facility", "Islamic Financing"),
];

// =============================================================================
// ESG classification
// =============================================================================

/// Case-insensitive fragments scanned against `Helper_Tranche Name`,
/// in order; a later match overwrites an earlier one on the same row.
pub static ESG_NAME_KEYWORDS: &[(&str, &str)] = &[
    ("islamic", "Islamic Financing"),
    ("sharia", "Islamic Financing"),
    ("sukuk", "Islamic Financing"),
    ("green", "Green Financing"),
    ("sustainab", "Sustainability-Linked Financing"),
    ("social", "Social Financing"),
    ("blue", "Blue Financing"),
];

/// Second pass, scanned against `Tranche Tertiary Type`; also allowed to
/// overwrite the name-based classification.
pub static ESG_TERTIARY_KEYWORDS: &[(&str, &str)] = &[
    ("sukuk", "Islamic Financing"),
    ("green", "Green Financing"),
    ("sustainability-linked", "Sustainability-Linked Financing"),
    ("social", "Social Financing"),
];
