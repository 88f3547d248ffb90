//! Transformation module.
//!
//! This module turns the two loaded source tables into the destination
//! workbook:
//! - Transaction: Sheet1 projection with taxonomy normalization
//! - Events: six date sources unified and deduplicated
//! - Tranches: per-tranche financials and ESG classification
//! - Roles: Bidders_Any and Tranche_Roles_Any projections
//! - Pipeline: orchestration and output assembly

pub mod events;
pub mod pipeline;
pub mod roles;
pub mod tranches;
pub mod transaction;

pub use pipeline::{
    convert, convert_file, ConvertOptions, ConvertSummary, HeaderConvention, OutputWorkbook,
};
