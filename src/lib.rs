//! # Infracurate - INFRA transaction workbook curation engine
//!
//! Infracurate transforms a two-sheet infrastructure transaction export
//! (transactions + tranche role-holders) into the seven-sheet upload
//! workbook the destination platform expects.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Source xlsx │────▶│   Loader    │────▶│  Transform  │────▶│  Dest xlsx  │
//! │ Sheet1/2    │     │ (calamine)  │     │ (7 sheets)  │     │ (xlsxwriter)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use infracurate::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), infracurate::ConvertError> {
//!     let summary = convert_file(
//!         Path::new("export.xlsx"),
//!         Path::new("export_Destination.xlsx"),
//!         &ConvertOptions::default(),
//!     )?;
//!     println!("Converted {} transactions", summary.transactions);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`table`] - In-memory table model and cell coercion
//! - [`workbook`] - Spreadsheet loading and writing
//! - [`rules`] - Ordered text-substitution engine and domain rule tables
//! - [`transform`] - Projectors and the conversion pipeline

// Core modules
pub mod error;
pub mod table;

// Spreadsheet I/O
pub mod workbook;

// Taxonomy rules
pub mod rules;

// Transformation
pub mod transform;

// =============================================================================
// Re-export error types
// =============================================================================

pub use error::{ConvertError, ConvertResult, SourceFormatError, WorkbookError, WorkbookResult};

// =============================================================================
// Re-export the table model
// =============================================================================

pub use table::Table;

// =============================================================================
// Re-export workbook I/O
// =============================================================================

pub use workbook::{read_source_workbook, write_workbook, SHEET1, SHEET2};

// =============================================================================
// Re-export the pipeline
// =============================================================================

pub use transform::{
    convert, convert_file, ConvertOptions, ConvertSummary, HeaderConvention, OutputWorkbook,
};
