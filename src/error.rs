//! Error types for the Infracurate conversion pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`SourceFormatError`] - required structure missing from the source workbook
//! - [`WorkbookError`] - spreadsheet read/write errors
//! - [`ConvertError`] - top-level conversion errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! The taxonomy is deliberately small: only the two named source sheets
//! are unconditionally required. A missing optional column degrades to a
//! null-filled output column, numeric derivation over null/zero degrades
//! to null, and unparseable dates degrade to null — none of those raise.

use thiserror::Error;

// =============================================================================
// Source Format Errors
// =============================================================================

/// The source workbook is structurally unusable.
#[derive(Debug, Error)]
pub enum SourceFormatError {
    /// A required sheet is absent.
    #[error("Required sheet '{0}' not found in source workbook")]
    MissingSheet(String),

    /// A sheet exists but has no header row.
    #[error("Sheet '{0}' has no header row")]
    NoHeaders(String),
}

// =============================================================================
// Workbook I/O Errors
// =============================================================================

/// Errors while reading or writing spreadsheet files.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// Failed to read the file.
    #[error("Failed to read workbook: {0}")]
    Io(#[from] std::io::Error),

    /// calamine failed to open or parse the source workbook.
    #[error("Failed to parse workbook: {0}")]
    Read(#[from] calamine::Error),

    /// rust_xlsxwriter failed to produce the destination workbook.
    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// The source workbook is structurally invalid.
    #[error("Source format error: {0}")]
    Format(#[from] SourceFormatError),
}

// =============================================================================
// Conversion Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the main error type returned by [`crate::transform::pipeline::convert`]
/// and the file-to-file entry points. Callers get a single opaque failure
/// with a human-readable message; no partial output is produced.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Source format error.
    #[error("Source format error: {0}")]
    Source(#[from] SourceFormatError),

    /// Workbook I/O error.
    #[error("Workbook error: {0}")]
    Workbook(#[from] WorkbookError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for workbook I/O.
pub type WorkbookResult<T> = Result<T, WorkbookError>;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // SourceFormatError -> ConvertError
        let fmt_err = SourceFormatError::MissingSheet("Sheet2".into());
        let convert_err: ConvertError = fmt_err.into();
        assert!(convert_err.to_string().contains("Sheet2"));

        // SourceFormatError -> WorkbookError -> ConvertError
        let fmt_err = SourceFormatError::NoHeaders("Sheet1".into());
        let wb_err: WorkbookError = fmt_err.into();
        let convert_err: ConvertError = wb_err.into();
        assert!(convert_err.to_string().contains("Sheet1"));
    }

    #[test]
    fn test_missing_sheet_message() {
        let err = SourceFormatError::MissingSheet("Sheet1".into());
        let msg = err.to_string();
        assert!(msg.contains("Sheet1"));
        assert!(msg.contains("not found"));
    }
}
