//! Error types for the pofix-core library.

use thiserror::Error;

/// Main error type for the pofix library.
#[derive(Error, Debug)]
pub enum PofixError {
    /// Processing of a single document failed.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by the `process_order` boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// The request carried no document at all.
    #[error("Invalid request body.")]
    EmptyBody,

    /// The document does not have the expected table structure.
    #[error(transparent)]
    Malformed(#[from] MalformedDocumentError),
}

/// Which of the two order tables a structural error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    /// First `<table>`: one order-level data row.
    Header,
    /// Second `<table>`: one row per ordered product.
    LineItems,
}

impl std::fmt::Display for TableRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableRole::Header => f.write_str("header table"),
            TableRole::LineItems => f.write_str("line-item table"),
        }
    }
}

/// Structural errors in the source HTML.
///
/// Field content never produces one of these; unparseable values fall back
/// to their defaults instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedDocumentError {
    /// Fewer `<table>` elements than required.
    #[error("malformed document: expected at least {expected} tables, found {found}")]
    MissingTable { expected: usize, found: usize },

    /// A row index is past the end of a table.
    #[error("malformed document: {table} has no row {row}")]
    MissingRow { table: TableRole, row: usize },

    /// A column index is past the end of a row.
    #[error("malformed document: {table} row {row} has no column {column}")]
    MissingCell {
        table: TableRole,
        row: usize,
        column: usize,
    },
}

/// Result type for the pofix library.
pub type Result<T> = std::result::Result<T, PofixError>;
