//! Core library for converting HTML purchase orders into fixed-width records.
//!
//! This crate provides:
//! - HTML table extraction (inner text of each cell, rows scoped per table)
//! - Purchase order parsing with total field parsing (defaults, never errors)
//! - Fixed-width `UNH`/`CLO`/`OLD`/`OLDA` record output
//! - The `process_order` boundary used by the CLI, HTTP host and WASM bindings

pub mod error;
pub mod format;
pub mod html;
pub mod models;
pub mod order;
mod processor;

pub use error::{MalformedDocumentError, PofixError, ProcessError, Result, TableRole};
pub use format::{FixedWidthFormatter, format_order};
pub use models::config::PofixConfig;
pub use models::order::{MIN_DATE, Order, OrderLine};
pub use order::{HtmlOrderParser, OrderParser};
pub use processor::{OrderProcessor, process_order};
