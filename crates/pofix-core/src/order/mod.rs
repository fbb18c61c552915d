//! Purchase order extraction.

pub mod fields;
mod parser;

pub use parser::HtmlOrderParser;

use crate::error::MalformedDocumentError;
use crate::models::order::Order;

/// Result type for order parsing.
pub type Result<T> = std::result::Result<T, MalformedDocumentError>;

/// Trait for order parsers.
pub trait OrderParser {
    /// Parse an order from a document.
    fn parse(&self, html: &str) -> Result<Order>;
}
