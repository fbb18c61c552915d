//! The parse-then-format pipeline behind every entry point.

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::error::{PofixError, ProcessError};
use crate::format::FixedWidthFormatter;
use crate::models::config::PofixConfig;
use crate::models::order::Order;
use crate::order::{HtmlOrderParser, OrderParser};

/// Configured parser and formatter.
#[derive(Debug, Clone, Default)]
pub struct OrderProcessor {
    parser: HtmlOrderParser,
    formatter: FixedWidthFormatter,
}

impl OrderProcessor {
    /// Create a processor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor from configuration.
    pub fn from_config(config: &PofixConfig) -> Self {
        Self {
            parser: HtmlOrderParser::new().with_trimming(config.parser.trim_cell_text),
            formatter: FixedWidthFormatter::new().with_truncation(config.format.truncate_overflow),
        }
    }

    /// Parse a document into an order without formatting it.
    pub fn parse(&self, html: &str) -> Result<Order, ProcessError> {
        if html.is_empty() {
            return Err(ProcessError::EmptyBody);
        }
        Ok(self.parser.parse(html)?)
    }

    /// Convert a document into fixed-width records.
    pub fn process(&self, html: &str) -> Result<String, ProcessError> {
        let start = Instant::now();

        let order = self.parse(html)?;
        let output = self.formatter.format(&order);

        debug!(
            "Converted {} bytes of HTML into {} records in {:?}",
            html.len(),
            2 + 2 * order.order_lines.len(),
            start.elapsed()
        );

        Ok(output)
    }

    /// Convert an HTML file. Invalid UTF-8 is replaced rather than rejected.
    pub fn process_file(&self, path: &Path) -> Result<String, PofixError> {
        let bytes = std::fs::read(path)?;
        let html = String::from_utf8_lossy(&bytes);
        debug!("Processing file: {}", path.display());
        Ok(self.process(&html)?)
    }
}

/// Convert an HTML purchase order into fixed-width records with default
/// settings.
pub fn process_order(html: &str) -> Result<String, ProcessError> {
    OrderProcessor::new().process(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedDocumentError;
    use pretty_assertions::assert_eq;

    const ORDER_HTML: &str = r#"
        <html><body>
        <table>
          <tr><th>Customer</th><th>PO</th><th>Order date</th><th>Promised</th><th>UNH</th></tr>
          <tr><td>ACME</td><td>PO123</td><td>01-15-2024</td><td>01-20-2024</td><td>UNH1</td></tr>
        </table>
        <table>
          <tr><th>Code</th><th>Qty</th><th>Price</th><th>Description</th></tr>
          <tr><td>SKU1</td><td>5</td><td>12.5</td><td>Widget</td></tr>
          <tr><td>SKU2</td><td>abc</td><td>3</td><td>Gadget</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_process_order() {
        let output = process_order(ORDER_HTML).unwrap();
        let expected = [
            "UNH  UNH1  ".to_string(),
            "CLO  ACME   PO123                   20240115 20240120".to_string(),
            "OLD  0001 SKU1            0000000005.0012.500".to_string(),
            format!("OLDA {:<49}", "Widget"),
            "OLD  0002 SKU2            0000000000.0003.000".to_string(),
            format!("OLDA {:<49}", "Gadget"),
        ]
        .join("\n");

        assert_eq!(output, expected);
    }

    #[test]
    fn test_line_count_matches_rows() {
        let order = OrderProcessor::new().parse(ORDER_HTML).unwrap();
        assert_eq!(order.order_lines.len(), 2);
    }

    #[test]
    fn test_empty_body_rejected_before_parsing() {
        assert_eq!(process_order(""), Err(ProcessError::EmptyBody));
    }

    #[test]
    fn test_whitespace_body_reaches_parser() {
        assert_eq!(
            process_order("  \n\t"),
            Err(ProcessError::Malformed(MalformedDocumentError::MissingTable {
                expected: 2,
                found: 0
            }))
        );
    }

    #[test]
    fn test_single_table_is_structural_error() {
        let err = process_order("<table><tr><td>x</td></tr></table>").unwrap_err();
        assert_eq!(
            err,
            ProcessError::Malformed(MalformedDocumentError::MissingTable {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_from_config() {
        let mut config = PofixConfig::default();
        config.parser.trim_cell_text = true;
        config.format.truncate_overflow = true;

        let html = ORDER_HTML.replace("<td>ACME</td>", "<td>  ACME INDUSTRIES  </td>");
        let output = OrderProcessor::from_config(&config).process(&html).unwrap();
        assert!(output.contains("CLO  ACME INPO123"));
    }

    #[test]
    fn test_process_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.html");
        std::fs::write(&path, ORDER_HTML).unwrap();

        let output = OrderProcessor::new().process_file(&path).unwrap();
        assert!(output.starts_with("UNH  UNH1  \n"));

        let missing = OrderProcessor::new().process_file(&dir.path().join("missing.html"));
        assert!(matches!(missing, Err(PofixError::Io(_))));
    }
}
