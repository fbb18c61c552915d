//! HTML purchase order parser.

use tracing::{debug, info};

use crate::error::{MalformedDocumentError, TableRole};
use crate::html::{HtmlTable, extract_tables};
use crate::models::order::Order;

use super::fields::{parse_date, parse_price, parse_quantity};
use super::{OrderParser, Result};

/// Number of tables an order document must contain.
const REQUIRED_TABLES: usize = 2;

/// Row of the header table holding the order fields.
const HEADER_DATA_ROW: usize = 1;

mod header_col {
    pub const CUSTOMER: usize = 0;
    pub const PURCHASE_ORDER_NO: usize = 1;
    pub const ORDER_DATE: usize = 2;
    pub const PROMISED_DATE: usize = 3;
    pub const UNH_ID: usize = 4;
}

mod line_col {
    pub const PRODUCT_CODE: usize = 0;
    pub const QUANTITY: usize = 1;
    pub const PRICE: usize = 2;
    pub const DESCRIPTION: usize = 3;
}

/// Parser for two-table HTML purchase orders.
#[derive(Debug, Clone, Default)]
pub struct HtmlOrderParser {
    /// Whether to trim whitespace around text fields.
    trim_text: bool,
}

impl HtmlOrderParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set text field trimming.
    pub fn with_trimming(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }

    fn text(&self, raw: &str) -> String {
        if self.trim_text {
            raw.trim().to_string()
        } else {
            raw.to_string()
        }
    }

    fn parse_header(&self, table: &HtmlTable, order: &mut Order) -> Result<()> {
        let role = TableRole::Header;
        let row = HEADER_DATA_ROW;

        order.customer = self.text(cell(table, role, row, header_col::CUSTOMER)?);
        order.purchase_order_no = self.text(cell(table, role, row, header_col::PURCHASE_ORDER_NO)?);
        order.order_date = parse_date(
            "order_date",
            &self.text(cell(table, role, row, header_col::ORDER_DATE)?),
        );
        order.promised_date = parse_date(
            "promised_date",
            &self.text(cell(table, role, row, header_col::PROMISED_DATE)?),
        );
        order.unh_id = self.text(cell(table, role, row, header_col::UNH_ID)?);

        Ok(())
    }

    fn parse_lines(&self, table: &HtmlTable, order: &mut Order) -> Result<()> {
        let role = TableRole::LineItems;

        for row in 1..table.num_rows() {
            let product_code = self.text(cell(table, role, row, line_col::PRODUCT_CODE)?);
            let quantity = parse_quantity("quantity", cell(table, role, row, line_col::QUANTITY)?);
            let price = parse_price("price", cell(table, role, row, line_col::PRICE)?);
            let description = self.text(cell(table, role, row, line_col::DESCRIPTION)?);

            let line = order.push_line(product_code, quantity, price, description);
            debug!("Parsed line {}: {}", line.item_number, line.product_code);
        }

        Ok(())
    }
}

impl OrderParser for HtmlOrderParser {
    fn parse(&self, html: &str) -> Result<Order> {
        let tables = extract_tables(html, REQUIRED_TABLES);
        let [header, lines] = tables.as_slice() else {
            return Err(MalformedDocumentError::MissingTable {
                expected: REQUIRED_TABLES,
                found: tables.len(),
            });
        };

        let mut order = Order::default();
        self.parse_header(header, &mut order)?;
        self.parse_lines(lines, &mut order)?;

        info!(
            "Parsed order {} with {} lines",
            order.purchase_order_no,
            order.order_lines.len()
        );

        Ok(order)
    }
}

/// Bounds-checked positional cell lookup.
fn cell<'t>(table: &'t HtmlTable, role: TableRole, row: usize, column: usize) -> Result<&'t str> {
    let cells = table
        .row(row)
        .ok_or(MalformedDocumentError::MissingRow { table: role, row })?;

    cells
        .get(column)
        .map(String::as_str)
        .ok_or(MalformedDocumentError::MissingCell {
            table: role,
            row,
            column,
        })
}
