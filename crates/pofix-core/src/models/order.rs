//! Purchase order data model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel used for dates that could not be parsed (`0001-01-01`).
pub const MIN_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// Width of the zero-padded item number.
pub const ITEM_NUMBER_WIDTH: usize = 4;

/// A purchase order as read from the header and line-item tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Internal document identifier.
    #[serde(default)]
    pub unh_id: String,

    /// Customer code or name.
    #[serde(default)]
    pub customer: String,

    /// Purchase order number.
    #[serde(default)]
    pub purchase_order_no: String,

    /// Order date, or [`MIN_DATE`] when the source value was unusable.
    pub order_date: NaiveDate,

    /// Promised delivery date, or [`MIN_DATE`].
    pub promised_date: NaiveDate,

    /// Line items in source row order.
    #[serde(default)]
    pub order_lines: Vec<OrderLine>,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            unh_id: String::new(),
            customer: String::new(),
            purchase_order_no: String::new(),
            order_date: MIN_DATE,
            promised_date: MIN_DATE,
            order_lines: Vec::new(),
        }
    }
}

impl Order {
    /// Append a line, assigning the next item number.
    ///
    /// Item numbers are positional: the first line pushed is `0001`
    /// whatever the source row contained.
    pub fn push_line(
        &mut self,
        product_code: impl Into<String>,
        quantity: i32,
        price: Decimal,
        description: impl Into<String>,
    ) -> &OrderLine {
        let item_number = item_number(self.order_lines.len() + 1);
        self.order_lines.push(OrderLine {
            item_number,
            product_code: product_code.into(),
            quantity,
            price,
            description: description.into(),
        });
        &self.order_lines[self.order_lines.len() - 1]
    }
}

/// A single ordered product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// 1-based position, zero-padded to four digits.
    pub item_number: String,

    /// Product code.
    #[serde(default)]
    pub product_code: String,

    /// Ordered quantity (0 when unparseable).
    pub quantity: i32,

    /// Unit price (0 when unparseable).
    pub price: Decimal,

    /// Product description.
    #[serde(default)]
    pub description: String,
}

/// Format a 1-based position as an item number (`1` -> `"0001"`).
pub fn item_number(position: usize) -> String {
    format!("{:0width$}", position, width = ITEM_NUMBER_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_min_date_sentinel() {
        assert_eq!(MIN_DATE.format("%Y%m%d").to_string(), "00010101");
    }

    #[test]
    fn test_item_numbers_are_positional() {
        let mut order = Order::default();
        order.push_line("A", 1, Decimal::ONE, "first");
        order.push_line("B", 2, Decimal::ONE, "second");
        order.push_line("C", 3, Decimal::ONE, "third");

        let numbers: Vec<&str> = order
            .order_lines
            .iter()
            .map(|line| line.item_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["0001", "0002", "0003"]);
    }

    #[test]
    fn test_item_number_beyond_width() {
        assert_eq!(item_number(12), "0012");
        assert_eq!(item_number(12345), "12345");
    }

    #[test]
    fn test_serializes_to_json() {
        let mut order = Order {
            unh_id: "UNH1".to_string(),
            ..Order::default()
        };
        order.push_line("SKU1", 5, Decimal::new(125, 1), "Widget");

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["unh_id"], "UNH1");
        assert_eq!(json["order_date"], "0001-01-01");
        assert_eq!(json["order_lines"][0]["item_number"], "0001");
        assert_eq!(json["order_lines"][0]["price"], "12.5");
    }
}
