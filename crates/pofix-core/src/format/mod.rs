//! Fixed-width record output.
//!
//! An order becomes one `UNH` record, one `CLO` record and an `OLD`/`OLDA`
//! pair per line item. Columns are positional: downstream readers slice
//! each record by character offset.
//!
//! ```text
//! UNH  <unh_id:6>
//! CLO  <customer:7><purchase_order_no:24><yyyyMMdd> <yyyyMMdd>
//! OLD  <item:4> <product_code:15> <quantity:010>.<price:08.3>
//! OLDA <description:49>
//! ```

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::models::order::{Order, OrderLine};

pub const UNH_TAG: &str = "UNH  ";
pub const CLO_TAG: &str = "CLO  ";
pub const OLD_TAG: &str = "OLD  ";
pub const OLDA_TAG: &str = "OLDA ";

pub const UNH_ID_WIDTH: usize = 6;
pub const CUSTOMER_WIDTH: usize = 7;
pub const PURCHASE_ORDER_NO_WIDTH: usize = 24;
pub const PRODUCT_CODE_WIDTH: usize = 15;
pub const QUANTITY_WIDTH: usize = 10;
pub const PRICE_WIDTH: usize = 8;
pub const PRICE_SCALE: u32 = 3;
pub const DESCRIPTION_WIDTH: usize = 49;

const DATE_FORMAT: &str = "%Y%m%d";

/// Renders orders as fixed-width records.
#[derive(Debug, Clone, Default)]
pub struct FixedWidthFormatter {
    /// Cut text fields that exceed their column.
    truncate_overflow: bool,
}

impl FixedWidthFormatter {
    /// Create a new formatter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set overflow truncation.
    pub fn with_truncation(mut self, truncate: bool) -> Self {
        self.truncate_overflow = truncate;
        self
    }

    /// Format an order. Records are joined with `\n`, without a trailing
    /// newline.
    pub fn format(&self, order: &Order) -> String {
        let mut records = Vec::with_capacity(2 + 2 * order.order_lines.len());
        records.push(self.unh_record(order));
        records.push(self.clo_record(order));

        for line in &order.order_lines {
            records.push(self.old_record(line));
            records.push(self.olda_record(line));
        }

        records.join("\n")
    }

    fn unh_record(&self, order: &Order) -> String {
        format!(
            "{}{}",
            UNH_TAG,
            self.text("UNH", "unh_id", &order.unh_id, UNH_ID_WIDTH)
        )
    }

    fn clo_record(&self, order: &Order) -> String {
        format!(
            "{}{}{}{} {}",
            CLO_TAG,
            self.text("CLO", "customer", &order.customer, CUSTOMER_WIDTH),
            self.text(
                "CLO",
                "purchase_order_no",
                &order.purchase_order_no,
                PURCHASE_ORDER_NO_WIDTH
            ),
            format_date(order.order_date),
            format_date(order.promised_date),
        )
    }

    fn old_record(&self, line: &OrderLine) -> String {
        format!(
            "{}{} {} {}.{}",
            OLD_TAG,
            line.item_number,
            self.text("OLD", "product_code", &line.product_code, PRODUCT_CODE_WIDTH),
            pad_left(&line.quantity.to_string(), QUANTITY_WIDTH, '0'),
            pad_left(&format_price(line.price), PRICE_WIDTH, '0'),
        )
    }

    fn olda_record(&self, line: &OrderLine) -> String {
        format!(
            "{}{}",
            OLDA_TAG,
            self.text("OLDA", "description", &line.description, DESCRIPTION_WIDTH)
        )
    }

    fn text(&self, record: &str, field: &str, value: &str, width: usize) -> String {
        let len = value.chars().count();
        if len > width {
            warn!(
                record = record,
                field = field,
                width = width,
                len = len,
                truncated = self.truncate_overflow,
                "value overflows its column"
            );
            if self.truncate_overflow {
                return value.chars().take(width).collect();
            }
        }
        pad_right(value, width, ' ')
    }
}

/// Format an order with default settings.
pub fn format_order(order: &Order) -> String {
    FixedWidthFormatter::new().format(order)
}

/// Right-pad `value` with `fill` to `width` characters. Longer values are
/// returned unchanged.
pub fn pad_right(value: &str, width: usize, fill: char) -> String {
    let mut out = String::with_capacity(width.max(value.len()));
    out.push_str(value);
    out.extend(std::iter::repeat_n(fill, width.saturating_sub(value.chars().count())));
    out
}

/// Left-pad `value` with `fill` to `width` characters. Longer values are
/// returned unchanged.
pub fn pad_left(value: &str, width: usize, fill: char) -> String {
    let mut out: String =
        std::iter::repeat_n(fill, width.saturating_sub(value.chars().count())).collect();
    out.push_str(value);
    out
}

/// `yyyyMMdd`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Exactly three fractional digits, midpoint rounded away from zero.
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.3}", rounded)
}
