//! HTML document handling.

mod table;

pub use table::{HtmlTable, extract_tables};
