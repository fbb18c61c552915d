//! Table extraction from HTML documents.
//!
//! Every `<table>` is flattened into rows of cell text. Rows belong to
//! their nearest enclosing table, so a table nested inside a cell keeps
//! its rows to itself.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

lazy_static! {
    static ref TABLE: Selector = Selector::parse("table").unwrap();
    static ref ROW: Selector = Selector::parse("tr").unwrap();
}

/// A table as an ordered sequence of rows of cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    rows: Vec<Vec<String>>,
}

impl HtmlTable {
    /// Number of rows, header row included.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Get the cells of a specific row.
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    fn from_element(table: ElementRef<'_>) -> Self {
        let rows = table
            .select(&ROW)
            .filter(|row| owning_table(*row) == Some(table))
            .map(|row| {
                row.children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| matches!(el.value().name(), "td" | "th"))
                    .map(inner_text)
                    .collect()
            })
            .collect();

        Self { rows }
    }
}

/// Extract up to `limit` tables in document order.
pub fn extract_tables(html: &str, limit: usize) -> Vec<HtmlTable> {
    let document = Html::parse_document(html);
    let tables: Vec<HtmlTable> = document
        .select(&TABLE)
        .take(limit)
        .map(HtmlTable::from_element)
        .collect();

    debug!(
        "Extracted {} tables ({} rows)",
        tables.len(),
        tables.iter().map(HtmlTable::num_rows).sum::<usize>()
    );

    tables
}

/// Concatenated text of every descendant text node.
fn inner_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn owning_table(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}
