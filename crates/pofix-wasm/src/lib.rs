//! WASM bindings for the purchase order fixed-width converter.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use wasm_bindgen::prelude::*;

use pofix_core::{FixedWidthFormatter, OrderProcessor, PofixConfig};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Convert an HTML purchase order into fixed-width records.
#[wasm_bindgen]
pub fn process_order(html: &str) -> Result<String, JsValue> {
    pofix_core::process_order(html).map_err(js_error)
}

/// Parse an HTML purchase order and return the order as a JS object.
#[wasm_bindgen]
pub fn parse_order(html: &str) -> Result<JsValue, JsValue> {
    let order = OrderProcessor::new().parse(html).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&order).map_err(js_error)
}

/// Order converter class carrying parser and formatter options.
#[wasm_bindgen]
pub struct OrderConverter {
    config: PofixConfig,
}

#[wasm_bindgen]
impl OrderConverter {
    /// Create a converter with default options.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: PofixConfig::default(),
        }
    }

    /// Trim whitespace around text cells.
    #[wasm_bindgen]
    pub fn set_trim_cell_text(&mut self, trim: bool) {
        self.config.parser.trim_cell_text = trim;
    }

    /// Cut values that do not fit their column.
    #[wasm_bindgen]
    pub fn set_truncate_overflow(&mut self, truncate: bool) {
        self.config.format.truncate_overflow = truncate;
    }

    /// Convert a document into fixed-width records.
    #[wasm_bindgen]
    pub fn convert(&self, html: &str) -> Result<String, JsValue> {
        OrderProcessor::from_config(&self.config)
            .process(html)
            .map_err(js_error)
    }

    /// Parse a document and format an order separately, returning both.
    #[wasm_bindgen]
    pub fn convert_with_order(&self, html: &str) -> Result<JsValue, JsValue> {
        let order = OrderProcessor::from_config(&self.config)
            .parse(html)
            .map_err(js_error)?;
        let records = FixedWidthFormatter::new()
            .with_truncation(self.config.format.truncate_overflow)
            .format(&order);

        #[derive(serde::Serialize)]
        struct ConvertResult {
            order: pofix_core::Order,
            records: String,
        }

        serde_wasm_bindgen::to_value(&ConvertResult { order, records }).map_err(js_error)
    }
}

impl Default for OrderConverter {
    fn default() -> Self {
        Self::new()
    }
}
