use std::time::Duration;

use tunelane_core::{DesignTokens, LayoutReport, Session, StaticCatalog};
use tunelane_protocol::NavSignal;
use wasm_bindgen::prelude::*;

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// A browsing session driven from the page: key names in, render commands out.
#[wasm_bindgen]
pub struct TvEngine {
    session: Session,
    layout: LayoutReport,
}

#[wasm_bindgen]
impl TvEngine {
    /// Build an engine from design tokens and a catalog, both JSON.
    /// Empty strings select the defaults and the demo catalog.
    #[wasm_bindgen(constructor)]
    pub fn new(tokens_json: &str, catalog_json: &str) -> Result<TvEngine, JsError> {
        let tokens: DesignTokens = if tokens_json.trim().is_empty() {
            DesignTokens::default()
        } else {
            serde_json::from_str(tokens_json).map_err(js_error)?
        };
        let catalog = if catalog_json.trim().is_empty() {
            StaticCatalog::demo()
        } else {
            StaticCatalog::from_json(catalog_json).map_err(js_error)?
        };
        Ok(Self {
            session: Session::new(Box::new(catalog), tokens),
            layout: LayoutReport::new(),
        })
    }

    /// Deliver a remote key by name (`"left"`, `"select"`, `"back"`, ...).
    /// Returns whether anything consumed it.
    pub fn handle(&mut self, signal: &str) -> Result<bool, JsError> {
        let signal = NavSignal::parse(signal)
            .ok_or_else(|| JsError::new(&format!("unknown signal: {signal}")))?;
        Ok(self.session.handle(signal))
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    pub fn tick(&mut self, elapsed_ms: f64) {
        self.session.tick(Duration::from_secs_f64(elapsed_ms.max(0.0) / 1000.0));
    }

    pub fn report_container_width(&mut self, group: usize, width: f64) {
        self.layout.set_container_width(group, width);
        self.session.report_layout(&self.layout);
    }

    pub fn report_item_width(&mut self, group: usize, id: &str, width: f64) {
        self.layout.set_item_width(group, id, width);
        self.session.report_layout(&self.layout);
    }

    pub fn report_more_width(&mut self, group: usize, width: f64) {
        self.layout.set_more_width(group, width);
        self.session.report_layout(&self.layout);
    }

    /// Measurements belong to the drawn screen; call after navigating.
    pub fn clear_layout(&mut self) {
        self.layout = LayoutReport::new();
    }

    /// Render commands for the current frame, as JSON.
    pub fn render(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.session.render()).map_err(js_error)
    }

    /// Route, focus and player state, as JSON.
    pub fn snapshot(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.session.snapshot()).map_err(js_error)
    }
}
