//! Widget configuration, optionally supplied by the host page as inline JSON:
//!
//! ```html
//! <script type="application/json" id="tiny-zoom-config">
//!   { "selector": "img.zoomable", "debug": true }
//! </script>
//! ```

use serde::Deserialize;

use crate::error::ZoomError;

pub const CONFIG_ELEMENT_ID: &str = "tiny-zoom-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// CSS selector for zoomable images.
    pub selector: String,
    /// Wheel multiplier when scrolling up/back.
    pub wheel_in: f64,
    /// Wheel multiplier when scrolling down/forward.
    pub wheel_out: f64,
    pub dblclick_in: f64,
    /// Used when shift is held during the double-click.
    pub dblclick_out: f64,
    /// An axis is shrunk once `image * fit_margin` exceeds the viewport.
    pub fit_margin: f64,
    /// Share of the viewport a shrunk axis ends up covering.
    pub fit_ratio: f64,
    /// Max share of the viewport the canvas backing store may take.
    pub surface_cap: f64,
    pub backdrop: String,
    pub debug: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            selector: ".TinyZoom".to_string(),
            wheel_in: 1.1,
            wheel_out: 0.9,
            dblclick_in: 2.0,
            dblclick_out: 0.5,
            fit_margin: 1.1,
            fit_ratio: 0.9,
            surface_cap: 0.85,
            backdrop: "rgba(0, 0, 0, 0.8)".to_string(),
            debug: false,
        }
    }
}

impl ZoomConfig {
    pub fn from_json(raw: &str) -> Result<Self, ZoomError> {
        let cfg: Self = serde_json::from_str(raw)?;
        Ok(cfg.sanitized())
    }

    /// Looks for the inline config block; absent means defaults.
    pub fn from_document(document: &web_sys::Document) -> Result<Self, ZoomError> {
        match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    // Zoom factors must stay positive or the scale could flip sign or collapse.
    fn sanitized(mut self) -> Self {
        let d = Self::default();
        let keep = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        self.wheel_in = keep(self.wheel_in, d.wheel_in);
        self.wheel_out = keep(self.wheel_out, d.wheel_out);
        self.dblclick_in = keep(self.dblclick_in, d.dblclick_in);
        self.dblclick_out = keep(self.dblclick_out, d.dblclick_out);
        self.fit_margin = keep(self.fit_margin, d.fit_margin);
        self.fit_ratio = keep(self.fit_ratio, d.fit_ratio);
        self.surface_cap = keep(self.surface_cap, d.surface_cap);
        if self.selector.trim().is_empty() {
            self.selector = d.selector;
        }
        self
    }
}
