//! Inventory bar markup and transient status text

use crate::sim::{Inventory, Selection};

/// How long a status message stays up (ms)
pub const STATUS_DURATION_MS: f64 = 2000.0;

/// Inner HTML for the `#inventory` bar: one item per placeable kind with
/// its swatch, count and hotkey; the selected slot is outlined.
pub fn inventory_html(inventory: &Inventory, selection: &Selection) -> String {
    inventory
        .entries()
        .enumerate()
        .map(|(i, (kind, count))| {
            let style = if i == selection.slot() {
                "outline:2px solid #0057ff; background:#e0f0ff;"
            } else {
                ""
            };
            format!(
                r#"<span class="inv-item" style="{style}"><span class="block-icon block-{name}" style="background:{color}"></span><span>{count}</span><span class="inv-key">[{key}]</span></span>"#,
                name = kind.as_str(),
                color = kind.css_color(),
                key = i + 1,
            )
        })
        .collect()
}

/// Short-lived message shown in place of a blocking alert
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLine {
    text: Option<String>,
    until: f64,
}

impl StatusLine {
    pub fn show(&mut self, text: impl Into<String>, now: f64) {
        self.text = Some(text.into());
        self.until = now + STATUS_DURATION_MS;
    }

    /// Current text, if still within its display window
    pub fn current(&self, now: f64) -> Option<&str> {
        match &self.text {
            Some(text) if now < self.until => Some(text),
            _ => None,
        }
    }
}
