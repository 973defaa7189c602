//! Right-to-left layout of a currency breakdown inside a window line.
//!
//! Groups are laid out from the smallest denomination (rightmost) to the
//! largest. Each group is an optional icon at the current right edge followed
//! by the right-aligned count to its left.

use serde::{Deserialize, Serialize};

use super::currency::CurrencyLedger;
use super::types::DecomposedAmount;
use crate::config::CurrencyConfig;
use crate::host::{CurrencyCanvas, ItemCatalog, TextMeasure};

/// Icons sit slightly below the text baseline.
const ICON_Y_OFFSET: i32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One primitive emitted by [`layout_currencies`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Icon { icon_index: u32, x: i32, y: i32 },
    /// Right-aligned inside `[x, x + width)`.
    Text { text: String, x: i32, y: i32, width: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStyle {
    pub padding: i32,
    /// Values above this render as `overflow_marker`.
    pub max_value: i64,
    pub overflow_marker: String,
}

impl DisplayStyle {
    pub fn from_config(config: &CurrencyConfig) -> Self {
        Self {
            padding: config.padding,
            max_value: config.max_gold,
            overflow_marker: config.overflow_marker.clone(),
        }
    }
}

/// Lay out `units` inside `rect`. Zero counts are skipped unless `party_mode`
/// is set, in which case every slot is drawn.
pub fn layout_currencies(
    units: &DecomposedAmount,
    rect: Rect,
    party_mode: bool,
    ledger: &CurrencyLedger,
    catalog: &dyn ItemCatalog,
    measure: &dyn TextMeasure,
    style: &DisplayStyle,
) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    let mut width = rect.width;
    for (value, denom) in units.counts().iter().zip(ledger.denominations()).rev() {
        if *value > 0 || party_mode {
            let icon_index = match denom.reference_id {
                0 => 0,
                id => catalog.icon_index(id),
            };
            width = layout_unit(&mut ops, *value, icon_index, rect, width, measure, style);
            width -= style.padding;
        }
    }
    ops
}

fn layout_unit(
    ops: &mut Vec<DrawOp>,
    value: i64,
    icon_index: u32,
    rect: Rect,
    mut width: i32,
    measure: &dyn TextMeasure,
    style: &DisplayStyle,
) -> i32 {
    if icon_index > 0 {
        width -= measure.icon_width();
        ops.push(DrawOp::Icon {
            icon_index,
            x: rect.x + width,
            y: rect.y + ICON_Y_OFFSET,
        });
    }
    let text = if value > style.max_value {
        style.overflow_marker.clone()
    } else {
        value.to_string()
    };
    let text_width = measure.text_width(&text);
    ops.push(DrawOp::Text {
        text,
        x: rect.x,
        y: rect.y,
        width: width - style.padding,
    });
    width - text_width - style.padding
}

/// Lay out and draw in one step.
#[allow(clippy::too_many_arguments)]
pub fn draw_currencies(
    canvas: &mut dyn CurrencyCanvas,
    units: &DecomposedAmount,
    rect: Rect,
    party_mode: bool,
    ledger: &CurrencyLedger,
    catalog: &dyn ItemCatalog,
    measure: &dyn TextMeasure,
    style: &DisplayStyle,
) {
    for op in layout_currencies(units, rect, party_mode, ledger, catalog, measure, style) {
        match op {
            DrawOp::Icon { icon_index, x, y } => canvas.draw_icon(icon_index, x, y),
            DrawOp::Text { text, x, y, width } => canvas.draw_text(&text, x, y, width),
        }
    }
}

/// Width of a gold window that fits one wide group and `count - 1` narrow ones.
pub fn gold_window_width(count: usize, measure: &dyn TextMeasure, padding: i32) -> i32 {
    let icon = measure.icon_width();
    let wide = icon + padding * 3 + measure.text_width("00000000");
    let narrow = icon + padding * 3 + measure.text_width("00");
    let extra = i32::try_from(count.saturating_sub(1)).unwrap_or(i32::MAX);
    wide.saturating_add(narrow.saturating_mul(extra))
}
