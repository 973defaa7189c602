//! Host collaborator contracts.
//!
//! The engine that owns actors, items, windows and the script interpreter is
//! outside this crate. Hook code talks to it only through these traits, so a
//! host wires its own objects in and tests wire in the small in-memory
//! implementations below.

use std::collections::HashMap;

use crate::ledger::parse_currency_tag;

/// Read access to the item database.
pub trait ItemCatalog {
    /// Denomination reference a priced entry is tagged with, if any.
    fn currency_tag(&self, item_id: u32) -> Option<u32>;
    /// Icon index for an item; 0 means the item has no icon.
    fn icon_index(&self, item_id: u32) -> u32;
}

/// Party inventory storage for anything that is not a currency item.
pub trait Inventory {
    fn gain_item(&mut self, item_id: u32, amount: i64, include_equip: bool);
}

/// Script interpreter services used by the equipment trigger.
pub trait ScriptHost {
    fn set_variable(&mut self, variable_id: u32, value: i64);
    fn reserve_common_event(&mut self, event_id: u32);
}

/// Text metrics of the window a currency breakdown is drawn into.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> i32;
    fn icon_width(&self) -> i32;
}

/// Drawing surface for currency breakdowns. Text is right-aligned inside `width`.
pub trait CurrencyCanvas {
    fn draw_icon(&mut self, icon_index: u32, x: i32, y: i32);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, width: i32);
}

/// A catalog row: free-form note text plus icon.
#[derive(Debug, Clone, Default)]
pub struct CatalogEntry {
    pub note: String,
    pub icon_index: u32,
}

/// HashMap-backed catalog. Currency tags are read from each entry's note.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    entries: HashMap<u32, CatalogEntry>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item_id: u32, note: &str, icon_index: u32) {
        self.entries.insert(
            item_id,
            CatalogEntry {
                note: note.to_string(),
                icon_index,
            },
        );
    }
}

impl ItemCatalog for MemoryCatalog {
    fn currency_tag(&self, item_id: u32) -> Option<u32> {
        self.entries
            .get(&item_id)
            .and_then(|e| parse_currency_tag(&e.note))
    }

    fn icon_index(&self, item_id: u32) -> u32 {
        self.entries.get(&item_id).map(|e| e.icon_index).unwrap_or(0)
    }
}

/// Fixed-advance text metrics, for terminals and tests.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    pub char_width: i32,
    pub icon_width: i32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            char_width: 12,
            icon_width: 32,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str) -> i32 {
        let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        chars.saturating_mul(self.char_width)
    }

    fn icon_width(&self) -> i32 {
        self.icon_width
    }
}
