//! Party wealth, currency item pickup and shop pricing.

use log::debug;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyLedger;
use super::errors::LedgerError;
use super::types::DecomposedAmount;
use crate::host::{Inventory, ItemCatalog};

/// Total party wealth in base units, capped at `max_gold`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartyPurse {
    gold: i64,
    max_gold: i64,
}

impl PartyPurse {
    pub fn new(max_gold: i64) -> Self {
        Self {
            gold: 0,
            max_gold: max_gold.max(0),
        }
    }

    pub fn with_gold(mut self, gold: i64) -> Self {
        self.gold = gold.clamp(0, self.max_gold);
        self
    }

    pub fn gold(&self) -> i64 {
        self.gold
    }

    pub fn max_gold(&self) -> i64 {
        self.max_gold
    }

    /// Add (or with a negative delta, remove) wealth; the result stays in `[0, max_gold]`.
    pub fn gain_gold(&mut self, delta: i64) {
        self.gold = self.gold.saturating_add(delta).clamp(0, self.max_gold);
    }

    pub fn lose_gold(&mut self, amount: i64) {
        self.gain_gold(amount.saturating_neg());
    }
}

/// Route an item gain. Currency items become wealth and never reach the
/// inventory; everything else is passed through. Returns true when the item
/// was converted.
pub fn gain_item(
    ledger: &CurrencyLedger,
    purse: &mut PartyPurse,
    inventory: &mut dyn Inventory,
    item_id: u32,
    amount: i64,
    include_equip: bool,
) -> Result<bool, LedgerError> {
    if ledger.is_recognized_denomination(item_id) {
        let base = ledger.convert_price(amount, item_id)?;
        purse.gain_gold(base);
        debug!(
            "Currency item {} x{} credited as {} base units (now {})",
            item_id,
            amount,
            base,
            purse.gold()
        );
        Ok(true)
    } else {
        inventory.gain_item(item_id, amount, include_equip);
        Ok(false)
    }
}

/// Buy price in base units for a catalog entry, honouring its currency tag.
pub fn shop_price(
    ledger: &CurrencyLedger,
    catalog: &dyn ItemCatalog,
    item_id: u32,
    base_price: i64,
) -> Result<i64, LedgerError> {
    let unit = ledger.resolve_unit(catalog.currency_tag(item_id));
    ledger.convert_price(base_price, unit)
}

/// Breakdown of `price × quantity`, as the purchase-number window shows it.
pub fn shop_total(
    ledger: &CurrencyLedger,
    price: i64,
    quantity: i64,
) -> Result<DecomposedAmount, LedgerError> {
    let total = price.checked_mul(quantity).ok_or(LedgerError::Overflow)?;
    Ok(ledger.decode_from_base(total))
}

/// Read a `<Currency: N>` note tag. The key is case-insensitive and
/// whitespace around the key and value is ignored.
pub fn parse_currency_tag(note: &str) -> Option<u32> {
    let mut rest = note;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let close = after.find('>')?;
        let body = &after[..close];
        if let Some((key, value)) = body.split_once(':') {
            if key.trim().eq_ignore_ascii_case("currency") {
                if let Ok(id) = value.trim().parse::<u32>() {
                    return Some(id);
                }
            }
        }
        rest = &after[close + 1..];
    }
    None
}
