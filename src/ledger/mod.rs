//! Multi-denomination currency ledger.
//!
//! A fixed, ordered table of denominations (highest value first) converts
//! between a single base magnitude and a per-denomination breakdown. The rest
//! of the module builds on that: party wealth and currency item pickup,
//! shop pricing, and the right-to-left display layout.

pub mod currency;
pub mod display;
pub mod errors;
pub mod purse;
pub mod types;

pub use currency::{format_plain, CurrencyLedger};
pub use display::{
    draw_currencies, gold_window_width, layout_currencies, DisplayStyle, DrawOp, Rect,
};
pub use errors::LedgerError;
pub use purse::{gain_item, parse_currency_tag, shop_price, shop_total, PartyPurse};
pub use types::{DecomposedAmount, Denomination};
