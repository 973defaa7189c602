//! Session context and hook entry points.
//!
//! A [`GameSession`] owns every piece of per-game state: the currency ledger,
//! party wealth, message animation settings, the active portrait animator and
//! the equipment trigger. The host calls one method per hook point; nothing
//! here is global.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::equip::EquipChangeTrigger;
use crate::host::{Inventory, ItemCatalog, ScriptHost, TextMeasure};
use crate::ledger::{
    gain_item, layout_currencies, shop_price, shop_total, CurrencyLedger, DecomposedAmount,
    DisplayStyle, DrawOp, LedgerError, PartyPurse, Rect,
};
use crate::logutil::escape_log;
use crate::portrait::{
    AnimFaceCommand, CommandError, FaceFrame, MessageSettings, PortraitAnimator, TickSignals,
};

/// What a save file carries for this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveContents {
    pub purse: PartyPurse,
    pub currencies: CurrencyLedger,
    pub message: MessageSettings,
}

impl SaveContents {
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

pub struct GameSession {
    ledger: CurrencyLedger,
    configured_ledger: CurrencyLedger,
    purse: PartyPurse,
    style: DisplayStyle,
    compact_menu: bool,
    face_prefix: String,
    message: MessageSettings,
    animator: PortraitAnimator,
    animating: bool,
    equip: EquipChangeTrigger,
    rng: StdRng,
}

impl GameSession {
    pub fn new(config: &Config) -> Result<Self, LedgerError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic pause sampling, for replays and tests.
    pub fn with_seed(config: &Config, seed: u64) -> Result<Self, LedgerError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &Config, rng: StdRng) -> Result<Self, LedgerError> {
        let ledger = CurrencyLedger::from_config(&config.currency)?;
        Ok(Self {
            configured_ledger: ledger.clone(),
            ledger,
            purse: PartyPurse::new(config.currency.max_gold),
            style: DisplayStyle::from_config(&config.currency),
            compact_menu: config.currency.compact_menu,
            face_prefix: config.portrait.face_prefix.clone(),
            message: MessageSettings::from_config(&config.portrait),
            animator: PortraitAnimator::new(config.portrait.frame_interval_ticks),
            animating: false,
            equip: EquipChangeTrigger::from_config(&config.equip_trigger),
            rng,
        })
    }

    pub fn ledger(&self) -> &CurrencyLedger {
        &self.ledger
    }

    pub fn purse(&self) -> &PartyPurse {
        &self.purse
    }

    pub fn purse_mut(&mut self) -> &mut PartyPurse {
        &mut self.purse
    }

    pub fn message_settings(&self) -> &MessageSettings {
        &self.message
    }

    pub fn message_settings_mut(&mut self) -> &mut MessageSettings {
        &mut self.message
    }

    pub fn animator(&self) -> &PortraitAnimator {
        &self.animator
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    // ------------------------------------------------------------------
    // Currency hooks
    // ------------------------------------------------------------------

    /// Item-acquired hook. Returns true when the item was turned into wealth.
    pub fn on_item_gained(
        &mut self,
        inventory: &mut dyn Inventory,
        item_id: u32,
        amount: i64,
        include_equip: bool,
    ) -> Result<bool, LedgerError> {
        gain_item(
            &self.ledger,
            &mut self.purse,
            inventory,
            item_id,
            amount,
            include_equip,
        )
    }

    /// Price-computed hook: base units for a shop entry.
    pub fn on_shop_price(
        &self,
        catalog: &dyn ItemCatalog,
        item_id: u32,
        base_price: i64,
    ) -> Result<i64, LedgerError> {
        shop_price(&self.ledger, catalog, item_id, base_price)
    }

    pub fn shop_total(&self, price: i64, quantity: i64) -> Result<DecomposedAmount, LedgerError> {
        shop_total(&self.ledger, price, quantity)
    }

    /// Party wealth broken down; `in_menu` honours the compact menu setting.
    pub fn gold_breakdown(&self, in_menu: bool) -> DecomposedAmount {
        let units = self.ledger.decode_from_base(self.purse.gold());
        if in_menu && self.compact_menu {
            units.truncated_to_first()
        } else {
            units
        }
    }

    /// Gold window contents: every slot is drawn, zeros included.
    pub fn layout_gold(
        &self,
        rect: Rect,
        in_menu: bool,
        catalog: &dyn ItemCatalog,
        measure: &dyn TextMeasure,
    ) -> Vec<DrawOp> {
        let units = self.gold_breakdown(in_menu);
        layout_currencies(
            &units,
            rect,
            true,
            &self.ledger,
            catalog,
            measure,
            &self.style,
        )
    }

    /// Shop line or total: only non-zero slots are drawn.
    pub fn layout_price(
        &self,
        price: i64,
        rect: Rect,
        catalog: &dyn ItemCatalog,
        measure: &dyn TextMeasure,
    ) -> Vec<DrawOp> {
        let units = self.ledger.decode_from_base(price);
        layout_currencies(
            &units,
            rect,
            false,
            &self.ledger,
            catalog,
            measure,
            &self.style,
        )
    }

    // ------------------------------------------------------------------
    // Message hooks
    // ------------------------------------------------------------------

    /// Message-started hook. Animated faces capture the current settings and
    /// return the first frame to draw.
    pub fn on_message_start(&mut self, face_name: &str) -> Option<FaceFrame> {
        self.message.set_face_name(face_name);
        self.animating = self.message.is_animated_face(&self.face_prefix);
        if !self.animating {
            return None;
        }
        self.animator.start_message(&self.message);
        debug!("Animating portrait {}", escape_log(face_name));
        Some(self.animator.current_frame(false))
    }

    pub fn on_message_end(&mut self) {
        self.animating = false;
    }

    /// Tick-updated hook. Returns the frame to redraw this tick, if any.
    pub fn on_tick(&mut self, signals: TickSignals) -> Option<FaceFrame> {
        if !self.animating {
            return None;
        }
        self.animator.update(signals, &mut self.rng)
    }

    /// Script command hook. Returns true when the line was an `AnimFace` command.
    pub fn on_plugin_command(&mut self, line: &str) -> Result<bool, CommandError> {
        match AnimFaceCommand::parse(line) {
            Ok(Some(command)) => {
                info!("Applying script command: {}", escape_log(line));
                self.message.apply(&command);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                warn!("Rejected script command '{}': {}", escape_log(line), e);
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Equipment hook
    // ------------------------------------------------------------------

    pub fn on_change_equip(
        &self,
        actor_id: u32,
        slot_index: usize,
        equip_slots: &[u32],
        host: &mut dyn ScriptHost,
    ) -> bool {
        self.equip
            .on_change_equip(actor_id, slot_index, equip_slots, host)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn save_contents(&self) -> SaveContents {
        SaveContents {
            purse: self.purse.clone(),
            currencies: self.ledger.clone(),
            message: self.message.clone(),
        }
    }

    pub fn save(&self) -> Result<Vec<u8>, LedgerError> {
        self.save_contents().to_bytes()
    }

    /// Install saved state verbatim. A saved ledger that no longer matches
    /// the configured table is kept as-is and reported.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), LedgerError> {
        let contents = SaveContents::from_bytes(bytes)?;
        if contents.currencies != self.configured_ledger {
            warn!(
                "Saved currency table ({} denominations) differs from configuration ({}); keeping saved table",
                contents.currencies.len(),
                self.configured_ledger.len()
            );
        }
        self.ledger = contents.currencies;
        self.purse = contents.purse;
        self.message = contents.message;
        self.animating = false;
        info!("Restored session with {} base units", self.purse.gold());
        Ok(())
    }
}
