//! # Configuration Management Module
//!
//! Typed configuration for the currency ledger, portrait animation and
//! equipment trigger, loaded once at startup from a TOML file and validated
//! before anything is built from it.
//!
//! ## Configuration Structure
//!
//! - [`CurrencyConfig`] - Denomination table, default unit and display limits
//! - [`PortraitConfig`] - Face prefix, frame counts, pause bounds, sweep speed
//! - [`EquipTriggerConfig`] - Which equipment slot fires which common event
//! - [`LoggingConfig`] - Log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use coffer::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("coffer.toml").await?;
//!     config.validate()?;
//!     println!("Denominations: {}", config.currency.denominations.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [currency]
//! default_unit = 0
//! padding = 10
//!
//! [[currency.denominations]]
//! reference_id = 1
//! rate = 100
//! name = "gold"
//! symbol = "g"
//!
//! [[currency.denominations]]
//! reference_id = 3
//! rate = 1
//! name = "copper"
//! symbol = "c"
//!
//! [portrait]
//! face_prefix = "anim_"
//! min_pause_ticks = 90
//! max_pause_ticks = 240
//! ```
//!
//! Denominations are listed most valuable first and are never re-sorted.
//! A reference id matches the first row carrying it, so with the built-in
//! table (every row on reference 0) an untagged price of 50 is charged as
//! 50 gold, i.e. 5000 base units.

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::ledger::Denomination;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub denominations: Vec<Denomination>,
    /// Denomination used for prices without a `<Currency: N>` tag.
    #[serde(default)]
    pub default_unit: u32,
    /// Pixels between display groups.
    #[serde(default = "default_padding")]
    pub padding: i32,
    /// Party wealth cap; larger displayed values use `overflow_marker`.
    #[serde(default = "default_max_gold")]
    pub max_gold: i64,
    #[serde(default = "default_overflow_marker")]
    pub overflow_marker: String,
    /// Show only the highest denomination in the main-menu gold window.
    #[serde(default = "default_compact_menu")]
    pub compact_menu: bool,
}

fn default_padding() -> i32 {
    10
}

fn default_max_gold() -> i64 {
    99_999_999
}

fn default_overflow_marker() -> String {
    "A lot!".to_string()
}

fn default_compact_menu() -> bool {
    true
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            denominations: vec![
                Denomination::new(0, 100).labelled("gold", "g"),
                Denomination::new(0, 10).labelled("silver", "s"),
                Denomination::new(0, 1).labelled("copper", "c"),
            ],
            default_unit: 0,
            padding: default_padding(),
            max_gold: default_max_gold(),
            overflow_marker: default_overflow_marker(),
            compact_menu: default_compact_menu(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortraitConfig {
    /// Face sheets whose name starts with this are animated.
    pub face_prefix: String,
    pub min_pause_ticks: u32,
    pub max_pause_ticks: u32,
    pub idle_frames: u32,
    pub speak_frames: u32,
    /// Host ticks per frame step.
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ticks: u32,
}

fn default_frame_interval() -> u32 {
    6
}

impl Default for PortraitConfig {
    fn default() -> Self {
        Self {
            face_prefix: "anim_".to_string(),
            min_pause_ticks: 90,
            max_pause_ticks: 240,
            idle_frames: 2,
            speak_frames: 3,
            frame_interval_ticks: default_frame_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipTriggerConfig {
    pub enabled: bool,
    pub common_event_id: u32,
    /// Equipment type id watched (4 = body armor in a stock database).
    pub slot_type: u32,
    /// Variable that receives the actor id before the event runs.
    pub variable_id: u32,
    /// Actor ids that fire the trigger; a leading 0 means every actor.
    #[serde(default = "default_actors")]
    pub actors: Vec<u32>,
}

fn default_actors() -> Vec<u32> {
    vec![0]
}

impl Default for EquipTriggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            common_event_id: 1,
            slot_type: 4,
            variable_id: 1,
            actors: default_actors(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub portrait: PortraitConfig,
    #[serde(default)]
    pub equip_trigger: EquipTriggerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        Self::from_toml(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject values the ledger and animator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.currency.denominations.is_empty() {
            bail!("currency.denominations must list at least one denomination");
        }
        if let Some(d) = self.currency.denominations.iter().find(|d| d.rate == 0) {
            bail!(
                "currency denomination with reference {} has rate 0; rates must be positive",
                d.reference_id
            );
        }
        if self.currency.max_gold < 0 {
            bail!("currency.max_gold must not be negative");
        }
        if self.portrait.idle_frames == 0 || self.portrait.speak_frames == 0 {
            bail!("portrait.idle_frames and portrait.speak_frames must be at least 1");
        }
        if self.portrait.frame_interval_ticks == 0 {
            bail!("portrait.frame_interval_ticks must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.currency.denominations.len(), 3);
        assert_eq!(config.portrait.frame_interval_ticks, 6);
        assert_eq!(config.equip_trigger.slot_type, 4);
    }

    #[test]
    fn rejects_empty_or_zero_rate_tables() {
        let mut config = Config::default();
        config.currency.denominations.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.currency.denominations[1].rate = 0;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("rate 0"), "unexpected error: {}", err);
    }

    #[test]
    fn rejects_zero_frame_counts() {
        let mut config = Config::default();
        config.portrait.speak_frames = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.portrait.frame_interval_ticks = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let toml = r#"
            [currency]
            [[currency.denominations]]
            reference_id = 7
            rate = 25
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.currency.denominations[0].reference_id, 7);
        assert_eq!(config.currency.padding, 10);
        assert_eq!(config.currency.overflow_marker, "A lot!");
        assert_eq!(config.portrait.face_prefix, "anim_");
        assert_eq!(config.equip_trigger.actors, vec![0]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn default_unit_resolves_to_first_row() {
        let ledger =
            crate::ledger::CurrencyLedger::from_config(&CurrencyConfig::default()).unwrap();
        let unit = ledger.resolve_unit(None);
        assert_eq!(unit, 0);
        assert_eq!(ledger.index_of(unit), Some(0));
        assert_eq!(ledger.convert_price(50, unit).unwrap(), 5000);
    }

    #[test]
    fn default_config_survives_toml() {
        let serialized = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed = Config::from_toml(&serialized).unwrap();
        assert_eq!(
            parsed.currency.denominations,
            Config::default().currency.denominations
        );
        assert_eq!(parsed.portrait.max_pause_ticks, 240);
    }
}
