//! # Coffer - Currency, Portrait and Equipment Hooks for RPG Hosts
//!
//! Coffer is a set of small services a tick-driven RPG engine calls from its
//! hook points. It does not own actors, items or windows; it works through
//! the host traits in [`host`].
//!
//! ## Features
//!
//! - **Multiple Currencies**: An ordered denomination table (gold/silver/copper,
//!   dollars/quarters/pennies, ...) with exact integer conversion between a
//!   single base magnitude and per-denomination counts.
//! - **Currency Items**: Picking up a denomination item credits party wealth
//!   instead of filling the inventory; shop prices can be tagged to any unit.
//! - **Currency Display**: Right-to-left icon/count layout with padding and an
//!   overflow marker.
//! - **Animated Portraits**: Idle and speaking sweeps with random rest pauses,
//!   snapping back to the resting pose during authored waits.
//! - **Equipment Trigger**: Reserve a common event when a watched slot changes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coffer::config::Config;
//! use coffer::session::GameSession;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("coffer.toml").await?;
//!     config.validate()?;
//!
//!     let mut session = GameSession::new(&config)?;
//!     session.purse_mut().gain_gold(235);
//!     println!("{:?}", session.gold_breakdown(false));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`ledger`] - Denomination table, conversion, purse, shop pricing, display layout
//! - [`portrait`] - Message animation settings, `AnimFace` commands, sweep state machine
//! - [`equip`] - Equipment-change common event trigger
//! - [`session`] - Per-game context object and hook entry points
//! - [`host`] - Traits the host engine implements
//! - [`config`] - Configuration management and validation

pub mod config;
pub mod equip;
pub mod host;
pub mod ledger;
pub mod logutil;
pub mod portrait;
pub mod session;
