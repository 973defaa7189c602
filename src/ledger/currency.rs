//! Base-value encoding and decoding across an ordered denomination table.
//!
//! All arithmetic is integer. A magnitude is the total expressed in the
//! smallest unit; a [`DecomposedAmount`] is the per-denomination breakdown in
//! configuration order (highest value first). Decoding is greedy and performs
//! no rounding correction: a remainder smaller than the last configured rate
//! is dropped.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::errors::LedgerError;
use super::types::{DecomposedAmount, Denomination};
use crate::config::CurrencyConfig;

/// Ordered denomination table plus the unit used for untagged prices.
///
/// Built once per session from validated configuration and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyLedger {
    denominations: Vec<Denomination>,
    default_unit: u32,
}

impl CurrencyLedger {
    /// Build a ledger, rejecting an empty table or any zero rate.
    /// Order is kept exactly as given.
    pub fn new(denominations: Vec<Denomination>, default_unit: u32) -> Result<Self, LedgerError> {
        if denominations.is_empty() {
            return Err(LedgerError::InvalidConfig(
                "at least one denomination is required".to_string(),
            ));
        }
        if let Some(pos) = denominations.iter().position(|d| d.rate == 0) {
            return Err(LedgerError::InvalidConfig(format!(
                "denomination {} (reference {}) has a zero rate",
                pos, denominations[pos].reference_id
            )));
        }
        if denominations.windows(2).any(|w| w[0].rate < w[1].rate) {
            debug!("Denomination rates are not descending; decoding will not be canonical");
        }
        Ok(Self {
            denominations,
            default_unit,
        })
    }

    pub fn from_config(config: &CurrencyConfig) -> Result<Self, LedgerError> {
        let ledger = Self::new(config.denominations.clone(), config.default_unit)?;
        info!(
            "Currency ledger ready: {} denominations, default unit {}",
            ledger.len(),
            ledger.default_unit
        );
        Ok(ledger)
    }

    pub fn denominations(&self) -> &[Denomination] {
        &self.denominations
    }

    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    pub fn default_unit(&self) -> u32 {
        self.default_unit
    }

    /// Sum of `counts[i] × rate[i]`. Fails when the breakdown length differs
    /// from the table length.
    pub fn encode_to_base(&self, amounts: &DecomposedAmount) -> Result<i64, LedgerError> {
        if amounts.len() != self.denominations.len() {
            return Err(LedgerError::InvalidInput {
                expected: self.denominations.len(),
                found: amounts.len(),
            });
        }
        amounts
            .counts()
            .iter()
            .zip(&self.denominations)
            .try_fold(0i64, |total, (count, denom)| {
                count
                    .checked_mul(i64::from(denom.rate))
                    .and_then(|v| total.checked_add(v))
                    .ok_or(LedgerError::Overflow)
            })
    }

    /// Greedy breakdown in table order. Non-positive magnitudes yield all zeros.
    pub fn decode_from_base(&self, magnitude: i64) -> DecomposedAmount {
        let mut remaining = magnitude;
        let counts = self
            .denominations
            .iter()
            .map(|denom| {
                if remaining <= 0 {
                    return 0;
                }
                let rate = i64::from(denom.rate);
                let units = remaining / rate;
                remaining -= units * rate;
                units
            })
            .collect::<Vec<_>>();
        if remaining > 0 {
            debug!("Dropped {} sub-unit remainder while decoding {}", remaining, magnitude);
        }
        DecomposedAmount::new(counts)
    }

    /// Position of a denomination reference in the table (first match).
    pub fn index_of(&self, reference_id: u32) -> Option<usize> {
        self.denominations
            .iter()
            .position(|d| d.reference_id == reference_id)
    }

    /// Membership test for catalog items. Reference 0 is the standard-unit
    /// placeholder, never a catalog item, so it is not recognized here.
    pub fn is_recognized_denomination(&self, item_id: u32) -> bool {
        item_id != 0 && self.index_of(item_id).is_some()
    }

    /// Tagged unit if any, otherwise the configured default.
    pub fn resolve_unit(&self, tag: Option<u32>) -> u32 {
        tag.unwrap_or(self.default_unit)
    }

    /// Convert `magnitude` units of `unit` into base units. An unknown unit
    /// returns the input unchanged.
    pub fn convert_price(&self, magnitude: i64, unit: u32) -> Result<i64, LedgerError> {
        let Some(index) = self.index_of(unit) else {
            warn!(
                "Unknown denomination {}; treating {} as base units",
                unit, magnitude
            );
            return Ok(magnitude);
        };
        let mut counts = vec![0; self.denominations.len()];
        counts[index] = magnitude;
        self.encode_to_base(&DecomposedAmount::new(counts))
    }

    /// Convert between two denominations through base units. The result is
    /// floored into `to_unit`; an unknown `to_unit` leaves the base value.
    pub fn convert_between(
        &self,
        magnitude: i64,
        from_unit: u32,
        to_unit: u32,
    ) -> Result<i64, LedgerError> {
        let base = self.convert_price(magnitude, from_unit)?;
        match self.index_of(to_unit) {
            Some(index) => Ok(base.div_euclid(i64::from(self.denominations[index].rate))),
            None => Ok(base),
        }
    }

    /// Snapshot for embedding in save data.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

// ============================================================================
// Plain-text formatting
// ============================================================================

/// Format a breakdown as e.g. "2g 3s 5c", skipping empty slots.
pub fn format_plain(units: &DecomposedAmount, ledger: &CurrencyLedger) -> String {
    let parts: Vec<String> = units
        .counts()
        .iter()
        .zip(ledger.denominations())
        .filter(|(count, _)| **count != 0)
        .map(|(count, denom)| format!("{}{}", count, denom.label()))
        .collect();

    if parts.is_empty() {
        let smallest = ledger
            .denominations()
            .last()
            .map(|d| d.label())
            .unwrap_or_default();
        format!("0{}", smallest)
    } else {
        parts.join(" ")
    }
}
