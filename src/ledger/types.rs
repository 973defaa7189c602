use serde::{Deserialize, Serialize};

/// One rated unit of the currency system (e.g. gold, silver, copper).
///
/// `rate` is the value of one unit expressed in the smallest unit's terms,
/// so a 100/10/1 table reads gold = 100, silver = 10, copper = 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Denomination {
    /// Catalog item that represents this denomination. 0 means the standard unit.
    pub reference_id: u32,
    /// How many smallest units one of these is worth. Always positive once validated.
    pub rate: u32,
    /// Singular display name (e.g. "gold"); display only.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Short display symbol (e.g. "g"); display only.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub symbol: String,
}

impl Denomination {
    pub fn new(reference_id: u32, rate: u32) -> Self {
        Self {
            reference_id,
            rate,
            name: String::new(),
            symbol: String::new(),
        }
    }

    /// Attach display labels.
    pub fn labelled(mut self, name: &str, symbol: &str) -> Self {
        self.name = name.to_string();
        self.symbol = symbol.to_string();
        self
    }

    /// Label used by plain-text formatting; falls back to the name, then the reference.
    pub fn label(&self) -> String {
        if !self.symbol.is_empty() {
            self.symbol.clone()
        } else if !self.name.is_empty() {
            format!(" {}", self.name)
        } else {
            format!("#{}", self.reference_id)
        }
    }
}

/// Per-denomination counts, one slot per configured denomination, in ledger order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecomposedAmount(Vec<i64>);

impl DecomposedAmount {
    pub fn new(counts: Vec<i64>) -> Self {
        Self(counts)
    }

    /// All-zero breakdown for `len` denominations.
    pub fn zeroed(len: usize) -> Self {
        Self(vec![0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn counts(&self) -> &[i64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        self.0.get(index).copied()
    }

    /// True when every slot is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| *c == 0)
    }

    /// Keep only the first (highest) slot, as the compact gold window does.
    pub fn truncated_to_first(&self) -> Self {
        Self(self.0.iter().take(1).copied().collect())
    }
}

impl From<Vec<i64>> for DecomposedAmount {
    fn from(counts: Vec<i64>) -> Self {
        Self(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefers_symbol() {
        let d = Denomination::new(3, 100).labelled("gold", "g");
        assert_eq!(d.label(), "g");
        let d = Denomination::new(3, 100).labelled("gold", "");
        assert_eq!(d.label(), " gold");
        assert_eq!(Denomination::new(7, 1).label(), "#7");
    }

    #[test]
    fn truncation_keeps_highest_slot() {
        let amount = DecomposedAmount::new(vec![4, 2, 9]);
        assert_eq!(amount.truncated_to_first().counts(), &[4]);
        assert!(DecomposedAmount::zeroed(3).is_zero());
        assert!(!amount.is_zero());
    }
}
