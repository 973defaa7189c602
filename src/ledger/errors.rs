use thiserror::Error;

/// Errors that can arise while building or using the currency ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A decomposed amount did not carry one count per configured denomination.
    #[error("invalid input: expected {expected} denomination counts, got {found}")]
    InvalidInput { expected: usize, found: usize },

    /// Rejected denomination table (empty list, zero rate).
    #[error("invalid currency configuration: {0}")]
    InvalidConfig(String),

    /// Checked integer arithmetic overflowed while converting to base units.
    #[error("currency arithmetic overflow")]
    Overflow,

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}
