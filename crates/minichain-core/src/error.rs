use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The chain was read before the genesis commit. Unreachable for a
    /// ledger built through [`crate::Ledger::new`].
    #[error("chain is empty")]
    EmptyChain,
}
