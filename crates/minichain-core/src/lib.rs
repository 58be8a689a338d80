pub mod constants;
pub mod error;
pub mod pow;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use constants::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
pub use error::LedgerError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Canonical content digest: the block rendered as JSON with object keys
    /// in lexicographic order and compact separators, then SHA-256, encoded
    /// as 64 lowercase hex characters. Serializing through
    /// `serde_json::Value` pins the key order (`index`, `previous_hash`,
    /// `proof`, `timestamp`, `transactions`; within a transaction `amount`,
    /// `recipient`, `sender`) regardless of struct declaration order.
    pub fn hash(&self) -> String {
        let canonical = serde_json::to_value(self)
            .expect("block serialization is total")
            .to_string();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn unix_time_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs_f64()
}

/// Append-only chain of blocks plus the pool of transactions waiting to be
/// sealed into the next one. Construction commits the genesis block, so the
/// chain is never observably empty.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        let mut ledger = Ledger {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        ledger.create_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        ledger
    }

    /// Seals the pending pool into a new block and appends it to the chain.
    /// When `previous_hash` is `None` it defaults to the hash of the current
    /// head. The pool is empty afterwards.
    pub fn create_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.head().hash());
        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp: unix_time_secs(),
            transactions: std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        };
        info!(index = block.index, proof, "committed block");
        self.chain.push(block);
        self.chain.last().expect("chain is never empty after a push")
    }

    /// Appends a transaction to the pending pool and returns the index of
    /// the block that will contain it — a forward-looking hint, not a
    /// guarantee.
    pub fn enqueue_transaction(&mut self, sender: String, recipient: String, amount: u64) -> u64 {
        self.pending.push(Transaction {
            sender,
            recipient,
            amount,
        });
        self.head().index + 1
    }

    pub fn head(&self) -> &Block {
        self.try_head()
            .expect("ledger construction commits the genesis block")
    }

    pub fn try_head(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
