/// Proof recorded in the genesis block.
pub const GENESIS_PROOF: u64 = 100;
/// Sentinel previous-hash of the genesis block; not derived from any block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";
/// A digest must start with this prefix for a proof to be accepted.
pub const DIFFICULTY_PREFIX: &str = "0000";
/// Sentinel sender marking a freshly minted reward.
pub const REWARD_SENDER: &str = "0";
pub const MINING_REWARD: u64 = 1;
pub const DIGEST_HEX_LEN: usize = 64;
