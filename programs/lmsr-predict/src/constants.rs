// PDA seeds
pub const GLOBAL_PARAMS_SEED: &[u8] = b"global_params";
pub const MARKET_SEED: &[u8] = b"market";
pub const VAULT_SEED: &[u8] = b"vault";
pub const POSITION_SEED: &[u8] = b"position";
pub const VOTE_SEED: &[u8] = b"vote";

/// 1.0 in the 9-decimal representation used for every amount and share count.
pub const PRECISION: u64 = 1_000_000_000;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Smallest and largest liquidity parameter `b` a market may use.
pub const MIN_B: u64 = 10 * PRECISION;
pub const MAX_B: u64 = 1_000_000 * PRECISION;

/// Upper bound on the total trading fee (protocol + resolver + LP), 20%.
pub const MAX_TOTAL_FEE_BPS: u16 = 2_000;

/// Thresholds below a simple majority are rejected.
pub const MIN_THRESHOLD_BPS: u16 = 5_000;
pub const MAX_THRESHOLD_BPS: u16 = 10_000;

pub const MAX_MIN_PROPOSAL_VOTES: u32 = 100_000;

pub const MAX_RESOLUTION_DELAY: i64 = 30 * 86_400;
pub const MIN_DISPUTE_WINDOW: i64 = 3_600;
pub const MAX_DISPUTE_WINDOW: i64 = 30 * 86_400;

// Defaults applied by `init_platform` when the caller passes none.
pub const DEFAULT_PROTOCOL_FEE_BPS: u16 = 300;
pub const DEFAULT_RESOLVER_FEE_BPS: u16 = 200;
pub const DEFAULT_LP_FEE_BPS: u16 = 500;
pub const DEFAULT_PROPOSAL_THRESHOLD_BPS: u16 = 7_000;
pub const DEFAULT_DISPUTE_THRESHOLD_BPS: u16 = 6_000;
pub const DEFAULT_MIN_PROPOSAL_VOTES: u32 = 10;
pub const DEFAULT_MIN_TRADE: u64 = PRECISION / 1_000;
pub const DEFAULT_MAX_TRADE: u64 = 1_000_000 * PRECISION;
pub const DEFAULT_B: u64 = 1_000 * PRECISION;
pub const DEFAULT_LIQUIDITY_FLOOR: u64 = PRECISION;
pub const DEFAULT_RESOLUTION_DELAY: i64 = 86_400;
pub const DEFAULT_DISPUTE_WINDOW: i64 = 259_200;
