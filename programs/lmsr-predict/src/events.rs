use anchor_lang::prelude::*;
use crate::state::{MarketParams, MarketState, Outcome, VoteKind};

#[event]
pub struct PlatformInitialized {
    pub admin: Pubkey,
    pub scheduler: Pubkey,
    pub resolver: Pubkey,
    pub treasury: Pubkey,
    pub collateral_mint: Pubkey,
    pub params: MarketParams,
    pub timestamp: i64,
}

#[event]
pub struct ParametersUpdated {
    pub version: u32,
    pub params: MarketParams,
    pub timestamp: i64,
}

#[event]
pub struct AuthoritiesUpdated {
    pub scheduler: Pubkey,
    pub resolver: Pubkey,
    pub treasury: Pubkey,
    pub timestamp: i64,
}

/// `market_id` is `None` for the platform-wide flag.
#[event]
pub struct PauseChanged {
    pub market_id: Option<u64>,
    pub paused: bool,
    pub timestamp: i64,
}

#[event]
pub struct MarketCreated {
    pub market_id: u64,
    pub creator: Pubkey,
    pub metadata_ref: [u8; 32],
    pub b: u64,
    pub end_time: i64,
    pub params_version: u32,
    pub timestamp: i64,
}

#[event]
pub struct MarketStateChanged {
    pub market_id: u64,
    pub from: MarketState,
    pub to: MarketState,
    pub timestamp: i64,
}

#[event]
pub struct VoteSubmitted {
    pub market_id: u64,
    pub voter: Pubkey,
    pub kind: VoteKind,
    pub in_favor: bool,
    pub ledger_len: u32,
    pub timestamp: i64,
}

/// A page of the ledger was counted; the pass is still open.
#[event]
pub struct VotesCounted {
    pub market_id: u64,
    pub kind: VoteKind,
    pub counted: u32,
    pub target: u32,
    pub timestamp: i64,
}

#[event]
pub struct VotesAggregated {
    pub market_id: u64,
    pub kind: VoteKind,
    pub votes_for: u32,
    pub votes_against: u32,
    pub ratio_bps: u16,
    pub passed: bool,
    pub applied: bool,
    pub timestamp: i64,
}

#[event]
pub struct LiquidityProvided {
    pub market_id: u64,
    pub creator: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct SharesBought {
    pub market_id: u64,
    pub holder: Pubkey,
    pub side: Outcome,
    pub shares: u64,
    pub cost: u64,
    pub total_fee: u64,
    pub q_yes: u64,
    pub q_no: u64,
    pub net_deposits: u64,
    pub position_shares: u64,
    pub position_invested: u64,
    pub price_yes: u64,
    pub timestamp: i64,
}

#[event]
pub struct SharesSold {
    pub market_id: u64,
    pub holder: Pubkey,
    pub side: Outcome,
    pub shares: u64,
    pub proceeds: u64,
    pub total_fee: u64,
    pub q_yes: u64,
    pub q_no: u64,
    pub net_deposits: u64,
    pub position_shares: u64,
    pub position_invested: u64,
    pub price_yes: u64,
    pub timestamp: i64,
}

#[event]
pub struct ResolutionProposed {
    pub market_id: u64,
    pub resolver: Pubkey,
    pub outcome: Outcome,
    pub evidence_ref: [u8; 32],
    pub dispute_deadline: i64,
    pub timestamp: i64,
}

#[event]
pub struct DisputeOpened {
    pub market_id: u64,
    pub disputer: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct MarketFinalized {
    pub market_id: u64,
    pub outcome: Outcome,
    pub pool: u64,
    pub winning_shares: u64,
    pub creator_remainder: u64,
    pub timestamp: i64,
}

#[event]
pub struct MarketCancelled {
    pub market_id: u64,
    pub refund_pool: u64,
    pub creator_remainder: u64,
    pub timestamp: i64,
}

#[event]
pub struct PayoutClaimed {
    pub market_id: u64,
    pub holder: Pubkey,
    pub amount: u64,
    pub resolver_fee: u64,
    pub claimed_total: u64,
    pub timestamp: i64,
}

#[event]
pub struct LiquidityWithdrawn {
    pub market_id: u64,
    pub creator: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
