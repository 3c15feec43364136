use anchor_lang::prelude::*;

pub mod constants;
pub mod state;
pub mod instructions;
pub mod errors;
pub mod events;
pub mod utils;

use instructions::*;
use state::{MarketParams, Outcome, VoteKind};

declare_id!("G1cQSaeAmm1qoMo34QNeRH14kRNMTdoXb6oKF7Wuo9ML");

#[program]
pub mod lmsr_predict {
    use super::*;

    pub fn init_platform(
        ctx: Context<InitPlatform>,
        params: Option<MarketParams>,
        scheduler: Pubkey,
        resolver: Pubkey,
    ) -> Result<()> {
        instructions::admin::init_platform::process_init_platform(ctx, params, scheduler, resolver)
    }

    pub fn update_parameters(ctx: Context<PlatformAdmin>, params: MarketParams) -> Result<()> {
        instructions::admin::update_parameters::update_parameters(ctx, params)
    }

    pub fn update_authorities(ctx: Context<PlatformAdmin>, scheduler: Pubkey, resolver: Pubkey) -> Result<()> {
        instructions::admin::update_parameters::update_authorities(ctx, scheduler, resolver)
    }

    pub fn update_treasury(ctx: Context<UpdateTreasury>) -> Result<()> {
        instructions::admin::update_treasury::update_treasury(ctx)
    }

    pub fn pause_platform(ctx: Context<PlatformAdmin>) -> Result<()> {
        instructions::admin::pause::pause_platform(ctx)
    }

    pub fn unpause_platform(ctx: Context<PlatformAdmin>) -> Result<()> {
        instructions::admin::pause::unpause_platform(ctx)
    }

    pub fn pause_market(ctx: Context<MarketAdmin>, market_id: u64) -> Result<()> {
        instructions::admin::pause::pause_market(ctx, market_id)
    }

    pub fn unpause_market(ctx: Context<MarketAdmin>, market_id: u64) -> Result<()> {
        instructions::admin::pause::unpause_market(ctx, market_id)
    }

    pub fn cancel_market(ctx: Context<MarketAdmin>, market_id: u64) -> Result<()> {
        instructions::admin::cancel_market::process_cancel_market(ctx, market_id)
    }

    pub fn create_market(
        ctx: Context<CreateMarket>,
        metadata_ref: [u8; 32],
        liquidity_b: u64,
        end_time: i64,
    ) -> Result<u64> {
        instructions::listing::create_market::process_create_market(ctx, metadata_ref, liquidity_b, end_time)
    }

    pub fn activate_market(ctx: Context<ActivateMarket>, liquidity: u64) -> Result<()> {
        instructions::listing::activate_market::process_activate_market(ctx, liquidity)
    }

    pub fn submit_vote(ctx: Context<SubmitVote>, kind: VoteKind, in_favor: bool) -> Result<()> {
        instructions::voting::submit_vote::process_submit_vote(ctx, kind, in_favor)
    }

    pub fn aggregate_votes(ctx: Context<AggregateVotes>, kind: VoteKind) -> Result<()> {
        instructions::voting::aggregate_votes::process_aggregate_votes(ctx, kind)
    }

    pub fn buy(ctx: Context<Trade>, side: Outcome, spend: u64, min_shares_out: u64) -> Result<()> {
        instructions::trading::buy::process_buy(ctx, side, spend, min_shares_out)
    }

    pub fn sell(ctx: Context<Trade>, side: Outcome, shares: u64, min_proceeds: u64) -> Result<()> {
        instructions::trading::sell::process_sell(ctx, side, shares, min_proceeds)
    }

    pub fn propose_resolution(
        ctx: Context<ProposeResolution>,
        outcome: Outcome,
        evidence_ref: [u8; 32],
    ) -> Result<()> {
        instructions::resolution::propose_resolution::process_propose_resolution(ctx, outcome, evidence_ref)
    }

    pub fn dispute(ctx: Context<OpenDispute>) -> Result<()> {
        instructions::resolution::open_dispute::process_open_dispute(ctx)
    }

    pub fn finalize(ctx: Context<FinalizeMarket>) -> Result<()> {
        instructions::resolution::finalize::process_finalize(ctx)
    }

    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::settlement::claim::process_claim(ctx)
    }

    pub fn withdraw_liquidity(ctx: Context<WithdrawLiquidity>) -> Result<()> {
        instructions::settlement::withdraw_liquidity::process_withdraw_liquidity(ctx)
    }
}
