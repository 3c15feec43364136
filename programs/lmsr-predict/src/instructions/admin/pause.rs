use anchor_lang::prelude::*;
use crate::constants::{GLOBAL_PARAMS_SEED, MARKET_SEED};
use crate::state::{Capability, GlobalParameters, Market};
use crate::events::PauseChanged;
use crate::errors::PredictError;
use super::PlatformAdmin;

fn set_platform_paused(ctx: Context<PlatformAdmin>, paused: bool) -> Result<()> {
    ctx.accounts.global_params.paused = paused;
    msg!("Platform paused: {}", paused);
    emit!(PauseChanged {
        market_id: None,
        paused,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn pause_platform(ctx: Context<PlatformAdmin>) -> Result<()> {
    set_platform_paused(ctx, true)
}

pub fn unpause_platform(ctx: Context<PlatformAdmin>) -> Result<()> {
    set_platform_paused(ctx, false)
}

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct MarketAdmin<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,
    #[account(
        seeds = [GLOBAL_PARAMS_SEED],
        bump = global_params.bump,
        constraint = Capability::Admin.is_held_by(&admin.key(), &global_params, None) @ PredictError::Unauthorized
    )]
    pub global_params: Account<'info, GlobalParameters>,
    pub admin: Signer<'info>,
}

// The flag sits beside the lifecycle state. A settled market can still be
// unpaused so its claims go through.
fn set_market_paused(ctx: Context<MarketAdmin>, market_id: u64, paused: bool) -> Result<()> {
    let market = &mut ctx.accounts.market;
    if paused {
        require!(!market.state.is_terminal(), PredictError::InvalidMarketState);
    }
    market.paused = paused;
    emit!(PauseChanged {
        market_id: Some(market_id),
        paused,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn pause_market(ctx: Context<MarketAdmin>, market_id: u64) -> Result<()> {
    set_market_paused(ctx, market_id, true)
}

pub fn unpause_market(ctx: Context<MarketAdmin>, market_id: u64) -> Result<()> {
    set_market_paused(ctx, market_id, false)
}
