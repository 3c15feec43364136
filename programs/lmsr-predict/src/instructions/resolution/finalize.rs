use anchor_lang::prelude::*;
use crate::constants::MARKET_SEED;
use crate::state::Market;
use crate::events::MarketFinalized;
use crate::errors::PredictError;
use crate::instructions::emit_transition;

#[derive(Accounts)]
pub struct FinalizeMarket<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    pub caller: Signer<'info>,
}

pub fn process_finalize(ctx: Context<FinalizeMarket>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let market = &mut ctx.accounts.market;
    let from = market.state;
    market.finalize(now)?;

    let outcome = market.final_outcome.ok_or(PredictError::InvalidMarketState)?;
    msg!("Market {} finalized as {:?}", market.market_id, outcome);
    emit_transition(market, from, now);
    emit!(MarketFinalized {
        market_id: market.market_id,
        outcome,
        pool: market.settlement.pool,
        winning_shares: market.settlement.basis,
        creator_remainder: market.settlement.creator_remainder,
        timestamp: now,
    });
    Ok(())
}
