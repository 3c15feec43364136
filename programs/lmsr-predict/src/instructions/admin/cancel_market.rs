use anchor_lang::prelude::*;
use crate::events::MarketCancelled;
use crate::instructions::emit_transition;
use super::MarketAdmin;

/// Moves any live market to Cancelled and freezes a refund settlement.
pub fn process_cancel_market(ctx: Context<MarketAdmin>, market_id: u64) -> Result<()> {
    let market = &mut ctx.accounts.market;
    let now = Clock::get()?.unix_timestamp;
    let from = market.state;

    market.cancel(now)?;

    msg!("Market {} cancelled from {:?}", market_id, from);
    emit_transition(market, from, now);
    emit!(MarketCancelled {
        market_id,
        refund_pool: market.settlement.pool,
        creator_remainder: market.settlement.creator_remainder,
        timestamp: now,
    });
    Ok(())
}
