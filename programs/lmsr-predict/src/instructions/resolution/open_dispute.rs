use anchor_lang::prelude::*;
use crate::constants::MARKET_SEED;
use crate::state::Market;
use crate::events::DisputeOpened;
use crate::instructions::emit_transition;

#[derive(Accounts)]
pub struct OpenDispute<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    pub disputer: Signer<'info>,
}

/// Anyone may dispute while the window is open; dispute votes decide.
pub fn process_open_dispute(ctx: Context<OpenDispute>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let disputer = ctx.accounts.disputer.key();

    let market = &mut ctx.accounts.market;
    let from = market.state;
    market.open_dispute(disputer, now)?;

    emit_transition(market, from, now);
    emit!(DisputeOpened {
        market_id: market.market_id,
        disputer,
        timestamp: now,
    });
    Ok(())
}
