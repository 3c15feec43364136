use anchor_lang::prelude::*;
use crate::constants::{GLOBAL_PARAMS_SEED, MARKET_SEED};
use crate::state::{Capability, GlobalParameters, Market, Outcome};
use crate::events::ResolutionProposed;
use crate::instructions::emit_transition;

#[derive(Accounts)]
pub struct ProposeResolution<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        seeds = [GLOBAL_PARAMS_SEED],
        bump = global_params.bump,
    )]
    pub global_params: Box<Account<'info, GlobalParameters>>,

    pub resolver: Signer<'info>,
}

pub fn process_propose_resolution(
    ctx: Context<ProposeResolution>,
    outcome: Outcome,
    evidence_ref: [u8; 32],
) -> Result<()> {
    let resolver = ctx.accounts.resolver.key();
    Capability::Resolver.check(&resolver, &ctx.accounts.global_params, None)?;
    let now = Clock::get()?.unix_timestamp;

    let market = &mut ctx.accounts.market;
    let from = market.state;
    market.propose_resolution(resolver, outcome, evidence_ref, now)?;

    emit_transition(market, from, now);
    emit!(ResolutionProposed {
        market_id: market.market_id,
        resolver,
        outcome,
        evidence_ref,
        dispute_deadline: market.dispute_deadline()?,
        timestamp: now,
    });
    Ok(())
}
