use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{GLOBAL_PARAMS_SEED, MARKET_SEED, VAULT_SEED};
use crate::state::{Capability, GlobalParameters, Market};
use crate::events::LiquidityProvided;
use crate::errors::PredictError;
use crate::instructions::emit_transition;
use crate::utils::token::deposit;

#[derive(Accounts)]
pub struct ActivateMarket<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        seeds = [GLOBAL_PARAMS_SEED],
        bump = global_params.bump,
    )]
    pub global_params: Box<Account<'info, GlobalParameters>>,

    pub creator: Signer<'info>,

    #[account(
        mut,
        token::mint = global_params.collateral_mint,
        token::authority = creator,
    )]
    pub creator_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Creator funds the maker's worst-case loss and opens trading.
pub fn process_activate_market(ctx: Context<ActivateMarket>, liquidity: u64) -> Result<()> {
    let config = &ctx.accounts.global_params;
    config.ensure_not_paused()?;
    let current: &Market = &ctx.accounts.market;
    Capability::Creator.check(&ctx.accounts.creator.key(), config, Some(current))?;
    require!(liquidity > 0, PredictError::ZeroAmount);
    let now = Clock::get()?.unix_timestamp;

    let market = &mut ctx.accounts.market;
    let from = market.state;
    market.activate(liquidity, now)?;

    deposit(
        &ctx.accounts.token_program,
        &ctx.accounts.creator_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.creator,
        liquidity,
    )?;

    let market = &ctx.accounts.market;
    emit_transition(market, from, now);
    emit!(LiquidityProvided {
        market_id: market.market_id,
        creator: market.creator,
        amount: liquidity,
        timestamp: now,
    });
    Ok(())
}
