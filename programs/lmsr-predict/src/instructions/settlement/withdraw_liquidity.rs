use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{GLOBAL_PARAMS_SEED, MARKET_SEED, VAULT_SEED};
use crate::state::{Capability, GlobalParameters, Market};
use crate::events::LiquidityWithdrawn;
use crate::errors::PredictError;
use crate::utils::token::pay_out;

#[derive(Accounts)]
pub struct WithdrawLiquidity<'info> {
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

/// Returns liquidity plus the creator's fee share once the market is settled.
pub fn process_withdraw_liquidity(mut ctx: Context<WithdrawLiquidity>) -> Result<()> {
    let accounts = &mut ctx.accounts;
    accounts.global_params.ensure_not_paused()?;
    accounts.market.ensure_not_paused()?;
    let current: &Market = &accounts.market;
    Capability::Creator.check(&accounts.creator.key(), &accounts.global_params, Some(current))?;
    let now = Clock::get()?.unix_timestamp;

    let amount = accounts.market.withdraw_liquidity()?;
    require!(accounts.vault.amount >= amount, PredictError::PoolOverdrawn);
    pay_out(
        &accounts.token_program,
        &accounts.vault,
        &accounts.creator_token_account,
        &accounts.market,
        amount,
    )?;

    msg!("Market {} liquidity withdrawn: {}", accounts.market.market_id, amount);
    emit!(LiquidityWithdrawn {
        market_id: accounts.market.market_id,
        creator: accounts.creator.key(),
        amount,
        timestamp: now,
    });
    Ok(())
}
