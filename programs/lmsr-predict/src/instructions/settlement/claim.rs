use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{GLOBAL_PARAMS_SEED, MARKET_SEED, POSITION_SEED, VAULT_SEED};
use crate::state::{GlobalParameters, Market, Position};
use crate::events::PayoutClaimed;
use crate::errors::PredictError;
use crate::utils::token::pay_out;

#[derive(Accounts)]
pub struct Claim<'info> {
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
        mut,
        seeds = [POSITION_SEED, market.key().as_ref(), holder.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(
        seeds = [GLOBAL_PARAMS_SEED],
        bump = global_params.bump,
    )]
    pub global_params: Box<Account<'info, GlobalParameters>>,

    pub holder: Signer<'info>,

    #[account(
        mut,
        associated_token::mint = global_params.collateral_mint,
        associated_token::authority = holder,
    )]
    pub holder_token_account: Account<'info, TokenAccount>,

    /// Required on the first claim of a decided market to pay the resolver fee.
    #[account(
        mut,
        token::mint = global_params.collateral_mint,
        token::authority = market.resolver,
    )]
    pub resolver_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn process_claim(mut ctx: Context<Claim>) -> Result<()> {
    ctx.accounts.global_params.ensure_not_paused()?;
    ctx.accounts.market.ensure_not_paused()?;
    let now = Clock::get()?.unix_timestamp;

    let accounts = &mut ctx.accounts;
    let payout = accounts.market.claim(&mut accounts.position)?;
    let total_out = payout
        .holder_amount
        .checked_add(payout.resolver_amount)
        .ok_or(PredictError::MathOverflow)?;
    require!(accounts.vault.amount >= total_out, PredictError::PoolOverdrawn);

    pay_out(
        &accounts.token_program,
        &accounts.vault,
        &accounts.holder_token_account,
        &accounts.market,
        payout.holder_amount,
    )?;
    if payout.resolver_amount > 0 {
        let resolver_account = accounts
            .resolver_token_account
            .as_ref()
            .ok_or(PredictError::MissingResolverAccount)?;
        pay_out(
            &accounts.token_program,
            &accounts.vault,
            resolver_account,
            &accounts.market,
            payout.resolver_amount,
        )?;
    }

    emit!(PayoutClaimed {
        market_id: accounts.market.market_id,
        holder: accounts.holder.key(),
        amount: payout.holder_amount,
        resolver_fee: payout.resolver_amount,
        claimed_total: accounts.market.settlement.claimed,
        timestamp: now,
    });
    Ok(())
}
