use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{GLOBAL_PARAMS_SEED, MARKET_SEED, POSITION_SEED, VAULT_SEED};
use crate::state::{Capability, GlobalParameters, Market, Outcome, Position};
use crate::events::SharesBought;
use crate::errors::PredictError;
use crate::utils::token::deposit;

#[derive(Accounts)]
pub struct Trade<'info> {
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
        init_if_needed,
        seeds = [POSITION_SEED, market.key().as_ref(), trader.key().as_ref()],
        bump,
        payer = trader,
        space = Position::LEN
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(
        seeds = [GLOBAL_PARAMS_SEED],
        bump = global_params.bump,
    )]
    pub global_params: Box<Account<'info, GlobalParameters>>,

    #[account(
        mut,
        constraint = treasury.key() == global_params.treasury,
        constraint = treasury.mint == global_params.collateral_mint @ PredictError::InvalidMint,
    )]
    pub treasury: Account<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = global_params.collateral_mint,
        associated_token::authority = trader,
    )]
    pub trader_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub trader: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    pub(crate) fn prepare(&mut self, position_bump: u8) -> Result<()> {
        self.global_params.ensure_not_paused()?;
        Capability::Trader.check(&self.trader.key(), &self.global_params, None)?;
        if self.position.is_uninitialized() {
            let position = Position::new(self.market.key(), self.trader.key(), position_bump);
            self.position.set_inner(position);
        }
        Ok(())
    }
}

/// Spends up to `spend` (fees included) on `side`; fails unless at least
/// `min_shares_out` shares are bought.
pub fn process_buy(mut ctx: Context<Trade>, side: Outcome, spend: u64, min_shares_out: u64) -> Result<()> {
    ctx.accounts.prepare(ctx.bumps.position)?;
    let now = Clock::get()?.unix_timestamp;

    let accounts = &mut ctx.accounts;
    let fill = accounts
        .market
        .execute_buy(&mut accounts.position, side, spend, min_shares_out, now)?;

    // Cost plus resolver and LP fees stay in the vault; the protocol fee
    // goes straight to the treasury.
    let to_vault = fill
        .total_paid
        .checked_sub(fill.fees.protocol)
        .ok_or(PredictError::AccountingMismatch)?;
    deposit(
        &accounts.token_program,
        &accounts.trader_token_account,
        &accounts.vault,
        &accounts.trader,
        to_vault,
    )?;
    deposit(
        &accounts.token_program,
        &accounts.trader_token_account,
        &accounts.treasury,
        &accounts.trader,
        fill.fees.protocol,
    )?;

    let market = &accounts.market;
    emit!(SharesBought {
        market_id: market.market_id,
        holder: accounts.trader.key(),
        side,
        shares: fill.shares,
        cost: fill.cost,
        total_fee: fill.fees.total,
        q_yes: market.q_yes,
        q_no: market.q_no,
        net_deposits: market.net_deposits,
        position_shares: accounts.position.shares(side),
        position_invested: accounts.position.invested,
        price_yes: market.price_yes()?,
        timestamp: now,
    });
    Ok(())
}
