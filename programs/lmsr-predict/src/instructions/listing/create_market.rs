use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::{GLOBAL_PARAMS_SEED, MARKET_SEED, VAULT_SEED};
use crate::state::{Capability, GlobalParameters, Market};
use crate::events::MarketCreated;
use crate::errors::PredictError;

#[derive(Accounts)]
pub struct CreateMarket<'info> {
    #[account(
        mut,
        seeds = [GLOBAL_PARAMS_SEED],
        bump = global_params.bump,
        has_one = collateral_mint @ PredictError::InvalidMint,
    )]
    pub global_params: Box<Account<'info, GlobalParameters>>,

    #[account(
        init,
        seeds = [MARKET_SEED, global_params.total_markets.to_le_bytes().as_ref()],
        bump,
        payer = creator,
        space = Market::LEN
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        init,
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump,
        payer = creator,
        token::mint = collateral_mint,
        token::authority = market,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub collateral_mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Opens a market in `Proposed` and returns its id. `liquidity_b == 0`
/// selects the platform default.
pub fn process_create_market(
    ctx: Context<CreateMarket>,
    metadata_ref: [u8; 32],
    liquidity_b: u64,
    end_time: i64,
) -> Result<u64> {
    let config = &mut ctx.accounts.global_params;
    config.ensure_not_paused()?;
    Capability::Trader.check(&ctx.accounts.creator.key(), config, None)?;
    let now = Clock::get()?.unix_timestamp;

    let market_id = config.next_market_id()?;
    let market = Market::new(
        market_id,
        ctx.accounts.creator.key(),
        metadata_ref,
        liquidity_b,
        end_time,
        config.params,
        config.version,
        ctx.bumps.market,
        ctx.bumps.vault,
        now,
    )?;
    let b = market.b;
    let params_version = market.params_version;
    ctx.accounts.market.set_inner(market);

    msg!("Market {} created with b = {}", market_id, b);
    emit!(MarketCreated {
        market_id,
        creator: ctx.accounts.creator.key(),
        metadata_ref,
        b,
        end_time,
        params_version,
        timestamp: now,
    });

    Ok(market_id)
}
