use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};
use crate::constants::GLOBAL_PARAMS_SEED;
use crate::state::{GlobalParameters, MarketParams};
use crate::events::PlatformInitialized;
use crate::errors::PredictError;

#[derive(Accounts)]
pub struct InitPlatform<'info> {
    #[account(
        init,
        seeds = [GLOBAL_PARAMS_SEED],
        bump,
        payer = admin,
        space = GlobalParameters::LEN
    )]
    pub global_params: Account<'info, GlobalParameters>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub collateral_mint: Account<'info, Mint>,

    #[account(
        constraint = treasury.mint == collateral_mint.key() @ PredictError::InvalidMint,
    )]
    pub treasury: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
}

pub fn process_init_platform(
    ctx: Context<InitPlatform>,
    params: Option<MarketParams>,
    scheduler: Pubkey,
    resolver: Pubkey,
) -> Result<()> {
    let params = params.unwrap_or_default();
    params.validate()?;
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.global_params.set_inner(GlobalParameters {
        admin: ctx.accounts.admin.key(),
        scheduler,
        resolver,
        treasury: ctx.accounts.treasury.key(),
        collateral_mint: ctx.accounts.collateral_mint.key(),
        params,
        paused: false,
        version: 1,
        total_markets: 0,
        bump: ctx.bumps.global_params,
        reserved: [0; 64],
    });

    msg!("Platform initialized, admin {}", ctx.accounts.admin.key());
    emit!(PlatformInitialized {
        admin: ctx.accounts.admin.key(),
        scheduler,
        resolver,
        treasury: ctx.accounts.treasury.key(),
        collateral_mint: ctx.accounts.collateral_mint.key(),
        params,
        timestamp: now,
    });

    Ok(())
}
