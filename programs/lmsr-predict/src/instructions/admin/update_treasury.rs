use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use crate::constants::GLOBAL_PARAMS_SEED;
use crate::state::{Capability, GlobalParameters};
use crate::events::AuthoritiesUpdated;
use crate::errors::PredictError;

#[derive(Accounts)]
pub struct UpdateTreasury<'info> {
    #[account(
        mut,
        seeds = [GLOBAL_PARAMS_SEED],
        bump = global_params.bump,
        constraint = Capability::Admin.is_held_by(&admin.key(), &global_params, None) @ PredictError::Unauthorized
    )]
    pub global_params: Account<'info, GlobalParameters>,
    pub admin: Signer<'info>,
    #[account(
        constraint = new_treasury.mint == global_params.collateral_mint @ PredictError::InvalidMint,
    )]
    pub new_treasury: Account<'info, TokenAccount>,
}

pub fn update_treasury(ctx: Context<UpdateTreasury>) -> Result<()> {
    let config = &mut ctx.accounts.global_params;
    config.treasury = ctx.accounts.new_treasury.key();

    emit!(AuthoritiesUpdated {
        scheduler: config.scheduler,
        resolver: config.resolver,
        treasury: config.treasury,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
