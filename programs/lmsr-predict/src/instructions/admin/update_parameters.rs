use anchor_lang::prelude::*;
use crate::constants::GLOBAL_PARAMS_SEED;
use crate::state::{Capability, GlobalParameters, MarketParams};
use crate::events::{AuthoritiesUpdated, ParametersUpdated};
use crate::errors::PredictError;

#[derive(Accounts)]
pub struct PlatformAdmin<'info> {
    #[account(
        mut,
        seeds = [GLOBAL_PARAMS_SEED],
        bump = global_params.bump,
        constraint = Capability::Admin.is_held_by(&admin.key(), &global_params, None) @ PredictError::Unauthorized
    )]
    pub global_params: Account<'info, GlobalParameters>,
    pub admin: Signer<'info>,
}

/// Only markets created after this call see the new values.
pub fn update_parameters(ctx: Context<PlatformAdmin>, params: MarketParams) -> Result<()> {
    let config = &mut ctx.accounts.global_params;
    let version = config.apply_update(params)?;

    emit!(ParametersUpdated {
        version,
        params,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn update_authorities(ctx: Context<PlatformAdmin>, scheduler: Pubkey, resolver: Pubkey) -> Result<()> {
    let config = &mut ctx.accounts.global_params;
    config.scheduler = scheduler;
    config.resolver = resolver;

    emit!(AuthoritiesUpdated {
        scheduler,
        resolver,
        treasury: config.treasury,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
