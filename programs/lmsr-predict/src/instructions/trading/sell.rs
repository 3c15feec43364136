use anchor_lang::prelude::*;
use crate::state::Outcome;
use crate::events::SharesSold;
use crate::utils::token::pay_out;
use super::Trade;

/// Sells `shares` of `side` back to the maker; fails if net proceeds fall
/// below `min_proceeds`.
pub fn process_sell(mut ctx: Context<Trade>, side: Outcome, shares: u64, min_proceeds: u64) -> Result<()> {
    ctx.accounts.prepare(ctx.bumps.position)?;
    let now = Clock::get()?.unix_timestamp;

    let accounts = &mut ctx.accounts;
    let fill = accounts
        .market
        .execute_sell(&mut accounts.position, side, shares, min_proceeds, now)?;

    // Resolver and LP fees never leave the vault.
    pay_out(
        &accounts.token_program,
        &accounts.vault,
        &accounts.trader_token_account,
        &accounts.market,
        fill.net_proceeds,
    )?;
    pay_out(
        &accounts.token_program,
        &accounts.vault,
        &accounts.treasury,
        &accounts.market,
        fill.fees.protocol,
    )?;

    let market = &accounts.market;
    emit!(SharesSold {
        market_id: market.market_id,
        holder: accounts.trader.key(),
        side,
        shares,
        proceeds: fill.proceeds,
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
