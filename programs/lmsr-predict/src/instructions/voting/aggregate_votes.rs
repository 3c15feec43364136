use anchor_lang::prelude::*;
use crate::constants::{GLOBAL_PARAMS_SEED, MARKET_SEED, VOTE_SEED};
use crate::state::{tally, Capability, GlobalParameters, Market, MarketState, VoteKind, VoteRecord};
use crate::events::{MarketFinalized, VotesAggregated, VotesCounted};
use crate::errors::PredictError;
use crate::instructions::emit_transition;

#[derive(Accounts)]
pub struct AggregateVotes<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        seeds = [GLOBAL_PARAMS_SEED],
        bump = global_params.bump,
        constraint = Capability::Scheduler.is_held_by(&scheduler.key(), &global_params, None) @ PredictError::Unauthorized
    )]
    pub global_params: Box<Account<'info, GlobalParameters>>,

    pub scheduler: Signer<'info>,
    // remaining_accounts: the next VoteRecords of (market, kind), in sequence order
}

fn load_ledger(accounts: &[AccountInfo], market: &Pubkey, kind: VoteKind) -> Result<Vec<VoteRecord>> {
    let mut records = Vec::with_capacity(accounts.len());
    for info in accounts {
        require_keys_eq!(*info.owner, crate::ID, PredictError::InvalidVoteRecord);
        let record = VoteRecord::try_deserialize(&mut &info.data.borrow()[..])?;
        let expected = Pubkey::create_program_address(
            &[
                VOTE_SEED,
                market.as_ref(),
                record.voter.as_ref(),
                &[kind.seed()],
                &[record.bump],
            ],
            &crate::ID,
        )
        .map_err(|_| error!(PredictError::InvalidVoteRecord))?;
        require_keys_eq!(info.key(), expected, PredictError::InvalidVoteRecord);
        records.push(record);
    }
    Ok(records)
}

/// Counts the next page of the ledger for `kind`, passed in sequence order,
/// and applies the decision once the pass is complete.
pub fn process_aggregate_votes(ctx: Context<AggregateVotes>, kind: VoteKind) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let market_key = ctx.accounts.market.key();
    let first_seq = ctx.accounts.market.cursor(kind).counted;
    let records = load_ledger(ctx.remaining_accounts, &market_key, kind)?;
    let (votes_for, votes_against) = tally(&records, &market_key, kind, first_seq)?;

    let market = &mut ctx.accounts.market;
    let from = market.state;
    let Some(result) = market.count_votes(kind, first_seq, votes_for, votes_against, now)? else {
        let cursor = market.cursor(kind);
        emit!(VotesCounted {
            market_id: market.market_id,
            kind,
            counted: cursor.counted,
            target: cursor.target,
            timestamp: now,
        });
        return Ok(());
    };

    emit!(VotesAggregated {
        market_id: market.market_id,
        kind,
        votes_for: result.votes_for,
        votes_against: result.votes_against,
        ratio_bps: result.ratio_bps,
        passed: result.passed,
        applied: result.applied,
        timestamp: now,
    });

    if market.state != from {
        emit_transition(market, from, now);
        match market.state {
            MarketState::Approved => msg!("Market {} approved at {} bps", market.market_id, result.ratio_bps),
            MarketState::Finalized => {
                let outcome = market.final_outcome.ok_or(PredictError::InvalidMarketState)?;
                msg!("Market {} finalized by dispute vote as {:?}", market.market_id, outcome);
                emit!(MarketFinalized {
                    market_id: market.market_id,
                    outcome,
                    pool: market.settlement.pool,
                    winning_shares: market.settlement.basis,
                    creator_remainder: market.settlement.creator_remainder,
                    timestamp: now,
                });
            }
            _ => {}
        }
    }
    Ok(())
}
