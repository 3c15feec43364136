use anchor_lang::prelude::*;
use crate::constants::{MARKET_SEED, VOTE_SEED};
use crate::state::{Market, VoteKind, VoteRecord};
use crate::events::VoteSubmitted;

#[derive(Accounts)]
#[instruction(kind: VoteKind)]
pub struct SubmitVote<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    // `init` fails for a second vote by the same voter on the same kind.
    #[account(
        init,
        seeds = [VOTE_SEED, market.key().as_ref(), voter.key().as_ref(), &[kind.seed()]],
        bump,
        payer = voter,
        space = VoteRecord::LEN
    )]
    pub vote_record: Account<'info, VoteRecord>,

    #[account(mut)]
    pub voter: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_submit_vote(ctx: Context<SubmitVote>, kind: VoteKind, in_favor: bool) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let market_key = ctx.accounts.market.key();
    let market = &mut ctx.accounts.market;
    let seq = market.record_vote(kind)?;

    ctx.accounts.vote_record.set_inner(VoteRecord {
        market: market_key,
        voter: ctx.accounts.voter.key(),
        kind,
        in_favor,
        seq,
        voted_at: now,
        bump: ctx.bumps.vote_record,
    });

    let ledger_len = match kind {
        VoteKind::Proposal => market.proposal_votes,
        VoteKind::Dispute => market.dispute_votes,
    };
    emit!(VoteSubmitted {
        market_id: market.market_id,
        voter: ctx.accounts.voter.key(),
        kind,
        in_favor,
        ledger_len,
        timestamp: now,
    });
    Ok(())
}
