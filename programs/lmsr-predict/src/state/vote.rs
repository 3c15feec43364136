use anchor_lang::prelude::*;
use crate::constants::BPS_DENOMINATOR;
use crate::errors::PredictError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum VoteKind {
    Proposal,
    Dispute,
}

impl VoteKind {
    pub fn seed(self) -> u8 {
        self as u8
    }
}

/// One voter's choice on one market, immutable once written.
/// Proposal: `in_favor` approves the market. Dispute: `in_favor` overturns
/// the proposed outcome.
#[account]
pub struct VoteRecord {
    pub market: Pubkey,
    pub voter: Pubkey,
    pub kind: VoteKind,
    pub in_favor: bool,
    /// Position in the (market, kind) ledger, assigned at submission.
    pub seq: u32,
    pub voted_at: i64,
    pub bump: u8,
}

impl VoteRecord {
    pub const LEN: usize = 8 + 32 + 32 + 1 + 1 + 4 + 8 + 1;
}

/// Progress of a recount spread over several transactions.
///
/// A pass starts when `counted` is zero and snapshots `target` from the
/// ledger length; votes appended afterwards belong to the next pass.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TallyCursor {
    pub target: u32,
    pub counted: u32,
    pub votes_for: u32,
    pub votes_against: u32,
}

impl TallyCursor {
    pub const LEN: usize = 4 * 4;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AggregationResult {
    pub votes_for: u32,
    pub votes_against: u32,
    pub ratio_bps: u16,
    pub passed: bool,
    /// Set once the decision has moved the market on.
    pub applied: bool,
    pub aggregated_at: Option<i64>,
}

impl AggregationResult {
    pub const LEN: usize = 4 + 4 + 2 + 1 + 1 + (1 + 8);

    /// Ratio is votes_for * 10000 / total, zero with no votes. Passing needs
    /// the ratio at or above `threshold_bps` and at least `min_votes` votes.
    pub fn evaluate(
        votes_for: u32,
        votes_against: u32,
        threshold_bps: u16,
        min_votes: u32,
        now: i64,
    ) -> Result<Self> {
        let total = votes_for
            .checked_add(votes_against)
            .ok_or(PredictError::MathOverflow)?;
        let ratio_bps = if total == 0 {
            0
        } else {
            (votes_for as u64 * BPS_DENOMINATOR / total as u64) as u16
        };
        let passed = total > 0 && total >= min_votes && ratio_bps >= threshold_bps;
        Ok(Self {
            votes_for,
            votes_against,
            ratio_bps,
            passed,
            applied: false,
            aggregated_at: Some(now),
        })
    }

    pub fn total(&self) -> u32 {
        self.votes_for.saturating_add(self.votes_against)
    }

    pub fn same_count(&self, other: &AggregationResult) -> bool {
        self.votes_for == other.votes_for
            && self.votes_against == other.votes_against
            && self.ratio_bps == other.ratio_bps
            && self.passed == other.passed
    }
}

/// Counts one page of the vote ledger for a market and kind.
///
/// Records must carry consecutive sequence numbers starting at `first_seq`,
/// so a record passed twice is rejected instead of counted twice.
pub fn tally(
    records: &[VoteRecord],
    market: &Pubkey,
    kind: VoteKind,
    first_seq: u32,
) -> Result<(u32, u32)> {
    let mut votes_for: u32 = 0;
    let mut votes_against: u32 = 0;
    let mut expected = first_seq;

    for record in records {
        require_keys_eq!(record.market, *market, PredictError::InvalidVoteRecord);
        require!(record.kind == kind, PredictError::InvalidVoteRecord);
        require!(record.seq == expected, PredictError::UnsortedVoteLedger);
        expected = expected.checked_add(1).ok_or(PredictError::MathOverflow)?;

        if record.in_favor {
            votes_for = votes_for.checked_add(1).ok_or(PredictError::MathOverflow)?;
        } else {
            votes_against = votes_against.checked_add(1).ok_or(PredictError::MathOverflow)?;
        }
    }
    Ok((votes_for, votes_against))
}
