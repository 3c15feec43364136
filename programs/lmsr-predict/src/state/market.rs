use anchor_lang::prelude::*;
use crate::errors::PredictError;
use crate::state::{AggregationResult, MarketParams, MarketState, Position, TallyCursor, VoteKind};
use crate::utils::fees::{check_bounded_loss, pro_rata, FeeBreakdown};
use crate::utils::lmsr::{self, BuyQuote, SellQuote};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Yes,
    No,
    Invalid,
}

impl Outcome {
    /// Tradable side as the pricing engine's flag; `Invalid` is not tradable.
    pub fn is_yes(self) -> Result<bool> {
        match self {
            Outcome::Yes => Ok(true),
            Outcome::No => Ok(false),
            Outcome::Invalid => err!(PredictError::InvalidOutcome),
        }
    }

    pub fn opposite(self) -> Outcome {
        match self {
            Outcome::Yes => Outcome::No,
            Outcome::No => Outcome::Yes,
            Outcome::Invalid => Outcome::Invalid,
        }
    }
}

/// Frozen at finalization or cancellation; claims and withdrawal read only this.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Settlement {
    pub pool: u64,
    /// Winning shares outstanding, or total invested for a refund.
    pub basis: u64,
    pub claimed: u64,
    pub claims: u32,
    pub creator_remainder: u64,
    pub resolver_fee: u64,
    pub refund: bool,
    pub resolver_paid: bool,
    pub liquidity_withdrawn: bool,
}

impl Settlement {
    pub const LEN: usize = 8 * 3 + 4 + 8 * 2 + 3;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimPayout {
    pub holder_amount: u64,
    pub resolver_amount: u64,
}

#[account]
pub struct Market {
    pub market_id: u64,
    pub creator: Pubkey,
    pub metadata_ref: [u8; 32],
    pub state: MarketState,
    pub paused: bool,
    pub b: u64,
    pub end_time: i64,              // no trades at or after this
    pub q_yes: u64,
    pub q_no: u64,
    pub net_deposits: u64,          // LMSR cost in minus sell proceeds out
    pub total_invested: u64,
    pub liquidity: u64,
    pub protocol_fees: u64,         // already forwarded to the treasury
    pub resolver_fees: u64,
    pub lp_fees: u64,
    pub total_volume: u64,
    pub resolver: Pubkey,
    pub proposed_outcome: Option<Outcome>,
    pub final_outcome: Option<Outcome>,
    pub evidence_ref: [u8; 32],
    pub disputer: Pubkey,
    pub created_at: i64,
    pub approved_at: Option<i64>,
    pub activated_at: Option<i64>,
    pub resolution_proposed_at: Option<i64>,
    pub disputed_at: Option<i64>,
    pub finalized_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub params_version: u32,
    pub params: MarketParams,
    pub proposal_votes: u32,
    pub dispute_votes: u32,
    pub proposal_tally: AggregationResult,
    pub dispute_tally: AggregationResult,
    pub proposal_cursor: TallyCursor,
    pub dispute_cursor: TallyCursor,
    pub settlement: Settlement,
    pub bump: u8,
    pub vault_bump: u8,
    pub reserved: [u8; 64],
}

impl Market {
    // 8 (discriminator)
    // 8 (market_id) + 32 (creator) + 32 (metadata_ref)
    // 1 (state) + 1 (paused) + 8 (b) + 8 (end_time)
    // 8 * 5 (q_yes, q_no, net_deposits, total_invested, liquidity)
    // 8 * 4 (protocol, resolver, lp fees, volume)
    // 32 (resolver) + 2 * 2 (outcome options) + 32 (evidence_ref) + 32 (disputer)
    // 8 (created_at) + 9 * 6 (transition timestamps)
    // 4 (params_version) + MarketParams
    // 4 * 2 (ledger lengths) + 2 * AggregationResult + 2 * TallyCursor + Settlement
    // 1 (bump) + 1 (vault_bump) + 64 (reserved)
    pub const LEN: usize = 8
        + 8 + 32 + 32
        + 1 + 1 + 8 + 8
        + 8 * 5
        + 8 * 4
        + 32 + 2 * 2 + 32 + 32
        + 8 + 9 * 6
        + 4 + MarketParams::LEN
        + 4 * 2 + 2 * AggregationResult::LEN + 2 * TallyCursor::LEN + Settlement::LEN
        + 1 + 1 + 64;

    /// A market in `Proposed` with the given snapshot of global parameters.
    /// `b == 0` selects the snapshot's default liquidity parameter.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        market_id: u64,
        creator: Pubkey,
        metadata_ref: [u8; 32],
        b: u64,
        end_time: i64,
        params: MarketParams,
        params_version: u32,
        bump: u8,
        vault_bump: u8,
        now: i64,
    ) -> Result<Self> {
        let b = if b == 0 { params.default_b } else { b };
        lmsr::validate_b(b)?;
        require!(end_time > now, PredictError::InvalidEndTime);

        Ok(Self {
            market_id,
            creator,
            metadata_ref,
            state: MarketState::Proposed,
            paused: false,
            b,
            end_time,
            q_yes: 0,
            q_no: 0,
            net_deposits: 0,
            total_invested: 0,
            liquidity: 0,
            protocol_fees: 0,
            resolver_fees: 0,
            lp_fees: 0,
            total_volume: 0,
            resolver: Pubkey::default(),
            proposed_outcome: None,
            final_outcome: None,
            evidence_ref: [0; 32],
            disputer: Pubkey::default(),
            created_at: now,
            approved_at: None,
            activated_at: None,
            resolution_proposed_at: None,
            disputed_at: None,
            finalized_at: None,
            cancelled_at: None,
            params_version,
            params,
            proposal_votes: 0,
            dispute_votes: 0,
            proposal_tally: AggregationResult::default(),
            dispute_tally: AggregationResult::default(),
            proposal_cursor: TallyCursor::default(),
            dispute_cursor: TallyCursor::default(),
            settlement: Settlement::default(),
            bump,
            vault_bump,
            reserved: [0; 64],
        })
    }

    pub fn ensure_state(&self, expected: MarketState) -> Result<()> {
        require!(self.state == expected, PredictError::InvalidMarketState);
        Ok(())
    }

    pub fn ensure_not_paused(&self) -> Result<()> {
        require!(!self.paused, PredictError::MarketPaused);
        Ok(())
    }

    pub fn ensure_tradable(&self, now: i64) -> Result<()> {
        self.ensure_state(MarketState::Active)?;
        self.ensure_not_paused()?;
        require!(now < self.end_time, PredictError::TradingClosed);
        Ok(())
    }

    fn transition(&mut self, next: MarketState, now: i64) -> Result<()> {
        require!(self.state.can_transition_to(next), PredictError::InvalidMarketState);
        match next {
            MarketState::Proposed => {}
            MarketState::Approved => self.approved_at = Some(now),
            MarketState::Active => self.activated_at = Some(now),
            MarketState::Resolving => self.resolution_proposed_at = Some(now),
            MarketState::Disputed => self.disputed_at = Some(now),
            MarketState::Finalized => self.finalized_at = Some(now),
            MarketState::Cancelled => self.cancelled_at = Some(now),
        }
        self.state = next;
        Ok(())
    }

    pub fn max_loss(&self) -> Result<u64> {
        lmsr::max_loss(self.b)
    }

    pub fn price_yes(&self) -> Result<u64> {
        lmsr::price_yes(self.q_yes, self.q_no, self.b)
    }

    pub fn price_no(&self) -> Result<u64> {
        lmsr::price_no(self.q_yes, self.q_no, self.b)
    }

    pub fn required_liquidity(&self) -> Result<u64> {
        Ok(self.params.liquidity_floor.max(self.max_loss()?))
    }

    pub fn dispute_deadline(&self) -> Result<i64> {
        self.resolution_proposed_at
            .ok_or(PredictError::InvalidMarketState)?
            .checked_add(self.params.dispute_window)
            .ok_or_else(|| error!(PredictError::MathOverflow))
    }

    // ---- votes ----

    /// Appends one vote to the ledger length and returns its sequence number.
    pub fn record_vote(&mut self, kind: VoteKind) -> Result<u32> {
        let (required, ledger) = match kind {
            VoteKind::Proposal => (MarketState::Proposed, &mut self.proposal_votes),
            VoteKind::Dispute => (MarketState::Disputed, &mut self.dispute_votes),
        };
        require!(self.state == required, PredictError::InvalidMarketState);
        let seq = *ledger;
        *ledger = seq.checked_add(1).ok_or(PredictError::MathOverflow)?;
        Ok(seq)
    }

    pub fn cursor(&self, kind: VoteKind) -> TallyCursor {
        match kind {
            VoteKind::Proposal => self.proposal_cursor,
            VoteKind::Dispute => self.dispute_cursor,
        }
    }

    /// Adds one page of the ledger, starting at `first_seq`, to the running
    /// recount. Returns the decision once the pass has covered the ledger
    /// length it started with, `None` while pages remain.
    pub fn count_votes(
        &mut self,
        kind: VoteKind,
        first_seq: u32,
        votes_for: u32,
        votes_against: u32,
        now: i64,
    ) -> Result<Option<AggregationResult>> {
        let (ledger_len, applied) = match kind {
            VoteKind::Proposal => (self.proposal_votes, self.proposal_tally.applied),
            VoteKind::Dispute => (self.dispute_votes, self.dispute_tally.applied),
        };
        if !applied {
            let required = match kind {
                VoteKind::Proposal => MarketState::Proposed,
                VoteKind::Dispute => MarketState::Disputed,
            };
            self.ensure_state(required)?;
        }

        let mut cursor = self.cursor(kind);
        if cursor.counted == 0 {
            cursor.target = ledger_len;
        }
        require!(first_seq == cursor.counted, PredictError::UnsortedVoteLedger);
        let page = votes_for.checked_add(votes_against).ok_or(PredictError::MathOverflow)?;
        cursor.counted = cursor.counted.checked_add(page).ok_or(PredictError::MathOverflow)?;
        require!(cursor.counted <= cursor.target, PredictError::VoteLedgerMismatch);
        cursor.votes_for = cursor.votes_for.checked_add(votes_for).ok_or(PredictError::MathOverflow)?;
        cursor.votes_against = cursor
            .votes_against
            .checked_add(votes_against)
            .ok_or(PredictError::MathOverflow)?;

        if cursor.counted < cursor.target {
            self.set_cursor(kind, cursor);
            return Ok(None);
        }
        let result = self.apply_votes(kind, cursor.votes_for, cursor.votes_against, now)?;
        self.set_cursor(kind, TallyCursor::default());
        Ok(Some(result))
    }

    fn set_cursor(&mut self, kind: VoteKind, cursor: TallyCursor) {
        match kind {
            VoteKind::Proposal => self.proposal_cursor = cursor,
            VoteKind::Dispute => self.dispute_cursor = cursor,
        }
    }

    /// Applies a complete recount of the ledger for `kind`.
    ///
    /// An approving proposal recount moves the market to `Approved`; a dispute
    /// recount always finalizes, flipping a Yes/No outcome when it passes.
    /// Once a decision has been applied, an identical recount is a no-op and
    /// a different one fails.
    fn apply_votes(
        &mut self,
        kind: VoteKind,
        votes_for: u32,
        votes_against: u32,
        now: i64,
    ) -> Result<AggregationResult> {
        let (threshold, min_votes, stored) = match kind {
            VoteKind::Proposal => (
                self.params.proposal_threshold_bps,
                self.params.min_proposal_votes,
                self.proposal_tally,
            ),
            VoteKind::Dispute => (self.params.dispute_threshold_bps, 0, self.dispute_tally),
        };
        let mut result = AggregationResult::evaluate(votes_for, votes_against, threshold, min_votes, now)?;

        if stored.applied {
            require!(stored.same_count(&result), PredictError::AggregationDiverged);
            return Ok(stored);
        }

        match kind {
            VoteKind::Proposal => {
                self.ensure_state(MarketState::Proposed)?;
                if result.passed {
                    self.transition(MarketState::Approved, now)?;
                    result.applied = true;
                }
                self.proposal_tally = result;
            }
            VoteKind::Dispute => {
                self.ensure_state(MarketState::Disputed)?;
                let proposed = self.proposed_outcome.ok_or(PredictError::InvalidMarketState)?;
                let outcome = if result.passed { proposed.opposite() } else { proposed };
                self.settle(Some(outcome))?;
                self.transition(MarketState::Finalized, now)?;
                result.applied = true;
                self.dispute_tally = result;
            }
        }
        Ok(result)
    }

    // ---- liquidity and trading ----

    pub fn activate(&mut self, liquidity: u64, now: i64) -> Result<()> {
        self.ensure_state(MarketState::Approved)?;
        self.ensure_not_paused()?;
        require!(liquidity >= self.required_liquidity()?, PredictError::InsufficientLiquidity);
        self.liquidity = liquidity;
        self.transition(MarketState::Active, now)
    }

    fn check_trade_size(&self, amount: u64) -> Result<()> {
        require!(amount >= self.params.min_trade, PredictError::BelowMinTrade);
        require!(amount <= self.params.max_trade, PredictError::AboveMaxTrade);
        Ok(())
    }

    pub fn execute_buy(
        &mut self,
        position: &mut Position,
        side: Outcome,
        spend: u64,
        min_shares_out: u64,
        now: i64,
    ) -> Result<BuyQuote> {
        self.ensure_tradable(now)?;
        let is_yes = side.is_yes()?;
        require!(spend > 0, PredictError::ZeroAmount);
        self.check_trade_size(spend)?;

        let quote = lmsr::quote_buy(
            self.q_yes,
            self.q_no,
            self.b,
            is_yes,
            spend,
            &self.params.fees,
            min_shares_out,
        )?;

        let outstanding = if is_yes { self.q_yes } else { self.q_no };
        let outstanding = outstanding.checked_add(quote.shares).ok_or(PredictError::MathOverflow)?;
        let net_deposits = self.net_deposits.checked_add(quote.cost).ok_or(PredictError::MathOverflow)?;
        let total_invested = self.total_invested.checked_add(quote.cost).ok_or(PredictError::MathOverflow)?;
        let total_volume = self.total_volume.checked_add(spend).ok_or(PredictError::MathOverflow)?;
        let held = position.shares(side).checked_add(quote.shares).ok_or(PredictError::MathOverflow)?;
        let invested = position.invested.checked_add(quote.cost).ok_or(PredictError::MathOverflow)?;
        let trades = position.trades.checked_add(1).ok_or(PredictError::MathOverflow)?;
        let (protocol_fees, resolver_fees, lp_fees) = self.accrued_fees(&quote.fees)?;

        if is_yes {
            self.q_yes = outstanding;
        } else {
            self.q_no = outstanding;
        }
        self.net_deposits = net_deposits;
        self.total_invested = total_invested;
        self.total_volume = total_volume;
        self.protocol_fees = protocol_fees;
        self.resolver_fees = resolver_fees;
        self.lp_fees = lp_fees;
        position.set_shares(side, held)?;
        position.invested = invested;
        position.trades = trades;
        position.last_trade_at = now;
        Ok(quote)
    }

    pub fn execute_sell(
        &mut self,
        position: &mut Position,
        side: Outcome,
        shares: u64,
        min_proceeds: u64,
        now: i64,
    ) -> Result<SellQuote> {
        self.ensure_tradable(now)?;
        let is_yes = side.is_yes()?;
        require!(shares > 0, PredictError::ZeroAmount);
        let held = position.shares(side);
        require!(held >= shares, PredictError::InsufficientShares);

        let quote = lmsr::quote_sell(
            self.q_yes,
            self.q_no,
            self.b,
            is_yes,
            shares,
            &self.params.fees,
            min_proceeds,
        )?;
        // Closing a whole position is exempt from the minimum so dust can exit.
        if shares < held {
            self.check_trade_size(quote.proceeds)?;
        } else {
            require!(quote.proceeds <= self.params.max_trade, PredictError::AboveMaxTrade);
        }

        let outstanding = if is_yes { self.q_yes } else { self.q_no };
        let outstanding = outstanding.checked_sub(shares).ok_or(PredictError::AccountingMismatch)?;
        let net_deposits = self
            .net_deposits
            .checked_sub(quote.proceeds)
            .ok_or(PredictError::AccountingMismatch)?;
        let basis_cut = quote.proceeds.min(position.invested);
        let total_invested = self
            .total_invested
            .checked_sub(basis_cut)
            .ok_or(PredictError::AccountingMismatch)?;
        let total_volume = self.total_volume.checked_add(quote.proceeds).ok_or(PredictError::MathOverflow)?;
        let trades = position.trades.checked_add(1).ok_or(PredictError::MathOverflow)?;
        let (protocol_fees, resolver_fees, lp_fees) = self.accrued_fees(&quote.fees)?;

        if is_yes {
            self.q_yes = outstanding;
        } else {
            self.q_no = outstanding;
        }
        self.net_deposits = net_deposits;
        self.total_invested = total_invested;
        self.total_volume = total_volume;
        self.protocol_fees = protocol_fees;
        self.resolver_fees = resolver_fees;
        self.lp_fees = lp_fees;
        position.set_shares(side, held - shares)?;
        position.invested -= basis_cut;
        position.trades = trades;
        position.last_trade_at = now;
        Ok(quote)
    }

    fn accrued_fees(&self, fees: &FeeBreakdown) -> Result<(u64, u64, u64)> {
        Ok((
            self.protocol_fees.checked_add(fees.protocol).ok_or(PredictError::MathOverflow)?,
            self.resolver_fees.checked_add(fees.resolver).ok_or(PredictError::MathOverflow)?,
            self.lp_fees.checked_add(fees.lp).ok_or(PredictError::MathOverflow)?,
        ))
    }

    // ---- resolution ----

    pub fn propose_resolution(
        &mut self,
        resolver: Pubkey,
        outcome: Outcome,
        evidence_ref: [u8; 32],
        now: i64,
    ) -> Result<()> {
        self.ensure_state(MarketState::Active)?;
        let opens_at = self
            .end_time
            .checked_add(self.params.resolution_delay)
            .ok_or(PredictError::MathOverflow)?;
        require!(now >= opens_at, PredictError::ResolutionTooEarly);

        self.resolver = resolver;
        self.proposed_outcome = Some(outcome);
        self.evidence_ref = evidence_ref;
        self.transition(MarketState::Resolving, now)
    }

    pub fn open_dispute(&mut self, disputer: Pubkey, now: i64) -> Result<()> {
        self.ensure_state(MarketState::Resolving)?;
        require!(now < self.dispute_deadline()?, PredictError::DisputeWindowClosed);
        self.disputer = disputer;
        self.transition(MarketState::Disputed, now)
    }

    /// Finalizes an undisputed proposal once the dispute window has elapsed.
    pub fn finalize(&mut self, now: i64) -> Result<()> {
        self.ensure_state(MarketState::Resolving)?;
        require!(now >= self.dispute_deadline()?, PredictError::DisputeWindowOpen);
        let outcome = self.proposed_outcome.ok_or(PredictError::InvalidMarketState)?;
        self.settle(Some(outcome))?;
        self.transition(MarketState::Finalized, now)
    }

    pub fn cancel(&mut self, now: i64) -> Result<()> {
        require!(!self.state.is_terminal(), PredictError::InvalidMarketState);
        self.settle(None)?;
        self.transition(MarketState::Cancelled, now)
    }

    /// Freezes the settlement snapshot. `None` (cancellation) and `Invalid`
    /// both refund net deposits pro rata to invested amounts.
    fn settle(&mut self, outcome: Option<Outcome>) -> Result<()> {
        let total_fees_kept = self
            .liquidity
            .checked_add(self.lp_fees)
            .ok_or(PredictError::MathOverflow)?;

        let settlement = match outcome {
            Some(side @ (Outcome::Yes | Outcome::No)) => {
                let winning = if side == Outcome::Yes { self.q_yes } else { self.q_no };
                check_bounded_loss(winning, self.net_deposits, self.b)?;
                // Winners split the net deposits. With no winners nobody can
                // claim, so deposits and the resolver bucket go to the creator.
                let (pool, resolver_fee) = if winning > 0 {
                    (self.net_deposits, self.resolver_fees)
                } else {
                    (0, 0)
                };
                let creator_remainder = self
                    .net_deposits
                    .checked_add(total_fees_kept)
                    .and_then(|v| v.checked_add(self.resolver_fees - resolver_fee))
                    .and_then(|v| v.checked_sub(pool))
                    .ok_or(PredictError::AccountingMismatch)?;
                Settlement {
                    pool,
                    basis: winning,
                    creator_remainder,
                    resolver_fee,
                    ..Settlement::default()
                }
            }
            _ => Settlement {
                pool: self.net_deposits,
                basis: self.total_invested,
                creator_remainder: total_fees_kept
                    .checked_add(self.resolver_fees)
                    .ok_or(PredictError::MathOverflow)?,
                refund: true,
                ..Settlement::default()
            },
        };

        self.final_outcome = outcome;
        self.settlement = settlement;
        Ok(())
    }

    // ---- settlement ----

    pub fn claim(&mut self, position: &mut Position) -> Result<ClaimPayout> {
        require!(self.state.is_terminal(), PredictError::InvalidMarketState);
        require!(!position.claimed, PredictError::AlreadyClaimed);

        let settlement = self.settlement;
        let share = if settlement.refund {
            position.invested
        } else {
            position.shares(self.final_outcome.ok_or(PredictError::InvalidMarketState)?)
        };
        let holder_amount = pro_rata(share, settlement.basis, settlement.pool)?;
        require!(holder_amount > 0, PredictError::NothingToClaim);

        let claimed = settlement
            .claimed
            .checked_add(holder_amount)
            .ok_or(PredictError::MathOverflow)?;
        require!(claimed <= settlement.pool, PredictError::PoolOverdrawn);
        let claims = settlement.claims.checked_add(1).ok_or(PredictError::MathOverflow)?;
        let resolver_amount = if settlement.resolver_paid { 0 } else { settlement.resolver_fee };

        self.settlement.claimed = claimed;
        self.settlement.claims = claims;
        self.settlement.resolver_paid = true;
        position.claimed = true;
        position.claimed_amount = holder_amount;
        Ok(ClaimPayout { holder_amount, resolver_amount })
    }

    /// Creator's share of the vault after settlement, taken once.
    pub fn withdraw_liquidity(&mut self) -> Result<u64> {
        require!(self.state.is_terminal(), PredictError::InvalidMarketState);
        require!(
            !self.settlement.liquidity_withdrawn,
            PredictError::LiquidityAlreadyWithdrawn
        );
        let amount = self.settlement.creator_remainder;
        require!(amount > 0, PredictError::NothingToWithdraw);
        self.settlement.liquidity_withdrawn = true;
        Ok(amount)
    }

    /// What the vault should still hold given everything recorded so far.
    pub fn expected_vault_balance(&self) -> Result<u64> {
        let held = self
            .net_deposits
            .checked_add(self.liquidity)
            .and_then(|v| v.checked_add(self.resolver_fees))
            .and_then(|v| v.checked_add(self.lp_fees))
            .ok_or(PredictError::MathOverflow)?;
        if !self.state.is_terminal() {
            return Ok(held);
        }
        let s = &self.settlement;
        let resolver_out = if s.resolver_paid { s.resolver_fee } else { 0 };
        let creator_out = if s.liquidity_withdrawn { s.creator_remainder } else { 0 };
        held.checked_sub(s.claimed)
            .and_then(|v| v.checked_sub(resolver_out))
            .and_then(|v| v.checked_sub(creator_out))
            .ok_or_else(|| error!(PredictError::AccountingMismatch))
    }
}
