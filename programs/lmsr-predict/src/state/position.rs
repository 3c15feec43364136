use anchor_lang::prelude::*;
use crate::errors::PredictError;
use crate::state::Outcome;

#[account]
pub struct Position {
    pub market: Pubkey,
    pub holder: Pubkey,
    pub yes_shares: u64,
    pub no_shares: u64,
    /// Refund basis: LMSR cost paid in, less sell proceeds, floored at zero.
    pub invested: u64,
    pub trades: u32,
    pub last_trade_at: i64,
    pub claimed: bool,
    pub claimed_amount: u64,
    pub bump: u8,
    pub reserved: [u8; 32],
}

impl Position {
    pub const LEN: usize = 8 + 32 + 32 + 8 * 3 + 4 + 8 + 1 + 8 + 1 + 32;

    pub fn new(market: Pubkey, holder: Pubkey, bump: u8) -> Self {
        Self {
            market,
            holder,
            yes_shares: 0,
            no_shares: 0,
            invested: 0,
            trades: 0,
            last_trade_at: 0,
            claimed: false,
            claimed_amount: 0,
            bump,
            reserved: [0; 32],
        }
    }

    /// True for an account created by `init_if_needed` and not yet filled in.
    pub fn is_uninitialized(&self) -> bool {
        self.market == Pubkey::default()
    }

    pub fn shares(&self, side: Outcome) -> u64 {
        match side {
            Outcome::Yes => self.yes_shares,
            Outcome::No => self.no_shares,
            Outcome::Invalid => 0,
        }
    }

    pub(crate) fn set_shares(&mut self, side: Outcome, shares: u64) -> Result<()> {
        match side {
            Outcome::Yes => self.yes_shares = shares,
            Outcome::No => self.no_shares = shares,
            Outcome::Invalid => return err!(PredictError::InvalidOutcome),
        }
        Ok(())
    }
}
