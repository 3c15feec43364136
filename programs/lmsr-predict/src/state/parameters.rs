use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::PredictError;
use crate::utils::fees::FeeRates;
use crate::utils::lmsr::validate_b;

/// Tunables a market binds at creation. Later updates to the global record
/// never reach markets that already exist.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct MarketParams {
    pub fees: FeeRates,
    pub proposal_threshold_bps: u16,
    pub dispute_threshold_bps: u16,
    pub min_proposal_votes: u32,
    pub min_trade: u64,
    pub max_trade: u64,
    pub default_b: u64,
    pub liquidity_floor: u64,
    pub resolution_delay: i64,
    pub dispute_window: i64,
}

impl MarketParams {
    // fees + 2 thresholds + min votes + 4 u64 + 2 i64
    pub const LEN: usize = FeeRates::LEN + 2 * 2 + 4 + 8 * 4 + 8 * 2;

    pub fn validate(&self) -> Result<()> {
        self.fees.validate()?;
        for threshold in [self.proposal_threshold_bps, self.dispute_threshold_bps] {
            require!(
                (MIN_THRESHOLD_BPS..=MAX_THRESHOLD_BPS).contains(&threshold),
                PredictError::InvalidThreshold
            );
        }
        require!(
            self.min_proposal_votes >= 1 && self.min_proposal_votes <= MAX_MIN_PROPOSAL_VOTES,
            PredictError::InvalidVoteCount
        );
        require!(
            self.min_trade > 0 && self.min_trade <= self.max_trade,
            PredictError::InvalidTradeBounds
        );
        validate_b(self.default_b)?;
        require!(self.liquidity_floor > 0, PredictError::InsufficientLiquidity);
        require!(
            (0..=MAX_RESOLUTION_DELAY).contains(&self.resolution_delay),
            PredictError::InvalidTimeWindow
        );
        require!(
            (MIN_DISPUTE_WINDOW..=MAX_DISPUTE_WINDOW).contains(&self.dispute_window),
            PredictError::InvalidTimeWindow
        );
        Ok(())
    }
}

impl Default for MarketParams {
    fn default() -> Self {
        Self {
            fees: FeeRates {
                protocol_bps: DEFAULT_PROTOCOL_FEE_BPS,
                resolver_bps: DEFAULT_RESOLVER_FEE_BPS,
                lp_bps: DEFAULT_LP_FEE_BPS,
            },
            proposal_threshold_bps: DEFAULT_PROPOSAL_THRESHOLD_BPS,
            dispute_threshold_bps: DEFAULT_DISPUTE_THRESHOLD_BPS,
            min_proposal_votes: DEFAULT_MIN_PROPOSAL_VOTES,
            min_trade: DEFAULT_MIN_TRADE,
            max_trade: DEFAULT_MAX_TRADE,
            default_b: DEFAULT_B,
            liquidity_floor: DEFAULT_LIQUIDITY_FLOOR,
            resolution_delay: DEFAULT_RESOLUTION_DELAY,
            dispute_window: DEFAULT_DISPUTE_WINDOW,
        }
    }
}

#[account]
pub struct GlobalParameters {
    pub admin: Pubkey,
    pub scheduler: Pubkey,
    /// `Pubkey::default()` lets any signer propose resolutions.
    pub resolver: Pubkey,
    pub treasury: Pubkey,           // collateral token account for protocol fees
    pub collateral_mint: Pubkey,
    pub params: MarketParams,
    pub paused: bool,
    pub version: u32,
    pub total_markets: u64,
    pub bump: u8,
    pub reserved: [u8; 64],
}

impl GlobalParameters {
    // 8 (discriminator)
    // 32 * 5 (admin, scheduler, resolver, treasury, collateral_mint)
    // MarketParams
    // 1 (paused) + 4 (version) + 8 (total_markets) + 1 (bump)
    // 64 (reserved)
    pub const LEN: usize = 8 + 32 * 5 + MarketParams::LEN + 1 + 4 + 8 + 1 + 64;

    pub fn validate(&self) -> Result<()> {
        self.params.validate()
    }

    /// Swaps in a new parameter set and bumps the version.
    pub fn apply_update(&mut self, params: MarketParams) -> Result<u32> {
        params.validate()?;
        let version = self.version.checked_add(1).ok_or(PredictError::MathOverflow)?;
        self.params = params;
        self.version = version;
        Ok(version)
    }

    pub fn next_market_id(&mut self) -> Result<u64> {
        let id = self.total_markets;
        self.total_markets = id.checked_add(1).ok_or(PredictError::MathOverflow)?;
        Ok(id)
    }

    pub fn ensure_not_paused(&self) -> Result<()> {
        require!(!self.paused, PredictError::PlatformPaused);
        Ok(())
    }
}
