use anchor_lang::prelude::*;

#[error_code]
pub enum PredictError {
    // Validation
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Invalid outcome for this operation")]
    InvalidOutcome,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Trade below minimum size")]
    BelowMinTrade,
    #[msg("Trade above maximum size")]
    AboveMaxTrade,
    #[msg("Slippage exceeded")]
    SlippageExceeded,
    #[msg("Insufficient shares")]
    InsufficientShares,
    #[msg("Liquidity parameter b out of range")]
    InvalidLiquidityParameter,
    #[msg("End time must be in the future")]
    InvalidEndTime,
    #[msg("Invalid fee configuration")]
    InvalidFeeConfiguration,
    #[msg("Threshold out of range")]
    InvalidThreshold,
    #[msg("Minimum vote count out of range")]
    InvalidVoteCount,
    #[msg("Time window out of range")]
    InvalidTimeWindow,
    #[msg("Invalid trade size bounds")]
    InvalidTradeBounds,
    #[msg("Liquidity below the required floor")]
    InsufficientLiquidity,
    #[msg("Vote record does not belong to this market and kind")]
    InvalidVoteRecord,
    #[msg("Vote records must be passed in ledger order")]
    UnsortedVoteLedger,
    #[msg("Token account mint does not match the collateral mint")]
    InvalidMint,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Resolver token account required")]
    MissingResolverAccount,

    // State
    #[msg("Market not in the required state")]
    InvalidMarketState,
    #[msg("Platform is paused")]
    PlatformPaused,
    #[msg("Market is paused")]
    MarketPaused,
    #[msg("Trading period has ended")]
    TradingClosed,
    #[msg("Resolution time not reached")]
    ResolutionTooEarly,
    #[msg("Dispute window has closed")]
    DisputeWindowClosed,
    #[msg("Dispute window still open")]
    DisputeWindowOpen,
    #[msg("Already claimed")]
    AlreadyClaimed,
    #[msg("Liquidity already withdrawn")]
    LiquidityAlreadyWithdrawn,
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,

    // Arithmetic
    #[msg("Arithmetic overflow")]
    MathOverflow,
    #[msg("Arithmetic underflow")]
    MathUnderflow,
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Logarithm argument outside the supported domain")]
    LogDomain,
    #[msg("Share search bracket does not contain the target cost")]
    SolverBracket,

    // Consistency
    #[msg("Fee shares do not sum to the total fee")]
    FeeSplitMismatch,
    #[msg("Vote ledger count does not match recorded votes")]
    VoteLedgerMismatch,
    #[msg("Recount differs from an already applied aggregation")]
    AggregationDiverged,
    #[msg("Claims would exceed the settlement pool")]
    PoolOverdrawn,
    #[msg("Market maker loss exceeds b * ln(2)")]
    BoundedLossExceeded,
    #[msg("Market accounting invariant violated")]
    AccountingMismatch,
}

/// Broad failure classes surfaced to callers and the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input or capability; fix the request and retry.
    Validation,
    /// The lifecycle does not permit the operation right now.
    State,
    /// Kernel or pricing overflow; never expected for in-bounds input.
    Arithmetic,
    /// An internal invariant check tripped.
    Consistency,
}

impl PredictError {
    pub fn kind(&self) -> ErrorKind {
        use PredictError::*;
        match self {
            Unauthorized | InvalidOutcome | ZeroAmount | BelowMinTrade | AboveMaxTrade
            | SlippageExceeded | InsufficientShares | InvalidLiquidityParameter
            | InvalidEndTime | InvalidFeeConfiguration | InvalidThreshold | InvalidVoteCount
            | InvalidTimeWindow | InvalidTradeBounds | InsufficientLiquidity
            | InvalidVoteRecord | UnsortedVoteLedger | InvalidMint | NothingToClaim
            | MissingResolverAccount => ErrorKind::Validation,
            InvalidMarketState | PlatformPaused | MarketPaused | TradingClosed
            | ResolutionTooEarly | DisputeWindowClosed | DisputeWindowOpen | AlreadyClaimed
            | LiquidityAlreadyWithdrawn | NothingToWithdraw => ErrorKind::State,
            MathOverflow | MathUnderflow | DivisionByZero | LogDomain | SolverBracket => {
                ErrorKind::Arithmetic
            }
            FeeSplitMismatch | VoteLedgerMismatch | AggregationDiverged | PoolOverdrawn
            | BoundedLossExceeded | AccountingMismatch => ErrorKind::Consistency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_family() {
        assert_eq!(PredictError::SlippageExceeded.kind(), ErrorKind::Validation);
        assert_eq!(PredictError::InvalidMarketState.kind(), ErrorKind::State);
        assert_eq!(PredictError::MathOverflow.kind(), ErrorKind::Arithmetic);
        assert_eq!(PredictError::FeeSplitMismatch.kind(), ErrorKind::Consistency);
    }
}
