use anchor_lang::prelude::*;
use crate::constants::{BPS_DENOMINATOR, MAX_TOTAL_FEE_BPS};
use crate::errors::PredictError;
use crate::utils::fixed_point::mul_div;
use crate::utils::lmsr::max_loss;

/// Per-trade fee components in basis points of the trade amount.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct FeeRates {
    pub protocol_bps: u16,
    pub resolver_bps: u16,
    pub lp_bps: u16,
}

impl FeeRates {
    pub const LEN: usize = 2 * 3;

    pub fn total_bps(&self) -> u16 {
        // Each component is u16; the sum fits before the cap check.
        (self.protocol_bps as u32 + self.resolver_bps as u32 + self.lp_bps as u32)
            .min(u16::MAX as u32) as u16
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            self.total_bps() <= MAX_TOTAL_FEE_BPS,
            PredictError::InvalidFeeConfiguration
        );
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub protocol: u64,
    pub resolver: u64,
    pub lp: u64,
    pub total: u64,
}

/// Splits the fee on `amount` into its three buckets.
///
/// The total is taken first, then protocol and resolver get their floored
/// proportional shares and the LP bucket takes the remainder.
pub fn split_fees(amount: u64, rates: &FeeRates) -> Result<FeeBreakdown> {
    let total_bps = rates.total_bps() as u64;
    let total = mul_div(amount, total_bps, BPS_DENOMINATOR)?;
    if total == 0 {
        return Ok(FeeBreakdown::default());
    }

    let protocol = mul_div(total, rates.protocol_bps as u64, total_bps)?;
    let resolver = mul_div(total, rates.resolver_bps as u64, total_bps)?;
    let lp = total
        .checked_sub(protocol)
        .and_then(|rest| rest.checked_sub(resolver))
        .ok_or(PredictError::FeeSplitMismatch)?;

    let breakdown = FeeBreakdown { protocol, resolver, lp, total };
    breakdown.verify()?;
    Ok(breakdown)
}

impl FeeBreakdown {
    pub fn verify(&self) -> Result<()> {
        let sum = self
            .protocol
            .checked_add(self.resolver)
            .and_then(|s| s.checked_add(self.lp))
            .ok_or(PredictError::MathOverflow)?;
        require!(sum == self.total, PredictError::FeeSplitMismatch);
        Ok(())
    }
}

/// floor(share * pool / basis); zero when there is nothing to divide.
pub fn pro_rata(share: u64, basis: u64, pool: u64) -> Result<u64> {
    if basis == 0 || share == 0 {
        return Ok(0);
    }
    require!(share <= basis, PredictError::AccountingMismatch);
    mul_div(share, pool, basis)
}

/// Asserts that paying every winning share one unit would cost the maker at
/// most `b * ln 2` beyond what traders deposited.
pub fn check_bounded_loss(winning_shares: u64, net_deposits: u64, b: u64) -> Result<()> {
    let loss = winning_shares.saturating_sub(net_deposits);
    require!(loss <= max_loss(b)?, PredictError::BoundedLossExceeded);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{
        DEFAULT_LP_FEE_BPS, DEFAULT_PROTOCOL_FEE_BPS, DEFAULT_RESOLVER_FEE_BPS, PRECISION,
    };

    fn default_rates() -> FeeRates {
        FeeRates {
            protocol_bps: DEFAULT_PROTOCOL_FEE_BPS,
            resolver_bps: DEFAULT_RESOLVER_FEE_BPS,
            lp_bps: DEFAULT_LP_FEE_BPS,
        }
    }

    #[test]
    fn test_default_split_on_hundred() {
        let fees = split_fees(100 * PRECISION, &default_rates()).unwrap();
        assert_eq!(fees.total, 10 * PRECISION);
        assert_eq!(fees.protocol, 3 * PRECISION);
        assert_eq!(fees.resolver, 2 * PRECISION);
        assert_eq!(fees.lp, 5 * PRECISION);
    }

    #[test]
    fn test_split_always_sums_to_total() {
        let rates = FeeRates { protocol_bps: 333, resolver_bps: 111, lp_bps: 7 };
        for amount in [1u64, 7, 99, 1_001, 123_456_789, 987_654_321_012] {
            let fees = split_fees(amount, &rates).unwrap();
            assert_eq!(fees.protocol + fees.resolver + fees.lp, fees.total);
            assert_eq!(fees.total, amount * rates.total_bps() as u64 / 10_000);
        }
    }

    #[test]
    fn test_dust_amount_has_no_fee() {
        assert_eq!(split_fees(9, &default_rates()).unwrap(), FeeBreakdown::default());
    }

    #[test]
    fn test_zero_rates() {
        let rates = FeeRates { protocol_bps: 0, resolver_bps: 0, lp_bps: 0 };
        assert_eq!(split_fees(PRECISION, &rates).unwrap().total, 0);
    }

    #[test]
    fn test_mismatched_breakdown_is_rejected() {
        let broken = FeeBreakdown { protocol: 1, resolver: 1, lp: 1, total: 4 };
        assert_eq!(broken.verify().unwrap_err(), PredictError::FeeSplitMismatch.into());
    }

    #[test]
    fn test_fee_cap() {
        assert!(FeeRates { protocol_bps: 1_000, resolver_bps: 500, lp_bps: 500 }
            .validate()
            .is_ok());
        assert_eq!(
            FeeRates { protocol_bps: 1_000, resolver_bps: 500, lp_bps: 501 }
                .validate()
                .unwrap_err(),
            PredictError::InvalidFeeConfiguration.into()
        );
        assert!(FeeRates { protocol_bps: u16::MAX, resolver_bps: u16::MAX, lp_bps: 1 }
            .validate()
            .is_err());
    }

    #[test]
    fn test_pro_rata_floors() {
        assert_eq!(pro_rata(1, 3, 100).unwrap(), 33);
        assert_eq!(pro_rata(3, 3, 100).unwrap(), 100);
        assert_eq!(pro_rata(5, 0, 100).unwrap(), 0);
        assert_eq!(pro_rata(4, 3, 100).unwrap_err(), PredictError::AccountingMismatch.into());
    }

    #[test]
    fn test_bounded_loss_check() {
        let b = 100 * PRECISION;
        let bound = max_loss(b).unwrap();
        assert!(check_bounded_loss(bound, 0, b).is_ok());
        assert_eq!(
            check_bounded_loss(bound + 1, 0, b).unwrap_err(),
            PredictError::BoundedLossExceeded.into()
        );
    }
}
