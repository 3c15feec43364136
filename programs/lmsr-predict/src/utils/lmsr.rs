use anchor_lang::prelude::*;
use crate::constants::{MAX_B, MIN_B};
use crate::errors::PredictError;
use crate::utils::fees::{split_fees, FeeBreakdown, FeeRates};
use crate::utils::fixed_point::{exp_neg_wad, from_wad, ln_wad, scale_by_wad, LN_2_WAD, WAD};

/// Max distance of P(yes) + P(no) from 1.0, in 9-decimal units.
pub const PRICE_SUM_TOLERANCE: u64 = 4;

/// Acceptable shortfall of a buy's cost below its net spend (1e-6 token).
pub const SEARCH_TOLERANCE: u64 = 1_000;

pub const MAX_SEARCH_ITERATIONS: u32 = 50;

pub fn validate_b(b: u64) -> Result<()> {
    require!(b >= MIN_B && b <= MAX_B, PredictError::InvalidLiquidityParameter);
    Ok(())
}

/// floor(b * ln 2): the most the maker can lose on a binary market.
pub fn max_loss(b: u64) -> Result<u64> {
    scale_by_wad(b, LN_2_WAD)
}

/// e^(-|q_yes - q_no| / b) at WAD scale.
fn spread_factor(q_yes: u64, q_no: u64, b: u64) -> Result<u128> {
    let spread = q_yes.abs_diff(q_no) as u128;
    let shift = spread
        .checked_mul(WAD)
        .ok_or(PredictError::MathOverflow)?
        / b as u128;
    exp_neg_wad(shift)
}

/// C(q) = b * ln(e^(q_yes/b) + e^(q_no/b)), evaluated as
/// max(q) + b * ln(1 + e^(-|q_yes - q_no| / b)).
pub fn cost(q_yes: u64, q_no: u64, b: u64) -> Result<u64> {
    validate_b(b)?;
    let factor = spread_factor(q_yes, q_no, b)?;
    let log_term = ln_wad(WAD + factor)?;
    let tail = scale_by_wad(b, log_term)?;
    q_yes
        .max(q_no)
        .checked_add(tail)
        .ok_or_else(|| error!(PredictError::MathOverflow))
}

/// Instantaneous price of the YES side in softmax form.
pub fn price_yes(q_yes: u64, q_no: u64, b: u64) -> Result<u64> {
    validate_b(b)?;
    let factor = spread_factor(q_yes, q_no, b)?;
    let denominator = WAD + factor;
    // Leading side is 1 / (1 + e^-d), trailing side e^-d / (1 + e^-d).
    let numerator = if q_yes >= q_no { WAD } else { factor };
    from_wad(numerator * WAD / denominator)
}

pub fn price_no(q_yes: u64, q_no: u64, b: u64) -> Result<u64> {
    price_yes(q_no, q_yes, b)
}

fn add_shares(q_yes: u64, q_no: u64, is_yes: bool, shares: u64) -> Result<(u64, u64)> {
    if is_yes {
        Ok((q_yes.checked_add(shares).ok_or(PredictError::MathOverflow)?, q_no))
    } else {
        Ok((q_yes, q_no.checked_add(shares).ok_or(PredictError::MathOverflow)?))
    }
}

fn remove_shares(q_yes: u64, q_no: u64, is_yes: bool, shares: u64) -> Result<(u64, u64)> {
    if is_yes {
        Ok((q_yes.checked_sub(shares).ok_or(PredictError::InsufficientShares)?, q_no))
    } else {
        Ok((q_yes, q_no.checked_sub(shares).ok_or(PredictError::InsufficientShares)?))
    }
}

/// C(q + shares on one side) - C(q).
pub fn buy_cost(q_yes: u64, q_no: u64, b: u64, is_yes: bool, shares: u64) -> Result<u64> {
    let before = cost(q_yes, q_no, b)?;
    let (next_yes, next_no) = add_shares(q_yes, q_no, is_yes, shares)?;
    let after = cost(next_yes, next_no, b)?;
    after.checked_sub(before).ok_or_else(|| error!(PredictError::MathUnderflow))
}

/// C(q) - C(q - shares on one side).
pub fn sell_proceeds(q_yes: u64, q_no: u64, b: u64, is_yes: bool, shares: u64) -> Result<u64> {
    let before = cost(q_yes, q_no, b)?;
    let (next_yes, next_no) = remove_shares(q_yes, q_no, is_yes, shares)?;
    let after = cost(next_yes, next_no, b)?;
    before.checked_sub(after).ok_or_else(|| error!(PredictError::MathUnderflow))
}

/// Largest share count whose cost does not exceed `budget`, by bisection.
///
/// The upper end `budget + b*ln2 + |q_yes - q_no| + 1` always costs more than
/// `budget`, because C(q') >= max(q') and C(q) <= max(q) + b*ln2. The loop keeps
/// cost(lo) <= budget and stops once the shortfall is within
/// `SEARCH_TOLERANCE` or the iteration ceiling is hit.
pub fn shares_for_cost(q_yes: u64, q_no: u64, b: u64, is_yes: bool, budget: u64) -> Result<u64> {
    if budget == 0 {
        return Ok(0);
    }
    let base = cost(q_yes, q_no, b)?;
    let side = if is_yes { q_yes } else { q_no };
    let other = if is_yes { q_no } else { q_yes };
    let gap = other.saturating_sub(side);

    let mut hi = budget
        .checked_add(max_loss(b)?)
        .and_then(|v| v.checked_add(gap))
        .and_then(|v| v.checked_add(1))
        .ok_or(PredictError::MathOverflow)?;
    let delta = |shares: u64| -> Result<u64> {
        let (next_yes, next_no) = add_shares(q_yes, q_no, is_yes, shares)?;
        cost(next_yes, next_no, b)?
            .checked_sub(base)
            .ok_or_else(|| error!(PredictError::MathUnderflow))
    };
    require!(delta(hi)? > budget, PredictError::SolverBracket);

    let mut lo = 0u64;
    let mut lo_cost = 0u64;
    for _ in 0..MAX_SEARCH_ITERATIONS {
        if hi - lo <= 1 || budget - lo_cost <= SEARCH_TOLERANCE {
            break;
        }
        let mid = lo + (hi - lo) / 2;
        let mid_cost = delta(mid)?;
        if mid_cost <= budget {
            lo = mid;
            lo_cost = mid_cost;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyQuote {
    pub shares: u64,
    /// LMSR cost actually charged, <= net spend.
    pub cost: u64,
    pub fees: FeeBreakdown,
    /// cost + fees.total, the amount taken from the trader.
    pub total_paid: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SellQuote {
    /// Gross proceeds C(q) - C(q - shares).
    pub proceeds: u64,
    pub fees: FeeBreakdown,
    pub net_proceeds: u64,
}

pub fn quote_buy(
    q_yes: u64,
    q_no: u64,
    b: u64,
    is_yes: bool,
    spend: u64,
    rates: &FeeRates,
    min_shares_out: u64,
) -> Result<BuyQuote> {
    require!(spend > 0, PredictError::ZeroAmount);
    let fees = split_fees(spend, rates)?;
    let net = spend.checked_sub(fees.total).ok_or(PredictError::MathUnderflow)?;

    let shares = shares_for_cost(q_yes, q_no, b, is_yes, net)?;
    require!(shares > 0, PredictError::ZeroAmount);
    require!(shares >= min_shares_out, PredictError::SlippageExceeded);

    let cost = buy_cost(q_yes, q_no, b, is_yes, shares)?;
    require!(cost <= net, PredictError::AccountingMismatch);
    let total_paid = cost.checked_add(fees.total).ok_or(PredictError::MathOverflow)?;

    Ok(BuyQuote { shares, cost, fees, total_paid })
}

pub fn quote_sell(
    q_yes: u64,
    q_no: u64,
    b: u64,
    is_yes: bool,
    shares: u64,
    rates: &FeeRates,
    min_proceeds: u64,
) -> Result<SellQuote> {
    require!(shares > 0, PredictError::ZeroAmount);
    let proceeds = sell_proceeds(q_yes, q_no, b, is_yes, shares)?;
    let fees = split_fees(proceeds, rates)?;
    let net_proceeds = proceeds.checked_sub(fees.total).ok_or(PredictError::MathUnderflow)?;
    require!(net_proceeds >= min_proceeds, PredictError::SlippageExceeded);

    Ok(SellQuote { proceeds, fees, net_proceeds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PRECISION;

    const B: u64 = 100 * PRECISION;

    fn no_fees() -> FeeRates {
        FeeRates { protocol_bps: 0, resolver_bps: 0, lp_bps: 0 }
    }

    fn default_fees() -> FeeRates {
        FeeRates { protocol_bps: 300, resolver_bps: 200, lp_bps: 500 }
    }

    #[test]
    fn test_empty_market_cost_is_b_ln2() {
        let c = cost(0, 0, B).unwrap();
        let bound = max_loss(B).unwrap();
        assert!(c <= bound);
        assert!(bound - c <= 1);
        assert_eq!(bound, 69_314_718_055);
    }

    #[test]
    fn test_cost_is_symmetric_and_increasing() {
        assert_eq!(cost(7 * PRECISION, 3 * PRECISION, B).unwrap(), cost(3 * PRECISION, 7 * PRECISION, B).unwrap());
        let mut previous = cost(0, 0, B).unwrap();
        for step in 1..50u64 {
            let next = cost(step * PRECISION, 0, B).unwrap();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_cost_tracks_max_for_wide_spread() {
        // 50 * b apart, the ln term is below one unit.
        let q = 5_000 * PRECISION;
        assert_eq!(cost(q, 0, B).unwrap(), q);
    }

    #[test]
    fn test_invalid_b_rejected() {
        assert_eq!(cost(0, 0, MIN_B - 1).unwrap_err(), PredictError::InvalidLiquidityParameter.into());
        assert_eq!(price_yes(0, 0, MAX_B + 1).unwrap_err(), PredictError::InvalidLiquidityParameter.into());
    }

    #[test]
    fn test_even_market_prices_half() {
        assert_eq!(price_yes(0, 0, B).unwrap(), PRECISION / 2);
        assert_eq!(price_no(0, 0, B).unwrap(), PRECISION / 2);
    }

    #[test]
    fn test_prices_sum_to_one() {
        for (q_yes, q_no) in [(0, 0), (10, 0), (0, 55), (123, 77), (1_000, 999), (4_000, 0)] {
            let (q_yes, q_no) = (q_yes * PRECISION, q_no * PRECISION);
            let sum = price_yes(q_yes, q_no, B).unwrap() + price_no(q_yes, q_no, B).unwrap();
            assert!(PRECISION - sum <= PRICE_SUM_TOLERANCE, "sum {sum} at {q_yes},{q_no}");
        }
    }

    #[test]
    fn test_price_moves_with_demand() {
        let before = price_yes(0, 0, B).unwrap();
        let after = price_yes(20 * PRECISION, 0, B).unwrap();
        assert!(after > before);
        assert!(price_no(20 * PRECISION, 0, B).unwrap() < before);
    }

    #[test]
    fn test_solver_hits_target_within_tolerance() {
        let net = 9 * PRECISION;
        let shares = shares_for_cost(0, 0, B, true, net).unwrap();
        let charged = buy_cost(0, 0, B, true, shares).unwrap();
        assert!(charged <= net);
        assert!(net - charged <= SEARCH_TOLERANCE);
        // At p ~ 0.5 a 9 token spend buys a bit under 18 shares.
        assert!(shares > 17 * PRECISION && shares < 18 * PRECISION);
    }

    #[test]
    fn test_solver_on_skewed_market() {
        let (q_yes, q_no) = (0, 300 * PRECISION);
        let net = PRECISION;
        let shares = shares_for_cost(q_yes, q_no, B, true, net).unwrap();
        let charged = buy_cost(q_yes, q_no, B, true, shares).unwrap();
        assert!(charged <= net);
        assert!(net - charged <= SEARCH_TOLERANCE);
        // Cheap side: one token buys many shares.
        assert!(shares > 10 * PRECISION);
    }

    #[test]
    fn test_zero_budget_buys_nothing() {
        assert_eq!(shares_for_cost(0, 0, B, false, 0).unwrap(), 0);
    }

    #[test]
    fn test_quote_buy_splits_fee_first() {
        let quote = quote_buy(0, 0, B, true, 10 * PRECISION, &default_fees(), 0).unwrap();
        assert_eq!(quote.fees.total, PRECISION);
        assert!(quote.cost <= 9 * PRECISION);
        assert_eq!(quote.total_paid, quote.cost + quote.fees.total);
        assert!(quote.total_paid <= 10 * PRECISION);
    }

    #[test]
    fn test_quote_buy_slippage() {
        let quote = quote_buy(0, 0, B, true, 10 * PRECISION, &no_fees(), 0).unwrap();
        assert!(quote_buy(0, 0, B, true, 10 * PRECISION, &no_fees(), quote.shares).is_ok());
        assert_eq!(
            quote_buy(0, 0, B, true, 10 * PRECISION, &no_fees(), quote.shares + 1).unwrap_err(),
            PredictError::SlippageExceeded.into()
        );
    }

    #[test]
    fn test_sell_is_closed_form_inverse() {
        let proceeds = sell_proceeds(25 * PRECISION, 0, B, true, 25 * PRECISION).unwrap();
        assert_eq!(proceeds, cost(25 * PRECISION, 0, B).unwrap() - cost(0, 0, B).unwrap());
    }

    #[test]
    fn test_sell_more_than_outstanding_fails() {
        assert_eq!(
            sell_proceeds(PRECISION, 0, B, true, PRECISION + 1).unwrap_err(),
            PredictError::InsufficientShares.into()
        );
    }

    #[test]
    fn test_buy_then_sell_never_profits() {
        let spend = 50 * PRECISION;
        let buy = quote_buy(0, 0, B, false, spend, &default_fees(), 0).unwrap();
        let sell = quote_sell(0, buy.shares, B, false, buy.shares, &default_fees(), 0).unwrap();
        assert!(sell.proceeds <= buy.cost);
        assert!(sell.net_proceeds < spend);
    }

    #[test]
    fn test_quote_sell_slippage() {
        let sell = quote_sell(10 * PRECISION, 0, B, true, 5 * PRECISION, &default_fees(), 0).unwrap();
        assert_eq!(sell.net_proceeds, sell.proceeds - sell.fees.total);
        assert_eq!(
            quote_sell(10 * PRECISION, 0, B, true, 5 * PRECISION, &default_fees(), sell.net_proceeds + 1)
                .unwrap_err(),
            PredictError::SlippageExceeded.into()
        );
    }
}
