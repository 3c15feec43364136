use anchor_lang::prelude::*;
use crate::constants::PRECISION;
use crate::errors::PredictError;

/// 1.0 at the 18-decimal internal scale used for exp/ln evaluation.
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Scale step between the 9-decimal amounts and WAD.
const UNIT_TO_WAD: u128 = WAD / PRECISION as u128;

/// ln(2), floored at 18 decimals.
pub const LN_2_WAD: u128 = 693_147_180_559_945_309;

/// Largest shift `x` for which e^(-x) is still representable at WAD scale.
/// e^(-42) ~ 5.7e-19 is below one WAD unit, so anything past this clamps to 0.
pub const MAX_EXP_SHIFT: u128 = 42 * WAD;

/// Ceiling on series terms for both exp and ln; each loop exits earlier once
/// terms vanish at WAD precision.
const MAX_SERIES_TERMS: u32 = 40;

/// floor(a * b / denominator) through a u128 intermediate.
pub fn mul_div(a: u64, b: u64, denominator: u64) -> Result<u64> {
    require!(denominator > 0, PredictError::DivisionByZero);
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(PredictError::MathOverflow)?;
    u64::try_from(product / denominator as u128).map_err(|_| error!(PredictError::MathOverflow))
}

pub fn to_wad(value: u64) -> u128 {
    value as u128 * UNIT_TO_WAD
}

/// Floors a WAD value back to 9 decimals.
pub fn from_wad(value: u128) -> Result<u64> {
    u64::try_from(value / UNIT_TO_WAD).map_err(|_| error!(PredictError::MathOverflow))
}

/// floor(value * factor / WAD) for a 9-decimal `value` and WAD-scaled `factor`.
pub fn scale_by_wad(value: u64, factor: u128) -> Result<u64> {
    let product = (value as u128)
        .checked_mul(factor)
        .ok_or(PredictError::MathOverflow)?;
    u64::try_from(product / WAD).map_err(|_| error!(PredictError::MathOverflow))
}

pub fn wad_mul(a: u128, b: u128) -> Result<u128> {
    Ok(a.checked_mul(b).ok_or(PredictError::MathOverflow)? / WAD)
}

pub fn wad_div(a: u128, b: u128) -> Result<u128> {
    require!(b > 0, PredictError::DivisionByZero);
    Ok(a.checked_mul(WAD).ok_or(PredictError::MathOverflow)? / b)
}

/// e^r for r in [0, ln 2), Taylor series.
fn exp_reduced(r: u128) -> Result<u128> {
    let mut sum = WAD;
    let mut term = WAD;
    for n in 1..=MAX_SERIES_TERMS {
        term = wad_mul(term, r)? / n as u128;
        if term == 0 {
            break;
        }
        sum = sum.checked_add(term).ok_or(PredictError::MathOverflow)?;
    }
    Ok(sum)
}

/// e^(-x) at WAD scale for any non-negative `x`.
///
/// Range reduction x = k*ln2 + r gives e^(-x) = e^(-r) / 2^k with
/// e^(-r) in (0.5, 1]. Shifts at or past `MAX_EXP_SHIFT` return 0 instead of
/// dividing by an underflowing denominator.
pub fn exp_neg_wad(x: u128) -> Result<u128> {
    if x >= MAX_EXP_SHIFT {
        return Ok(0);
    }
    let k = x / LN_2_WAD;
    let r = x - k * LN_2_WAD;
    let e_r = exp_reduced(r)?;
    let inverse = wad_div(WAD, e_r)?;
    Ok(inverse >> k)
}

/// ln(x) at WAD scale for x in [1, 2].
///
/// Uses ln(x) = 2 * atanh(y), y = (x - 1) / (x + 1) <= 1/3, so each term is at
/// most a ninth of the previous one. Every truncation rounds down, so the
/// result never exceeds the true logarithm.
pub fn ln_wad(x: u128) -> Result<u128> {
    require!(x >= WAD && x <= 2 * WAD, PredictError::LogDomain);
    if x == WAD {
        return Ok(0);
    }
    let y = wad_div(x - WAD, x + WAD)?;
    let y_squared = wad_mul(y, y)?;

    let mut power = y;
    let mut sum: u128 = 0;
    for n in 0..MAX_SERIES_TERMS {
        sum = sum
            .checked_add(power / (2 * n as u128 + 1))
            .ok_or(PredictError::MathOverflow)?;
        power = wad_mul(power, y_squared)?;
        if power == 0 {
            break;
        }
    }
    sum.checked_mul(2).ok_or_else(|| error!(PredictError::MathOverflow))
}
