//! exact base-unit amount conversion
//!
//! amounts cross the collaborator boundary as base-unit integers
//! (wei-style, 10^18 per whole token). parsing is exact for any decimal
//! string with at most 18 fractional digits; anything finer is rejected
//! rather than rounded.

use crate::error::{ClientError, Result};

/// fixed decimal scaling for ETH-denominated amounts
pub const BASE_UNIT_DECIMALS: u32 = 18;

const BASE_UNIT_SCALE: u128 = 10u128.pow(BASE_UNIT_DECIMALS);

/// parse a decimal token amount into base units, scaling by exactly 10^18
///
/// accepts `"1"`, `"0.5"`, `"12.000000000000000001"`; rejects empty
/// input, signs, more than 18 fractional digits, and values that
/// overflow u128. zero parses fine; zero-value transactions are
/// rejected by the rollup client, not here.
pub fn parse_base_units(input: &str) -> Result<u128> {
    let invalid = |reason: &str| ClientError::InvalidAmount(format!("{reason}: {input:?}"));

    if input.is_empty() {
        return Err(invalid("empty amount"));
    }

    let (whole, frac) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("not a decimal number"));
    }
    if frac.len() > BASE_UNIT_DECIMALS as usize {
        return Err(invalid("more than 18 fractional digits"));
    }

    let whole_units: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("whole part overflows"))?
    };

    // right-pad the fraction to 18 digits: "5" -> 500_000_000_000_000_000
    let mut frac_units: u128 = 0;
    if !frac.is_empty() {
        frac_units = frac.parse().map_err(|_| invalid("fraction overflows"))?;
        frac_units *= 10u128.pow(BASE_UNIT_DECIMALS - frac.len() as u32);
    }

    whole_units
        .checked_mul(BASE_UNIT_SCALE)
        .and_then(|scaled| scaled.checked_add(frac_units))
        .ok_or_else(|| invalid("amount overflows u128"))
}

/// format base units as a decimal token amount, trimming trailing zeros
pub fn format_base_units(units: u128) -> String {
    let whole = units / BASE_UNIT_SCALE;
    let frac = units % BASE_UNIT_SCALE;
    if frac == 0 {
        return whole.to_string();
    }
    let padded = format!("{frac:0>width$}", width = BASE_UNIT_DECIMALS as usize);
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}
