//! # Monetary Amounts
//!
//! Conversion between human-entered ether decimals and integer wei.

use shared_types::{Wei, U256};

use super::errors::GatewayError;

/// Decimal places of one ether.
pub const ETHER_DECIMALS: usize = 18;

/// Parse a decimal ether amount (e.g. `"1.5"`) into wei.
///
/// # Errors
/// `InvalidAmount` if the text is not a plain non-negative decimal, has more
/// than 18 fractional digits, overflows 256 bits, or does not render back to
/// the same amount.
pub fn parse_ether(input: &str) -> Result<Wei, GatewayError> {
    let text = input.trim();
    let invalid = |why: &str| GatewayError::InvalidAmount(format!("{text:?}: {why}"));

    if text.is_empty() {
        return Err(invalid("empty"));
    }

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid("no digits"));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid("not a decimal number"));
    }
    if frac_part.len() > ETHER_DECIMALS {
        return Err(invalid("more than 18 decimal places"));
    }

    let whole = if int_part.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(int_part).map_err(|_| invalid("too large"))?
    };
    let padded = format!("{frac_part:0<width$}", width = ETHER_DECIMALS);
    let fraction = U256::from_dec_str(&padded).map_err(|_| invalid("bad fraction"))?;

    let wei = whole
        .checked_mul(U256::exp10(ETHER_DECIMALS))
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(|| invalid("too large"))?;

    if format_ether(wei) != normalize_decimal(int_part, frac_part) {
        return Err(invalid("does not round-trip"));
    }

    Ok(wei)
}

/// Render wei as an ether decimal, always with at least one fractional digit
/// (`1000000000000000000` → `"1.0"`).
pub fn format_ether(wei: Wei) -> String {
    let unit = U256::exp10(ETHER_DECIMALS);
    let whole = wei / unit;
    let fraction = wei % unit;

    let mut frac = format!("{:0>width$}", fraction.to_string(), width = ETHER_DECIMALS);
    while frac.len() > 1 && frac.ends_with('0') {
        frac.pop();
    }
    format!("{whole}.{frac}")
}

fn normalize_decimal(int_part: &str, frac_part: &str) -> String {
    let int_trimmed = int_part.trim_start_matches('0');
    let frac_trimmed = frac_part.trim_end_matches('0');
    format!(
        "{}.{}",
        if int_trimmed.is_empty() { "0" } else { int_trimmed },
        if frac_trimmed.is_empty() { "0" } else { frac_trimmed }
    )
}
