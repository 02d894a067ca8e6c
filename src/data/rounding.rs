//! Decimal rounding for report values.
//!
//! Readings are rounded on their decimal digit string, never through an
//! intermediate binary float, so values like `100.005` land on `100.01`
//! exactly. Half rounds away from zero (reporting-style rounding, not
//! banker's rounding).

use crate::error::{AppResult, TemplogError};

/// Round a decimal numeric string to exactly two fractional digits using
/// round-half-up.
///
/// Accepts an optional sign, an optional fractional part and an optional
/// exponent — `FETC?` on the DAQ970A returns readings like
/// `+2.30010000E+01`. Anything else is a [`TemplogError::Parse`].
pub fn round_half_up_2dp(raw: &str) -> AppResult<String> {
    let s = raw.trim();
    let parse_err = || TemplogError::Parse(raw.trim().to_string());

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(idx) => {
            let exp = s[idx + 1..].parse::<i32>().map_err(|_| parse_err())?;
            (&s[..idx], exp)
        }
        None => (s, 0),
    };

    let (negative, unsigned) = match mantissa.as_bytes().first() {
        Some(b'-') => (true, &mantissa[1..]),
        Some(b'+') => (false, &mantissa[1..]),
        _ => (false, mantissa),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(parse_err());
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(parse_err());
    }

    // Magnitude as a digit vector with a decimal scale:
    // value = digits * 10^-scale.
    let mut digits: Vec<u8> = Vec::with_capacity(int_part.len() + frac_part.len());
    digits.extend(int_part.bytes().map(|b| b - b'0'));
    digits.extend(frac_part.bytes().map(|b| b - b'0'));
    let mut scale = frac_part.len() as i32 - exponent;

    // Pad up to two fractional digits, then round off everything below them.
    while scale < 2 {
        digits.push(0);
        scale += 1;
    }
    let drop = (scale - 2) as usize;
    if drop > 0 {
        if drop > digits.len() {
            let mut padded = vec![0u8; drop - digits.len()];
            padded.extend_from_slice(&digits);
            digits = padded;
        }
        let keep = digits.len() - drop;
        let round_up = digits[keep] >= 5;
        digits.truncate(keep);
        if round_up {
            increment(&mut digits);
        }
    }

    while digits.len() < 3 {
        digits.insert(0, 0);
    }
    let split = digits.len() - 2;
    let sign = if negative { "-" } else { "" };
    Ok(format!(
        "{sign}{}.{}",
        digits_to_str(&digits[..split]),
        digits_to_str(&digits[split..])
    ))
}

/// Add one to a digit vector, propagating carries leftwards.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

fn digits_to_str(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(d + b'0')).collect()
}
