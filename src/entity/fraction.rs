//! Kitchen-style fraction rendering for decimal amounts

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Denominators tried in order; the first close match wins, which keeps
/// results reduced (0.5 is 1/2, never 2/4).
const DENOMINATORS: [i64; 4] = [2, 3, 4, 8];

/// Allowed distance from a whole numerator, measured after scaling by the
/// denominator. Admits 0.333 and 0.667 as thirds.
const TOLERANCE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Render an amount as `"<whole> <num>/<den> "`, with a trailing space.
///
/// Returns an empty string when there is no amount. Amounts that are not
/// close to a simple fraction fall back to their normalized decimal form.
pub fn to_fraction(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let mut out = String::new();
    if value.is_sign_negative() && !value.is_zero() {
        out.push('-');
    }

    let value = value.abs();
    let whole = value.trunc();
    let remainder = value - whole;

    if remainder.is_zero() {
        out.push_str(&whole.normalize().to_string());
    } else if let Some((num, den)) = simple_fraction(remainder) {
        if !whole.is_zero() {
            out.push_str(&whole.normalize().to_string());
            out.push(' ');
        }
        out.push_str(&format!("{}/{}", num, den));
    } else {
        out.push_str(&value.normalize().to_string());
    }

    out.push(' ');
    out
}

/// Find `num/den` for a remainder strictly between 0 and 1
fn simple_fraction(remainder: Decimal) -> Option<(i64, i64)> {
    DENOMINATORS.iter().find_map(|&den| {
        let scaled = remainder * Decimal::from(den);
        let num = scaled.round();
        if (scaled - num).abs() >= TOLERANCE {
            return None;
        }
        let num = num.to_i64()?;
        (num > 0 && num < den).then_some((num, den))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn frac(s: &str) -> String {
        to_fraction(Some(Decimal::from_str(s).unwrap()))
    }

    #[test]
    fn test_none_is_empty() {
        assert_eq!(to_fraction(None), "");
    }

    #[test]
    fn test_whole_numbers() {
        assert_eq!(frac("2"), "2 ");
        assert_eq!(frac("3.00"), "3 ");
    }

    #[test]
    fn test_common_fractions() {
        assert_eq!(frac("0.25"), "1/4 ");
        assert_eq!(frac("0.5"), "1/2 ");
        assert_eq!(frac("1.5"), "1 1/2 ");
        assert_eq!(frac("0.75"), "3/4 ");
        assert_eq!(frac("0.375"), "3/8 ");
        assert_eq!(frac("0.333"), "1/3 ");
        assert_eq!(frac("2.667"), "2 2/3 ");
    }

    #[test]
    fn test_unusual_amounts_fall_back_to_decimal() {
        assert_eq!(frac("0.15"), "0.15 ");
        assert_eq!(frac("1.10"), "1.1 ");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(frac("-1.5"), "-1 1/2 ");
    }
}
