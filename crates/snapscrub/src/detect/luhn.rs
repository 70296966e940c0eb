//! Luhn checksum validation for card-number candidates.
//!
//! The Luhn mod-10 check is the sole admission gate for the credit-card
//! category: a candidate that matches a card-shaped pattern but fails the
//! checksum is silently dropped.

/// Accepted payment-card number lengths.
const MIN_DIGITS: usize = 13;
const MAX_DIGITS: usize = 19;

/// Validate a digit-only string with the Luhn mod-10 algorithm.
///
/// Returns `false` for inputs containing non-digits or whose length falls
/// outside the 13..=19 range used by payment card numbers.
#[must_use]
pub fn luhn_valid(digits: &str) -> bool {
    let digits: Option<Vec<u32>> = digits.chars().map(|c| c.to_digit(10)).collect();
    let Some(digits) = digits else {
        return false;
    };
    if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
        return false;
    }

    let mut sum = 0u32;
    let mut double = false;
    for &digit in digits.iter().rev() {
        let mut d = digit;
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}
