//! Unbounded non-negative integer scores.

use std::cmp::Ordering;
use std::fmt;

/// A non-negative integer of any size, kept as canonical decimal digits.
///
/// Scores come straight from message text, so a digit run of any length
/// must round-trip and sum exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Score {
    /// Decimal digits, most significant first, no leading zeros ("0" for zero).
    digits: String,
}

impl Score {
    /// The zero score.
    pub fn zero() -> Self {
        Self {
            digits: "0".to_owned(),
        }
    }

    /// Parse a run of ASCII digits. Leading zeros are dropped.
    ///
    /// Returns `None` for an empty string or any non-digit character.
    pub fn from_digits(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = raw.trim_start_matches('0');
        if trimmed.is_empty() {
            return Some(Self::zero());
        }
        Some(Self {
            digits: trimmed.to_owned(),
        })
    }

    /// Whether this score is zero.
    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }

    /// The score as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.digits.parse().ok()
    }

    /// Exact sum of two scores.
    pub fn plus(&self, rhs: &Self) -> Self {
        let mut left = self.digits.bytes().rev();
        let mut right = rhs.digits.bytes().rev();
        let mut reversed: Vec<char> =
            Vec::with_capacity(self.digits.len().max(rhs.digits.len()).saturating_add(1));
        let mut carry = 0u8;

        loop {
            let (l, r) = (left.next(), right.next());
            if l.is_none() && r.is_none() {
                break;
            }
            let sum = digit_value(l)
                .saturating_add(digit_value(r))
                .saturating_add(carry);
            let (digit, next_carry) = if sum >= 10 {
                (sum.saturating_sub(10), 1)
            } else {
                (sum, 0)
            };
            reversed.push(char::from(b'0'.saturating_add(digit)));
            carry = next_carry;
        }
        if carry > 0 {
            reversed.push('1');
        }

        Self {
            digits: reversed.into_iter().rev().collect(),
        }
    }

    /// Add `rhs` to this score in place.
    pub fn accumulate(&mut self, rhs: &Self) {
        *self = self.plus(rhs);
    }
}

fn digit_value(byte: Option<u8>) -> u8 {
    byte.map_or(0, |b| b.saturating_sub(b'0'))
}

impl Default for Score {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<u64> for Score {
    fn from(value: u64) -> Self {
        Self {
            digits: value.to_string(),
        }
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}
