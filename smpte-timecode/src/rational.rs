//! Rational number type for exact frame rate and duration arithmetic.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A rational number represented as a numerator and denominator.
///
/// Used for the exact real-time rate of each frame rate (`30000/1001`) and for
/// matching rates reported by media containers. Equality is structural; call
/// [`Fraction::reduce`] before comparing values written in different terms, or
/// use the [`Ord`] implementation which compares by value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    /// Create a new fraction, normalizing the sign onto the numerator.
    ///
    /// # Panics
    ///
    /// Panics if denominator is zero.
    #[must_use]
    pub const fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "Denominator cannot be zero");
        if den < 0 {
            Self {
                num: -num,
                den: -den,
            }
        } else {
            Self { num, den }
        }
    }

    /// Create a fraction, returning `None` for a zero denominator.
    #[must_use]
    pub const fn checked_new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            None
        } else {
            Some(Self::new(num, den))
        }
    }

    /// Create a fraction from an integer.
    #[must_use]
    pub const fn from_int(n: i64) -> Self {
        Self { num: n, den: 1 }
    }

    /// The numerator.
    #[must_use]
    pub const fn numerator(&self) -> i64 {
        self.num
    }

    /// The denominator (always positive).
    #[must_use]
    pub const fn denominator(&self) -> i64 {
        self.den
    }

    /// Check if this fraction is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    /// Reduce the fraction to its simplest form.
    #[must_use]
    pub fn reduce(&self) -> Self {
        if self.num == 0 {
            return Self { num: 0, den: 1 };
        }
        let g = gcd(self.num.unsigned_abs(), self.den.unsigned_abs());
        Self {
            num: self.num / g as i64,
            den: self.den / g as i64,
        }
    }

    /// Convert to f64.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// The reciprocal, or `None` when the numerator is zero.
    #[must_use]
    pub fn recip(&self) -> Option<Self> {
        Self::checked_new(self.den, self.num)
    }

    /// Multiply by an integer.
    #[must_use]
    pub fn mul_int(&self, n: i64) -> Self {
        Self::new(self.num.saturating_mul(n), self.den).reduce()
    }

    /// Divide by a non-zero integer.
    #[must_use]
    pub fn div_int(&self, n: i64) -> Option<Self> {
        Self::checked_new(self.num, self.den.checked_mul(n)?).map(|f| f.reduce())
    }
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fraction({}/{})", self.num, self.den)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.num as i128 * other.den as i128;
        let rhs = other.num as i128 * self.den as i128;
        lhs.cmp(&rhs)
    }
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Self {
        Self::from_int(n)
    }
}

impl From<(i32, i32)> for Fraction {
    fn from((num, den): (i32, i32)) -> Self {
        Self::new(num as i64, den as i64)
    }
}

impl From<(i64, i64)> for Fraction {
    fn from((num, den): (i64, i64)) -> Self {
        Self::new(num, den)
    }
}

/// Greatest common divisor using the Euclidean algorithm.
pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Greatest common divisor of two wide integers.
pub(crate) fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fraction_negative_den() {
        let r = Fraction::new(1, -2);
        assert_eq!(r.numerator(), -1);
        assert_eq!(r.denominator(), 2);
    }

    #[test]
    fn test_fraction_reduce() {
        let r = Fraction::new(60000, 2002).reduce();
        assert_eq!(r, Fraction::new(30000, 1001));
    }

    #[test]
    fn test_fraction_checked() {
        assert!(Fraction::checked_new(1, 0).is_none());
        assert!(Fraction::new(0, 5).recip().is_none());
        assert_eq!(Fraction::new(1001, 30000).recip(), Some(Fraction::new(30000, 1001)));
        assert_eq!(
            Fraction::new(60000, 1001).div_int(2),
            Some(Fraction::new(30000, 1001))
        );
    }

    #[test]
    fn test_fraction_ord() {
        assert!(Fraction::new(30000, 1001) < Fraction::from_int(30));
        assert_eq!(Fraction::new(2, 4).cmp(&Fraction::new(1, 2)), Ordering::Equal);
    }

    #[test]
    fn test_fraction_display() {
        assert_eq!(Fraction::new(24000, 1001).to_string(), "24000/1001");
        assert_eq!(Fraction::from_int(25).to_string(), "25");
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(30000, 1001), 1);
        assert_eq!(gcd_u128(86_400, 3_600), 3_600);
    }
}
