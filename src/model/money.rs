//! # Money
//!
//! Fixed-point amounts stored as integer minor units (cents). Floats never
//! touch money: amounts enter the system either as cents or as decimal text
//! (`"10.50"`), and time-based charges are prorated with integer math.
//!
//! `+` and `sum` saturate at the `i64` bounds instead of panicking. Code that
//! must refuse an unrepresentable total uses [`Money::checked_add`].
//!
//! ```rust
//! use billiard_ledger::model::Money;
//!
//! let beer: Money = "5.00".parse().unwrap();
//! let water = Money::from_minor(150);
//! assert_eq!((beer + water).to_string(), "6.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Minor units per major unit.
const SCALE: i64 = 100;

/// A monetary value in minor currency units.
///
/// Serialized as decimal text so configuration files and UI payloads read
/// `"12.50"` rather than `1250`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `None` when the sum does not fit in minor units.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(value) => Some(Money(value)),
            None => None,
        }
    }

    /// Scales the amount by `numerator / denominator`, rounding half away from zero.
    ///
    /// Used to charge a per-unit tariff for a partial unit of time:
    /// `tariff.prorate(elapsed_secs, unit_secs)`.
    ///
    /// ```rust
    /// use billiard_ledger::model::Money;
    ///
    /// let per_hour = Money::from_minor(1000);
    /// assert_eq!(per_hour.prorate(3600, 3600), Money::from_minor(1000));
    /// assert_eq!(per_hour.prorate(90, 3600), Money::from_minor(25));
    /// // 1000 * 1 / 3600 = 0.277.. rounds to 0
    /// assert_eq!(per_hour.prorate(1, 3600), Money::zero());
    /// ```
    pub fn prorate(&self, numerator: i64, denominator: i64) -> Money {
        if denominator <= 0 {
            return Money::zero();
        }
        // i128 so long sessions at large tariffs cannot overflow the product
        let product = self.0 as i128 * numerator as i128;
        let den = denominator as i128;
        let rounded = if product >= 0 {
            (product * 2 + den) / (2 * den)
        } else {
            -((-product * 2 + den) / (2 * den))
        };
        Money(rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / SCALE as u64,
            abs % SCALE as u64
        )
    }
}

/// Errors produced when parsing decimal text into [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount '{0}'")]
    Invalid(String),
    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),
    #[error("amount '{0}' is out of range")]
    Overflow(String),
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (major, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if major.is_empty() || !all_digits(major) || !all_digits(fraction) {
            return Err(MoneyParseError::Invalid(text.to_string()));
        }
        if unsigned.ends_with('.') {
            return Err(MoneyParseError::Invalid(text.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(text.to_string()));
        }

        let overflow = || MoneyParseError::Overflow(text.to_string());
        let major: i64 = major.parse().map_err(|_| overflow())?;
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| overflow())? * 10,
            _ => fraction.parse().map_err(|_| overflow())?,
        };
        let value = major
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -value } else { value }))
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_text() {
        assert_eq!("10".parse::<Money>().unwrap(), Money::from_minor(1000));
        assert_eq!("10.5".parse::<Money>().unwrap(), Money::from_minor(1050));
        assert_eq!("10.05".parse::<Money>().unwrap(), Money::from_minor(1005));
        assert_eq!(" 0.99 ".parse::<Money>().unwrap(), Money::from_minor(99));
        assert_eq!("-1.25".parse::<Money>().unwrap(), Money::from_minor(-125));
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!("".parse::<Money>(), Err(MoneyParseError::Empty));
        assert!(matches!("1.234".parse::<Money>(), Err(MoneyParseError::TooPrecise(_))));
        assert!(matches!("abc".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(".5".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert!(matches!("5.".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert!(matches!("1e3".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(
            "99999999999999999999".parse::<Money>(),
            Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_minor(1650).to_string(), "16.50");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::from_minor(-50).to_string(), "-0.50");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
    }

    #[test]
    fn prorate_rounds_half_away_from_zero() {
        let tariff = Money::from_minor(1000);
        // 30 minutes of an hourly tariff
        assert_eq!(tariff.prorate(1800, 3600), Money::from_minor(500));
        // 1000 * 18 / 3600 = 5.0
        assert_eq!(tariff.prorate(18, 3600), Money::from_minor(5));
        // 1 * 1 / 2 = 0.5 rounds up
        assert_eq!(Money::from_minor(1).prorate(1, 2), Money::from_minor(1));
        assert_eq!(Money::from_minor(-1).prorate(1, 2), Money::from_minor(-1));
        assert_eq!(tariff.prorate(10, 0), Money::zero());
    }

    #[test]
    fn sums_line_items() {
        let prices = [Money::from_minor(500), Money::from_minor(150)];
        assert_eq!(prices.iter().sum::<Money>(), Money::from_minor(650));
        assert_eq!(Vec::<Money>::new().into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn addition_never_wraps() {
        let near_max = Money::from_minor(i64::MAX - 1);
        assert_eq!(near_max.checked_add(Money::from_minor(1)), Some(Money::from_minor(i64::MAX)));
        assert_eq!(near_max.checked_add(Money::from_minor(2)), None);

        assert_eq!(near_max + near_max, Money::from_minor(i64::MAX));
        assert_eq!([near_max, near_max].iter().sum::<Money>(), Money::from_minor(i64::MAX));

        let mut total = Money::from_minor(i64::MIN + 1);
        total += Money::from_minor(-5);
        assert_eq!(total, Money::from_minor(i64::MIN));
    }

    #[test]
    fn serializes_as_decimal_string() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            price: Money,
        }

        let text = toml::to_string(&Wrapper {
            price: Money::from_minor(1250),
        })
        .unwrap();
        assert_eq!(text.trim(), r#"price = "12.50""#);

        let back: Wrapper = toml::from_str(r#"price = "3.5""#).unwrap();
        assert_eq!(back.price, Money::from_minor(350));
        assert!(toml::from_str::<Wrapper>(r#"price = "3.555""#).is_err());
    }
}
