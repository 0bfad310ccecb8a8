//! Integer money amounts, user-input parsing, and grouped display formatting.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Largest amount accepted from user input, in minor units.
pub const MAX_AMOUNT: Amount = Amount(100_000_000);

/// Default thousands separator used for parsing and display.
pub const DEFAULT_GROUPING_SEPARATOR: char = ',';

/// Signed amount of money in minor currency units.
///
/// Balances may go negative; expense totals and custom amounts never do.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Sum of two amounts, or `None` on `i64` overflow.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Integer division truncating toward zero. The remainder is dropped.
    ///
    /// Returns `None` when `parts` is zero.
    pub fn split_evenly(self, parts: usize) -> Option<Amount> {
        if parts == 0 {
            return None;
        }
        i64::try_from(parts).ok().map(|n| Amount(self.0 / n))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        self.0 -= rhs.0;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_with_grouping(*self))
    }
}

/// Locale-dependent formatting preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            grouping_separator: DEFAULT_GROUPING_SEPARATOR,
        }
    }
}

/// Parses user text such as `"12,500"` into an amount.
///
/// Grouping separators are stripped. Empty, signed, non-numeric, or
/// overflowing input yields zero instead of an error.
pub fn parse_amount(text: &str) -> Amount {
    parse_amount_with(&LocaleConfig::default(), text)
}

pub fn parse_amount_with(locale: &LocaleConfig, text: &str) -> Amount {
    let digits: String = text
        .chars()
        .filter(|ch| *ch != locale.grouping_separator)
        .collect();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Amount::ZERO;
    }
    digits.parse::<i64>().map(Amount).unwrap_or(Amount::ZERO)
}

/// Returns the amount unchanged when it is within `max`, `None` otherwise.
pub fn clamp_to_max(amount: Amount, max: Amount) -> Option<Amount> {
    (amount <= max).then_some(amount)
}

/// Renders an amount with `,` thousands separators, e.g. `-6,000`.
pub fn format_with_grouping(amount: Amount) -> String {
    format_grouped(&LocaleConfig::default(), amount)
}

pub fn format_grouped(locale: &LocaleConfig, amount: Amount) -> String {
    let digits = amount.0.unsigned_abs().to_string();
    let grouped = group_digits(&digits, locale.grouping_separator);
    if amount.0 < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
