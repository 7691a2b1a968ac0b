use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Neg};
use std::str::FromStr;

/// internal precision kept for intermediate results (earnings, rates applied)
const INTERNAL_SCALE: u32 = 8;

/// currency scale for user-entered amounts
pub const CURRENCY_SCALE: u32 = 2;

/// money type; user amounts carry 2 places, derived amounts keep 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(INTERNAL_SCALE)))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents)
    pub fn from_minor(amount: i64) -> Self {
        Money(Decimal::new(amount, CURRENCY_SCALE))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// round to currency scale
    pub fn to_currency(&self) -> Self {
        self.round_dp(CURRENCY_SCALE)
    }

    /// true when the amount needs no more than two decimal places
    pub fn is_currency_scale(&self) -> bool {
        self.0.round_dp(CURRENCY_SCALE) == self.0
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// `None` when the sum leaves the decimal range
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0
            .checked_add(other.0)
            .map(|d| Money(d.round_dp(INTERNAL_SCALE)))
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0
            .checked_sub(other.0)
            .map(|d| Money(d.round_dp(INTERNAL_SCALE)))
    }

    /// simple interest on this amount for a number of days at a daily rate
    ///
    /// `None` when the product leaves the decimal range
    pub fn accrue_simple(&self, daily_rate: Rate, days: u32) -> Option<Self> {
        let interest = self
            .0
            .checked_mul(daily_rate.as_decimal())?
            .checked_mul(Decimal::from(days))?;
        Some(Money(interest.round_dp(INTERNAL_SCALE)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(INTERNAL_SCALE))
    }
}

/// rate type for interest rates, percentages, and ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from whole percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// create from fractional percentage (e.g., 1.5 for 1.5%)
    pub fn from_percentage_decimal(p: Decimal) -> Self {
        Rate(p / Decimal::from(100))
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// spread this rate evenly over a number of days
    pub fn per_day(&self, days_in_period: u32) -> Rate {
        Rate(self.0 / Decimal::from(days_in_period))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}
