//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic operations and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// The ledger stores magnitudes only, but intermediate results such as net
/// profit can be negative, so the type stays signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use ledger_report::models::Money;
    /// let amount = Money::from_cents(16355765); // 163,557.65
    /// assert_eq!(amount.units(), 163557);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// The amount as a floating point number of currency units
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// This amount as a percentage of `base`, or 0 when `base` is zero
    pub fn percent_of(&self, base: Money) -> f64 {
        if base.is_zero() {
            0.0
        } else {
            self.0 as f64 / base.0 as f64 * 100.0
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "1050", "10.5", "-10.50", "1,234.56", "KES 1,234", "$12" and
    /// accounting negatives such as "(10.50)". The only prefix allowed is a
    /// currency symbol or a three-letter upper-case currency code followed by
    /// whitespace. Exponents ("1.5E+04"), stray letters, slashes and inner
    /// dashes are rejected. Digits past the second decimal place are rounded
    /// half away from zero, which absorbs float noise from spreadsheet
    /// exports like "163557.65000000001".
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (in_parens, body) = match trimmed.strip_prefix('(') {
            Some(rest) => (true, rest.strip_suffix(')').ok_or_else(invalid)?.trim()),
            None => (false, trimmed),
        };
        let (sign_before, body) = strip_sign(body);
        let body = strip_currency(body);
        let (sign_after, body) = strip_sign(body);

        // One way of saying "negative", never two
        let signs = [in_parens, sign_before, sign_after]
            .iter()
            .filter(|&&set| set)
            .count();
        if signs > 1 {
            return Err(invalid());
        }

        let (whole, frac) = match body.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (body, None),
        };
        if !is_grouped_digits(whole) {
            return Err(invalid());
        }
        if whole.is_empty() && frac.map_or(true, str::is_empty) {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.replace(',', "").parse().map_err(|_| invalid())?
        };
        let digits: Vec<i64> = frac
            .unwrap_or("")
            .chars()
            .map(|c| c.to_digit(10).map(i64::from).ok_or_else(invalid))
            .collect::<Result<_, _>>()?;
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|d| *d >= 5);

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(invalid)?;

        Ok(Self(if signs == 1 { -cents } else { cents }))
    }

    /// Format with thousands separators and two decimals, e.g. "22,619,122.00"
    pub fn format_grouped(&self) -> String {
        let digits = self.units().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, grouped, self.cents_part())
    }

    /// Format with a currency symbol, e.g. "KES 1,028,770.00"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}", symbol, self.abs().format_grouped())
        } else {
            format!("{}{}", symbol, self.format_grouped())
        }
    }
}

fn strip_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, s),
    }
}

/// Drop a leading "$", "KES " or similar
fn strip_currency(s: &str) -> &str {
    if let Some(rest) = s.strip_prefix(|c: char| matches!(c, '$' | '€' | '£')) {
        return rest.trim_start();
    }
    match s.split_once(char::is_whitespace) {
        Some((code, rest)) if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) => {
            rest.trim_start()
        }
        _ => s,
    }
}

/// Digits with optional "," thousands separators between them
fn is_grouped_digits(s: &str) -> bool {
    s.is_empty()
        || s.split(',')
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()))
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad through the formatter so table alignment works
        f.pad(&self.format_grouped())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Empty money value"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display_grouped() {
        assert_eq!(Money::from_units(22_619_122).to_string(), "22,619,122.00");
        assert_eq!(Money::from_cents(16_355_765).to_string(), "163,557.65");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-100_050).to_string(), "-1,000.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(
            Money::from_units(1_028_770).format_with_symbol("KES "),
            "KES 1,028,770.00"
        );
        assert_eq!(
            Money::from_cents(-2_500).format_with_symbol("KES "),
            "-KES 25.00"
        );
    }

    #[test]
    fn test_gross_profit_arithmetic() {
        let sales = Money::from_units(22_619_122);
        let cogs = Money::from_units(17_244_564);

        assert_eq!((sales - cogs).units(), 5_374_558);
        assert_eq!((cogs - sales).cents(), -537_455_800);
        assert_eq!((-cogs).abs(), cogs);

        let mut running = Money::zero();
        running += sales;
        running -= cogs;
        assert_eq!(running, sales - cogs);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("1,234.56").unwrap().cents(), 123_456);
        assert_eq!(Money::parse("KES 2,000").unwrap().cents(), 200_000);
        assert_eq!(Money::parse("(50.00)").unwrap().cents(), -5000);
    }

    #[test]
    fn test_parse_rounds_float_noise() {
        assert_eq!(
            Money::parse("163557.65000000001").unwrap().cents(),
            16_355_765
        );
        assert_eq!(Money::parse("12.299999999").unwrap().cents(), 1230);
        assert_eq!(Money::parse("12.344").unwrap().cents(), 1234);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        assert!(Money::parse("n/a").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("12-34").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("(-5)").is_err());
        assert!(Money::parse("1,,000").is_err());
    }

    #[test]
    fn test_parse_rejects_text_with_digits() {
        // reference numbers and dates found in amount columns
        for cell in ["Ref 12", "TXN-00045", "12/03", "No. 7", "12abc", "KES"] {
            assert!(Money::parse(cell).is_err(), "{} should not parse", cell);
        }
    }

    #[test]
    fn test_parse_rejects_exponents() {
        assert!(Money::parse("2.2619122E7").is_err());
        assert!(Money::parse("1.5E+04").is_err());
        assert!(Money::parse("3e2").is_err());
    }

    #[test]
    fn test_parse_currency_prefixes() {
        assert_eq!(Money::parse("$12").unwrap().cents(), 1200);
        assert_eq!(Money::parse("KES -1,234.50").unwrap().cents(), -123_450);
        assert_eq!(Money::parse("-KES 40").unwrap().cents(), -4000);
        assert_eq!(Money::parse("(KES 2,000)").unwrap().cents(), -200_000);
        assert!(Money::parse("Kes 12").is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let near_max = Money::from_cents(i64::MAX - 10);
        let total: Money = [near_max, near_max, Money::from_units(5)].into_iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));

        let mut debt = Money::from_cents(i64::MIN + 1);
        debt -= Money::from_units(1);
        assert_eq!(debt, Money::from_cents(i64::MIN));
        assert_eq!(-debt, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_percent_of() {
        let net = Money::from_cents(338_907_535);
        let sales = Money::from_units(22_619_122);
        assert!((net.percent_of(sales) - 14.983).abs() < 0.001);
        assert_eq!(net.percent_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum_operating_expenses() {
        let lines = [
            Money::from_units(601_155),
            Money::from_units(192_000),
            Money::from_units(1_028_770),
            Money::from_cents(16_355_765),
        ];
        let by_ref: Money = lines.iter().sum();
        let owned: Money = lines.into_iter().sum();
        assert_eq!(owned.cents(), 198_548_265);
        assert_eq!(by_ref, owned);
    }

    #[test]
    fn test_serializes_as_cents() {
        let fee = Money::from_cents(16_355_765);
        assert_eq!(serde_json::to_string(&fee).unwrap(), "16355765");

        let back: Money = serde_json::from_str("16355765").unwrap();
        assert_eq!(back, fee);
    }
}
