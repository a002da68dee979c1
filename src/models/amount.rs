//! Amount type for representing exact quantities
//!
//! Internally stores values as arbitrary-precision rationals so that repeated
//! proportional division never accumulates floating-point error. Rounding is
//! only ever applied when a value is formatted for display.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

/// Largest accepted decimal exponent in a literal such as `1e3`
pub const MAX_EXPONENT: i64 = 4096;

/// Largest accepted display precision, in decimal places
pub const MAX_PRECISION: u32 = 1024;

/// An exact rational amount
///
/// Values are always kept in lowest terms by `BigRational`, so two amounts
/// compare equal exactly when they denote the same number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigRational);

impl Amount {
    /// Create a zero amount
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// Create an amount from a whole number
    ///
    /// # Examples
    /// ```
    /// use fee_cli::models::Amount;
    /// let amount = Amount::from_integer(10);
    /// assert_eq!(amount.format(2), "10.00");
    /// ```
    pub fn from_integer(value: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }

    /// Create an amount from a numerator and a non-zero denominator
    ///
    /// Returns `None` when the denominator is zero.
    pub fn from_fraction(numer: i64, denom: i64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        Some(Self(BigRational::new(BigInt::from(numer), BigInt::from(denom))))
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Divide by another amount, or `None` if the divisor is zero
    pub fn checked_div(&self, divisor: &Amount) -> Option<Self> {
        if divisor.is_zero() {
            None
        } else {
            Some(Self(&self.0 / &divisor.0))
        }
    }

    /// Round to `precision` decimal places, halfway cases away from zero
    pub fn round_to(&self, precision: u32) -> Self {
        let scale = BigRational::from_integer(pow10(precision));
        Self((&self.0 * &scale).round() / scale)
    }

    /// Check if the amount has an exact representation with `precision` decimals
    pub fn is_representable(&self, precision: u32) -> bool {
        (&self.0 * BigRational::from_integer(pow10(precision))).is_integer()
    }

    /// Format with exactly `precision` decimal places
    ///
    /// A value that rounds to zero is printed without a sign.
    pub fn format(&self, precision: u32) -> String {
        let scaled = (&self.0 * BigRational::from_integer(pow10(precision)))
            .round()
            .to_integer();
        let sign = if scaled.is_negative() { "-" } else { "" };
        let digits = scaled.abs().to_string();

        if precision == 0 {
            return format!("{}{}", sign, digits);
        }

        let precision = precision as usize;
        let padding = (precision + 1).saturating_sub(digits.len());
        let padded = format!("{}{}", "0".repeat(padding), digits);
        let (whole, frac) = padded.split_at(padded.len() - precision);
        format!("{}{}.{}", sign, whole, frac)
    }

    /// Parse an amount from a literal
    ///
    /// Accepts formats: "10", "-2", "+3.5", ".25", "4.", "1e3", "2.5E-2", "1/3"
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountParseError::Empty);
        }

        if let Some((numer, denom)) = s.split_once('/') {
            let numer = parse_decimal(numer.trim())?;
            let denom = parse_decimal(denom.trim())?;
            if denom.is_zero() {
                return Err(AmountParseError::ZeroDenominator);
            }
            return Ok(Self(numer / denom));
        }

        parse_decimal(s).map(Self)
    }
}

/// 10 raised to `exp`
fn pow10(exp: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exp as usize)
}

/// Parse a signed decimal literal with an optional exponent
fn parse_decimal(s: &str) -> Result<BigRational, AmountParseError> {
    let invalid = || AmountParseError::InvalidFormat(s.to_string());

    let (negative, body) = if let Some(stripped) = s.strip_prefix('-') {
        (true, stripped)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    };

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(idx) => {
            let exp: i64 = body[idx + 1..].parse().map_err(|_| invalid())?;
            if exp.abs() > MAX_EXPONENT {
                return Err(AmountParseError::ExponentOutOfRange(exp));
            }
            (&body[..idx], exp)
        }
        None => (body, 0),
    };

    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let digits = format!("{}{}", whole, frac);
    let numer = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
    let scale = exponent - frac.len() as i64;

    let value = if scale >= 0 {
        BigRational::from_integer(numer * num_traits::pow(BigInt::from(10u32), scale as usize))
    } else {
        BigRational::new(
            numer,
            num_traits::pow(BigInt::from(10u32), scale.unsigned_abs() as usize),
        )
    };

    Ok(if negative { -value } else { value })
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Displays the exact value, e.g. `7`, `-3/2`
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.denom().is_one() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl<'a> Add<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn add(self, other: &'a Amount) -> Amount {
        Amount(&self.0 + &other.0)
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, other: &Amount) {
        self.0 += &other.0;
    }
}

impl<'a> Sub<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn sub(self, other: &'a Amount) -> Amount {
        Amount(&self.0 - &other.0)
    }
}

impl<'a> Mul<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn mul(self, other: &'a Amount) -> Amount {
        Amount(&self.0 * &other.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |mut acc, a| {
            acc += a;
            acc
        })
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    InvalidFormat(String),
    ZeroDenominator,
    ExponentOutOfRange(i64),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "empty amount"),
            AmountParseError::InvalidFormat(s) => write!(f, "invalid number format: {}", s),
            AmountParseError::ZeroDenominator => write!(f, "denominator is zero"),
            AmountParseError::ExponentOutOfRange(exp) => {
                write!(f, "exponent {} is out of range", exp)
            }
        }
    }
}

impl std::error::Error for AmountParseError {}
