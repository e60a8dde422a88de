//! Scaled decimals: equal magnitude does not imply equal value.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use vc_core::{Contract, CopyMode, Duplicate};

/// Largest scale accepted by [`Decimal`].
pub const MAX_SCALE: u32 = 18;

/// Failure to parse a [`Decimal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    /// Input was empty or contained a non-digit.
    #[error("invalid decimal literal `{0}`")]
    Invalid(String),
    /// Too many fractional digits.
    #[error("scale {0} exceeds the maximum of {max}", max = MAX_SCALE)]
    ScaleTooLarge(u32),
    /// Unscaled value does not fit in 64 bits.
    #[error("decimal literal `{0}` overflows")]
    Overflow(String),
}

/// Decimal number stored as `unscaled * 10^-scale`.
///
/// Equality and hashing are structural, so `1.0` and `1.00` differ. Ordering
/// is numeric, so they compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    unscaled: i64,
    scale: u32,
}

impl Decimal {
    /// Builds a decimal from its unscaled value and scale.
    pub fn new(unscaled: i64, scale: u32) -> Result<Self, DecimalError> {
        if scale > MAX_SCALE {
            return Err(DecimalError::ScaleTooLarge(scale));
        }
        Ok(Self { unscaled, scale })
    }

    /// Unscaled integer value.
    pub fn unscaled(&self) -> i64 {
        self.unscaled
    }

    /// Number of fractional digits.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Numeric comparison, independent of scale.
    pub fn numeric_cmp(&self, other: &Decimal) -> Ordering {
        let scale = self.scale.max(other.scale);
        let lhs = i128::from(self.unscaled) * 10i128.pow(scale - self.scale);
        let rhs = i128::from(other.unscaled) * 10i128.pow(scale - other.scale);
        lhs.cmp(&rhs)
    }

    /// Structural equality and hash with numeric ordering.
    pub fn contract() -> Contract<Decimal> {
        Contract::derived("decimal").with_order(Decimal::numeric_cmp)
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let invalid = || DecimalError::Invalid(literal.to_string());
        let (negative, body) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() || !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let scale = u32::try_from(fraction.len()).map_err(|_| invalid())?;
        if scale > MAX_SCALE {
            return Err(DecimalError::ScaleTooLarge(scale));
        }
        let digits = format!("{whole}{fraction}");
        let magnitude: i64 = digits
            .parse()
            .map_err(|_| DecimalError::Overflow(literal.to_string()))?;
        let unscaled = if negative { -magnitude } else { magnitude };
        Decimal::new(unscaled, scale)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let digits = self.unscaled.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (whole, fraction) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{whole}.{fraction}")
    }
}

impl Duplicate for Decimal {
    fn duplicate(&self, _mode: CopyMode) -> Self {
        *self
    }
}
