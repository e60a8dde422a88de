//! Range-checked phone numbers with a lazily cached hash.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use thiserror::Error;
use vc_core::{Contract, CopyMode, Duplicate, HashBuilder};

/// Rejected phone number component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {value} is outside 0..={max}")]
pub struct PhoneNumberError {
    /// Component name.
    pub field: &'static str,
    /// Rejected value.
    pub value: i32,
    /// Largest accepted value.
    pub max: u16,
}

fn range_check(value: i32, max: u16, field: &'static str) -> Result<u16, PhoneNumberError> {
    u16::try_from(value)
        .ok()
        .filter(|checked| *checked <= max)
        .ok_or(PhoneNumberError { field, value, max })
}

/// North American style phone number.
#[derive(Debug)]
pub struct PhoneNumber {
    area_code: u16,
    prefix: u16,
    line_num: u16,
    hash: OnceLock<u64>,
}

impl PhoneNumber {
    /// Validates each component and builds the number.
    pub fn new(area_code: i32, prefix: i32, line_num: i32) -> Result<Self, PhoneNumberError> {
        Ok(Self {
            area_code: range_check(area_code, 999, "area code")?,
            prefix: range_check(prefix, 999, "prefix")?,
            line_num: range_check(line_num, 9999, "line num")?,
            hash: OnceLock::new(),
        })
    }

    /// Area code component.
    pub fn area_code(&self) -> u16 {
        self.area_code
    }

    /// Prefix component.
    pub fn prefix(&self) -> u16 {
        self.prefix
    }

    /// Line number component.
    pub fn line_num(&self) -> u16 {
        self.line_num
    }

    /// Hash over every component, computed on first use and cached.
    pub fn hash_code(&self) -> u64 {
        *self.hash.get_or_init(|| {
            HashBuilder::new()
                .field(&self.area_code)
                .field(&self.prefix)
                .field(&self.line_num)
                .finish()
        })
    }

    /// Returns whether [`PhoneNumber::hash_code`] has been computed already.
    pub fn hash_cached(&self) -> bool {
        self.hash.get().is_some()
    }

    /// Contract using the cached hash and area code, prefix, line ordering.
    pub fn contract() -> Contract<PhoneNumber> {
        Contract::derived_ordered("phone-number")
    }
}

impl Clone for PhoneNumber {
    fn clone(&self) -> Self {
        Self {
            area_code: self.area_code,
            prefix: self.prefix,
            line_num: self.line_num,
            hash: OnceLock::new(),
        }
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.line_num == other.line_num
            && self.prefix == other.prefix
            && self.area_code == other.area_code
    }
}

impl Eq for PhoneNumber {}

impl Hash for PhoneNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.area_code
            .cmp(&other.area_code)
            .then(self.prefix.cmp(&other.prefix))
            .then(self.line_num.cmp(&other.line_num))
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:03}) {:03}-{:04}",
            self.area_code, self.prefix, self.line_num
        )
    }
}

impl Duplicate for PhoneNumber {
    fn duplicate(&self, _mode: CopyMode) -> Self {
        self.clone()
    }
}
