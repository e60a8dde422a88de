//! Case-insensitive text and the one-way interoperability trap.

use vc_core::{stable_hash, Contract, HashBuilder, Operand};

/// A string that is either compared exactly or with case folded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Text {
    /// Compared byte for byte.
    Plain(String),
    /// Compared ignoring ASCII case.
    Folded(String),
}

impl Text {
    /// Creates exact text.
    pub fn plain(text: impl Into<String>) -> Self {
        Text::Plain(text.into())
    }

    /// Creates case-insensitive text.
    pub fn folded(text: impl Into<String>) -> Self {
        Text::Folded(text.into())
    }

    /// Returns the raw characters.
    pub fn as_str(&self) -> &str {
        match self {
            Text::Plain(text) | Text::Folded(text) => text,
        }
    }

    fn hash_key(&self) -> u64 {
        match self {
            Text::Plain(text) => HashBuilder::new().field("plain").field(text).finish(),
            Text::Folded(text) => HashBuilder::new()
                .field("folded")
                .field(&text.to_ascii_lowercase())
                .finish(),
        }
    }

    /// Folded text also accepts plain text ignoring case, but plain text
    /// only accepts plain text. Breaks symmetry.
    pub fn one_way_contract() -> Contract<Text> {
        Contract::new(
            "text-one-way",
            |lhs: &Text, rhs: Operand<'_, Text>| match (lhs, rhs.value()) {
                (_, None) => false,
                (Text::Folded(a), Some(Text::Folded(b) | Text::Plain(b))) => {
                    a.eq_ignore_ascii_case(b)
                }
                (Text::Plain(a), Some(Text::Plain(b))) => a == b,
                (Text::Plain(_), Some(Text::Folded(_))) => false,
            },
            |text: &Text| stable_hash(&text.as_str().to_ascii_lowercase()),
        )
    }

    /// Variants never compare equal to each other; folded text ignores case
    /// only against folded text.
    pub fn tagged_contract() -> Contract<Text> {
        Contract::new(
            "text-tagged",
            |lhs: &Text, rhs: Operand<'_, Text>| match (lhs, rhs.value()) {
                (Text::Folded(a), Some(Text::Folded(b))) => a.eq_ignore_ascii_case(b),
                (Text::Plain(a), Some(Text::Plain(b))) => a == b,
                _ => false,
            },
            Text::hash_key,
        )
    }
}
