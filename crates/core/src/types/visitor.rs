//! Anonymous visitor identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`AnonymousUserId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnonymousUserIdError {
    /// The input string is empty.
    #[error("visitor id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("visitor id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_-]`.
    #[error("visitor id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A browser-scoped, unauthenticated correlation key for wishlist rows.
///
/// Freshly generated IDs look like `user_k3j9x0a2b`: the [`PREFIX`] followed
/// by [`SUFFIX_LENGTH`] characters drawn from [`SUFFIX_ALPHABET`]. Parsing is
/// more lenient so that IDs minted by older clients keep working.
///
/// ## Constraints
///
/// - Length: 1-64 characters
/// - Characters: ASCII letters, digits, `_` and `-`
///
/// ```
/// use d2c_market_core::AnonymousUserId;
///
/// assert!(AnonymousUserId::parse("user_k3j9x0a2b").is_ok());
/// assert!(AnonymousUserId::parse("").is_err());
/// assert!(AnonymousUserId::parse("user k3j9").is_err());
/// ```
///
/// [`PREFIX`]: AnonymousUserId::PREFIX
/// [`SUFFIX_LENGTH`]: AnonymousUserId::SUFFIX_LENGTH
/// [`SUFFIX_ALPHABET`]: AnonymousUserId::SUFFIX_ALPHABET
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct AnonymousUserId(String);

impl AnonymousUserId {
    /// Maximum accepted length.
    pub const MAX_LENGTH: usize = 64;

    /// Prefix of newly generated IDs.
    pub const PREFIX: &'static str = "user_";

    /// Number of random characters after the prefix.
    pub const SUFFIX_LENGTH: usize = 9;

    /// Characters a generated suffix is drawn from (lowercase base 36).
    pub const SUFFIX_ALPHABET: &'static [u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    /// Parse an `AnonymousUserId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 64 characters,
    /// or contains anything other than ASCII alphanumerics, `_` or `-`.
    pub fn parse(s: &str) -> Result<Self, AnonymousUserIdError> {
        if s.is_empty() {
            return Err(AnonymousUserIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(AnonymousUserIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(AnonymousUserIdError::InvalidCharacter(bad));
        }

        Ok(Self(s.to_owned()))
    }

    /// Build an ID from suffix indices into [`Self::SUFFIX_ALPHABET`].
    ///
    /// Indices are taken modulo the alphabet length, so any source of random
    /// numbers can be fed in directly.
    #[must_use]
    pub fn from_suffix_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let alphabet = Self::SUFFIX_ALPHABET;
        let suffix: String = indices
            .into_iter()
            .take(Self::SUFFIX_LENGTH)
            .filter_map(|i| alphabet.get(i % alphabet.len()).map(|b| char::from(*b)))
            .collect();
        Self(format!("{}{suffix}", Self::PREFIX))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnonymousUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AnonymousUserId {
    type Error = AnonymousUserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AnonymousUserId> for String {
    fn from(id: AnonymousUserId) -> Self {
        id.0
    }
}

impl AsRef<str> for AnonymousUserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
