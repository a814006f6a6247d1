use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

// Exchange codes in both snapshot catalogs run 3 to 4 characters; 8 leaves
// headroom for longer listings without admitting free text.
const MAX_TICKER_LEN: usize = 8;

/// Normalized exchange ticker code.
///
/// A ticker is 1 to 8 ASCII characters, letters and digits only, starting
/// with a letter. Input is trimmed and uppercased during parsing so catalog
/// lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        if trimmed.len() > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                len: trimmed.len(),
                max: MAX_TICKER_LEN,
            });
        }

        let mut code = String::with_capacity(trimmed.len());
        for (index, ch) in trimmed.chars().enumerate() {
            let ch = ch.to_ascii_uppercase();
            if index == 0 && !ch.is_ascii_uppercase() {
                return Err(ValidationError::TickerInvalidStart { ch });
            }
            if !ch.is_ascii_uppercase() && !ch.is_ascii_digit() {
                return Err(ValidationError::TickerInvalidChar { ch, index });
            }
            code.push(ch);
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ticker {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}
