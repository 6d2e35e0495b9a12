use std::fmt;

use serde::{Deserialize, Serialize};

/// Country code identifying where income is sourced or where the household
/// relocates to (e.g. `"PT"`).
///
/// Codes are trimmed and upper-cased on construction so `"pt "` and `"PT"`
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Jurisdiction(String);

impl Jurisdiction {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Jurisdiction {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for Jurisdiction {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<Jurisdiction> for String {
    fn from(jurisdiction: Jurisdiction) -> Self {
        jurisdiction.0
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ISO 4217 style currency code (e.g. `"EUR"`), normalized like [`Jurisdiction`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn jurisdiction_is_normalized() {
        assert_eq!(Jurisdiction::new(" pt "), Jurisdiction::new("PT"));
        assert_eq!(Jurisdiction::new("pt").as_str(), "PT");
    }

    #[test]
    fn currency_code_deserializes_normalized() {
        let code: CurrencyCode = serde_json::from_str("\"eur\"").unwrap();

        assert_eq!(code, CurrencyCode::new("EUR"));
    }

    #[test]
    fn currency_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&CurrencyCode::new("usd")).unwrap();

        assert_eq!(json, "\"USD\"");
    }
}
