//! Strongly-typed, prefixed identifiers used across the ledger.
//!
//! The external format (`CTA-`/`MOV-`/`CLI-` + fixed-length uppercase hex) is
//! shared with pre-existing identifiers and must be preserved.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerError;

/// Identifier of an account (`CTA-` + 8 uppercase hex chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

/// Identifier of a movement (`MOV-` + 12 uppercase hex chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(String);

/// Identifier of a customer in the external directory (`CLI-` + 8 uppercase hex chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

fn random_hex(len: usize) -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(len);
    hex.to_uppercase()
}

fn is_uppercase_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}

macro_rules! impl_prefixed_id {
    ($t:ty, $prefix:literal, $hex_len:literal) => {
        impl $t {
            pub const PREFIX: &'static str = $prefix;
            pub const HEX_LEN: usize = $hex_len;

            /// Generate a fresh identifier from a random source.
            ///
            /// Prefer parsing fixed identifiers in tests for determinism.
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, random_hex($hex_len)))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let hex = s
                    .strip_prefix(concat!($prefix, "-"))
                    .ok_or_else(|| invalid($prefix, $hex_len, s))?;
                if hex.len() != $hex_len || !is_uppercase_hex(hex) {
                    return Err(invalid($prefix, $hex_len, s));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

fn invalid(prefix: &str, hex_len: usize, got: &str) -> LedgerError {
    LedgerError::invalid_id(format!(
        "expected {prefix}- followed by {hex_len} uppercase hex chars, got '{got}'"
    ))
}

impl_prefixed_id!(AccountNumber, "CTA", 8);
impl_prefixed_id!(MovementId, "MOV", 12);
impl_prefixed_id!(CustomerId, "CLI", 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_round_trip_through_parse() {
        let number = AccountNumber::generate();
        assert_eq!(number, number.as_str().parse().unwrap());

        let id = MovementId::generate();
        assert!(id.as_str().starts_with("MOV-"));
        assert_eq!(id.as_str().len(), "MOV-".len() + 12);
        assert_eq!(id, id.as_str().parse().unwrap());

        let customer = CustomerId::generate();
        assert_eq!(customer, customer.as_str().parse().unwrap());
    }

    #[test]
    fn parse_rejects_malformed_identifiers() {
        for bad in [
            "CTA-12345678X",  // too long
            "CTA-1234567",    // too short
            "CTA-1234abcd",   // lowercase hex
            "CTA-1234GHIJ",   // not hex
            "MOV-12345678",   // wrong prefix for length
            "12345678",       // no prefix
            "",
        ] {
            assert!(
                bad.parse::<AccountNumber>().is_err(),
                "expected '{bad}' to be rejected"
            );
        }
        assert!("CTA-0A1B2C3D".parse::<AccountNumber>().is_ok());
        assert!("MOV-0A1B2C3D4E5F".parse::<MovementId>().is_ok());
        assert!("CLI-DEADBEEF".parse::<CustomerId>().is_ok());
    }

    #[test]
    fn serde_uses_the_plain_string_form() {
        let number: AccountNumber = "CTA-0A1B2C3D".parse().unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"CTA-0A1B2C3D\"");
    }
}
