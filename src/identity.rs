// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bytes::{deserialize_hex, serialize_hex};

/// Size of account identity tokens.
pub const ACCOUNT_ID_LEN: usize = 16;

/// 16-byte opaque token uniquely naming an account within a group.
///
/// Tokens are only ever compared for equality and kept in the order their
/// snapshot lists them; their contents carry no meaning here.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

impl AccountId {
    /// Create an `AccountId` from its raw bytes representation.
    pub const fn from_bytes(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Bytes of the token.
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }

    /// Convert the token to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ACCOUNT_ID_LEN]> for AccountId {
    fn from(value: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(value)
    }
}

impl From<AccountId> for [u8; ACCOUNT_ID_LEN] {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl TryFrom<&[u8]> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let value_len = value.len();

        let checked_value: [u8; ACCOUNT_ID_LEN] = value
            .try_into()
            .map_err(|_| AccountIdError::InvalidLength(value_len, ACCOUNT_ID_LEN))?;

        Ok(Self(checked_value))
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(hex::decode(value)?.as_slice())
    }
}

impl PartialOrd for AccountId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AccountId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccountId").field(&self.to_hex()).finish()
    }
}

impl Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_hex(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = deserialize_hex(deserializer)?;

        bytes
            .as_slice()
            .try_into()
            .map_err(|err: AccountIdError| serde::de::Error::custom(err.to_string()))
    }
}

/// Error types for `AccountId` struct.
#[derive(Error, Debug)]
pub enum AccountIdError {
    /// Token has an invalid length.
    #[error("invalid account id length {0} bytes, expected {1} bytes")]
    InvalidLength(usize, usize),

    /// Token string contains invalid hexadecimal characters.
    #[error("invalid hex encoding in account id string")]
    InvalidHexEncoding(#[from] hex::FromHexError),
}
