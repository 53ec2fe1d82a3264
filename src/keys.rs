// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bytes::{deserialize_hex, serialize_hex};

/// Size of member profile keys.
pub const PROFILE_KEY_LEN: usize = 32;

/// 32-byte profile key of a group member.
///
/// Opaque to the reconciliation engine: two keys are either byte-for-byte
/// equal or different, nothing else is evaluated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileKey([u8; PROFILE_KEY_LEN]);

impl ProfileKey {
    /// Create a `ProfileKey` from its raw bytes representation.
    pub const fn from_bytes(bytes: [u8; PROFILE_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Bytes of the key.
    pub fn as_bytes(&self) -> &[u8; PROFILE_KEY_LEN] {
        &self.0
    }

    /// Convert the key to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for ProfileKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PROFILE_KEY_LEN]> for ProfileKey {
    fn from(value: [u8; PROFILE_KEY_LEN]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for ProfileKey {
    type Error = ProfileKeyError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let value_len = value.len();

        let checked_value: [u8; PROFILE_KEY_LEN] = value
            .try_into()
            .map_err(|_| ProfileKeyError::InvalidLength(value_len, PROFILE_KEY_LEN))?;

        Ok(Self(checked_value))
    }
}

impl fmt::Debug for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProfileKey").field(&self.to_hex()).finish()
    }
}

impl Serialize for ProfileKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_hex(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for ProfileKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = deserialize_hex(deserializer)?;

        bytes
            .as_slice()
            .try_into()
            .map_err(|err: ProfileKeyError| serde::de::Error::custom(err.to_string()))
    }
}

/// Error types for `ProfileKey` struct.
#[derive(Error, Debug)]
pub enum ProfileKeyError {
    /// Key has an invalid length.
    #[error("invalid profile key length {0} bytes, expected {1} bytes")]
    InvalidLength(usize, usize),
}
