//! ObjectId - 12-byte document identifier
//!
//! Structure (big-endian):
//! - Bytes 0-3:  Unix timestamp in seconds
//! - Bytes 4-8:  Per-process random value
//! - Bytes 9-11: Incrementing counter
//!
//! Rendered as 24 lowercase hex characters on the wire and in storage.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Document identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Length of the hex representation
    pub const HEX_LEN: usize = 24;

    /// Create an ObjectId from raw bytes
    #[inline]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    #[inline]
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Seconds since the Unix epoch at which this id was generated
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Hex representation used on the wire
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from the 24-character hex representation
    pub fn parse(s: &str) -> Result<Self, ObjectIdParseError> {
        if s.len() != Self::HEX_LEN {
            return Err(ObjectIdParseError::InvalidLength(s.len()));
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ObjectIdParseError::InvalidHex)?;
        Ok(Self(bytes))
    }

    /// Check whether a string is a well-formed ObjectId
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }
}

/// Error when parsing an ObjectId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ObjectIdParseError {
    #[error("invalid object id length: expected 24, got {0}")]
    InvalidLength(usize),

    #[error("invalid object id: not a hex string")]
    InvalidHex,
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for ObjectId {
    type Err = ObjectIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        ObjectId::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Thread-safe ObjectId generator
///
/// The random segment is fixed per generator; uniqueness within a second
/// comes from the 24-bit counter.
pub struct ObjectIdGenerator {
    process_unique: [u8; 5],
    counter: AtomicU32,
}

impl ObjectIdGenerator {
    /// Create a generator with a random process segment and counter seed
    pub fn new() -> Self {
        Self {
            process_unique: rand::random(),
            counter: AtomicU32::new(rand::random::<u32>() & 0x00FF_FFFF),
        }
    }

    /// Generate a new ObjectId
    pub fn generate(&self) -> ObjectId {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        let count = self.counter.fetch_add(1, Ordering::Relaxed) & 0x00FF_FFFF;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&self.process_unique);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        ObjectId(bytes)
    }
}

impl Default for ObjectIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectIdGenerator").finish_non_exhaustive()
    }
}
