//! Snowflake ids for users, posts, comments, media and groups.
//!
//! Ids are minted by the application before insert so a created row's id is
//! known without a round trip. Bit layout, high to low: 42 bits of
//! milliseconds since [`Snowflake::EPOCH`], 10 bits of worker id, 12 bits of
//! per-millisecond sequence.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const WORKER_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const WORKER_MASK: i64 = (1 << WORKER_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const TIMESTAMP_SHIFT: u32 = WORKER_BITS + SEQUENCE_BITS;

/// Entity identifier. Serialized as a JSON string so browsers keep every digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// 2025-01-01T00:00:00Z in Unix milliseconds
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Creation time in Unix milliseconds
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & WORKER_MASK) as u16
    }

    /// Parse a decimal id as it appears in paths, form fields and JSON
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(SnowflakeParseError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("id must be a positive integer")]
pub struct SnowflakeParseError;

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Accepts `"123"` as well as a bare `123`
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = Snowflake;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an id as a string or integer")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Snowflake, E> {
                Ok(Snowflake(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Snowflake, E> {
                i64::try_from(v)
                    .map(Snowflake)
                    .map_err(|_| E::custom("id out of range"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Snowflake, E> {
                Snowflake::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Lock-free id source shared by every service of one process.
///
/// The last issued id is kept in a single atomic; a new id is the larger of
/// "now with sequence 0" and "last + 1", so ids stay strictly increasing even
/// when the clock steps back or more than 4096 ids are taken in one
/// millisecond (the timestamp part then runs slightly ahead of the wall clock).
#[derive(Debug)]
pub struct SnowflakeGenerator {
    worker_bits: i64,
    last: AtomicI64,
}

impl SnowflakeGenerator {
    /// Worker ids above 1023 are truncated to their low 10 bits; config
    /// validation rejects them before startup.
    pub fn new(worker_id: u16) -> Self {
        Self {
            worker_bits: (i64::from(worker_id) & WORKER_MASK) << SEQUENCE_BITS,
            last: AtomicI64::new(0),
        }
    }

    pub fn worker_id(&self) -> u16 {
        (self.worker_bits >> SEQUENCE_BITS) as u16
    }

    pub fn generate(&self) -> Snowflake {
        let floor = ((now_millis() - Snowflake::EPOCH) << TIMESTAMP_SHIFT) | self.worker_bits;
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(next_id(last, floor, self.worker_bits))
            })
            .unwrap_or_else(|last| last);
        Snowflake(next_id(previous, floor, self.worker_bits))
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

fn next_id(last: i64, floor: i64, worker_bits: i64) -> i64 {
    if floor > last {
        return floor;
    }
    let bumped = last + 1;
    if bumped & SEQUENCE_MASK == 0 {
        // sequence wrapped into the worker bits; move to the next millisecond
        ((bumped >> TIMESTAMP_SHIFT) << TIMESTAMP_SHIFT) | worker_bits
    } else {
        bumped
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}
