// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use balade_base::error::BaladeError;
use balade_base::internal_server_error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

const COUNTER_MASK: u32 = 0x00FF_FFFF;
// the counter starts in the lower half so it can't wrap before 2^23 identifiers
const COUNTER_START_MASK: u32 = 0x007F_FFFF;

static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(|| rand::random());
static COUNTER: LazyLock<AtomicU32> = LazyLock::new(|| AtomicU32::new(counter_start()));

fn counter_start() -> u32 {
    rand::random::<u32>() & COUNTER_START_MASK
}

/// A 12-byte document identifier.
///
/// Layout: 4 bytes of big-endian UNIX seconds, 5 bytes unique per process,
/// 3 bytes of a wrapping counter. Identifiers created by one process sort
/// in creation order until the counter wraps, which takes at least 2^23
/// identifiers. After a wrap, the identifiers created in the same second
/// sort before the ones created just before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub fn new() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst) & COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
        ObjectId(bytes)
    }

    /// Seconds since UNIX epoch when the identifier was generated.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = BaladeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cast_error = || internal_server_error!("Cast to ObjectId failed for value \"{}\"", s);
        if s.len() != 24 {
            return Err(cast_error());
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| cast_error())?;
        Ok(ObjectId(bytes))
    }
}
