//! # Identifiers
//!
//! Every document, dossier, dossier page and marker is addressed by an opaque
//! [`Id`]: a namespace prefix followed by a unique suffix (`page-6f1c…`).
//! Ids are compared for equality and never interpreted otherwise.
//!
//! Two strategies exist:
//! - [`IdStrategy::Random`]: UUID v4, the default.
//! - [`IdStrategy::Timestamp`]: a process-wide counter mixed with the clock.
//!   Weaker, but unique within a process, which is all a single editing
//!   session needs.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub const DOCUMENT_PREFIX: &str = "doc";
pub const DOSSIER_PREFIX: &str = "dossier";
pub const COVER_PREFIX: &str = "cover";
pub const PAGE_PREFIX: &str = "page";
pub const MARKER_PREFIX: &str = "marker";

/// An opaque identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Random,
    Timestamp,
}

/// Produces fresh identifiers. Cheap to copy; carries no state of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdGenerator {
    strategy: IdStrategy,
}

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub fn new_id(&self, prefix: &str) -> Id {
        match self.strategy {
            IdStrategy::Random => Id(format!("{}-{}", prefix, Uuid::new_v4())),
            IdStrategy::Timestamp => Id(timestamp_id(prefix)),
        }
    }
}

fn timestamp_id(prefix: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    // splitmix64 of the clock, only to make ids look less sequential
    let mut noise = (now.subsec_nanos() as u64) ^ seq.rotate_left(32);
    noise = noise.wrapping_add(0x9E37_79B9_7F4A_7C15);
    noise = (noise ^ (noise >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    noise = (noise ^ (noise >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    noise ^= noise >> 31;

    format!(
        "{}-{}-{}-{}",
        prefix,
        to_base36(noise & 0xFFFF_FFFF),
        to_base36(seq),
        now.as_millis()
    )
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
