use std::fmt::Debug;

use chrono::Utc;

pub const RWB_PREFIX: &str = "RWB";
const RWB_DIGITS: usize = 6;

/// Source of wall-clock milliseconds for identifier generation.
pub trait Clock: Debug + Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Builds a display-only roadway bill number from the last six digits of the
/// clock. Not unique: two submissions in the same millisecond collide.
pub fn generate_rwb(clock: &dyn Clock) -> String {
    let digits = clock.now_millis().unsigned_abs().to_string();
    let tail = &digits[digits.len().saturating_sub(RWB_DIGITS)..];
    format!("{RWB_PREFIX}{tail:0>width$}", width = RWB_DIGITS)
}

pub fn is_rwb(value: &str) -> bool {
    value
        .strip_prefix(RWB_PREFIX)
        .is_some_and(|digits| digits.len() == RWB_DIGITS && digits.bytes().all(|b| b.is_ascii_digit()))
}
