//! Request signature primitives for the 123pan web API.
//!
//! Every browser-mode request carries one extra query parameter whose key and
//! value are derived from the current minute (in UTC+8), a random draw, and
//! the request path:
//!
//! ```text
//! key   = crc32(obfuscate(YYYYMMDDHHmm))
//! value = "{unix}-{random}-{crc32(unix|random|path|platform|version|key)}"
//! ```
//!
//! [`sign_at`] is the deterministic core; [`sign`] reads the wall clock and a
//! thread-local RNG. A pair is single-use: callers must sign again for every
//! attempt, including retries.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use rand::Rng;

/// Digit substitution table. Only indices `0..=9` are ever looked up.
pub const SUBSTITUTION_TABLE: [u8; 26] = *b"adefghlmyijnopkqrstubcvwsz";

/// Exclusive upper bound of the random component.
pub const RANDOM_BOUND: u32 = 10_000_000;

/// Offset of the server's civil clock from UTC, in hours.
const SERVER_UTC_OFFSET_HOURS: i64 = 8;

/// A signature query parameter, appended to the URL as `key=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePair {
    pub key: String,
    pub value: String,
}

impl SignaturePair {
    pub fn into_query_pair(self) -> (String, String) {
        (self.key, self.value)
    }
}

/// Map the `YYYYMMDDHHmm` rendering of `now` (in UTC+8) through
/// [`SUBSTITUTION_TABLE`].
///
/// Only the last four digits of the year are used, so years outside
/// `0..=9999` wrap instead of widening the rendering.
pub fn obfuscate_minute(now: DateTime<Utc>) -> [u8; 12] {
    let local = now.naive_utc() + Duration::hours(SERVER_UTC_OFFSET_HOURS);
    let year = local.year().rem_euclid(10_000).unsigned_abs();
    let fields = [
        (year, 4),
        (local.month(), 2),
        (local.day(), 2),
        (local.hour(), 2),
        (local.minute(), 2),
    ];

    let mut out = [0u8; 12];
    let mut pos = 0;
    for (value, width) in fields {
        let mut rest = value;
        for slot in out[pos..pos + width].iter_mut().rev() {
            // `rest % 10` is always a valid index.
            *slot = SUBSTITUTION_TABLE[(rest % 10) as usize];
            rest /= 10;
        }
        pos += width;
    }
    out
}

/// Compute the signature pair for `path` at a fixed instant with a fixed
/// random draw.
///
/// `random` values at or above [`RANDOM_BOUND`] are reduced modulo the bound.
pub fn sign_at(
    now: DateTime<Utc>,
    random: u32,
    path: &str,
    platform: &str,
    version: &str,
) -> SignaturePair {
    let time_sign = crc32fast::hash(&obfuscate_minute(now)).to_string();
    let timestamp = now.timestamp().to_string();
    let random = (random % RANDOM_BOUND).to_string();

    let data = [
        timestamp.as_str(),
        random.as_str(),
        path,
        platform,
        version,
        time_sign.as_str(),
    ]
    .join("|");
    let data_sign = crc32fast::hash(data.as_bytes());

    SignaturePair {
        value: format!("{timestamp}-{random}-{data_sign}"),
        key: time_sign,
    }
}

/// Compute a fresh signature pair for `path` using the current time.
pub fn sign(path: &str, platform: &str, version: &str) -> SignaturePair {
    let random = rand::thread_rng().gen_range(0..RANDOM_BOUND);
    sign_at(Utc::now(), random, path, platform, version)
}
