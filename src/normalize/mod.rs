//! IP normalization.
//!
//! Converts heterogeneous IP representations into one comparable unsigned
//! integer domain. Normalization is total: every input yields an integer, and
//! anything that cannot be converted collapses to [`SENTINEL`].

mod value;

use std::net::IpAddr;

pub use value::{infer_column, IpValue};

/// Integer domain shared by IPv4 (32-bit) and IPv6 (128-bit) addresses.
pub type IpInt = u128;

/// Value returned by [`normalize`] when conversion fails.
///
/// It sorts before every real range, so a failed record stays unmatched
/// unless a range starts at `0`.
pub const SENTINEL: IpInt = 0;

/// Converts an IP representation to its integer value, or `None` on failure.
///
/// - Text is parsed as an IPv4 or IPv6 address (no surrounding whitespace,
///   no leading-zero octets).
/// - Integers pass through if non-negative.
/// - Floats are truncated toward zero if finite and non-negative after
///   truncation.
/// - Missing values fail.
pub fn try_normalize(ip: &IpValue) -> Option<IpInt> {
    match ip {
        IpValue::Text(text) => match text.parse::<IpAddr>().ok()? {
            IpAddr::V4(v4) => Some(IpInt::from(u32::from(v4))),
            IpAddr::V6(v6) => Some(IpInt::from(v6)),
        },
        IpValue::Integer(n) => IpInt::try_from(*n).ok(),
        IpValue::Float(f) => {
            let truncated = f.trunc();
            // u128::MAX as f64 rounds up to 2^128, which is out of range
            if !truncated.is_finite() || truncated < 0.0 || truncated >= IpInt::MAX as f64 {
                return None;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(truncated as IpInt)
        }
        IpValue::Missing => None,
    }
}

/// Converts an IP representation to its integer value, or [`SENTINEL`] on
/// failure. Never fails and never panics.
pub fn normalize(ip: &IpValue) -> IpInt {
    try_normalize(ip).unwrap_or(SENTINEL)
}

/// A record annotated with the normalized form of its IP.
///
/// The annotation happens once, at construction; `data` carries the
/// passthrough business fields and is never inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    ip: IpValue,
    ip_int: IpInt,
    ip_parsed: bool,
    data: T,
}

impl<T> Record<T> {
    /// Builds a record and normalizes its IP.
    pub fn new(ip: impl Into<IpValue>, data: T) -> Self {
        let ip = ip.into();
        let parsed = try_normalize(&ip);
        Self {
            ip_int: parsed.unwrap_or(SENTINEL),
            ip_parsed: parsed.is_some(),
            ip,
            data,
        }
    }

    /// The IP as it was read.
    pub fn ip(&self) -> &IpValue {
        &self.ip
    }

    /// Normalized IP, [`SENTINEL`] when normalization failed.
    pub fn ip_int(&self) -> IpInt {
        self.ip_int
    }

    /// Whether normalization succeeded. Distinguishes a failure from a real
    /// `0.0.0.0`.
    pub fn ip_parsed(&self) -> bool {
        self.ip_parsed
    }

    /// Passthrough fields.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the record, returning the passthrough fields.
    pub fn into_data(self) -> T {
        self.data
    }
}
