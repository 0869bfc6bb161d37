use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

const UNIT_LABELS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[must_use]
#[repr(transparent)]
#[serde(transparent)]
pub struct FileSize(u64);

impl FileSize {
    #[inline]
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Scales the size down by 1024 until it fits the largest unit below it.
    pub fn to_units(self) -> (f64, &'static str) {
        let mut value = self.0 as f64;
        let mut idx = 0;
        while value >= 1024.0 && idx < UNIT_LABELS.len() - 1 {
            value /= 1024.0;
            idx += 1;
        }
        (value, UNIT_LABELS[idx])
    }

    /// Returns a base-2 human readable representation with three decimals, e.g. `12.500 KB`.
    pub fn to_human(self) -> String {
        let (value, units) = self.to_units();
        format!("{value:.3} {units}")
    }
}

impl From<u64> for FileSize {
    fn from(bytes: u64) -> Self {
        Self::new(bytes)
    }
}

impl From<FileSize> for u64 {
    fn from(size: FileSize) -> Self {
        size.bytes()
    }
}

impl FromStr for FileSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_byte_size(s).map(Self::new)
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}", self.to_human())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Parses an unsigned byte count with an optional unit suffix (`10`, `4KB`, `1.5GiB`, `2m`).
///
/// Units are powers of 1024 and case-insensitive. Fractional values are
/// truncated to whole bytes after scaling.
///
/// # Errors
/// Returns [`DomainError::InvalidByteSize`] naming the token when the number is
/// missing or malformed, the unit is unknown, or the result does not fit `u64`.
pub fn parse_byte_size(text: &str) -> DomainResult<u64> {
    let token = text.trim();
    let invalid = |reason: &str| DomainError::InvalidByteSize {
        token: text.to_string(),
        reason: reason.to_string(),
    };

    let split = token.find(|c: char| !(c.is_ascii_digit() || c == '.')).unwrap_or(token.len());
    let (number, unit) = token.split_at(split);
    if number.is_empty() {
        return Err(invalid("expected an unsigned number"));
    }
    let multiplier = unit_multiplier(unit.trim()).ok_or_else(|| invalid("unknown unit"))?;

    if number.contains('.') {
        let value: f64 = number.parse().map_err(|_| invalid("malformed number"))?;
        let bytes = value * multiplier as f64;
        // u64::MAX rounds up to 2^64 as f64, so `>=` rejects everything that would saturate.
        if !bytes.is_finite() || bytes >= u64::MAX as f64 {
            return Err(invalid("value does not fit in 64 bits"));
        }
        Ok(bytes as u64)
    } else {
        let value: u64 = number.parse().map_err(|_| invalid("value does not fit in 64 bits"))?;
        value.checked_mul(multiplier).ok_or_else(|| invalid("value does not fit in 64 bits"))
    }
}

fn unit_multiplier(unit: &str) -> Option<u64> {
    const KIB: u64 = 1024;
    let power = match unit.to_ascii_lowercase().as_str() {
        "" | "b" => 0,
        "k" | "kb" | "kib" => 1,
        "m" | "mb" | "mib" => 2,
        "g" | "gb" | "gib" => 3,
        "t" | "tb" | "tib" => 4,
        "p" | "pb" | "pib" => 5,
        "e" | "eb" | "eib" => 6,
        _ => return None,
    };
    Some(KIB.pow(power))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_suffixed_sizes() {
        assert_eq!(parse_byte_size("0").unwrap(), 0);
        assert_eq!(parse_byte_size("1024").unwrap(), 1024);
        assert_eq!(parse_byte_size("1KB").unwrap(), 1024);
        assert_eq!(parse_byte_size("2mb").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_byte_size("3G").unwrap(), 3 * 1024 * 1024 * 1024);
        assert_eq!(parse_byte_size("1 TiB").unwrap(), 1024_u64.pow(4));
        assert!(parse_byte_size("16EB").unwrap_err().to_string().contains("64 bits"));
    }

    #[test]
    fn fractional_values_are_truncated() {
        assert_eq!(parse_byte_size("1.5KB").unwrap(), 1536);
        assert_eq!(parse_byte_size("0.3").unwrap(), 0);
    }

    #[test]
    fn rejects_malformed_tokens() {
        for input in ["", "KB", "-5", "12XB", "1.2.3", "ten"] {
            let err = parse_byte_size(input).expect_err("malformed size should fail");
            assert!(matches!(err, DomainError::InvalidByteSize { .. }), "{input}: {err}");
        }
    }

    #[test]
    fn error_names_the_offending_token() {
        let err = parse_byte_size("12XB").unwrap_err();
        assert!(err.to_string().contains("12XB"));
    }

    #[test]
    fn units_scale_by_1024() {
        assert_eq!(FileSize::new(0).to_units(), (0.0, "B"));
        assert_eq!(FileSize::new(1023).to_units(), (1023.0, "B"));
        assert_eq!(FileSize::new(1024).to_units(), (1.0, "KB"));
        assert_eq!(FileSize::new(u64::MAX).to_units().1, "EB");
    }
}
