//! Truncating size-unit arithmetic. Thresholds are compared in the converted
//! unit, so the two-step byte→KB→MB division must stay exactly as written:
//! collapsing it into one division by 1_048_576 changes boundary values.

use crate::error::RemnantError;

pub fn bytes_to_kilobytes(bytes: u64) -> u64 {
    bytes / 1024
}

pub fn bytes_to_megabytes(bytes: u64) -> u64 {
    bytes / 1024 / 1024
}

/// Parse a human size string ("512B", "500KB", "1.5 MB") into bytes.
pub fn parse_size_string(s: &str) -> Result<u64, RemnantError> {
    let s = s.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix("TB") {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix("GB") {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix("MB") {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix("KB") {
        (stripped, 1024)
    } else if let Some(stripped) = s.strip_suffix("B") {
        (stripped, 1)
    } else {
        (&*s, 1)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| RemnantError::Config(format!("Invalid size value: {}", s)))?;

    if num < 0.0 {
        return Err(RemnantError::Config(format!("Invalid size value: {}", s)));
    }

    Ok((num * multiplier as f64) as u64)
}
