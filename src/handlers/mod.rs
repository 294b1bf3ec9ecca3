pub mod health;
pub mod rss;

// Shared query-parameter validation. Limits arrive as raw strings so that
// non-numeric values can fall back instead of failing extraction.

use crate::config::{DEFAULT_TOP_LIMIT, EXPORT_LIMIT_CEILING, MAX_FILTER_LEN, MAX_TOP_LIMIT};
use crate::error::{AppError, AppResult};

/// Overlong filters are a client error on every endpoint; an empty filter is
/// the same as no filter.
pub fn validate_filter(raw: Option<&str>) -> AppResult<Option<&str>> {
    match raw {
        Some(keyword) if keyword.chars().count() > MAX_FILTER_LEN => {
            Err(AppError::validation(format!(
                "filter parameter too long (maximum {} characters)",
                MAX_FILTER_LEN
            )))
        }
        Some("") | None => Ok(None),
        Some(keyword) => Ok(Some(keyword)),
    }
}

/// Bulk-endpoint limit: silently falls back to the default on anything
/// unparseable or non-positive, and clamps to the maximum instead of erroring.
pub fn clamped_top_limit(raw: Option<&str>) -> usize {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(n) if n >= 1 && n <= MAX_TOP_LIMIT as i64 => n as usize,
        Some(n) if n > MAX_TOP_LIMIT as i64 => MAX_TOP_LIMIT,
        _ => DEFAULT_TOP_LIMIT,
    }
}

/// Export limit: absent means the ceiling, above the ceiling is a client
/// error, unparseable or non-positive falls back to the ceiling.
pub fn export_limit(raw: Option<&str>) -> AppResult<usize> {
    match raw {
        None => Ok(EXPORT_LIMIT_CEILING),
        Some(s) => match s.trim().parse::<i64>() {
            Ok(n) if n > EXPORT_LIMIT_CEILING as i64 => Err(AppError::validation(format!(
                "limit parameter exceeds the maximum of {}",
                EXPORT_LIMIT_CEILING
            ))),
            Ok(n) if n >= 1 => Ok(n as usize),
            _ => Ok(EXPORT_LIMIT_CEILING),
        },
    }
}
