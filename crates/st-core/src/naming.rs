//! Naming convention for migration directories
//!
//! A migration name is a fixed-width numeric prefix, an underscore, and a
//! free-form label: `00001_init` or `20181106123456_add_users`. Byte order of
//! such names is application order.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Minimum number of leading digits in a migration name.
pub const LEADING_DIGITS: usize = 5;

/// `chrono` format for timestamp-prefixed names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

static MIGRATION_RE: OnceLock<Regex> = OnceLock::new();

fn migration_pattern() -> &'static Regex {
    MIGRATION_RE.get_or_init(|| {
        Regex::new(&format!(r"^\d{{{LEADING_DIGITS},}}_.*$")).expect("valid regex")
    })
}

/// True if `name` follows the migration naming convention.
pub fn is_migration_name(name: &str) -> bool {
    migration_pattern().is_match(name)
}

/// Left-pad `num` with zeros to `digits` characters.
pub fn zero_pad(num: u64, digits: usize) -> String {
    format!("{num:0digits$}")
}

/// `00042_label` style name.
pub fn sequence_name(num: u64, label: &str) -> String {
    format!("{}_{}", zero_pad(num, LEADING_DIGITS), label)
}

/// `20181106123456_label` style name.
pub fn timestamp_name(timestamp: DateTime<Utc>, label: &str) -> String {
    format!("{}_{}", timestamp.format(TIMESTAMP_FORMAT), label)
}

/// Numeric prefix of the last name in `names`, or 0 when there are none.
///
/// `names` must already be sorted ascending.
pub fn latest_sequence(names: &[String]) -> CoreResult<u64> {
    let Some(last) = names.last() else {
        return Ok(0);
    };
    last.split('_')
        .next()
        .and_then(|prefix| prefix.parse::<u64>().ok())
        .ok_or_else(|| CoreError::BadSequenceNumber { name: last.clone() })
}

/// Reject labels that would escape the migrations directory or produce
/// confusing directory names.
pub fn validate_label(label: &str) -> CoreResult<()> {
    let reason = if label.is_empty() {
        Some("must not be empty")
    } else if label.contains('/') || label.contains('\\') || label.contains("..") {
        Some("must not contain '/', '\\', or '..'")
    } else if label.starts_with('.') || label.starts_with('-') {
        Some("must not start with '.' or '-'")
    } else if label.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else if label.contains('\'') {
        Some("must not contain quotes")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CoreError::InvalidLabel {
            label: label.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "naming_test.rs"]
mod tests;
