//! Per-request identity and time.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use mpassign_core::{SellerId, StoreViewId};

/// Fallback when the configured date format cannot be rendered.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Who is asking, and in which store view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub seller_id: SellerId,
    pub store_view: StoreViewId,
}

impl RequestContext {
    pub fn new(seller_id: SellerId, store_view: StoreViewId) -> Self {
        Self {
            seller_id,
            store_view,
        }
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current date rendered with a strftime-style `format`.
    fn today(&self, format: &str) -> String {
        format_date(self.now(), format)
    }
}

/// Wall-clock time (UTC).
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant (tests, replays).
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn format_date(at: DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(format)).is_ok() {
        return out;
    }
    tracing::warn!(format, "invalid date format, using {DEFAULT_DATE_FORMAT}");
    at.format(DEFAULT_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 17, 45, 0).unwrap()
    }

    #[test]
    fn fixed_clock_formats_with_configured_format() {
        let clock = FixedClock(at());
        assert_eq!(clock.today("%Y-%m-%d"), "2024-03-09");
        assert_eq!(clock.today("%d/%m/%Y %H:%M"), "09/03/2024 17:45");
    }

    #[test]
    fn invalid_format_falls_back_to_iso_date() {
        assert_eq!(format_date(at(), "%Q"), "2024-03-09");
    }
}
