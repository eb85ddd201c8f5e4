//! Conversion between canonical server timestamps, the form's editing
//! format (`YYYY-MM-DDTHH:MM`) and the list display.
//!
//! The editing format is minute precise and always UTC, so every field
//! value names exactly one instant. The configured timezone only applies to
//! [`TimestampCodec::display`]. Canonical values without an offset are taken
//! as UTC; a bare date means midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::EngineError;

pub const EDIT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampCodec {
    tz: Tz,
}

impl Default for TimestampCodec {
    fn default() -> Self {
        Self { tz: Tz::UTC }
    }
}

impl TimestampCodec {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Builds a codec from an IANA timezone name (`Europe/Rome`, `UTC`...).
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| EngineError::Timezone(name.to_string()))
    }

    /// Zone used by the list display.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Parses a canonical server timestamp into an instant.
    pub fn parse_canonical(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(|naive| naive.and_utc())
    }

    /// Encodes a canonical timestamp into the editing format.
    ///
    /// Returns `None` when the value cannot be parsed.
    pub fn encode(&self, raw: &str) -> Option<String> {
        self.parse_canonical(raw)
            .map(|instant| truncate_to_minute(instant).format(EDIT_FORMAT).to_string())
    }

    /// Decodes an editing-format value back into an instant.
    pub fn decode(&self, field: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(field.trim(), EDIT_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Formats a canonical timestamp for list display, in the configured
    /// timezone.
    pub fn display(&self, raw: Option<&str>) -> String {
        match raw {
            None => "-".to_string(),
            Some(raw) => self
                .parse_canonical(raw)
                .map(|instant| {
                    instant
                        .with_timezone(&self.tz)
                        .format(DISPLAY_FORMAT)
                        .to_string()
                })
                .unwrap_or_else(|| raw.to_string()),
        }
    }
}

fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(instant)
}
