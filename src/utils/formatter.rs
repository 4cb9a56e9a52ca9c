// src/utils/formatter.rs
use crate::filesystem::Value;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

pub const DEFAULT_DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// How datetime columns are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pub pattern: String,
    pub utc: bool,
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat { pattern: DEFAULT_DATETIME_FORMAT.to_string(), utc: false }
    }
}

impl DateFormat {
    pub fn format(&self, dt: &DateTime<Utc>) -> String {
        if self.utc {
            dt.format(&self.pattern).to_string()
        } else {
            dt.with_timezone(&Local).format(&self.pattern).to_string()
        }
    }

    /// Numbers are Unix seconds, strings are shown verbatim, anything else is blank.
    pub fn format_value(&self, value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Number(n) => n
                .as_f64()
                .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
                .map(|dt| self.format(&dt))
                .unwrap_or_default(),
            serde_json::Value::String(s) => s.clone(),
            _ => String::new(),
        }
    }
}

/// Checks a strftime pattern without formatting anything.
pub fn is_valid_pattern(pattern: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

pub fn parse_rfc3339(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.with_timezone(&Utc))
}

/// `2025-09-20 15:25:39`, read as UTC. Some WebDAV servers report this
/// instead of an RFC 1123 `getlastmodified`.
pub fn parse_space_separated_utc(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn datetime_value(parsed: Option<DateTime<Utc>>) -> Value {
    parsed.map(Value::DateTime).unwrap_or(Value::Empty)
}

/// Human readable size, e.g. "1.2K", "3.4M".
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.1}G", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.1}M", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1}K", bytes as f64 / 1_000.0)
    } else {
        format!("{}B", bytes)
    }
}
