//! Registrar date normalisation.
//!
//! The domain listing sends plain dates or `YYYY-MM-DD HH:MM:SS` values,
//! while the sync schema sends ISO-8601 timestamps. Both end up as a
//! `NaiveDate` rendered as `YYYY-MM-DD` for the host.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const HOST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses any date shape the listing endpoint is known to send.
pub fn parse_listing_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, HOST_DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    parse_timestamp(raw)
}

/// Parses an ISO-8601 timestamp with offset (`2025-03-01T00:00:00+01:00`).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.date_naive())
}

pub fn format_host_date(date: NaiveDate) -> String {
    date.format(HOST_DATE_FORMAT).to_string()
}

/// serde helper so host-facing models serialise dates as `YYYY-MM-DD`.
pub mod host_date {
    use super::{format_host_date, HOST_DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_host_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, HOST_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
