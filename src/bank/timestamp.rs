//! Serde helpers for the account service's timestamps.
//!
//! The account service may send either an RFC 3339 date-time or a local
//! date-time without an offset (e.g. "2024-01-15T10:30:00.123456"). Offset-less
//! values are taken to be UTC. Timestamps are always written as RFC 3339.

use serde::{Deserialize, Deserializer, Serializer, de, ser};
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

const LOCAL_DATE_TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);

/// Parse a timestamp sent by the account service.
pub fn parse(text: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339).ok().or_else(|| {
        PrimitiveDateTime::parse(text, LOCAL_DATE_TIME_FORMAT)
            .ok()
            .map(PrimitiveDateTime::assume_utc)
    })
}

pub fn serialize<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    let text = value.format(&Rfc3339).map_err(ser::Error::custom)?;
    serializer.serialize_str(&text)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
    let text = String::deserialize(deserializer)?;

    parse(&text).ok_or_else(|| de::Error::custom(format!("invalid timestamp \"{text}\"")))
}
