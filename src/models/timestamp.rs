//! Timestamps are stored as fixed-width RFC 3339 UTC strings with microsecond
//! precision, so ordering by the stored string is chronological ordering.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::Serializer;
use serde_json::Value;

/// Current time at the stored precision.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn to_value(ts: &DateTime<Utc>) -> Value {
    Value::String(format(ts))
}

/// `serialize_with` helper for timestamp fields in response bodies.
pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}
