use chrono::{DateTime, Utc};

use super::document::Fields;
use super::timestamp;

pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

/// Stamp a new project's field set with both timestamps.
pub fn stamp_new(mut fields: Fields, now: DateTime<Utc>) -> Fields {
    fields.insert(CREATED_AT.to_string(), timestamp::to_value(&now));
    fields.insert(UPDATED_AT.to_string(), timestamp::to_value(&now));
    fields
}

/// Stamp an update patch. `createdAt` is never part of a patch.
pub fn stamp_update(mut patch: Fields, now: DateTime<Utc>) -> Fields {
    patch.remove(CREATED_AT);
    patch.insert(UPDATED_AT.to_string(), timestamp::to_value(&now));
    patch
}
