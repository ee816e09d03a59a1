/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (booking start/end) carry no time zone.
pub type Date = chrono::NaiveDate;

/// Serde helper for patch fields where an explicit `null` clears the column.
///
/// A missing field stays `None` (leave unchanged), `null` becomes
/// `Some(None)` and a value becomes `Some(Some(v))`. Use with
/// `#[serde(default, deserialize_with = "nullable::deserialize")]`.
pub mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
