/// All server primary keys are integer row ids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Serde adapter for server timestamps.
///
/// The storyboard server emits RFC 3339 timestamps when the column is
/// timezone-aware and naive `YYYY-MM-DDTHH:MM:SS[.f]` strings otherwise.
/// Naive values are read as UTC.
pub mod lenient_timestamp {
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parse either an RFC 3339 timestamp or a naive one (assumed UTC).
    pub fn parse(raw: &str) -> Result<Timestamp, String> {
        if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Utc.from_utc_datetime(&naive))
            .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
    }

}

/// Deserializer for clearable fields of partial-update DTOs, typed
/// `Option<Option<T>>`.
///
/// An absent key stays `None` through `#[serde(default)]`, an explicit
/// `null` becomes `Some(None)` and a value becomes `Some(Some(v))`. Paired
/// with `skip_serializing_if = "Option::is_none"`, `Some(None)` is sent as
/// `null` so the server clears the column.
pub mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }

    #[cfg(test)]
    mod tests {
        use serde::{Deserialize, Serialize};
        use serde_json::json;

        #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
        struct Patch {
            #[serde(
                default,
                deserialize_with = "super::deserialize",
                skip_serializing_if = "Option::is_none"
            )]
            note: Option<Option<String>>,
        }

        #[test]
        fn distinguishes_absent_null_and_value() {
            let absent: Patch = serde_json::from_value(json!({})).unwrap();
            let null: Patch = serde_json::from_value(json!({ "note": null })).unwrap();
            let value: Patch = serde_json::from_value(json!({ "note": "x" })).unwrap();

            assert_eq!(absent.note, None);
            assert_eq!(null.note, Some(None));
            assert_eq!(value.note, Some(Some("x".to_string())));
        }

        #[test]
        fn explicit_null_is_serialized() {
            let patch = Patch { note: Some(None) };
            assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "note": null }));
            assert_eq!(serde_json::to_value(Patch::default()).unwrap(), json!({}));
        }
    }
}
