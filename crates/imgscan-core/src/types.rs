//! Core data types for the imgscan cataloging pipeline.
//!
//! [`ImageRecord`] is the wire format consumed by the downstream importer, so
//! its field names and JSON shapes are fixed: camelCase keys, dimensions as
//! decimal strings, and `uploadedAt` in the `{"$date": ...}` extended-JSON form.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one discovered image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Basename of the source file
    pub filename: String,

    /// Same as `filename`; files are never renamed
    pub original_name: String,

    /// Width in pixels, 0 when the header could not be probed
    #[serde(with = "dimension")]
    pub width: u32,

    /// Height in pixels, 0 when the header could not be probed
    #[serde(with = "dimension")]
    pub height: u32,

    /// Configured base path
    pub path: String,

    /// `path` + "/" + `filename`
    pub url: String,

    /// Byte length of the contents that were hashed
    pub size: u64,

    /// MIME type inferred from the extension
    #[serde(rename = "type")]
    pub mime_type: String,

    /// Lowercase hex SHA-256 of the full contents
    pub hash: String,

    /// When the record was extracted
    pub uploaded_at: UploadedAt,

    /// Configured uploader identity
    pub uploaded_by: Uploader,
}

/// Identity copied verbatim into every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Uploader {
    pub name: String,
    pub email: String,
    pub id: String,
}

/// Extraction timestamp, serialized as `{"$date": "2025-01-02T03:04:05.678Z"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAt {
    #[serde(rename = "$date", with = "iso_millis")]
    pub date: DateTime<Utc>,
}

impl UploadedAt {
    /// Capture the current wall-clock time.
    pub fn now() -> Self {
        Self { date: Utc::now() }
    }
}

impl From<DateTime<Utc>> for UploadedAt {
    fn from(date: DateTime<Utc>) -> Self {
        Self { date }
    }
}

/// Progress after one file has been handled (successfully or not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    /// Completion percentage, rounded to the nearest integer.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.processed as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Statistics for a catalog run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanStats {
    /// Image files found by discovery
    pub discovered: usize,

    /// Records produced
    pub succeeded: usize,

    /// Files that produced no record
    pub failed: usize,

    /// Sum of `size` over all records
    pub total_bytes: u64,

    /// Wall-clock time for extraction
    pub elapsed_seconds: f64,

    /// Processing rate in images per second
    pub images_per_second: f64,
}

/// Width/height as decimal strings on the wire; numbers are accepted on input.
mod dimension {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u32),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

mod iso_millis {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|d| d.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> ImageRecord {
        ImageRecord {
            filename: "a.jpg".to_string(),
            original_name: "a.jpg".to_string(),
            width: 100,
            height: 50,
            path: "/uploads".to_string(),
            url: "/uploads/a.jpg".to_string(),
            size: 12345,
            mime_type: "image/jpeg".to_string(),
            hash: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_string(),
            uploaded_at: Utc
                .with_ymd_and_hms(2025, 3, 1, 12, 30, 0)
                .unwrap()
                .into(),
            uploaded_by: Uploader {
                name: "kyle".to_string(),
                email: String::new(),
                id: "68b0".to_string(),
            },
        }
    }

    #[test]
    fn test_record_wire_shape() {
        let value = serde_json::to_value(sample_record()).unwrap();

        assert_eq!(value["filename"], "a.jpg");
        assert_eq!(value["originalName"], "a.jpg");
        assert_eq!(value["width"], "100");
        assert_eq!(value["height"], "50");
        assert_eq!(value["size"], 12345);
        assert_eq!(value["type"], "image/jpeg");
        assert_eq!(value["url"], "/uploads/a.jpg");
        assert_eq!(value["uploadedAt"]["$date"], "2025-03-01T12:30:00.000Z");
        assert_eq!(value["uploadedBy"]["name"], "kyle");
        assert_eq!(value["uploadedBy"]["email"], "");
        assert!(value.get("mimeType").is_none());
        assert!(value.get("uploaded_at").is_none());
    }

    #[test]
    fn test_record_roundtrip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: ImageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_dimension_accepts_numbers() {
        let mut value = serde_json::to_value(sample_record()).unwrap();
        value["width"] = serde_json::json!(640);
        value["height"] = serde_json::json!("480");
        let parsed: ImageRecord = serde_json::from_value(value).unwrap();
        assert_eq!((parsed.width, parsed.height), (640, 480));
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(Progress { processed: 1, total: 3 }.percent(), 33);
        assert_eq!(Progress { processed: 2, total: 3 }.percent(), 67);
        assert_eq!(Progress { processed: 3, total: 3 }.percent(), 100);
        assert_eq!(Progress { processed: 0, total: 0 }.percent(), 100);
    }
}
