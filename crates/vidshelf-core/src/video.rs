use jiff::Timestamp;
use serde::Serialize;

/// Shortest title accepted by an update.
pub const MIN_TITLE_CHARS: usize = 2;
/// Shortest video length, in seconds, accepted by an update.
pub const MIN_VIDEO_LENGTH_SECS: f64 = 30.0;

/// A stored video record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Client-supplied primary key.
    pub id: String,
    pub title: String,
    /// Length in seconds.
    pub video_length: f64,
    /// Assigned by the server when the video is created.
    pub uploaded_at: Timestamp,
}

/// Returns the current time truncated to millisecond precision.
///
/// Upload timestamps are persisted as Unix milliseconds, so stamping with
/// anything finer would not survive a round trip through the store.
pub fn upload_timestamp() -> Timestamp {
    let now = Timestamp::now();
    Timestamp::from_millisecond(now.as_millisecond()).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_timestamp_has_no_sub_millisecond_part() {
        let ts = upload_timestamp();
        assert_eq!(ts.subsec_nanosecond() % 1_000_000, 0);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let video = Video {
            id: "v1".to_string(),
            title: "Intro".to_string(),
            video_length: 95.0,
            uploaded_at: Timestamp::from_second(1_700_000_000).unwrap(),
        };

        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["id"], "v1");
        assert_eq!(json["videoLength"], 95.0);
        assert_eq!(json["uploadedAt"], "2023-11-14T22:13:20Z");
    }
}
