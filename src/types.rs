//! Core types for ydl-job

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a download job
///
/// Derived from the job's URL and option list only, so two jobs describing the
/// same download always share an identifier. Collaborators use it as a
/// registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl JobId {
    /// Create a JobId from its raw value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Derive the identifier of a job from its URL and ordered option list
    pub fn derive<S: AsRef<str>>(url: &str, options: &[S]) -> Self {
        let mut hasher = Sha256::new();
        // Length prefixes keep ("ab", ["c"]) and ("a", ["bc"]) apart
        hasher.update((url.len() as u64).to_be_bytes());
        hasher.update(url.as_bytes());
        for option in options {
            let option = option.as_ref();
            hasher.update((option.len() as u64).to_be_bytes());
            hasher.update(option.as_bytes());
        }
        let digest = hasher.finalize();

        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        Self(u64::from_be_bytes(prefix))
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for JobId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(u64::from_str_radix(s, 16)?))
    }
}

/// Coarse job state shown to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Waiting to be started
    Queued,
    /// The external process is running
    Active,
    /// Paused by the user
    Paused,
    /// Finished successfully (including "already downloaded")
    Completed,
    /// Failed, stopped, or aborted
    Error,
}

impl Stage {
    /// All stages, in lifecycle order
    pub const ALL: [Stage; 5] = [
        Stage::Queued,
        Stage::Active,
        Stage::Paused,
        Stage::Completed,
        Stage::Error,
    ];

    /// Stage name as displayed and accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Queued => "Queued",
            Stage::Active => "Active",
            Stage::Paused => "Paused",
            Stage::Completed => "Completed",
            Stage::Error => "Error",
        }
    }

    /// Status text written to the progress snapshot when the stage is set
    /// directly rather than through a reported status
    pub fn status_text(self) -> &'static str {
        match self {
            Stage::Queued => "Queued",
            Stage::Active => Status::PreProcessing.as_str(),
            Stage::Paused => "Paused",
            Stage::Completed => Status::Finished.as_str(),
            Stage::Error => Status::Error.as_str(),
        }
    }

    /// Map a raw status line onto a stage
    ///
    /// Returns `None` for status text outside the known set. Callers leave the
    /// stage untouched in that case.
    pub fn classify(status: &str) -> Option<Stage> {
        status.parse::<Status>().ok().map(Status::stage)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| Error::InvalidStage(s.to_string()))
    }
}

/// Fine-grained status reported by the external tool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Extracting information before the download starts
    PreProcessing,
    /// Transferring data
    Downloading,
    /// Merging or converting downloaded streams
    PostProcessing,
    /// Done
    Finished,
    /// Done, with warnings
    Warning,
    /// Output file was already present
    AlreadyDownloaded,
    /// Tool reported an error
    Error,
    /// Stopped by the user
    Stopped,
    /// Skipped because of the min/max filesize limits
    FilesizeAbort,
}

impl Status {
    /// All known statuses
    pub const ALL: [Status; 9] = [
        Status::PreProcessing,
        Status::Downloading,
        Status::PostProcessing,
        Status::Finished,
        Status::Warning,
        Status::AlreadyDownloaded,
        Status::Error,
        Status::Stopped,
        Status::FilesizeAbort,
    ];

    /// Status text exactly as it appears in progress reports
    pub fn as_str(self) -> &'static str {
        match self {
            Status::PreProcessing => "Pre Processing",
            Status::Downloading => "Downloading",
            Status::PostProcessing => "Post Processing",
            Status::Finished => "Finished",
            Status::Warning => "Warning",
            Status::AlreadyDownloaded => "Already Downloaded",
            Status::Error => "Error",
            Status::Stopped => "Stopped",
            Status::FilesizeAbort => "Filesize Abort",
        }
    }

    /// Stage this status drives the job into
    pub fn stage(self) -> Stage {
        match self {
            Status::PreProcessing | Status::Downloading | Status::PostProcessing => Stage::Active,
            Status::Finished | Status::Warning | Status::AlreadyDownloaded => Stage::Completed,
            Status::Error | Status::Stopped | Status::FilesizeAbort => Stage::Error,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}

/// One physical file produced by a job
///
/// Multi-format downloads write the video and audio streams to separate files
/// before merging them, and playlists produce one or more files per entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSegment {
    /// File name without extension
    pub filename: Option<String>,
    /// Extension including the leading dot (".mp4")
    pub extension: Option<String>,
    /// Recorded size in bytes
    pub size: Option<f64>,
    /// Whether `size` holds the combined size of a merge
    #[serde(default)]
    pub merged: bool,
    /// Post-processing ran after this file; later reports start new segments
    #[serde(default)]
    pub closed: bool,
}

impl FileSegment {
    /// `filename` + `extension`, once both are known
    pub fn file_name(&self) -> Option<String> {
        match (&self.filename, &self.extension) {
            (Some(name), Some(ext)) => Some(format!("{name}{ext}")),
            _ => None,
        }
    }
}

/// Display-ready summary of a job
///
/// Always exactly nine text fields; the job owns its snapshot and hands out
/// borrows or clones of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Current file name (the URL until one is reported)
    pub filename: String,
    /// Current extension
    pub extension: String,
    /// Human-readable size of the current file
    pub filesize: String,
    /// Percent complete, e.g. "42.0%"
    pub percent: String,
    /// Transfer speed, e.g. "1.20MiB/s"
    pub speed: String,
    /// Estimated time remaining, e.g. "00:38"
    pub eta: String,
    /// Raw status text
    pub status: String,
    /// Number of entries in the playlist
    pub playlist_size: String,
    /// Index of the playlist entry being downloaded
    pub playlist_index: String,
}

impl ProgressSnapshot {
    /// Keys of the snapshot, in display order
    pub const KEYS: [&'static str; 9] = [
        "filename",
        "extension",
        "filesize",
        "percent",
        "speed",
        "eta",
        "status",
        "playlist_size",
        "playlist_index",
    ];

    /// Snapshot of a job that has not started yet
    pub fn initial(url: &str) -> Self {
        Self {
            filename: url.to_string(),
            extension: "-".into(),
            filesize: "-".into(),
            percent: "0%".into(),
            speed: "-".into(),
            eta: "-".into(),
            status: Stage::Queued.status_text().into(),
            playlist_size: String::new(),
            playlist_index: String::new(),
        }
    }

    /// Key/value pairs in display order
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("filename", &self.filename),
            ("extension", &self.extension),
            ("filesize", &self.filesize),
            ("percent", &self.percent),
            ("speed", &self.speed),
            ("eta", &self.eta),
            ("status", &self.status),
            ("playlist_size", &self.playlist_size),
            ("playlist_index", &self.playlist_index),
        ]
    }

    /// Look up a field by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

/// One parsed progress line
///
/// Every field is optional; absent and empty fields leave the job untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Output file name without extension
    pub filename: Option<String>,
    /// Output file extension, with leading dot
    pub extension: Option<String>,
    /// Human-readable size ("9.45MiB", "~3.10GiB")
    pub filesize: Option<String>,
    /// Percent complete
    pub percent: Option<String>,
    /// Transfer speed
    pub speed: Option<String>,
    /// Estimated time remaining
    pub eta: Option<String>,
    /// Raw status text
    pub status: Option<String>,
    /// Destination directory
    pub path: Option<String>,
    /// Number of entries in the playlist
    pub playlist_size: Option<String>,
    /// Index of the current playlist entry
    pub playlist_index: Option<String>,
}

impl ProgressUpdate {
    /// Keys accepted in an update mapping
    pub const KEYS: [&'static str; 10] = [
        "filename",
        "extension",
        "filesize",
        "percent",
        "speed",
        "eta",
        "status",
        "path",
        "playlist_size",
        "playlist_index",
    ];

    /// Build an update from a loosely typed mapping
    ///
    /// The value must be a JSON object. Non-string values and unknown keys are
    /// dropped, so a misbehaving line parser cannot corrupt the snapshot.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            Error::MalformedInput(format!("expected a mapping, got {}", json_kind(value)))
        })?;

        let mut update = Self::default();
        for (key, value) in map {
            match value.as_str() {
                Some(text) => {
                    if !update.set(key, text) {
                        tracing::debug!(key = %key, "ignoring unknown progress field");
                    }
                }
                None => {
                    tracing::debug!(key = %key, kind = json_kind(value), "ignoring non-string progress field");
                }
            }
        }
        Ok(update)
    }

    /// Set a field by key, returning `false` for unknown keys
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key {
            "filename" => &mut self.filename,
            "extension" => &mut self.extension,
            "filesize" => &mut self.filesize,
            "percent" => &mut self.percent,
            "speed" => &mut self.speed,
            "eta" => &mut self.eta,
            "status" => &mut self.status,
            "path" => &mut self.path,
            "playlist_size" => &mut self.playlist_size,
            "playlist_index" => &mut self.playlist_index,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ProgressUpdate {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut update = Self::default();
        for (key, value) in iter {
            if !update.set(key.as_ref(), value) {
                tracing::debug!(key = key.as_ref(), "ignoring unknown progress field");
            }
        }
        update
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // --- JobId ---

    #[test]
    fn job_id_is_a_pure_function_of_url_and_options() {
        let a = JobId::derive("url", &["-f", "flv"]);
        let b = JobId::derive("url", &["-f".to_string(), "flv".to_string()]);
        assert_eq!(a, b, "same inputs must derive the same id");

        assert_ne!(a, JobId::derive("url2", &["-f", "flv"]));
        assert_ne!(a, JobId::derive("url", &["-f", "mp4"]));
        assert_ne!(
            a,
            JobId::derive("url", &["-fflv"]),
            "option boundaries must be part of the identity"
        );
    }

    #[test]
    fn job_id_display_round_trips_through_from_str() {
        let id = JobId::derive("https://example.com/watch?v=1", &["-x"]);
        let text = id.to_string();
        assert_eq!(text.len(), 16, "display is zero-padded hex");
        assert_eq!(text.parse::<JobId>().unwrap(), id);
        assert!("not-hex".parse::<JobId>().is_err());
    }

    // --- Stage ---

    #[test]
    fn stage_from_str_accepts_the_closed_set() {
        for stage in Stage::ALL {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);
        }
    }

    #[test]
    fn stage_from_str_rejects_anything_else() {
        for text in ["some other status", "queued", "", "Downloading"] {
            let err = text.parse::<Stage>().unwrap_err();
            assert!(
                matches!(err, Error::InvalidStage(ref s) if s == text),
                "{text:?} should be rejected with InvalidStage, got {err:?}"
            );
        }
    }

    #[test]
    fn status_classification_table() {
        for status in ["Pre Processing", "Downloading", "Post Processing"] {
            assert_eq!(Stage::classify(status), Some(Stage::Active), "{status}");
        }
        for status in ["Finished", "Warning", "Already Downloaded"] {
            assert_eq!(Stage::classify(status), Some(Stage::Completed), "{status}");
        }
        for status in ["Error", "Stopped", "Filesize Abort"] {
            assert_eq!(Stage::classify(status), Some(Stage::Error), "{status}");
        }
    }

    #[test]
    fn unknown_status_is_not_classified() {
        assert_eq!(Stage::classify("Paused"), None);
        assert_eq!(Stage::classify("downloading"), None);
        assert_eq!(Stage::classify(""), None);
    }

    #[test]
    fn status_text_for_direct_stage_changes() {
        assert_eq!(Stage::Queued.status_text(), "Queued");
        assert_eq!(Stage::Active.status_text(), "Pre Processing");
        assert_eq!(Stage::Completed.status_text(), "Finished");
        assert_eq!(Stage::Paused.status_text(), "Paused");
        assert_eq!(Stage::Error.status_text(), "Error");
    }

    // --- ProgressSnapshot ---

    #[test]
    fn initial_snapshot_defaults() {
        let snapshot = ProgressSnapshot::initial("url");
        let expected = [
            ("filename", "url"),
            ("extension", "-"),
            ("filesize", "-"),
            ("percent", "0%"),
            ("speed", "-"),
            ("eta", "-"),
            ("status", "Queued"),
            ("playlist_size", ""),
            ("playlist_index", ""),
        ];
        assert_eq!(snapshot.entries(), expected);
    }

    #[test]
    fn snapshot_serializes_with_exactly_nine_keys() {
        let value = serde_json::to_value(ProgressSnapshot::initial("url")).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut expected = ProgressSnapshot::KEYS.to_vec();
        expected.sort_unstable();
        let mut keys = keys;
        keys.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn snapshot_get_by_key() {
        let snapshot = ProgressSnapshot::initial("url");
        assert_eq!(snapshot.get("percent"), Some("0%"));
        assert_eq!(snapshot.get("path"), None, "path is not a display field");
    }

    // --- ProgressUpdate ---

    #[test]
    fn update_from_value_rejects_non_mappings() {
        for value in [json!([]), json!("Downloading"), json!(null), json!(3)] {
            let err = ProgressUpdate::from_value(&value).unwrap_err();
            assert!(
                matches!(err, Error::MalformedInput(_)),
                "{value} should be MalformedInput, got {err:?}"
            );
        }
    }

    #[test]
    fn update_from_value_drops_non_strings_and_unknown_keys() {
        let update = ProgressUpdate::from_value(&json!({
            "filename": null,
            "status": 1234,
            "eta": false,
            "percent": "12.5%",
            "bogus": "value",
        }))
        .unwrap();

        assert_eq!(
            update,
            ProgressUpdate {
                percent: Some("12.5%".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn update_from_flat_string_pairs() {
        let update: ProgressUpdate = [("status", "Downloading"), ("speed", "1.00MiB/s")]
            .into_iter()
            .collect();
        assert_eq!(update.status.as_deref(), Some("Downloading"));
        assert_eq!(update.speed.as_deref(), Some("1.00MiB/s"));
        assert!(update.filename.is_none());
        assert!(!update.is_empty());
        assert!(ProgressUpdate::default().is_empty());
    }

    #[test]
    fn file_segment_name_needs_both_parts() {
        let mut segment = FileSegment {
            filename: Some("clip".into()),
            ..Default::default()
        };
        assert_eq!(segment.file_name(), None);
        segment.extension = Some(".mp4".into());
        assert_eq!(segment.file_name().as_deref(), Some("clip.mp4"));
    }
}
