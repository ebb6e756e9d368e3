//! Download job record
//!
//! A [`DownloadJob`] tracks one invocation of the external downloader. The
//! process supervisor feeds it parsed progress lines through
//! [`DownloadJob::update`]; the UI reads [`DownloadJob::progress`].
//!
//! ## Lifecycle
//!
//! ```text
//! Queued ──► Active ──► Completed
//!               │
//!               └─────► Error
//! ```
//!
//! `Paused` can be entered and left independently through
//! [`DownloadJob::set_stage`]. Reported status text drives the other
//! transitions; status text outside the known set leaves the stage alone.

use crate::error::{Error, Result};
use crate::types::{FileSegment, JobId, ProgressSnapshot, ProgressUpdate, Stage, Status};
use crate::utils::{format_bytes, parse_bytes};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// One download and everything reported about it so far
///
/// Two jobs are equal when they share URL and option list; progress, stage and
/// recorded files do not take part in the comparison.
#[derive(Clone, Debug)]
pub struct DownloadJob {
    id: JobId,
    url: String,
    options: Vec<String>,
    path: PathBuf,
    segments: Vec<FileSegment>,
    stage: Stage,
    progress: ProgressSnapshot,
}

impl DownloadJob {
    /// Create a queued job for `url`, to be run with the given argument list
    pub fn new(url: impl Into<String>, options: Vec<String>) -> Self {
        let url = url.into();
        let id = JobId::derive(&url, options.as_slice());
        let progress = ProgressSnapshot::initial(&url);

        Self {
            id,
            url,
            options,
            path: PathBuf::new(),
            segments: Vec::new(),
            stage: Stage::Queued,
            progress,
        }
    }

    /// Stable identifier derived from URL and options
    pub fn id(&self) -> JobId {
        self.id
    }

    /// URL handed to the external tool
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Argument list the job runs with
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Destination directory last reported by the tool (empty until reported)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current coarse stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Force the job into `stage`
    ///
    /// The snapshot status is rewritten to match, e.g. `Completed` shows
    /// "Finished".
    pub fn set_stage(&mut self, stage: Stage) {
        tracing::debug!(job_id = %self.id, from = %self.stage, to = %stage, "stage set");
        self.stage = stage;
        self.progress.status = stage.status_text().to_string();
    }

    /// Display snapshot
    ///
    /// Borrowed from the job; clone it to keep it across updates.
    pub fn progress(&self) -> &ProgressSnapshot {
        &self.progress
    }

    /// Files reported so far, in order
    pub fn segments(&self) -> &[FileSegment] {
        &self.segments
    }

    /// Reported file names, in order
    pub fn filenames(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| segment.filename.as_deref())
            .collect()
    }

    /// Reported extensions, in order
    pub fn extensions(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| segment.extension.as_deref())
            .collect()
    }

    /// Recorded file sizes in bytes, in order
    pub fn filesizes(&self) -> Vec<f64> {
        self.segments
            .iter()
            .filter_map(|segment| segment.size)
            .collect()
    }

    /// Full paths of the files whose name and extension are both known
    pub fn files(&self) -> Vec<PathBuf> {
        self.segments
            .iter()
            .filter_map(FileSegment::file_name)
            .map(|name| self.path.join(name))
            .collect()
    }

    /// Apply one parsed progress line
    ///
    /// Absent and empty fields leave the job untouched. A `filename` or
    /// `extension` starts the next file segment. A `filesize` lands on the
    /// segment opened by this call's extension, otherwise it refreshes the last
    /// recorded size. A "Post Processing" status after two or more separately
    /// downloaded streams records their combined size as the merged file, and
    /// every "Post Processing" status closes the files seen so far: later
    /// names and sizes never touch them.
    ///
    /// # Errors
    ///
    /// [`Error::UnitParse`] when `filesize` cannot be read. The error is
    /// returned only after every other field has been applied.
    pub fn update(&mut self, update: &ProgressUpdate) -> Result<()> {
        if let Some(path) = &update.path {
            self.path = PathBuf::from(path);
        }

        if let Some(filename) = non_empty(&update.filename) {
            let index = self.next_slot(|segment| segment.filename.is_some());
            self.segments[index].filename = Some(filename.to_string());
        }

        let opened = non_empty(&update.extension).map(|extension| {
            let index = self.next_slot(|segment| segment.extension.is_some());
            self.segments[index].extension = Some(extension.to_string());
            index
        });

        let mut outcome = Ok(());
        if let Some(text) = non_empty(&update.filesize) {
            match parse_bytes(text) {
                Ok(bytes) => self.record_size(bytes, opened),
                Err(e) => {
                    tracing::warn!(job_id = %self.id, filesize = text, "ignoring unparseable filesize");
                    outcome = Err(e);
                }
            }
        }

        let fields = [
            (&update.filename, &mut self.progress.filename),
            (&update.extension, &mut self.progress.extension),
            (&update.filesize, &mut self.progress.filesize),
            (&update.percent, &mut self.progress.percent),
            (&update.speed, &mut self.progress.speed),
            (&update.eta, &mut self.progress.eta),
            (&update.playlist_size, &mut self.progress.playlist_size),
            (&update.playlist_index, &mut self.progress.playlist_index),
        ];
        for (source, target) in fields {
            if let Some(value) = non_empty(source) {
                value.clone_into(target);
            }
        }

        if let Some(status) = non_empty(&update.status) {
            status.clone_into(&mut self.progress.status);

            if status == Status::PostProcessing.as_str() {
                if let Some(total) = self.merge_streams() {
                    tracing::debug!(job_id = %self.id, bytes = total, "recorded merged file size");
                    self.progress.filesize = format_bytes(total);
                }
                if let Some(last) = self.segments.last_mut() {
                    last.closed = true;
                }
            }

            match Stage::classify(status) {
                Some(stage) => {
                    if stage != self.stage {
                        tracing::debug!(job_id = %self.id, from = %self.stage, to = %stage, status, "stage changed");
                    }
                    self.stage = stage;
                }
                None => {
                    tracing::debug!(job_id = %self.id, status, "unrecognized status, stage unchanged");
                }
            }
        }

        outcome
    }

    /// Apply a loosely typed progress mapping
    ///
    /// # Errors
    ///
    /// [`Error::MalformedInput`] when `value` is not a JSON object, otherwise as
    /// [`DownloadJob::update`].
    pub fn update_value(&mut self, value: &serde_json::Value) -> Result<()> {
        let update = ProgressUpdate::from_value(value)?;
        self.update(&update)
    }

    /// Return the job to its freshly constructed state
    ///
    /// # Errors
    ///
    /// [`Error::IllegalReset`] while the job is [`Stage::Active`].
    pub fn reset(&mut self) -> Result<()> {
        if self.stage == Stage::Active {
            return Err(Error::IllegalReset { id: self.id });
        }

        tracing::debug!(job_id = %self.id, from = %self.stage, "resetting job");
        self.stage = Stage::Queued;
        self.path = PathBuf::new();
        self.segments.clear();
        self.progress = ProgressSnapshot::initial(&self.url);
        Ok(())
    }

    /// Index of the first segment after the last closed one
    fn open_start(&self) -> usize {
        self.segments
            .iter()
            .rposition(|segment| segment.closed)
            .map_or(0, |index| index + 1)
    }

    /// Index of the first open segment lacking the part `has` checks for,
    /// opening a new segment when every open one already has it
    fn next_slot(&mut self, has: impl Fn(&FileSegment) -> bool) -> usize {
        let start = self.open_start();
        let index = start
            + self.segments[start..]
                .iter()
                .take_while(|segment| has(segment))
                .count();
        if index == self.segments.len() {
            self.segments.push(FileSegment::default());
        }
        index
    }

    fn record_size(&mut self, bytes: f64, opened: Option<usize>) {
        let start = self.open_start();
        let index = match opened {
            Some(index) => index,
            None => match self.segments[start..].iter().rposition(|s| s.size.is_some()) {
                Some(offset) => start + offset,
                None => {
                    if self.segments.len() == start {
                        self.segments.push(FileSegment::default());
                    }
                    self.segments.len() - 1
                }
            },
        };
        self.segments[index].size = Some(bytes);
    }

    /// Record the size of a merged output file
    ///
    /// Sums the sizes recorded since the last closed segment. The total goes
    /// to the newest segment when it has no size yet (the merge target was
    /// reported), otherwise to a new segment of its own.
    fn merge_streams(&mut self) -> Option<f64> {
        let start = self.open_start();
        let parts: Vec<f64> = self.segments[start..]
            .iter()
            .filter_map(|segment| segment.size)
            .collect();
        if parts.len() < 2 {
            return None;
        }
        let total: f64 = parts.iter().sum();

        match self.segments.last_mut() {
            Some(last) if last.size.is_none() => {
                last.size = Some(total);
                last.merged = true;
            }
            _ => self.segments.push(FileSegment {
                size: Some(total),
                merged: true,
                ..FileSegment::default()
            }),
        }
        Some(total)
    }
}

impl PartialEq for DownloadJob {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.options == other.options
    }
}

impl Eq for DownloadJob {}

impl Hash for DownloadJob {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
        self.options.hash(state);
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}
