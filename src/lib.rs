//! # ydl-job
//!
//! Job tracking and argument compilation for a front end that drives an
//! external video downloader.
//!
//! ## Overview
//!
//! - [`DownloadJob`] holds one download: its URL, the argument list it runs
//!   with, the files it produced and a display-ready [`ProgressSnapshot`].
//!   Parsed progress lines arrive as [`ProgressUpdate`]s.
//! - [`OptionsCompiler`] turns the user's [`DownloadOptions`] into that
//!   argument list.
//! - [`JobQueue`] keeps jobs in display order and picks the next one to run.
//!
//! Spawning the process and parsing its output happen elsewhere; this crate is
//! synchronous and does no I/O.
//!
//! ## Quick Start
//!
//! ```
//! use ydl_job::{DownloadJob, DownloadOptions, JobQueue, OptionsCompiler, ProgressUpdate, Stage};
//!
//! let options = DownloadOptions {
//!     save_path: "/downloads".into(),
//!     to_audio: true,
//!     audio_format: "mp3".into(),
//!     ..Default::default()
//! };
//! let args = OptionsCompiler::new().compile(&options);
//!
//! let mut queue = JobQueue::new();
//! let id = queue.push(DownloadJob::new("https://example.com/watch?v=1", args))?;
//!
//! let job = queue.fetch_next().expect("job was just queued");
//! let update: ProgressUpdate = [("status", "Downloading"), ("percent", "12.5%")]
//!     .into_iter()
//!     .collect();
//! job.update(&update)?;
//!
//! let job = queue.get(id).expect("job is registered");
//! assert_eq!(job.stage(), Stage::Active);
//! assert_eq!(job.progress().percent, "12.5%");
//! # Ok::<(), ydl_job::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Downloader configuration
pub mod config;
/// Error types
pub mod error;
/// Download job record
pub mod job;
/// Option schema and argument compilation
pub mod options;
/// Job registry
pub mod queue;
/// Identifiers, stages and progress records
pub mod types;
/// Size and path helpers
pub mod utils;

// Re-export commonly used types
pub use config::{DownloadOptions, OutputFormat};
pub use error::{Error, Result};
pub use job::DownloadJob;
pub use options::{OptionEntry, OptionName, OptionValue, OptionsCompiler, SCHEMA, STREAMING_FLAG};
pub use queue::JobQueue;
pub use types::{FileSegment, JobId, ProgressSnapshot, ProgressUpdate, Stage, Status};
