//! Downloader argument compilation
//!
//! The external tool is configured entirely through command-line flags. This
//! module holds the fixed, ordered [`SCHEMA`] of recognized options and the
//! [`OptionsCompiler`] that walks it.
//!
//! ## Rules
//!
//! - The first argument is always [`STREAMING_FLAG`].
//! - An option is emitted only when it differs from its schema default and at
//!   least one of its prerequisites (if it declares any) is enabled.
//! - Switches emit the flag alone; every other option emits flag and value.
//! - `cmd_args` is split on whitespace and appended last.
//!
//! ## Usage
//!
//! ```
//! use ydl_job::{DownloadOptions, OptionsCompiler};
//!
//! let compiler = OptionsCompiler::with_home_dir("/home/user");
//! let options = DownloadOptions {
//!     save_path: "/downloads".into(),
//!     output_template: "%(title)s.%(ext)s".into(),
//!     cmd_args: "--geo-bypass".into(),
//!     ..Default::default()
//! };
//!
//! assert_eq!(
//!     compiler.compile(&options),
//!     ["--newline", "-o", "/downloads/%(title)s.%(ext)s", "--geo-bypass"]
//! );
//! ```

mod compiler;
mod schema;

pub use compiler::{OptionsCompiler, STREAMING_FLAG};
pub use schema::{OptionEntry, OptionName, OptionValue, SCHEMA, entry};
