//! Turns [`DownloadOptions`] into the external tool's argument list

use super::schema::{OptionName, OptionValue, SCHEMA};
use crate::config::DownloadOptions;
use crate::error::Result;
use crate::utils::{expand_shortcuts, home_dir};
use std::path::{Path, PathBuf};

/// Leading argument; makes the tool print every progress update on its own line
pub const STREAMING_FLAG: &str = "--newline";

/// Builds argument lists for the external downloader
///
/// Compiling is pure: the same options always give the same arguments, and
/// the options are never modified. The home directory used to expand `~` is
/// captured when the compiler is created.
///
/// # Examples
///
/// ```
/// use ydl_job::{DownloadOptions, OptionsCompiler};
///
/// let compiler = OptionsCompiler::with_home_dir("/home/user");
/// let options = DownloadOptions {
///     to_audio: true,
///     audio_format: "mp3".into(),
///     ..Default::default()
/// };
///
/// let args = compiler.compile(&options);
/// assert_eq!(args[0], "--newline");
/// assert!(args.windows(2).any(|pair| pair == ["--audio-format", "mp3"]));
/// ```
#[derive(Clone, Debug)]
pub struct OptionsCompiler {
    home_dir: Option<PathBuf>,
}

impl OptionsCompiler {
    /// Create a compiler that expands `~` to the current user's home directory
    pub fn new() -> Self {
        Self {
            home_dir: home_dir(),
        }
    }

    /// Create a compiler with an explicit home directory
    pub fn with_home_dir(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: Some(home_dir.into()),
        }
    }

    /// Home directory used for `~` expansion
    pub fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }

    /// Compile options into an argument list, ready to pass to the process
    /// without shell quoting
    pub fn compile(&self, options: &DownloadOptions) -> Vec<String> {
        let derived = Derived::new(options, self.home_dir.as_deref());
        let mut args = vec![STREAMING_FLAG.to_string()];

        for entry in &SCHEMA {
            if !entry.requirements_satisfied(options) {
                continue;
            }

            let value = derived.value(options, entry.name);
            if value != entry.default {
                args.push(entry.flag.to_string());
                if !entry.is_boolean() {
                    args.push(value.to_string());
                }
            }
        }

        args.extend(options.cmd_args.split_whitespace().map(str::to_string));

        tracing::debug!(tokens = args.len(), "compiled downloader arguments");
        args
    }

    /// Compile a loosely typed configuration mapping
    ///
    /// # Errors
    ///
    /// [`Error::MissingConfigKey`](crate::Error::MissingConfigKey) when a
    /// recognized key is absent, or as
    /// [`DownloadOptions::from_value`].
    pub fn compile_value(&self, config: &serde_json::Value) -> Result<Vec<String>> {
        let options = DownloadOptions::from_value(config)?;
        Ok(self.compile(&options))
    }
}

impl Default for OptionsCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Option values that depend on more than one configuration key
struct Derived {
    save_path: String,
    video_format: Option<String>,
    min_filesize: Option<String>,
    max_filesize: Option<String>,
}

impl Derived {
    fn new(options: &DownloadOptions, home: Option<&Path>) -> Self {
        let directory = expand_shortcuts(&options.save_path, home);
        let template = options.output_format.template(&options.output_template);
        let save_path = Path::new(&directory)
            .join(template)
            .to_string_lossy()
            .into_owned();

        let video_format = (options.video_format != "0" && options.second_video_format != "0")
            .then(|| format!("{}+{}", options.video_format, options.second_video_format));

        let threshold = |size: u64, unit: &str| (size != 0).then(|| format!("{size}{unit}"));

        Self {
            save_path,
            video_format,
            min_filesize: threshold(options.min_filesize, &options.min_filesize_unit),
            max_filesize: threshold(options.max_filesize, &options.max_filesize_unit),
        }
    }

    fn value<'a>(&'a self, options: &'a DownloadOptions, name: OptionName) -> OptionValue<'a> {
        let derived = match name {
            OptionName::SavePath => Some(&self.save_path),
            OptionName::VideoFormat => self.video_format.as_ref(),
            OptionName::MinFilesize => self.min_filesize.as_ref(),
            OptionName::MaxFilesize => self.max_filesize.as_ref(),
            _ => None,
        };
        match derived {
            Some(text) => OptionValue::Text(text),
            None => options.value(name),
        }
    }
}
