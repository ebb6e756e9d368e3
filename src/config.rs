//! Configuration types for ydl-job

use crate::error::{Error, Result};
use crate::options::{OptionName, OptionValue};
use serde::{Deserialize, Serialize};

/// How output files are named
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputFormat {
    /// `%(id)s.%(ext)s`
    Id,
    /// `%(title)s.%(ext)s`
    Title,
    /// The configured `output_template`; holds the raw configuration value
    Custom(String),
}

impl OutputFormat {
    /// Naming template for this format, falling back to `custom_template`
    pub fn template<'a>(&self, custom_template: &'a str) -> &'a str {
        match self {
            OutputFormat::Id => "%(id)s.%(ext)s",
            OutputFormat::Title => "%(title)s.%(ext)s",
            OutputFormat::Custom(_) => custom_template,
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Custom("custom".into())
    }
}

impl From<String> for OutputFormat {
    fn from(value: String) -> Self {
        match value.as_str() {
            "id" => OutputFormat::Id,
            "title" => OutputFormat::Title,
            _ => OutputFormat::Custom(value),
        }
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Id => "id".into(),
            OutputFormat::Title => "title".into(),
            OutputFormat::Custom(value) => value,
        }
    }
}

/// Everything the argument compiler reads
///
/// Each schema option has a field of the same name, plus the auxiliary keys
/// that shape derived values. A loose mapping must carry every key; see
/// [`DownloadOptions::from_value`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// First playlist entry to download (1-based)
    pub playlist_start: u64,
    /// Last playlist entry to download (0 = until the end)
    pub playlist_end: u64,
    /// Stop after this many files (0 = unlimited)
    pub max_downloads: u64,
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
    /// Password of a protected video
    pub video_password: String,
    /// Retry count for failed transfers
    pub retries: u64,
    /// Proxy URL
    pub proxy: String,
    /// User-Agent override
    pub user_agent: String,
    /// Referer override
    pub referer: String,
    /// Continue a playlist after a failing entry
    pub ignore_errors: bool,
    /// Write the video description to a file
    pub write_description: bool,
    /// Write metadata to a .info.json file
    pub write_info: bool,
    /// Write the thumbnail image
    pub write_thumbnail: bool,
    /// Skip files smaller than this many `min_filesize_unit`s (0 = off)
    pub min_filesize: u64,
    /// Skip files larger than this many `max_filesize_unit`s (0 = off)
    pub max_filesize: u64,
    /// Download every available subtitle
    pub write_all_subs: bool,
    /// Download automatic captions
    pub write_auto_subs: bool,
    /// Download subtitles in `subs_lang`
    pub write_subs: bool,
    /// Keep the video after audio extraction
    pub keep_video: bool,
    /// Restrict file names to ASCII without spaces
    pub restrict_filenames: bool,
    /// Destination directory; `~` segments expand to the home directory
    pub save_path: String,
    /// Embed downloaded subtitles into the video
    pub embed_subs: bool,
    /// Extract the audio track
    pub to_audio: bool,
    /// Audio codec for extraction
    pub audio_format: String,
    /// Primary format selector ("0" = tool default)
    pub video_format: String,
    /// Subtitle language code
    pub subs_lang: String,
    /// Audio quality for extraction ("0" best to "9" worst)
    pub audio_quality: String,
    /// Verbose tool output
    pub youtube_dl_debug: bool,
    /// Ignore the tool's own configuration files
    pub ignore_config: bool,

    /// Extra arguments, split on whitespace and appended verbatim
    pub cmd_args: String,
    /// File naming mode
    pub output_format: OutputFormat,
    /// Naming template used when `output_format` is custom
    pub output_template: String,
    /// Secondary format selector merged with `video_format` ("0" = none)
    pub second_video_format: String,
    /// Unit suffix for `min_filesize` ("k", "m", ...)
    pub min_filesize_unit: String,
    /// Unit suffix for `max_filesize`
    pub max_filesize_unit: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            playlist_start: 1,
            playlist_end: 0,
            max_downloads: 0,
            username: String::new(),
            password: String::new(),
            video_password: String::new(),
            retries: 10,
            proxy: String::new(),
            user_agent: String::new(),
            referer: String::new(),
            ignore_errors: false,
            write_description: false,
            write_info: false,
            write_thumbnail: false,
            min_filesize: 0,
            max_filesize: 0,
            write_all_subs: false,
            write_auto_subs: false,
            write_subs: false,
            keep_video: false,
            restrict_filenames: false,
            save_path: default_save_path(),
            embed_subs: false,
            to_audio: false,
            audio_format: String::new(),
            video_format: "0".into(),
            subs_lang: "en".into(),
            audio_quality: "5".into(),
            youtube_dl_debug: false,
            ignore_config: false,
            cmd_args: String::new(),
            output_format: OutputFormat::default(),
            output_template: default_output_template(),
            second_video_format: "0".into(),
            min_filesize_unit: String::new(),
            max_filesize_unit: String::new(),
        }
    }
}

impl DownloadOptions {
    /// Every key a configuration mapping must carry, in declaration order
    pub const KEYS: [&'static str; 36] = [
        "playlist_start",
        "playlist_end",
        "max_downloads",
        "username",
        "password",
        "video_password",
        "retries",
        "proxy",
        "user_agent",
        "referer",
        "ignore_errors",
        "write_description",
        "write_info",
        "write_thumbnail",
        "min_filesize",
        "max_filesize",
        "write_all_subs",
        "write_auto_subs",
        "write_subs",
        "keep_video",
        "restrict_filenames",
        "save_path",
        "embed_subs",
        "to_audio",
        "audio_format",
        "video_format",
        "subs_lang",
        "audio_quality",
        "youtube_dl_debug",
        "ignore_config",
        "cmd_args",
        "output_format",
        "output_template",
        "second_video_format",
        "min_filesize_unit",
        "max_filesize_unit",
    ];

    /// Build options from a loosely typed configuration mapping
    ///
    /// Keys outside [`DownloadOptions::KEYS`] (window geometry, shutdown
    /// preferences and other UI settings) are ignored.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingConfigKey`] naming the first absent key
    /// - [`Error::Config`] when the value is not a mapping or a key has the
    ///   wrong type
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| Error::Config {
            message: "configuration must be a mapping".into(),
            key: None,
        })?;

        if let Some(key) = Self::KEYS.iter().find(|key| !map.contains_key(**key)) {
            return Err(Error::MissingConfigKey {
                key: (*key).to_string(),
            });
        }

        Self::deserialize(value).map_err(|e| Error::Config {
            message: e.to_string(),
            key: None,
        })
    }

    /// Parse options from JSON text
    ///
    /// # Errors
    ///
    /// [`Error::Serialization`] for invalid JSON, otherwise as
    /// [`DownloadOptions::from_value`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Configured value of a schema option
    pub fn value(&self, name: OptionName) -> OptionValue<'_> {
        use OptionValue::{Bool, Int, Text};

        match name {
            OptionName::PlaylistStart => Int(self.playlist_start),
            OptionName::PlaylistEnd => Int(self.playlist_end),
            OptionName::MaxDownloads => Int(self.max_downloads),
            OptionName::Username => Text(&self.username),
            OptionName::Password => Text(&self.password),
            OptionName::VideoPassword => Text(&self.video_password),
            OptionName::Retries => Int(self.retries),
            OptionName::Proxy => Text(&self.proxy),
            OptionName::UserAgent => Text(&self.user_agent),
            OptionName::Referer => Text(&self.referer),
            OptionName::IgnoreErrors => Bool(self.ignore_errors),
            OptionName::WriteDescription => Bool(self.write_description),
            OptionName::WriteInfo => Bool(self.write_info),
            OptionName::WriteThumbnail => Bool(self.write_thumbnail),
            OptionName::MinFilesize => Int(self.min_filesize),
            OptionName::MaxFilesize => Int(self.max_filesize),
            OptionName::WriteAllSubs => Bool(self.write_all_subs),
            OptionName::WriteAutoSubs => Bool(self.write_auto_subs),
            OptionName::WriteSubs => Bool(self.write_subs),
            OptionName::KeepVideo => Bool(self.keep_video),
            OptionName::RestrictFilenames => Bool(self.restrict_filenames),
            OptionName::SavePath => Text(&self.save_path),
            OptionName::EmbedSubs => Bool(self.embed_subs),
            OptionName::ToAudio => Bool(self.to_audio),
            OptionName::AudioFormat => Text(&self.audio_format),
            OptionName::VideoFormat => Text(&self.video_format),
            OptionName::SubsLang => Text(&self.subs_lang),
            OptionName::AudioQuality => Text(&self.audio_quality),
            OptionName::YoutubeDlDebug => Bool(self.youtube_dl_debug),
            OptionName::IgnoreConfig => Bool(self.ignore_config),
        }
    }
}

// Default value functions
fn default_save_path() -> String {
    "~".into()
}

fn default_output_template() -> String {
    "%(uploader)s/%(title)s.%(ext)s".into()
}
