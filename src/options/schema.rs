//! Recognized downloader options and their command-line flags

use crate::config::DownloadOptions;
use std::fmt;

/// Name of a recognized option, matching its configuration key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum OptionName {
    PlaylistStart,
    PlaylistEnd,
    MaxDownloads,
    Username,
    Password,
    VideoPassword,
    Retries,
    Proxy,
    UserAgent,
    Referer,
    IgnoreErrors,
    WriteDescription,
    WriteInfo,
    WriteThumbnail,
    MinFilesize,
    MaxFilesize,
    WriteAllSubs,
    WriteAutoSubs,
    WriteSubs,
    KeepVideo,
    RestrictFilenames,
    SavePath,
    EmbedSubs,
    ToAudio,
    AudioFormat,
    VideoFormat,
    SubsLang,
    AudioQuality,
    YoutubeDlDebug,
    IgnoreConfig,
}

impl OptionName {
    /// Configuration key of the option
    pub fn as_str(self) -> &'static str {
        match self {
            OptionName::PlaylistStart => "playlist_start",
            OptionName::PlaylistEnd => "playlist_end",
            OptionName::MaxDownloads => "max_downloads",
            OptionName::Username => "username",
            OptionName::Password => "password",
            OptionName::VideoPassword => "video_password",
            OptionName::Retries => "retries",
            OptionName::Proxy => "proxy",
            OptionName::UserAgent => "user_agent",
            OptionName::Referer => "referer",
            OptionName::IgnoreErrors => "ignore_errors",
            OptionName::WriteDescription => "write_description",
            OptionName::WriteInfo => "write_info",
            OptionName::WriteThumbnail => "write_thumbnail",
            OptionName::MinFilesize => "min_filesize",
            OptionName::MaxFilesize => "max_filesize",
            OptionName::WriteAllSubs => "write_all_subs",
            OptionName::WriteAutoSubs => "write_auto_subs",
            OptionName::WriteSubs => "write_subs",
            OptionName::KeepVideo => "keep_video",
            OptionName::RestrictFilenames => "restrict_filenames",
            OptionName::SavePath => "save_path",
            OptionName::EmbedSubs => "embed_subs",
            OptionName::ToAudio => "to_audio",
            OptionName::AudioFormat => "audio_format",
            OptionName::VideoFormat => "video_format",
            OptionName::SubsLang => "subs_lang",
            OptionName::AudioQuality => "audio_quality",
            OptionName::YoutubeDlDebug => "youtube_dl_debug",
            OptionName::IgnoreConfig => "ignore_config",
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of an option, typed the way the schema declares it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionValue<'a> {
    /// Switch; emitted as a bare flag
    Bool(bool),
    /// Count or index
    Int(u64),
    /// Free text
    Text(&'a str),
}

impl OptionValue<'_> {
    /// Whether the option counts as enabled for requirement checks
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Bool(value) => *value,
            OptionValue::Int(value) => *value != 0,
            OptionValue::Text(value) => !value.is_empty(),
        }
    }
}

impl fmt::Display for OptionValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(value) => write!(f, "{value}"),
            OptionValue::Int(value) => write!(f, "{value}"),
            OptionValue::Text(value) => f.write_str(value),
        }
    }
}

/// One recognized option
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionEntry {
    /// Configuration key
    pub name: OptionName,
    /// Command-line flag understood by the external tool
    pub flag: &'static str,
    /// Value for which no flag is emitted
    pub default: OptionValue<'static>,
    /// Options of which at least one must be enabled (empty: always allowed)
    pub requires: &'static [OptionName],
}

impl OptionEntry {
    const fn new(name: OptionName, flag: &'static str, default: OptionValue<'static>) -> Self {
        Self {
            name,
            flag,
            default,
            requires: &[],
        }
    }

    const fn requiring(self, requires: &'static [OptionName]) -> Self {
        Self { requires, ..self }
    }

    /// Whether the option is a switch (flag only, no value token)
    pub fn is_boolean(&self) -> bool {
        matches!(self.default, OptionValue::Bool(_))
    }

    /// Whether any prerequisite option is enabled in `options`
    ///
    /// Any one prerequisite suffices: subtitles can be embedded when either
    /// "all subtitles" or "subtitles" is being written.
    pub fn requirements_satisfied(&self, options: &DownloadOptions) -> bool {
        self.requires.is_empty()
            || self
                .requires
                .iter()
                .any(|name| options.value(*name).is_truthy())
    }
}

use OptionName::*;
use OptionValue::{Bool, Int, Text};

/// Every recognized option, in emission order
///
/// The external tool lets later flags override earlier ones, so the order is
/// part of the contract.
pub static SCHEMA: [OptionEntry; 30] = [
    OptionEntry::new(PlaylistStart, "--playlist-start", Int(1)),
    OptionEntry::new(PlaylistEnd, "--playlist-end", Int(0)),
    OptionEntry::new(MaxDownloads, "--max-downloads", Int(0)),
    OptionEntry::new(Username, "-u", Text("")),
    OptionEntry::new(Password, "-p", Text("")),
    OptionEntry::new(VideoPassword, "--video-password", Text("")),
    OptionEntry::new(Retries, "-R", Int(10)),
    OptionEntry::new(Proxy, "--proxy", Text("")),
    OptionEntry::new(UserAgent, "--user-agent", Text("")),
    OptionEntry::new(Referer, "--referer", Text("")),
    OptionEntry::new(IgnoreErrors, "-i", Bool(false)),
    OptionEntry::new(WriteDescription, "--write-description", Bool(false)),
    OptionEntry::new(WriteInfo, "--write-info-json", Bool(false)),
    OptionEntry::new(WriteThumbnail, "--write-thumbnail", Bool(false)),
    OptionEntry::new(MinFilesize, "--min-filesize", Int(0)),
    OptionEntry::new(MaxFilesize, "--max-filesize", Int(0)),
    OptionEntry::new(WriteAllSubs, "--all-subs", Bool(false)),
    OptionEntry::new(WriteAutoSubs, "--write-auto-sub", Bool(false)),
    OptionEntry::new(WriteSubs, "--write-sub", Bool(false)),
    OptionEntry::new(KeepVideo, "-k", Bool(false)),
    OptionEntry::new(RestrictFilenames, "--restrict-filenames", Bool(false)),
    OptionEntry::new(SavePath, "-o", Text("")),
    OptionEntry::new(EmbedSubs, "--embed-subs", Bool(false)).requiring(&[WriteAllSubs, WriteSubs]),
    OptionEntry::new(ToAudio, "-x", Bool(false)),
    OptionEntry::new(AudioFormat, "--audio-format", Text("")).requiring(&[ToAudio]),
    OptionEntry::new(VideoFormat, "-f", Text("0")),
    OptionEntry::new(SubsLang, "--sub-lang", Text("")).requiring(&[WriteSubs]),
    OptionEntry::new(AudioQuality, "--audio-quality", Text("5")).requiring(&[ToAudio]),
    OptionEntry::new(YoutubeDlDebug, "-v", Bool(false)),
    OptionEntry::new(IgnoreConfig, "--ignore-config", Bool(false)),
];

/// Look up a schema entry by configuration key
pub fn entry(name: &str) -> Option<&'static OptionEntry> {
    SCHEMA.iter().find(|entry| entry.name.as_str() == name)
}
