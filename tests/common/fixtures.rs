//! Progress-line sequences and configuration documents

use serde_json::{Value, json};
use ydl_job::{DownloadJob, ProgressUpdate};

/// URL used by every fixture job
pub const URL: &str = "https://www.youtube.com/watch?v=abc123";

/// Build an update from key/value pairs
pub fn update(pairs: &[(&str, &str)]) -> ProgressUpdate {
    pairs.iter().copied().collect()
}

/// Fresh job with a typical argument list
pub fn job() -> DownloadJob {
    DownloadJob::new(URL, vec!["--newline".into(), "-f".into(), "137+140".into()])
}

/// Updates reported while downloading video and audio separately and
/// merging them
pub fn merged_format_run() -> Vec<ProgressUpdate> {
    vec![
        update(&[("status", "Pre Processing"), ("path", "/downloads")]),
        update(&[
            ("filename", "clip.f137"),
            ("extension", ".mp4"),
            ("filesize", "10.00MiB"),
            ("percent", "40.0%"),
            ("speed", "1.50MiB/s"),
            ("eta", "00:04"),
            ("status", "Downloading"),
        ]),
        update(&[("percent", "100.0%"), ("eta", "00:00")]),
        update(&[
            ("filename", "clip.f140"),
            ("extension", ".m4a"),
            ("filesize", "3.45MiB"),
            ("percent", "100.0%"),
            ("speed", "800.00KiB/s"),
            ("status", "Downloading"),
        ]),
        update(&[
            ("filename", "clip"),
            ("extension", ".mp4"),
            ("status", "Post Processing"),
        ]),
        update(&[("status", "Finished")]),
    ]
}

/// Updates for a two-entry playlist
pub fn playlist_run() -> Vec<ProgressUpdate> {
    vec![
        update(&[
            ("playlist_index", "1"),
            ("playlist_size", "2"),
            ("status", "Pre Processing"),
            ("path", "/downloads/list"),
        ]),
        update(&[
            ("filename", "first"),
            ("extension", ".webm"),
            ("filesize", "~5.00MiB"),
            ("status", "Downloading"),
        ]),
        update(&[("playlist_index", "2")]),
        update(&[
            ("filename", "second"),
            ("extension", ".webm"),
            ("filesize", "1.00GiB"),
            ("status", "Downloading"),
        ]),
        update(&[("status", "Finished")]),
    ]
}

/// A stored front-end configuration: every recognized key plus UI settings
pub fn saved_config() -> Value {
    json!({
        "save_path": "~/Videos",
        "video_format": "22",
        "second_video_format": "0",
        "to_audio": false,
        "keep_video": false,
        "audio_format": "",
        "audio_quality": "5",
        "restrict_filenames": true,
        "output_format": "title",
        "output_template": "%(uploader)s/%(title)s.%(ext)s",
        "playlist_start": 1,
        "playlist_end": 0,
        "max_downloads": 0,
        "min_filesize": 0,
        "max_filesize": 500,
        "min_filesize_unit": "",
        "max_filesize_unit": "m",
        "write_subs": true,
        "write_all_subs": false,
        "write_auto_subs": false,
        "embed_subs": true,
        "subs_lang": "de",
        "ignore_errors": true,
        "write_description": false,
        "write_info": false,
        "write_thumbnail": false,
        "retries": 10,
        "user_agent": "",
        "referer": "",
        "proxy": "",
        "username": "",
        "password": "",
        "video_password": "",
        "youtube_dl_debug": false,
        "ignore_config": true,
        "cmd_args": "--geo-bypass",
        "main_win_size": [740, 490],
        "opts_win_size": [640, 490],
        "shutdown": false,
        "sudo_password": ""
    })
}
