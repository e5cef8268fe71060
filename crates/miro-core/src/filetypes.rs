//! Filename and MIME type classification.
//!
//! Answers questions like "is this a video file?" or "which extension goes
//! with `audio/mpeg`?" from a set of static tables. Filename predicates are
//! case-insensitive suffix tests; MIME lookups are exact.
//!
//! If you change [`VIDEO_EXTENSIONS`] or [`AUDIO_EXTENSIONS`], stored item
//! categories computed with the old lists will not update by themselves.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Extensions of video files Miro can play.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mov", ".wmv", ".mp4", ".m4v", ".ogv", ".anx", ".mpg", ".avi", ".flv", ".mpeg", ".divx",
    ".xvid", ".rmvb", ".mkv", ".m2v", ".ogm",
];

/// Extensions of audio files Miro can play.
pub const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".m4a", ".wma", ".mka", ".flac", ".ogg"];

/// Extensions that possibly point at an RSS or Atom feed.
pub const FEED_EXTENSIONS: &[&str] = &[".xml", ".rss", ".atom"];

/// Extensions of non-media files that still show up as enclosures.
pub const OTHER_EXTENSIONS: &[&str] = &[
    ".pdf", ".txt", ".html", ".doc", ".bmp", ".gif", ".jpg", ".jpeg", ".png", ".psd", ".tif",
    ".tiff",
];

/// Extensions of sidecar subtitle files.
pub const SUBTITLE_EXTENSIONS: &[&str] = &[".srt", ".sub", ".ass", ".ssa", ".smil", ".cmml"];

/// Extensions of torrent files.
pub const TORRENT_EXTENSIONS: &[&str] = &[".torrent"];

/// Returned by [`guess_mime_type`] for video files whose extension has no registered type.
pub const VIDEO_UNKNOWN: &str = "video/unknown";

/// Returned by [`guess_mime_type`] for audio files whose extension has no registered type.
pub const AUDIO_UNKNOWN: &str = "audio/unknown";

/// MIME types Miro can handle, each with its candidate extensions.
///
/// The first extension of each entry is the preferred one.
const MIMETYPES_EXT_MAP: &[(&str, &[&str])] = &[
    ("video/quicktime", &[".mov"]),
    ("video/mpeg", &[".mpeg", ".mpg", ".m2v"]),
    ("video/mp4", &[".mp4", ".m4v"]),
    ("video/mpeg4", &[".mp4", ".m4v"]),
    ("video/flv", &[".flv"]),
    ("video/x-flv", &[".flv"]),
    ("video/x-ms-wmv", &[".wmv"]),
    ("video/x-msvideo", &[".avi"]),
    ("video/x-matroska", &[".mkv"]),
    ("application/ogg", &[".ogg"]),
    ("video/ogg", &[".ogv"]),
    ("audio/flac", &[".flac"]),
    ("audio/mpeg", &[".mp3"]),
    ("audio/mp4", &[".m4a"]),
    ("audio/x-ms-wma", &[".wma"]),
    ("audio/x-matroska", &[".mka"]),
    ("application/x-bittorrent", &[".torrent"]),
];

/// Coarse category of a file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    /// Playable video.
    Video,
    /// Playable audio.
    Audio,
    /// BitTorrent metadata file.
    Torrent,
    /// RSS or Atom feed.
    Feed,
    /// Sidecar subtitles.
    Subtitle,
    /// Documents and images.
    Other,
}

impl MediaCategory {
    /// Categories in the order [`classify_filename`] tries them.
    pub const ALL: [Self; 6] = [
        Self::Video,
        Self::Audio,
        Self::Torrent,
        Self::Feed,
        Self::Subtitle,
        Self::Other,
    ];

    /// The extension set belonging to this category.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Video => VIDEO_EXTENSIONS,
            Self::Audio => AUDIO_EXTENSIONS,
            Self::Torrent => TORRENT_EXTENSIONS,
            Self::Feed => FEED_EXTENSIONS,
            Self::Subtitle => SUBTITLE_EXTENSIONS,
            Self::Other => OTHER_EXTENSIONS,
        }
    }

    /// Whether `filename` ends with one of this category's extensions.
    #[must_use]
    pub fn matches(self, filename: &str) -> bool {
        check_filename(filename, self.extensions())
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Torrent => write!(f, "torrent"),
            Self::Feed => write!(f, "feed"),
            Self::Subtitle => write!(f, "subtitle"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// MIME type to extension index and its inverse.
///
/// Built once on first use and never mutated afterwards, so it can be read
/// from any thread.
#[derive(Debug)]
pub struct MimeTable {
    mime_order: Vec<&'static str>,
    by_mime: HashMap<&'static str, &'static [&'static str]>,
    by_extension: HashMap<&'static str, Vec<&'static str>>,
}

impl MimeTable {
    fn build() -> Self {
        let mut mime_order = Vec::with_capacity(MIMETYPES_EXT_MAP.len());
        let mut by_mime = HashMap::with_capacity(MIMETYPES_EXT_MAP.len());
        let mut by_extension: HashMap<&'static str, Vec<&'static str>> = HashMap::new();

        for &(mime, exts) in MIMETYPES_EXT_MAP {
            mime_order.push(mime);
            by_mime.insert(mime, exts);
            for &ext in exts {
                by_extension.entry(ext).or_default().push(mime);
            }
        }

        trace!(
            mime_types = by_mime.len(),
            extensions = by_extension.len(),
            "Built MIME table"
        );

        Self {
            mime_order,
            by_mime,
            by_extension,
        }
    }

    /// Extensions registered for `mime`, preferred first.
    #[must_use]
    pub fn extensions_for(&self, mime: &str) -> Option<&'static [&'static str]> {
        self.by_mime.get(mime).copied()
    }

    /// MIME types declaring `ext` (including the leading dot), in table order.
    #[must_use]
    pub fn mime_types_for(&self, ext: &str) -> Option<&[&'static str]> {
        self.by_extension.get(ext).map(Vec::as_slice)
    }

    /// All registered MIME types in declaration order.
    pub fn mime_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.mime_order.iter().copied()
    }

    /// Whether `mime` is registered.
    #[must_use]
    pub fn contains(&self, mime: &str) -> bool {
        self.by_mime.contains_key(mime)
    }
}

static MIME_TABLE: LazyLock<MimeTable> = LazyLock::new(MimeTable::build);

/// The process-wide MIME table.
pub fn mime_table() -> &'static MimeTable {
    &MIME_TABLE
}

fn check_filename(filename: &str, extensions: &[&str]) -> bool {
    if filename.is_empty() {
        return false;
    }
    let filename = filename.to_lowercase();
    extensions.iter().any(|ext| filename.ends_with(ext))
}

/// Check if a filename represents a video file.
pub fn is_video_filename(filename: &str) -> bool {
    check_filename(filename, VIDEO_EXTENSIONS)
}

/// Check if a filename represents an audio file.
pub fn is_audio_filename(filename: &str) -> bool {
    check_filename(filename, AUDIO_EXTENSIONS)
}

/// Check if a filename represents a non-audio, non-video file.
pub fn is_other_filename(filename: &str) -> bool {
    check_filename(filename, OTHER_EXTENSIONS)
}

/// Check if a filename represents a torrent file.
pub fn is_torrent_filename(filename: &str) -> bool {
    check_filename(filename, TORRENT_EXTENSIONS)
}

/// Check if a filename possibly represents an Atom or RSS feed.
pub fn is_feed_filename(filename: &str) -> bool {
    check_filename(filename, FEED_EXTENSIONS)
}

/// Check if a filename possibly represents a sidecar subtitle file.
pub fn is_subtitle_filename(filename: &str) -> bool {
    check_filename(filename, SUBTITLE_EXTENSIONS)
}

/// Check if a filename is a video or audio filename.
pub fn is_media_filename(filename: &str) -> bool {
    is_video_filename(filename) || is_audio_filename(filename)
}

/// Same as [`is_media_filename`].
pub fn is_playable_filename(filename: &str) -> bool {
    is_media_filename(filename)
}

/// Check if a filename represents video, audio or a torrent.
pub fn is_allowed_filename(filename: &str) -> bool {
    is_media_filename(filename) || is_torrent_filename(filename)
}

/// Check if a MIME type is something Miro can handle.
///
/// Exact match only: `video/mpeg4x` is not allowed just because it looks
/// like video.
pub fn is_allowed_mimetype(mime: &str) -> bool {
    mime_table().contains(mime)
}

/// Categorize a filename by the first category whose extensions match.
pub fn classify_filename(filename: &str) -> Option<MediaCategory> {
    MediaCategory::ALL
        .into_iter()
        .find(|category| category.matches(filename))
}

/// Preferred extension for a MIME type, or `None` if the type is unknown.
pub fn guess_extension(mime: &str) -> Option<&'static str> {
    mime_table()
        .extensions_for(mime)
        .and_then(|exts| exts.first().copied())
}

/// Guess a MIME type from a filename.
///
/// The extension lookup is case-sensitive, unlike the filename predicates.
/// Files with an unregistered extension that still look like video or audio
/// get [`VIDEO_UNKNOWN`] or [`AUDIO_UNKNOWN`]; anything else is `None`.
pub fn guess_mime_type(filename: &str) -> Option<&'static str> {
    let registered = split_extension(filename)
        .and_then(|ext| mime_table().mime_types_for(ext))
        .and_then(|types| types.first().copied());

    match registered {
        Some(mime) => Some(mime),
        None if is_video_filename(filename) => Some(VIDEO_UNKNOWN),
        None if is_audio_filename(filename) => Some(AUDIO_UNKNOWN),
        None => None,
    }
}

/// Extension of the final path component, including the dot.
///
/// Leading dots of the basename do not start an extension, so `.mp4`
/// has none.
fn split_extension(filename: &str) -> Option<&str> {
    let base_start = filename.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let base = &filename[base_start..];
    let stem_start = base.len() - base.trim_start_matches('.').len();
    let dot = base[stem_start..].rfind('.')?;
    Some(&base[stem_start + dot..])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_video_filename_case_insensitive() {
        for ext in VIDEO_EXTENSIONS {
            let name = format!("anything{ext}");
            assert!(is_video_filename(&name), "{name}");
            assert!(is_video_filename(&name.to_uppercase()), "{name}");
        }
        assert!(is_video_filename("CLIP.MP4"));
    }

    #[test]
    fn test_suffix_only_matching() {
        assert!(is_video_filename("foo.notmp4.mp4"));
        assert!(!is_video_filename("foo.mp4x"));
        assert!(!is_video_filename("mp4"));
    }

    #[test]
    fn test_empty_filename() {
        assert!(!is_video_filename(""));
        assert!(!is_audio_filename(""));
        assert!(!is_other_filename(""));
        assert!(!is_torrent_filename(""));
        assert!(!is_feed_filename(""));
        assert!(!is_subtitle_filename(""));
        assert!(!is_allowed_filename(""));
        assert_eq!(classify_filename(""), None);
    }

    #[test]
    fn test_category_predicates() {
        assert!(is_audio_filename("song.FLAC"));
        assert!(is_other_filename("notes.txt"));
        assert!(is_torrent_filename("linux.iso.torrent"));
        assert!(is_feed_filename("podcast.rss"));
        assert!(is_subtitle_filename("movie.en.srt"));
        assert!(!is_feed_filename("podcast.rss.bak"));
    }

    #[test]
    fn test_media_and_allowed() {
        assert!(is_media_filename("a.mkv"));
        assert!(is_playable_filename("a.ogg"));
        assert!(!is_media_filename("a.torrent"));
        assert!(is_allowed_filename("a.torrent"));
        assert!(!is_allowed_filename("a.pdf"));
    }

    #[test]
    fn test_categories_are_disjoint() {
        for category in MediaCategory::ALL {
            for ext in category.extensions() {
                assert_eq!(*ext, ext.to_lowercase());
                assert!(ext.starts_with('.'));
                let owners: Vec<_> = MediaCategory::ALL
                    .into_iter()
                    .filter(|c| c.extensions().contains(ext))
                    .collect();
                assert_eq!(owners, vec![category], "{ext}");
            }
        }
    }

    #[test]
    fn test_classify_filename() {
        assert_eq!(classify_filename("x.avi"), Some(MediaCategory::Video));
        assert_eq!(classify_filename("x.MP3"), Some(MediaCategory::Audio));
        assert_eq!(classify_filename("x.torrent"), Some(MediaCategory::Torrent));
        assert_eq!(classify_filename("x.atom"), Some(MediaCategory::Feed));
        assert_eq!(classify_filename("x.ssa"), Some(MediaCategory::Subtitle));
        assert_eq!(classify_filename("x.png"), Some(MediaCategory::Other));
        assert_eq!(classify_filename("x.xyz"), None);
    }

    #[test]
    fn test_category_serde_and_display() {
        let json = serde_json::to_string(&MediaCategory::Subtitle).unwrap();
        assert_eq!(json, "\"subtitle\"");
        assert_eq!(MediaCategory::Torrent.to_string(), "torrent");
    }

    #[test]
    fn test_allowed_mimetype_exact() {
        assert!(is_allowed_mimetype("video/mp4"));
        assert!(is_allowed_mimetype("application/x-bittorrent"));
        assert!(!is_allowed_mimetype("video/mpeg4x"));
        assert!(!is_allowed_mimetype("VIDEO/MP4"));
        assert!(!is_allowed_mimetype(""));
    }

    #[test]
    fn test_guess_extension_prefers_first() {
        for &(mime, exts) in MIMETYPES_EXT_MAP {
            assert_eq!(guess_extension(mime), Some(exts[0]), "{mime}");
        }
        assert_eq!(guess_extension("video/mpeg"), Some(".mpeg"));
        assert_eq!(guess_extension("text/plain"), None);
    }

    #[test]
    fn test_inverse_index_order() {
        let table = mime_table();
        assert_eq!(
            table.mime_types_for(".mp4"),
            Some(&["video/mp4", "video/mpeg4"][..])
        );
        assert_eq!(
            table.mime_types_for(".flv"),
            Some(&["video/flv", "video/x-flv"][..])
        );
        let declared: Vec<_> = MIMETYPES_EXT_MAP.iter().map(|&(mime, _)| mime).collect();
        assert_eq!(table.mime_types().collect::<Vec<_>>(), declared);
        assert_eq!(table.mime_types().next(), Some("video/quicktime"));
        assert!(table.mime_types().all(|mime| table.contains(mime)));
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("movie.mp4"), Some("video/mp4"));
        assert_eq!(guess_mime_type("song.mp3"), Some("audio/mpeg"));
        assert_eq!(guess_mime_type("dir.v2/a.torrent"), Some("application/x-bittorrent"));
        assert_eq!(guess_mime_type("clip.divx"), Some(VIDEO_UNKNOWN));
        assert_eq!(guess_mime_type("clip.ogm"), Some(VIDEO_UNKNOWN));
        assert_eq!(guess_mime_type("clip.xyz"), None);
        assert_eq!(guess_mime_type(""), None);
    }

    #[test]
    fn test_guess_mime_type_case_sensitive_lookup() {
        assert_eq!(guess_mime_type("CLIP.MP4"), Some(VIDEO_UNKNOWN));
        assert_eq!(guess_mime_type("SONG.MP3"), Some(AUDIO_UNKNOWN));
        assert_eq!(guess_mime_type("SEED.TORRENT"), None);
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("a.b.mp4"), Some(".mp4"));
        assert_eq!(split_extension("dir.d/file"), None);
        assert_eq!(split_extension(".mp4"), None);
        assert_eq!(split_extension("..hidden.mkv"), Some(".mkv"));
        assert_eq!(split_extension("noext"), None);
    }
}
