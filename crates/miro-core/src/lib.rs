//! Miro Core Library
//!
//! This crate decides what things are from the little metadata feeds give us:
//! - Filename classification (video, audio, torrent, feed, subtitle, other)
//! - MIME type to extension mapping, both ways
//! - Enclosure filtering for feed items
//! - Feed sniffing from content-types, bodies and URLs
//!
//! Every classification function is a pure lookup over static tables and is
//! safe to call from any thread.
//!
//! ```rust
//! use miro_core::{guess_mime_type, is_video_filename, MediaCategory, classify_filename};
//!
//! assert!(is_video_filename("Episode 12.MKV"));
//! assert_eq!(guess_mime_type("episode.mp3"), Some("audio/mpeg"));
//! assert_eq!(classify_filename("episode.srt"), Some(MediaCategory::Subtitle));
//! ```

pub mod enclosure;
pub mod error;
pub mod filetypes;
pub mod sniff;
pub mod url;

pub use enclosure::{Enclosure, EXTRA_MEDIA_MIMETYPES, UNSUPPORTED_MIMETYPES, is_video_enclosure};
pub use error::{Error, Result};
pub use filetypes::{
    AUDIO_EXTENSIONS, AUDIO_UNKNOWN, FEED_EXTENSIONS, MediaCategory, MimeTable, OTHER_EXTENSIONS,
    SUBTITLE_EXTENSIONS, TORRENT_EXTENSIONS, VIDEO_EXTENSIONS, VIDEO_UNKNOWN, classify_filename,
    guess_extension, guess_mime_type, is_allowed_filename, is_allowed_mimetype,
    is_audio_filename, is_feed_filename, is_media_filename, is_other_filename,
    is_playable_filename, is_subtitle_filename, is_torrent_filename, is_video_filename,
    mime_table,
};
pub use sniff::{
    FEED_CONTENT_TYPES, RSS_SNIFF_LIMIT, is_feed_content_type, is_maybe_feed_content_type,
    is_maybe_rss, is_maybe_rss_url,
};
pub use crate::url::{UrlParts, parse_url};
