//! Feed item enclosures.
//!
//! An enclosure is the attachment record a feed parser hands us for an
//! RSS/Atom entry. Miro only downloads enclosures that look like media,
//! judged either by the declared MIME type or by the filename at the end
//! of the URL.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::filetypes::is_allowed_filename;
use crate::url::parse_url;

/// Non `video/` or `audio/` types that still count as media.
pub const EXTRA_MEDIA_MIMETYPES: &[&str] = &[
    "application/ogg",
    "application/x-annodex",
    "application/x-bittorrent",
    "application/x-shockwave-flash",
];

/// Media types Miro refuses even though they look like video.
pub const UNSUPPORTED_MIMETYPES: &[&str] =
    &["video/3gpp", "video/vnd.rn-realvideo", "video/x-ms-asf"];

/// Attachment of a feed entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enclosure {
    /// Declared MIME type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Location of the resource (RSS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Location of the resource (Atom links).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Enclosure {
    /// Create an enclosure with only a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Create an enclosure with only a MIME type.
    pub fn with_type(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: Some(mime_type.into()),
            ..Self::default()
        }
    }

    /// Decode an enclosure from the JSON object a feed parser emits.
    ///
    /// Keys other than `type`, `url` and `href` are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Check if an enclosure is a video (or other downloadable media).
pub fn is_video_enclosure(enclosure: &Enclosure) -> bool {
    has_video_type(enclosure)
        || has_video_extension(enclosure.url.as_deref())
        || has_video_extension(enclosure.href.as_deref())
}

fn has_video_type(enclosure: &Enclosure) -> bool {
    let Some(mime) = enclosure.mime_type.as_deref() else {
        return false;
    };
    (mime.starts_with("video/")
        || mime.starts_with("audio/")
        || EXTRA_MEDIA_MIMETYPES.contains(&mime))
        && !UNSUPPORTED_MIMETYPES.contains(&mime)
}

fn has_video_extension(location: Option<&str>) -> bool {
    let Some(location) = location else {
        return false;
    };
    match parse_url(location) {
        Ok(parts) => is_allowed_filename(&parts.path),
        Err(e) => {
            debug!("Not sniffing enclosure location: {}", e);
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_enclosure() {
        assert!(!is_video_enclosure(&Enclosure::default()));
    }

    #[test]
    fn test_media_types() {
        assert!(is_video_enclosure(&Enclosure::with_type("video/mp4")));
        assert!(is_video_enclosure(&Enclosure::with_type("audio/x-anything")));
        assert!(is_video_enclosure(&Enclosure::with_type("application/x-annodex")));
        assert!(is_video_enclosure(&Enclosure::with_type(
            "application/x-shockwave-flash"
        )));
        assert!(!is_video_enclosure(&Enclosure::with_type("application/pdf")));
        assert!(!is_video_enclosure(&Enclosure::with_type("Video/MP4")));
    }

    #[test]
    fn test_unsupported_types() {
        for mime in UNSUPPORTED_MIMETYPES {
            assert!(!is_video_enclosure(&Enclosure::with_type(*mime)), "{mime}");
        }
    }

    #[test]
    fn test_url_extension() {
        assert!(is_video_enclosure(&Enclosure::with_url(
            "http://example.com/path/movie.mp4"
        )));
        assert!(is_video_enclosure(&Enclosure::with_url(
            "http://example.com/seed.torrent?session=1"
        )));
        assert!(!is_video_enclosure(&Enclosure::with_url(
            "http://example.com/watch?file=movie.mp4"
        )));
    }

    #[test]
    fn test_url_params_are_not_part_of_filename() {
        assert!(is_video_enclosure(&Enclosure::with_url(
            "http://example.com/movie.mp4;jsessionid=ABC"
        )));
        assert!(is_video_enclosure(&Enclosure {
            href: Some("https://cdn.example.com/ep/42.m4a;v=2?dl=1".to_string()),
            ..Enclosure::default()
        }));
        assert!(!is_video_enclosure(&Enclosure::with_url(
            "http://example.com/page;movie.mp4"
        )));
    }

    #[test]
    fn test_malformed_urls_still_sniffed() {
        assert!(is_video_enclosure(&Enclosure::with_url(
            "http://example.com:abc/movie.mp4"
        )));
        assert!(is_video_enclosure(&Enclosure::with_url("http://exa mple.com/movie.mp4")));
        assert!(!is_video_enclosure(&Enclosure::with_url("http://exa mple.com/page.html")));
        assert!(!is_video_enclosure(&Enclosure::with_url("")));
    }

    #[test]
    fn test_checks_are_independent() {
        let enclosure = Enclosure {
            mime_type: Some("video/3gpp".to_string()),
            url: Some("http://example.com/page.html".to_string()),
            href: Some("http://example.com/clip.MOV".to_string()),
        };
        assert!(is_video_enclosure(&enclosure));
    }

    #[test]
    fn test_from_json() {
        let enclosure = Enclosure::from_json(
            r#"{"type": "audio/mpeg", "url": "http://e.com/a.mp3", "length": "123"}"#,
        )
        .unwrap();
        assert_eq!(enclosure.mime_type.as_deref(), Some("audio/mpeg"));
        assert_eq!(enclosure.href, None);
        assert!(is_video_enclosure(&enclosure));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Enclosure::from_json("[1, 2]").is_err());
    }
}
