//! Classification reports.
//!
//! Each subcommand builds one report per input. Reports print either as a
//! single text line or as a JSON object.

use std::fmt;
use std::io::{self, Write};

use miro_core::{
    Enclosure, MediaCategory, UrlParts, classify_filename, guess_extension, guess_mime_type,
    is_allowed_filename, is_allowed_mimetype, is_feed_content_type, is_maybe_feed_content_type,
    is_maybe_rss, is_maybe_rss_url, is_media_filename, is_video_enclosure, parse_url,
};
use serde::Serialize;

use crate::config::OutputFormat;

/// Verdict for one filename.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FileReport {
    /// The filename as given.
    pub name: String,
    /// First matching category.
    pub category: Option<MediaCategory>,
    /// Video or audio.
    pub media: bool,
    /// Video, audio or torrent.
    pub allowed: bool,
    /// Guessed MIME type.
    pub mime_type: Option<&'static str>,
}

impl FileReport {
    /// Classify `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            category: classify_filename(name),
            media: is_media_filename(name),
            allowed: is_allowed_filename(name),
            mime_type: guess_mime_type(name),
        }
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: category={} media={} allowed={} mime={}",
            self.name,
            or_dash(self.category.map(|c| c.to_string())),
            self.media,
            self.allowed,
            or_dash(self.mime_type)
        )
    }
}

/// Verdict for one MIME type.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MimeReport {
    /// The MIME type as given.
    pub mime_type: String,
    /// Registered in the MIME table.
    pub allowed: bool,
    /// Preferred extension.
    pub extension: Option<&'static str>,
}

impl MimeReport {
    /// Look up `mime`.
    pub fn new(mime: &str) -> Self {
        Self {
            mime_type: mime.to_string(),
            allowed: is_allowed_mimetype(mime),
            extension: guess_extension(mime),
        }
    }
}

impl fmt::Display for MimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: allowed={} extension={}",
            self.mime_type,
            self.allowed,
            or_dash(self.extension)
        )
    }
}

/// Verdict for an enclosure.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EnclosureReport {
    /// The decoded enclosure.
    pub enclosure: Enclosure,
    /// Downloadable media.
    pub video: bool,
}

impl EnclosureReport {
    /// Judge `enclosure`.
    pub fn new(enclosure: Enclosure) -> Self {
        let video = is_video_enclosure(&enclosure);
        Self { enclosure, video }
    }
}

impl fmt::Display for EnclosureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type={} url={} href={}: video={}",
            or_dash(self.enclosure.mime_type.as_deref()),
            or_dash(self.enclosure.url.as_deref()),
            or_dash(self.enclosure.href.as_deref()),
            self.video
        )
    }
}

/// Verdict for a Content-Type header.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ContentTypeReport {
    /// The header value as given.
    pub content_type: String,
    /// Announces a feed.
    pub feed: bool,
    /// Could contain a feed.
    pub maybe_feed: bool,
}

impl ContentTypeReport {
    /// Check `content_type`.
    pub fn new(content_type: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            feed: is_feed_content_type(content_type),
            maybe_feed: is_maybe_feed_content_type(content_type),
        }
    }
}

impl fmt::Display for ContentTypeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: feed={} maybe_feed={}",
            self.content_type, self.feed, self.maybe_feed
        )
    }
}

/// Verdict for a document body.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BodyReport {
    /// Where the body came from.
    pub source: String,
    /// Bytes inspected.
    pub bytes: usize,
    /// Feed markers found.
    pub maybe_rss: bool,
}

impl BodyReport {
    /// Sniff `body`.
    pub fn new(source: impl Into<String>, body: &[u8]) -> Self {
        Self {
            source: source.into(),
            bytes: body.len(),
            maybe_rss: is_maybe_rss(body),
        }
    }
}

impl fmt::Display for BodyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} bytes): maybe_rss={}",
            self.source, self.bytes, self.maybe_rss
        )
    }
}

/// Verdict for a URL.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UrlReport {
    /// The URL as given.
    pub url: String,
    /// Looks like a feed.
    pub maybe_rss: bool,
    /// Parsed components, when the URL parses.
    pub parts: Option<UrlParts>,
    /// Category of the filename at the end of the path.
    pub category: Option<MediaCategory>,
}

impl UrlReport {
    /// Inspect `url`.
    pub fn new(url: &str) -> Self {
        let parts = parse_url(url).ok();
        let category = parts
            .as_ref()
            .and_then(UrlParts::filename)
            .and_then(classify_filename);
        Self {
            url: url.to_string(),
            maybe_rss: is_maybe_rss_url(url),
            parts,
            category,
        }
    }
}

impl fmt::Display for UrlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: maybe_rss={}", self.url, self.maybe_rss)?;
        if let Some(parts) = &self.parts {
            write!(
                f,
                " scheme={} host={} port={} path={}",
                or_dash(Some(parts.scheme.as_str()).filter(|s| !s.is_empty())),
                or_dash(Some(parts.host.as_str()).filter(|s| !s.is_empty())),
                or_dash(parts.port.map(|p| p.to_string())),
                parts.path
            )?;
        }
        write!(f, " category={}", or_dash(self.category.map(|c| c.to_string())))
    }
}

/// Write `report` to `out` in the requested format, followed by a newline.
pub fn emit<T, W>(out: &mut W, report: &T, format: OutputFormat) -> io::Result<()>
where
    T: Serialize + fmt::Display,
    W: Write,
{
    match format {
        OutputFormat::Text => writeln!(out, "{report}"),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)
        }
    }
}

fn or_dash<S: AsRef<str>>(value: Option<S>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.as_ref().to_string())
}
