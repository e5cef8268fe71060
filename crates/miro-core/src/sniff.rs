//! Feed detection heuristics.
//!
//! Used when a user pastes a URL and Miro has to decide whether it is a
//! feed to subscribe to or something to download. None of these parse XML;
//! they are cheap prefix and substring tests. The body sniffing is loosely
//! modeled on Firefox's feed sniffer.

/// Number of leading body bytes [`is_maybe_rss`] looks at.
pub const RSS_SNIFF_LIMIT: usize = 512;

/// Content-type prefixes of feeds.
pub const FEED_CONTENT_TYPES: &[&str] = &[
    "application/rdf+xml",
    "application/atom+xml",
    "application/rss+xml",
    "application/podcast+xml",
    "text/xml",
    "application/xml",
];

const RSS_MARKERS: &[&[u8]] = &[b"<rss", b"<feed", b"<rdf:RDF"];

const FEEDBURNER_PREFIX: &str = "http://feeds.feedburner.com";

/// Is a content-type for an RSS or Atom feed?
///
/// Prefix match, so parameters such as `; charset=utf-8` are fine.
pub fn is_feed_content_type(content_type: &str) -> bool {
    FEED_CONTENT_TYPES
        .iter()
        .any(|prefix| content_type.starts_with(prefix))
}

/// Could a response with this content-type contain a feed?
pub fn is_maybe_feed_content_type(content_type: &str) -> bool {
    content_type.starts_with("text/")
}

/// Sniff the start of a body for feed root elements.
pub fn is_maybe_rss(body: impl AsRef<[u8]>) -> bool {
    let body = body.as_ref();
    let head = &body[..body.len().min(RSS_SNIFF_LIMIT)];
    RSS_MARKERS.iter().any(|marker| contains(head, marker))
}

/// Does the URL look like it points at a feed?
///
/// Any `rss` substring counts, anywhere in the URL.
pub fn is_maybe_rss_url(url: &str) -> bool {
    url.starts_with("http") && (url.starts_with(FEEDBURNER_PREFIX) || url.contains("rss"))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
