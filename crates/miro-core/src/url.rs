//! URL splitting for extension sniffing.
//!
//! Enclosure URLs are classified by the filename at the end of their path,
//! so this module only needs to get scheme, host, port and path out of a
//! URL reliably. Feeds in the wild contain some broken URLs; the quirks
//! handled here are the ones seen in practice: doubled ports, ports that are
//! not numbers, hosts with stray characters and `;params` on the last segment.

use serde::Serialize;
use tracing::debug;
use ::url::{ParseError, Url};

use crate::error::{Error, Result};

/// Components of a parsed URL.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UrlParts {
    /// Scheme, empty for relative references.
    pub scheme: String,
    /// Host name, empty when the URL has none.
    pub host: String,
    /// Explicit port, or the default port for `http`/`https`.
    pub port: Option<u16>,
    /// Path without params, query or fragment.
    pub path: String,
    /// Parameters of the last path segment (after `;`).
    pub params: Option<String>,
    /// Query string without the leading `?`.
    pub query: Option<String>,
}

impl UrlParts {
    /// Last non-empty segment of the path.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.path.rsplit('/').find(|segment| !segment.is_empty())
    }
}

/// Split a URL into its components.
///
/// Relative references are accepted and yield an empty scheme and host.
pub fn parse_url(url: &str) -> Result<UrlParts> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_url(url, "empty URL"));
    }

    let fixed = strip_duplicate_port(trimmed);
    match Url::parse(&fixed) {
        Ok(parsed) => Ok(from_parsed(&parsed)),
        Err(ParseError::RelativeUrlWithoutBase) => Ok(split_relative(trimmed)),
        Err(e) => match fixed.find("://") {
            // Bad ports and hosts still leave a usable path behind the authority
            Some(scheme_end) => {
                debug!("Leniently splitting URL {}: {}", url, e);
                Ok(split_lenient(&fixed, scheme_end))
            }
            None => {
                debug!("Failed to parse URL {}: {}", url, e);
                Err(Error::invalid_url(url, e.to_string()))
            }
        },
    }
}

fn from_parsed(parsed: &Url) -> UrlParts {
    let scheme = parsed.scheme().to_string();
    let port = parsed.port().or_else(|| default_port(&scheme));
    let (path, params) = split_params(parsed.path());
    UrlParts {
        host: parsed.host_str().unwrap_or_default().to_string(),
        port,
        path,
        params,
        query: parsed.query().map(str::to_string),
        scheme,
    }
}

fn split_relative(reference: &str) -> UrlParts {
    let without_fragment = reference.split('#').next().unwrap_or_default();
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query.to_string())),
        None => (without_fragment, None),
    };
    let (path, params) = split_params(path);
    UrlParts {
        scheme: String::new(),
        host: String::new(),
        port: None,
        path,
        params,
        query,
    }
}

/// Split `scheme://authority/rest` by hand, for URLs the parser rejects.
///
/// An unparseable port falls back to the scheme's default.
fn split_lenient(url: &str, scheme_end: usize) -> UrlParts {
    let scheme = url[..scheme_end].to_ascii_lowercase();
    let rest = &url[scheme_end + 3..];
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    let (host, port) = match host_port.rsplit_once(':') {
        Some((host, port)) if !host_port.ends_with(']') => {
            (host, port.parse().ok().or_else(|| default_port(&scheme)))
        }
        _ => (host_port, default_port(&scheme)),
    };

    UrlParts {
        host: host.to_string(),
        port,
        scheme,
        ..split_relative(&rest[authority_end..])
    }
}

/// Cut `;params` off the last path segment.
fn split_params(path: &str) -> (String, Option<String>) {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[segment_start..].find(';') {
        Some(i) => {
            let cut = segment_start + i;
            (path[..cut].to_string(), Some(path[cut + 1..].to_string()))
        }
        None => (path.to_string(), None),
    }
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

/// Drop the last port of an authority that carries two (`host:80:80`).
fn strip_duplicate_port(url: &str) -> std::borrow::Cow<'_, str> {
    let Some(scheme_end) = url.find("://") else {
        return url.into();
    };
    let authority_start = scheme_end + 3;
    let authority_end = url[authority_start..]
        .find(['/', '?', '#'])
        .map_or(url.len(), |i| authority_start + i);
    let authority = &url[authority_start..authority_end];
    let host_start = authority.rfind('@').map_or(0, |i| i + 1);
    let host = &authority[host_start..];

    if host.starts_with('[') || host.matches(':').count() < 2 {
        return url.into();
    }
    let Some(last_colon) = host.rfind(':') else {
        return url.into();
    };

    let cut = authority_start + host_start + last_colon;
    format!("{}{}", &url[..cut], &url[authority_end..]).into()
}
