//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Classify filenames, MIME types, enclosures and feed content the way Miro does.
#[derive(Debug, Parser)]
#[command(name = "miro-sniff", version, about)]
pub struct Cli {
    /// Print reports as JSON, regardless of the configured format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors to stderr.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// What to classify.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify filenames and guess their MIME type.
    File {
        /// Filenames or paths.
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Check MIME types and look up their preferred extension.
    Mime {
        /// MIME types, e.g. `video/mp4`.
        #[arg(required = true)]
        types: Vec<String>,
    },
    /// Decide whether a feed enclosure is downloadable media.
    Enclosure {
        /// Enclosure as a JSON object with `type`, `url` and/or `href`.
        #[arg(value_name = "JSON")]
        record: String,
    },
    /// Check whether a Content-Type header announces a feed.
    ContentType {
        /// Header value, parameters included.
        content_type: String,
    },
    /// Sniff a document body for feed markers.
    Body {
        /// File to read; stdin when omitted.
        path: Option<PathBuf>,
    },
    /// Check whether a URL looks like a feed and show its parts.
    Url {
        /// URL to inspect.
        url: String,
    },
}
