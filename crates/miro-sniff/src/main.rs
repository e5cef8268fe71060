//! miro-sniff - inspect how Miro classifies files, enclosures and feeds.
//!
//! Handy when a feed refuses to download or a file shows up in the wrong
//! section: feed it the filename, enclosure or URL and see what Miro thinks.

mod cli;
mod config;
mod logging;
mod report;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use miro_core::{Enclosure, Error, RSS_SNIFF_LIMIT, Result};
use tracing::{Level, debug, error, info};

use cli::{Cli, Command};
use config::{OutputFormat, SniffConfig};
use logging::LoggingConfig;
use report::{BodyReport, ContentTypeReport, EnclosureReport, FileReport, MimeReport, UrlReport};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SniffConfig::load_from(path),
        None => SniffConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("miro-sniff: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(&logging_config(&cli, &config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("miro-sniff: {e}");
            return ExitCode::FAILURE;
        }
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output
    };
    debug!(?format, "Starting miro-sniff");

    match run(cli.command, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("miro-sniff: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Console verbosity comes from the flags, file logging from the config.
fn logging_config(cli: &Cli, config: &SniffConfig) -> LoggingConfig {
    let mut logging = if cli.verbose {
        LoggingConfig::development()
    } else if cli.quiet {
        LoggingConfig::production().with_console_level(Level::ERROR)
    } else {
        LoggingConfig::production()
    };
    if config.log_to_file {
        logging = logging
            .with_log_directory(config.log_directory.clone())
            .with_rotation(config.log_rotation);
    }
    logging
}

fn run(command: Command, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::File { names } => {
            for name in &names {
                report::emit(&mut out, &FileReport::new(name), format)?;
            }
        }
        Command::Mime { types } => {
            for mime in &types {
                report::emit(&mut out, &MimeReport::new(mime), format)?;
            }
        }
        Command::Enclosure { record } => {
            let enclosure = Enclosure::from_json(&record)?;
            report::emit(&mut out, &EnclosureReport::new(enclosure), format)?;
        }
        Command::ContentType { content_type } => {
            report::emit(&mut out, &ContentTypeReport::new(&content_type), format)?;
        }
        Command::Body { path } => {
            let report = match path {
                Some(path) => {
                    let head = read_head(path.as_path())?;
                    BodyReport::new(path.display().to_string(), &head)
                }
                None => BodyReport::new("stdin", &read_sniff_window(io::stdin().lock())?),
            };
            report::emit(&mut out, &report, format)?;
        }
        Command::Url { url } => {
            report::emit(&mut out, &UrlReport::new(&url), format)?;
        }
    }

    Ok(())
}

fn read_head(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| Error::FileSystem {
        path: path.to_path_buf(),
        message: format!("Failed to open body: {e}"),
    })?;
    let head = read_sniff_window(file)?;
    info!("Read {} bytes from {}", head.len(), path.display());
    Ok(head)
}

/// Read at most the bytes the feed sniffer looks at.
fn read_sniff_window(reader: impl Read) -> Result<Vec<u8>> {
    let mut head = Vec::with_capacity(RSS_SNIFF_LIMIT);
    reader.take(RSS_SNIFF_LIMIT as u64).read_to_end(&mut head)?;
    Ok(head)
}
