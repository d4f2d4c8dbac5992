pub mod dom;
pub mod extract;
pub mod fetch;
pub mod listing;
pub mod record;
pub mod times;
pub mod writer;

use std::io;
use std::path::PathBuf;

use chrono::Local;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::HarvestConfig;
use fetch::{FetchError, PageFetcher};
use times::TimeParseError;
use writer::LineWriter;

pub const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{url}: no element matching `{selector}`")]
    MissingElement { url: String, selector: &'static str },
    #[error("{url}: unreadable meeting time: {source}")]
    Time {
        url: String,
        #[source]
        source: TimeParseError,
    },
    #[error("invalid url {url}: {source}")]
    BadUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("output file error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize meeting: {0}")]
    Json(#[from] serde_json::Error),
}

/// Harvest all seven days into one committed output file.
///
/// Any fetch or required-markup failure aborts the run and leaves the
/// working file uncommitted.
pub fn run<F: PageFetcher>(fetcher: &F, config: &HarvestConfig) -> Result<PathBuf, HarvestError> {
    let mut writer = LineWriter::open(&config.output_dir)?;

    for (day_num, day) in DAYS.iter().enumerate() {
        info!("Pulling meetings for {}", day);
        let n = harvest_day(fetcher, &config.day_url(day_num), day, &mut writer)?;
        writer.flush()?;
        debug!(day, meetings = n, "day complete");
    }

    let total = writer.lines();
    let path = writer.commit(Local::now().naive_local())?;
    info!(meetings = total, output = %path.display(), "Output committed");
    Ok(path)
}

/// Fetch one listing page and append a record per linked detail page.
pub fn harvest_day<F: PageFetcher>(
    fetcher: &F,
    listing_url: &str,
    day: &str,
    writer: &mut LineWriter,
) -> Result<usize, HarvestError> {
    let listing = fetcher.fetch(listing_url)?;
    let links = listing::detail_links(listing_url, &listing)?;

    for url in &links {
        let html = fetcher.fetch(url)?;
        let meeting = extract::extract_meeting(day, url, &html)?;
        debug!(url = %url, venue = ?meeting.venue, "meeting extracted");
        writer.append(&meeting)?;
    }
    Ok(links.len())
}
