pub mod clean;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::jsonl::to_line;

pub const REQUEST_ID_KEY: &str = "request_id";
pub const TAG: &str = "CCPA";

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("record has no `request_id`")]
    MissingId,
    #[error("unsupported `request_id` value: {0}")]
    UnsupportedId(Value),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One invocation of the splitter.
#[derive(Debug, Clone)]
pub struct SplitJob {
    pub client: String,
    /// Holds both the source file and the split outputs.
    pub directory: PathBuf,
    pub file: String,
    pub date: NaiveDate,
}

impl SplitJob {
    pub fn source_path(&self) -> PathBuf {
        self.directory.join(&self.file)
    }

    pub fn output_path(&self, request_id: &str) -> PathBuf {
        self.directory
            .join(output_name(&self.client, self.date, request_id))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitReport {
    pub written: usize,
    /// Lines that were not JSON.
    pub skipped: usize,
    /// Records that parsed but could not be named or written.
    pub failed: usize,
}

/// `YM_<client>_CCPA_<YYYYMMDD>_<request_id>.json`
pub fn output_name(client: &str, date: NaiveDate, request_id: &str) -> String {
    format!(
        "YM_{}_{}_{}_{}.json",
        client,
        TAG,
        date.format("%Y%m%d"),
        request_id
    )
}

/// The identifier used to name a record's file.
///
/// Ids that could step out of the output directory are refused.
pub fn request_id(record: &Value) -> Result<String, SplitError> {
    let id = match record.get(REQUEST_ID_KEY) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => return Err(SplitError::UnsupportedId(other.clone())),
        None => return Err(SplitError::MissingId),
    };
    if id.contains(['/', '\\']) || id.contains("..") {
        return Err(SplitError::UnsupportedId(Value::String(id)));
    }
    Ok(id)
}

/// Write one parsed record to its own file, replacing any previous one.
pub fn write_record(job: &SplitJob, record: &Value) -> Result<PathBuf, SplitError> {
    let id = request_id(record)?;
    let path = job.output_path(&id);
    info!("Writing parsed file: {}", path.display());
    fs::write(&path, to_line(record)?)?;
    Ok(path)
}

/// Fan the source file out into one file per JSON line.
///
/// Only failing to open or read the source is an error; bad lines and
/// failed writes are reported and counted.
pub fn split_file(job: &SplitJob) -> io::Result<SplitReport> {
    let source = job.source_path();
    info!("Opening source file: {}", source.display());
    let reader = BufReader::new(File::open(&source)?);
    split_lines(job, reader)
}

pub fn split_lines<R: BufRead>(job: &SplitJob, reader: R) -> io::Result<SplitReport> {
    let mut report = SplitReport::default();

    for (idx, line) in reader.split(b'\n').enumerate() {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        let record: Value = match serde_json::from_slice(&line) {
            Ok(v) => v,
            Err(_) => {
                // usually a header or footer record
                warn!(
                    "Non-JSON record skipped (line {}): {}",
                    idx + 1,
                    String::from_utf8_lossy(&line)
                );
                report.skipped += 1;
                continue;
            }
        };

        match write_record(job, &record) {
            Ok(_) => report.written += 1,
            Err(err) => {
                error!("Unable to write record on line {}: {}", idx + 1, err);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

// ── Tests ──
