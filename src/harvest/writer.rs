use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;

use super::HarvestError;
use crate::jsonl::to_line;

pub const WORKING_FILE: &str = "meetings.part";
pub const FINAL_PREFIX: &str = "aaboston_meetings_";

/// Appends JSON lines to `<dir>/meetings.part`; `commit` renames it to a
/// timestamped name. Until then nothing downstream should read it.
pub struct LineWriter {
    dir: PathBuf,
    working: PathBuf,
    file: BufWriter<File>,
    lines: usize,
}

impl LineWriter {
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let working = dir.join(WORKING_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&working)?;
        Ok(Self {
            dir,
            working,
            file: BufWriter::new(file),
            lines: 0,
        })
    }

    pub fn append<T: Serialize>(&mut self, record: &T) -> Result<(), HarvestError> {
        let line = to_line(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Push buffered lines to disk without committing.
    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    /// Lines appended by this writer (not counting leftovers from an
    /// interrupted earlier run).
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn working_path(&self) -> &Path {
        &self.working
    }

    /// Close the working file and rename it to its final name.
    pub fn commit(self, at: NaiveDateTime) -> io::Result<PathBuf> {
        let file = self.file.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        let final_path = self.dir.join(final_name(at));
        fs::rename(&self.working, &final_path)?;
        Ok(final_path)
    }
}

/// `aaboston_meetings_2024-01-02_13:45:06.123456`
pub fn final_name(at: NaiveDateTime) -> String {
    format!("{}{}", FINAL_PREFIX, at.format("%Y-%m-%d_%H:%M:%S%.6f"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_micro_opt(13, 45, 6, 123456)
            .unwrap()
    }

    #[test]
    fn final_name_has_no_spaces() {
        let name = final_name(at());
        assert_eq!(name, "aaboston_meetings_2024-01-02_13:45:06.123456");
        assert!(!name.contains(' '));
    }

    #[test]
    fn commit_renames_working_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("assets");
        let mut w = LineWriter::open(&out).unwrap();
        let working = w.working_path().to_path_buf();
        w.append(&json!({"day": "Sunday"})).unwrap();
        w.append(&json!({"day": "Monday"})).unwrap();
        assert_eq!(w.lines(), 2);

        let final_path = w.commit(at()).unwrap();
        assert!(!working.exists());
        assert_eq!(final_path, out.join("aaboston_meetings_2024-01-02_13:45:06.123456"));
        let text = fs::read_to_string(&final_path).unwrap();
        assert_eq!(text, "{\"day\": \"Sunday\"}\n{\"day\": \"Monday\"}\n");
    }

    #[test]
    fn lines_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let record = json!({
            "day": "Sunday",
            "times": {"start": "Noon", "end": "1:00pm"},
            "format": ["Closed", "12 Step"],
            "venue": "Caf\u{e9} Serenit\u{e9}",
        });
        let mut w = LineWriter::open(dir.path()).unwrap();
        w.append(&record).unwrap();
        let path = w.commit(at()).unwrap();

        let text = fs::read_to_string(path).unwrap();
        let back: Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn uncommitted_run_stays_under_working_name() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut w = LineWriter::open(dir.path()).unwrap();
            w.append(&json!({"day": "Sunday"})).unwrap();
            w.flush().unwrap();
        }
        let working = dir.path().join(WORKING_FILE);
        assert_eq!(fs::read_to_string(&working).unwrap(), "{\"day\": \"Sunday\"}\n");

        // next run appends to the leftover
        let mut w = LineWriter::open(dir.path()).unwrap();
        w.append(&json!({"day": "Monday"})).unwrap();
        let path = w.commit(at()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap().lines().count(), 2);
    }
}
