//! CSV output backend.
//!
//! Creates `state_counts.csv` in the configured output directory.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{CountsRow, OutputResult};

pub const COUNTS_FILE_NAME: &str = "state_counts.csv";

const HEADER: [&str; 5] = ["step", "susceptible", "infected", "recovered", "vaccinated"];

/// Writes one count row per tick to a CSV file.
pub struct CsvWriter {
    counts:   Writer<File>,
    path:     PathBuf,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open `state_counts.csv` inside it, and write
    /// the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(COUNTS_FILE_NAME);

        let mut counts = Writer::from_path(&path)?;
        counts.write_record(HEADER)?;
        debug!(path = %path.display(), "count log opened");

        Ok(Self { counts, path, finished: false })
    }

    /// Location of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputWriter for CsvWriter {
    fn write_counts(&mut self, row: &CountsRow) -> OutputResult<()> {
        self.counts.write_record(&[
            row.step.to_string(),
            row.susceptible.to_string(),
            row.infected.to_string(),
            row.recovered.to_string(),
            row.vaccinated.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.counts.flush()?;
        Ok(())
    }
}
