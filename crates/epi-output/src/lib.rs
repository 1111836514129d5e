//! `epi-output`: aggregate count logging for the epigrid model.
//!
//! One row per tick, starting with the seeded tick-0 grid:
//!
//! ```text
//! step,susceptible,infected,recovered,vaccinated
//! 0,7975,1875,0,0
//! 1,7612,2201,62,0
//! ```
//!
//! Writers implement [`OutputWriter`] and are driven by [`CountsObserver`],
//! which implements `epi_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CountsObserver, CsvWriter};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = CountsObserver::new(writer);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::{CsvWriter, COUNTS_FILE_NAME};
pub use error::{OutputError, OutputResult};
pub use observer::CountsObserver;
pub use row::CountsRow;
pub use writer::OutputWriter;
