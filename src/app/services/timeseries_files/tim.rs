//! `.tim` time-series files
//!
//! Each row holds a time offset in minutes from the model reference date
//! followed by one value per component:
//!
//! ```text
//! * pump capacity
//! 0      1.5
//! 60     2.0
//! ```

use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::app::models::TimeSeries;
use crate::app::services::text_reader::{
    LineReader, format_f64, offset_date, parse_f64, read_file,
};
use crate::{Error, Result};

const MILLISECONDS_PER_MINUTE: f64 = 60_000.0;

/// Reader and writer for `.tim` files relative to one reference date
#[derive(Debug, Clone, Copy)]
pub struct TimFile {
    reference_date: NaiveDateTime,
}

impl TimFile {
    pub fn new(reference_date: NaiveDateTime) -> Self {
        Self { reference_date }
    }

    pub fn reference_date(&self) -> NaiveDateTime {
        self.reference_date
    }

    /// Read a series from a file
    pub fn read(&self, path: &Path) -> Result<TimeSeries> {
        info!("Reading time series {}", path.display());
        let content = read_file(path)?;
        self.parse_content(&content, &path.display().to_string())
    }

    /// Parse a series; comment and blank lines are skipped
    pub fn parse_content(&self, content: &str, source_name: &str) -> Result<TimeSeries> {
        let mut reader = LineReader::new(content.as_bytes(), source_name)
            .skip_blank_lines()
            .skip_comment_lines();
        let mut series: Option<TimeSeries> = None;

        while let Some(line) = reader.next_line()? {
            let fields = line.fields();
            if fields.len() < 2 {
                return Err(reader.error(format!(
                    "Expected a time and at least one value, but found {} columns",
                    fields.len()
                )));
            }

            let numbers = fields
                .iter()
                .map(|field| {
                    parse_f64(field)
                        .ok_or_else(|| reader.error(format!("Invalid number '{}'", field)))
                })
                .collect::<Result<Vec<f64>>>()?;

            let series = series.get_or_insert_with(|| TimeSeries::new(numbers.len() - 1));
            if numbers.len() - 1 != series.component_count() {
                return Err(reader.error(format!(
                    "Expected {} values, but found {}",
                    series.component_count(),
                    numbers.len() - 1
                )));
            }

            let time = self.time_at(numbers[0]).ok_or_else(|| {
                reader.error(format!("Time offset {} is out of range", fields[0]))
            })?;
            series
                .push(time, numbers[1..].to_vec())
                .map_err(|_| reader.error(format!("Time {} does not increase", fields[0])))?;
        }

        let series = series.unwrap_or_else(|| TimeSeries::new(1));
        debug!("Read {} rows from {}", series.len(), source_name);
        Ok(series)
    }

    /// Write a series to a file, preceded by `*` comment lines
    pub fn write(&self, path: &Path, series: &TimeSeries, comments: &[String]) -> Result<()> {
        info!("Writing time series {}", path.display());
        let file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, series, comments)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
    }

    /// Write a series to any writer
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        series: &TimeSeries,
        comments: &[String],
    ) -> std::io::Result<()> {
        for comment in comments {
            writeln!(writer, "* {}", comment)?;
        }

        for (time, values) in series.rows() {
            write!(writer, "{}", format_f64(self.minutes_since_reference(*time)))?;
            for value in values {
                write!(writer, "  {}", format_f64(*value))?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Absolute time of an offset in minutes, `None` when out of the date range
    pub fn time_at(&self, minutes: f64) -> Option<NaiveDateTime> {
        offset_date(self.reference_date, minutes, MILLISECONDS_PER_MINUTE)
    }

    /// Offset of a time in minutes
    pub fn minutes_since_reference(&self, time: NaiveDateTime) -> f64 {
        (time - self.reference_date).num_milliseconds() as f64 / MILLISECONDS_PER_MINUTE
    }
}
