//! `.t3d` vertical-profile time series
//!
//! A header declares the layer type and positions, followed by one block per
//! time with `layers × vectormax` values:
//!
//! ```text
//! LAYER_TYPE = SIGMA
//! LAYERS = 0.0 0.5 1.0
//! TIME = 0 minutes since 2001-01-01 00:00:00 +00:00
//! 1.0 2.0 3.0
//! TIME = 60 minutes since 2001-01-01 00:00:00 +00:00
//! 1.5 2.5 3.5
//! ```

use chrono::{FixedOffset, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::app::models::TimeSeries;
use crate::app::services::tagged_records::parse_key_value_comment;
use crate::app::services::text_reader::{
    LineReader, format_f64, offset_date, parse_f64, parse_i32, read_file,
};
use crate::{Error, Result};

const LAYER_TYPE_KEY: &str = "LAYER_TYPE";
const LAYERS_KEY: &str = "LAYERS";
const VECTOR_MAX_KEY: &str = "VECTORMAX";
const TIME_KEY: &str = "TIME";
const REFERENCE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Vertical coordinate of the layer positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayerType {
    Sigma,
    Z,
}

impl LayerType {
    fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "SIGMA" => Some(Self::Sigma),
            "Z" => Some(Self::Z),
            _ => None,
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerType::Sigma => write!(f, "SIGMA"),
            LayerType::Z => write!(f, "Z"),
        }
    }
}

/// Unit of the offset in a `TIME` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "seconds" | "second" | "s" => Some(Self::Seconds),
            "minutes" | "minute" | "m" => Some(Self::Minutes),
            "hours" | "hour" | "h" => Some(Self::Hours),
            "days" | "day" | "d" => Some(Self::Days),
            _ => None,
        }
    }

    fn milliseconds(&self) -> f64 {
        match self {
            TimeUnit::Seconds => 1_000.0,
            TimeUnit::Minutes => 60_000.0,
            TimeUnit::Hours => 3_600_000.0,
            TimeUnit::Days => 86_400_000.0,
        }
    }
}

/// Contents of a `.t3d` file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct T3dData {
    pub layer_type: LayerType,

    /// Layer positions in ascending order
    pub layers: Vec<f64>,

    /// Components per layer
    pub vector_max: usize,

    /// Time zone declared on the `TIME` lines; times are kept on that clock
    #[serde(skip)]
    pub time_zone: Option<FixedOffset>,

    /// One row per time, values ordered layer by layer
    pub series: TimeSeries,
}

impl T3dData {
    /// Values of one component of one layer over time
    pub fn layer_values(&self, layer: usize, component: usize) -> Vec<f64> {
        self.series.component(layer * self.vector_max + component)
    }
}

/// Reader and writer for `.t3d` files
#[derive(Debug, Clone, Copy, Default)]
pub struct T3dFile;

impl T3dFile {
    pub fn read(&self, path: &Path) -> Result<T3dData> {
        info!("Reading 3D time series {}", path.display());
        let content = read_file(path)?;
        self.parse_content(&content, &path.display().to_string())
    }

    pub fn parse_content(&self, content: &str, source_name: &str) -> Result<T3dData> {
        let mut reader = LineReader::new(content.as_bytes(), source_name)
            .skip_blank_lines()
            .skip_comment_lines();

        let mut layer_type = None;
        let mut layers: Option<Vec<f64>> = None;
        let mut vector_max = 1;
        let mut pending_time = None;

        while let Some(line) = reader.next_line()? {
            let entry = parse_key_value_comment(&line.text)
                .map_err(|e| reader.error(format!("Invalid header line: {}", e)))?;

            match entry.key.to_ascii_uppercase().as_str() {
                LAYER_TYPE_KEY => {
                    layer_type = Some(LayerType::parse(&entry.value).ok_or_else(|| {
                        reader.error(format!("Unknown layer type '{}'", entry.value))
                    })?);
                }
                LAYERS_KEY => layers = Some(parse_layers(&reader, &entry.value)?),
                VECTOR_MAX_KEY => {
                    vector_max = parse_i32(&entry.value)
                        .filter(|count| *count > 0)
                        .ok_or_else(|| {
                            reader.error(format!("Invalid {} '{}'", VECTOR_MAX_KEY, entry.value))
                        })? as usize;
                }
                TIME_KEY => {
                    pending_time = Some(parse_time(&reader, &entry.value)?);
                    break;
                }
                other => return Err(reader.error(format!("Unknown header key '{}'", other))),
            }
        }

        let layer_type =
            layer_type.ok_or_else(|| reader.error(format!("Missing {} header", LAYER_TYPE_KEY)))?;
        let layers = layers.ok_or_else(|| reader.error(format!("Missing {} header", LAYERS_KEY)))?;

        let values_per_time = layers.len() * vector_max;
        let mut series = TimeSeries::new(values_per_time);
        let mut time_zone = None;

        while let Some((time, zone)) = pending_time.take() {
            if time_zone.is_none() {
                time_zone = zone;
            }

            let (values, next) = read_block(&mut reader)?;
            if values.len() != values_per_time {
                return Err(reader.error(format!(
                    "Expected {} values for time {}, but found {}",
                    values_per_time,
                    time,
                    values.len()
                )));
            }
            series
                .push(time, values)
                .map_err(|_| reader.error(format!("Time {} does not increase", time)))?;
            pending_time = next;
        }

        Ok(T3dData {
            layer_type,
            layers,
            vector_max,
            time_zone,
            series,
        })
    }

    /// Write data with all times relative to `reference_date` in minutes
    pub fn write(&self, path: &Path, data: &T3dData, reference_date: NaiveDateTime) -> Result<()> {
        info!("Writing 3D time series {}", path.display());
        let file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, data, reference_date)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
    }

    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        data: &T3dData,
        reference_date: NaiveDateTime,
    ) -> std::io::Result<()> {
        let layers: Vec<String> = data.layers.iter().map(|l| format_f64(*l)).collect();
        writeln!(writer, "{} = {}", LAYER_TYPE_KEY, data.layer_type)?;
        writeln!(writer, "{} = {}", LAYERS_KEY, layers.join(" "))?;
        if data.vector_max != 1 {
            writeln!(writer, "{} = {}", VECTOR_MAX_KEY, data.vector_max)?;
        }

        let zone = data
            .time_zone
            .map(|zone| format!(" {}", zone))
            .unwrap_or_default();
        for (time, values) in data.series.rows() {
            let minutes = (*time - reference_date).num_milliseconds() as f64
                / TimeUnit::Minutes.milliseconds();
            writeln!(
                writer,
                "{} = {} minutes since {}{}",
                TIME_KEY,
                format_f64(minutes),
                reference_date.format(REFERENCE_FORMAT),
                zone
            )?;
            let values: Vec<String> = values.iter().map(|v| format_f64(*v)).collect();
            writeln!(writer, "{}", values.join(" "))?;
        }
        Ok(())
    }
}

fn parse_layers<R: BufRead>(reader: &LineReader<R>, text: &str) -> Result<Vec<f64>> {
    let layers = text
        .split_whitespace()
        .map(|field| {
            parse_f64(field).ok_or_else(|| reader.error(format!("Invalid layer position '{}'", field)))
        })
        .collect::<Result<Vec<f64>>>()?;

    if layers.is_empty() {
        return Err(reader.error(format!("{} has no positions", LAYERS_KEY)));
    }
    if layers.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(reader.error(format!("{} must be in ascending order", LAYERS_KEY)));
    }
    Ok(layers)
}

/// Parse `<n> <unit> since <yyyy-mm-dd HH:MM:SS> [±HH:MM]`
fn parse_time<R: BufRead>(
    reader: &LineReader<R>,
    text: &str,
) -> Result<(NaiveDateTime, Option<FixedOffset>)> {
    let invalid = || reader.error(format!("Invalid time specification '{}'", text));
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < 5 || !fields[2].eq_ignore_ascii_case("since") {
        return Err(invalid());
    }

    let offset = parse_f64(fields[0]).ok_or_else(invalid)?;
    let unit = TimeUnit::parse(fields[1]).ok_or_else(invalid)?;
    let reference =
        NaiveDateTime::parse_from_str(&format!("{} {}", fields[3], fields[4]), REFERENCE_FORMAT)
            .map_err(|_| invalid())?;
    let zone = match fields.get(5) {
        Some(zone) => Some(zone.parse::<FixedOffset>().map_err(|_| invalid())?),
        None => None,
    };

    let time = offset_date(reference, offset, unit.milliseconds()).ok_or_else(invalid)?;
    Ok((time, zone))
}

/// Values up to the next `TIME` line, and the parsed next time if any
fn read_block<R: BufRead>(
    reader: &mut LineReader<R>,
) -> Result<(Vec<f64>, Option<(NaiveDateTime, Option<FixedOffset>)>)> {
    let mut values = Vec::new();
    while let Some(line) = reader.next_line()? {
        if let Ok(entry) = parse_key_value_comment(&line.text) {
            if entry.key.eq_ignore_ascii_case(TIME_KEY) {
                let next = parse_time(reader, &entry.value)?;
                return Ok((values, Some(next)));
            }
        }

        for field in line.text.split_whitespace() {
            let value = parse_f64(field)
                .ok_or_else(|| reader.error(format!("Invalid value '{}'", field)))?;
            values.push(value);
        }
    }
    Ok((values, None))
}
