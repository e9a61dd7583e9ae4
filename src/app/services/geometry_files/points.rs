//! Point files: `.xyz` samples (`x y value`) and `.xyn` named points (`x y 'name'`)

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::app::models::Coordinate;
use crate::app::services::tagged_records::tokens::Tokens;
use crate::app::services::text_reader::{LineReader, format_fixed_width, parse_f64, read_file};
use crate::{Error, Result};

/// One sample of an `.xyz` file
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointValue {
    pub coordinate: Coordinate,
    pub value: f64,
}

/// One named point of an `.xyn` file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedPoint {
    pub coordinate: Coordinate,
    pub name: String,
}

/// Read samples from an `.xyz` file
pub fn read_xyz(path: &Path) -> Result<Vec<PointValue>> {
    info!("Reading sample file {}", path.display());
    parse_xyz(&read_file(path)?, &path.display().to_string())
}

/// Parse samples, every row holds at least `x y value`
pub fn parse_xyz(content: &str, source_name: &str) -> Result<Vec<PointValue>> {
    let mut reader = LineReader::new(content.as_bytes(), source_name)
        .skip_blank_lines()
        .skip_comment_lines();
    let mut points = Vec::new();

    while let Some(line) = reader.next_line()? {
        let fields = line.fields();
        if fields.len() < 3 {
            return Err(reader.error(format!(
                "Expected x, y and value, but found {} columns",
                fields.len()
            )));
        }

        let mut numbers = [0.0; 3];
        for (slot, field) in numbers.iter_mut().zip(&fields) {
            *slot = parse_f64(field)
                .ok_or_else(|| reader.error(format!("Invalid number '{}'", field)))?;
        }

        points.push(PointValue {
            coordinate: Coordinate::new(numbers[0], numbers[1]),
            value: numbers[2],
        });
    }

    Ok(points)
}

/// Write samples with fixed-width columns
pub fn write_xyz(path: &Path, points: &[PointValue]) -> Result<()> {
    write_file(path, |writer| {
        for point in points {
            writeln!(
                writer,
                "{}{}{}",
                format_fixed_width(point.coordinate.x),
                format_fixed_width(point.coordinate.y),
                format_fixed_width(point.value)
            )?;
        }
        Ok(())
    })
}

/// Read named points from an `.xyn` file
pub fn read_xyn(path: &Path) -> Result<Vec<NamedPoint>> {
    info!("Reading named point file {}", path.display());
    parse_xyn(&read_file(path)?, &path.display().to_string())
}

/// Parse named points; names may be single-quoted and contain spaces
pub fn parse_xyn(content: &str, source_name: &str) -> Result<Vec<NamedPoint>> {
    let mut reader = LineReader::new(content.as_bytes(), source_name)
        .skip_blank_lines()
        .skip_comment_lines();
    let mut points = Vec::new();

    while let Some(line) = reader.next_line()? {
        let tokens: Vec<_> = Tokens::new(&line.text).collect();
        if tokens.len() < 3 {
            return Err(reader.error(format!(
                "Expected x, y and name, but found {} columns",
                tokens.len()
            )));
        }

        let x = parse_f64(tokens[0].text)
            .ok_or_else(|| reader.error(format!("Invalid x coordinate '{}'", tokens[0].text)))?;
        let y = parse_f64(tokens[1].text)
            .ok_or_else(|| reader.error(format!("Invalid y coordinate '{}'", tokens[1].text)))?;

        points.push(NamedPoint {
            coordinate: Coordinate::new(x, y),
            name: tokens[2].unquoted().to_string(),
        });
    }

    Ok(points)
}

/// Write named points, names quoted
pub fn write_xyn(path: &Path, points: &[NamedPoint]) -> Result<()> {
    write_file(path, |writer| {
        for point in points {
            writeln!(
                writer,
                "{}{}    '{}'",
                format_fixed_width(point.coordinate.x),
                format_fixed_width(point.coordinate.y),
                point.name
            )?;
        }
        Ok(())
    })
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
}
