//! Polygon files (`.pol`)
//!
//! Same block layout as `.pli`, every block is one ring. Rings are closed on
//! read; whether the closing coordinate is written back is an option.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::app::models::{Coordinate, Feature2D, Geometry, LinearRing};
use crate::app::services::progress::ProgressUpdate;
use crate::app::services::text_reader::{
    LineReader, format_fixed_width, parse_f64, parse_i32, read_file,
};
use crate::config::GeometryConfig;
use crate::{Error, Result};

/// Writing options for `.pol` files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolFileOptions {
    /// Repeat the first coordinate at the end of each ring
    pub include_closing_coordinate: bool,
}

impl Default for PolFileOptions {
    fn default() -> Self {
        Self {
            include_closing_coordinate: true,
        }
    }
}

impl From<&GeometryConfig> for PolFileOptions {
    fn from(config: &GeometryConfig) -> Self {
        Self {
            include_closing_coordinate: config.include_closing_coordinate,
        }
    }
}

/// Reader and writer for `.pol` files
#[derive(Debug, Clone, Default)]
pub struct PolFile {
    options: PolFileOptions,
}

impl PolFile {
    pub fn new(options: PolFileOptions) -> Self {
        Self { options }
    }

    /// Read all polygons of a file
    pub fn read(
        &self,
        path: &Path,
        progress: &mut dyn FnMut(&ProgressUpdate),
    ) -> Result<Vec<Feature2D>> {
        info!("Reading polygon file {}", path.display());
        let content = read_file(path)?;
        self.parse_content(&content, &path.display().to_string(), progress)
    }

    /// Parse all polygons from file content
    pub fn parse_content(
        &self,
        content: &str,
        source_name: &str,
        progress: &mut dyn FnMut(&ProgressUpdate),
    ) -> Result<Vec<Feature2D>> {
        let total_lines = content.lines().count();
        let mut reader = LineReader::new(content.as_bytes(), source_name)
            .skip_blank_lines()
            .skip_comment_lines();
        let mut features = Vec::new();

        while let Some(name_line) = reader.next_line()? {
            let count_line = reader.require_line("number of points and columns")?;
            let counts = count_line.fields();
            if counts.len() < 2 {
                return Err(reader.error("Invalid numpoints/numcolumns"));
            }
            let num_points = parse_i32(counts[0])
                .filter(|count| *count >= 0)
                .ok_or_else(|| reader.error(format!("Invalid value for nr of points '{}'", counts[0])))?;
            let num_columns = parse_i32(counts[1])
                .filter(|count| *count >= 2)
                .ok_or_else(|| {
                    reader.error(format!("Invalid value for nr of columns '{}'", counts[1]))
                })? as usize;

            let mut coordinates = Vec::new();
            for index in 0..num_points {
                let row = reader.require_line(&format!(
                    "point {} out of {} of polygon {}",
                    index + 1,
                    num_points,
                    name_line.text
                ))?;
                let fields = row.fields();
                if fields.len() < num_columns {
                    return Err(reader.error(format!(
                        "Invalid point row (expected {} columns, but was {})",
                        num_columns,
                        fields.len()
                    )));
                }

                let values: Vec<f64> = fields[..num_columns.min(3)]
                    .iter()
                    .map(|field| {
                        parse_f64(field)
                            .ok_or_else(|| reader.error(format!("Invalid number '{}'", field)))
                    })
                    .collect::<Result<_>>()?;

                coordinates.push(Coordinate {
                    x: values[0],
                    y: values[1],
                    z: values.get(2).copied(),
                });
            }

            let ring = LinearRing::new(coordinates).map_err(|e| reader.error(e.to_string()))?;
            features.push(Feature2D::new(name_line.text, Geometry::Polygon(ring)));
            progress(&ProgressUpdate::new(
                "Reading line",
                reader.line_number(),
                total_lines,
            ));
        }

        debug!("Read {} polygons from {}", features.len(), source_name);
        Ok(features)
    }

    /// Write polygons to a file
    pub fn write(&self, path: &Path, features: &[Feature2D]) -> Result<()> {
        info!("Writing {} polygons to {}", features.len(), path.display());
        let file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, features)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
    }

    /// Write polygons to any writer
    pub fn write_to<W: Write>(&self, writer: &mut W, features: &[Feature2D]) -> std::io::Result<()> {
        for feature in features {
            let coordinates = match &feature.geometry {
                Geometry::Polygon(ring) if !self.options.include_closing_coordinate => {
                    ring.open_coordinates()
                }
                geometry => geometry.coordinates(),
            };
            let with_z = coordinates.iter().any(|c| c.z.is_some());

            writeln!(writer, "{}", feature.name)?;
            writeln!(
                writer,
                "    {}    {}",
                coordinates.len(),
                if with_z { 3 } else { 2 }
            )?;
            for coordinate in coordinates {
                write!(
                    writer,
                    "{}{}",
                    format_fixed_width(coordinate.x),
                    format_fixed_width(coordinate.y)
                )?;
                if with_z {
                    write!(writer, "{}", format_fixed_width(coordinate.z.unwrap_or(0.0)))?;
                }
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}
