//! Polyline files (`.pli` and `.pliz`)
//!
//! A file holds repeated blocks of a feature name, a `numPoints numColumns`
//! line and one row per point:
//!
//! ```text
//! weir01
//!     2    2
//! 1.000000000000000E+001  2.000000000000000E+001
//! 3.000000000000000E+001  4.000000000000000E+001
//! ```
//!
//! A row with `-999` as x or y ends a sub-feature; sub-features of block `name`
//! are called `name-1`, `name-2`, and so on.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::app::models::{Coordinate, Feature2D, Geometry};
use crate::app::services::log_handler::LogHandler;
use crate::app::services::progress::ProgressUpdate;
use crate::app::services::text_reader::{
    LineReader, format_e15, format_fixed_width, parse_f64, parse_i32, read_file,
};
use crate::config::GeometryConfig;
use crate::constants::{
    PLI_FIRST_ATTRIBUTE_COLUMN, PLI_LAST_NUMERIC_COLUMN, PLI_NUMERIC_COLUMN_PREFIX,
    PLI_WEIR_TYPE_ATTRIBUTE, PLI_WEIR_TYPE_COLUMN, PLIZ_EXTENSION,
};
use crate::{Error, Result};

const STRING_ATTRIBUTE_DEFAULT: &str = "T";

/// Name of the numeric attribute stored in 1-based column `column`
pub fn numeric_column_key(column: usize) -> String {
    format!("{}{}", PLI_NUMERIC_COLUMN_PREFIX, column)
}

/// 1-based column of a numeric attribute key such as `Column5`
fn numeric_column_index(key: &str) -> Option<usize> {
    key.strip_prefix(PLI_NUMERIC_COLUMN_PREFIX)?.parse().ok()
}

/// Reader and writer for `.pli` and `.pliz` files
#[derive(Debug, Clone)]
pub struct PliFile {
    with_z: bool,
    progress_interval: usize,
}

impl Default for PliFile {
    fn default() -> Self {
        Self::new(&GeometryConfig::default())
    }
}

impl PliFile {
    /// `.pli` reader and writer
    pub fn new(config: &GeometryConfig) -> Self {
        Self {
            with_z: false,
            progress_interval: config.progress_interval.max(1),
        }
    }

    /// `.pliz` reader and writer, the third column holds z
    pub fn pliz(config: &GeometryConfig) -> Self {
        Self {
            with_z: true,
            ..Self::new(config)
        }
    }

    /// Choose between `.pli` and `.pliz` by file extension
    pub fn for_path(path: &Path, config: &GeometryConfig) -> Self {
        let is_pliz = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PLIZ_EXTENSION));
        if is_pliz {
            Self::pliz(config)
        } else {
            Self::new(config)
        }
    }

    pub fn has_z(&self) -> bool {
        self.with_z
    }

    /// Read all features of a file
    pub fn read(
        &self,
        path: &Path,
        log: &mut LogHandler,
        progress: &mut dyn FnMut(&ProgressUpdate),
    ) -> Result<Vec<Feature2D>> {
        info!("Reading polyline file {}", path.display());
        let content = read_file(path)?;
        self.parse_content(&content, &path.display().to_string(), log, progress)
    }

    /// Parse all features from file content
    pub fn parse_content(
        &self,
        content: &str,
        source_name: &str,
        log: &mut LogHandler,
        progress: &mut dyn FnMut(&ProgressUpdate),
    ) -> Result<Vec<Feature2D>> {
        let total_lines = content.lines().count();
        let mut reader = LineReader::new(content.as_bytes(), source_name)
            .skip_blank_lines()
            .skip_comment_lines();

        let mut features = Vec::new();
        let mut max_columns = 0;
        let mut reported_chunk = 0;

        while let Some(name_line) = reader.next_line()? {
            let name = name_line.text;

            let count_line = reader.require_line("number of points and columns")?;
            let (num_points, num_columns) = self.parse_counts(&reader, &count_line.fields())?;
            max_columns = max_columns.max(num_columns);

            let mut block = BlockBuilder::new(name, num_columns);
            for index in 0..num_points {
                let row = reader.next_line()?.ok_or_else(|| {
                    Error::format(
                        source_name,
                        reader.line_number() + 1,
                        format!(
                            "Unexpected end of file, expected more data (attempting to read point {} out of {})",
                            index + 1,
                            num_points
                        ),
                    )
                })?;
                self.read_row(&reader, &row.fields(), &mut block, &mut features)?;

                let chunk = reader.line_number() / self.progress_interval;
                if chunk > reported_chunk {
                    reported_chunk = chunk;
                    progress(&ProgressUpdate::new(
                        "Reading line",
                        reader.line_number(),
                        total_lines,
                    ));
                }
            }
            block.finish(&mut features);
        }

        if max_columns > PLI_WEIR_TYPE_COLUMN {
            log.report_warning(format!(
                "In file {}: columns {} to {} will be ignored.",
                source_name,
                PLI_WEIR_TYPE_COLUMN + 1,
                max_columns
            ));
        }

        debug!("Read {} features from {}", features.len(), source_name);
        Ok(features)
    }

    fn parse_counts<R: BufRead>(
        &self,
        reader: &LineReader<R>,
        fields: &[&str],
    ) -> Result<(usize, usize)> {
        if fields.len() < 2 {
            return Err(reader.error("Invalid numpoints/numcolumns"));
        }

        let num_points = parse_i32(fields[0])
            .filter(|count| *count >= 0)
            .ok_or_else(|| reader.error(format!("Invalid value for nr of points '{}'", fields[0])))?;
        let min_columns = if self.with_z { 3 } else { 2 };
        let num_columns = parse_i32(fields[1])
            .filter(|count| *count >= min_columns)
            .ok_or_else(|| {
                reader.error(format!("Invalid value for nr of columns '{}'", fields[1]))
            })?;

        Ok((num_points as usize, num_columns as usize))
    }

    fn read_row<R: BufRead>(
        &self,
        reader: &LineReader<R>,
        fields: &[&str],
        block: &mut BlockBuilder,
        features: &mut Vec<Feature2D>,
    ) -> Result<()> {
        let num_columns = block.num_columns;
        if fields.len() < num_columns
            || (fields.len() >= PLI_LAST_NUMERIC_COLUMN && fields.len() > num_columns + 1)
        {
            return Err(reader.error(format!(
                "Invalid point row (expected {} columns, but was {})",
                num_columns,
                fields.len()
            )));
        }

        let number = |index: usize| {
            parse_f64(fields[index]).ok_or_else(|| {
                reader.error(format!(
                    "Invalid placement of string value '{}' in column {}",
                    fields[index],
                    index + 1
                ))
            })
        };

        let x = number(0)?;
        let y = number(1)?;
        let mut coordinate = Coordinate::new(x, y);
        if coordinate.is_separator() {
            block.split(features);
            return Ok(());
        }

        let first_attribute = if self.with_z {
            coordinate.z = Some(number(2)?);
            PLI_FIRST_ATTRIBUTE_COLUMN
        } else {
            PLI_FIRST_ATTRIBUTE_COLUMN - 1
        };

        block.points.push(coordinate);
        for index in first_attribute..num_columns.min(PLI_WEIR_TYPE_COLUMN) {
            let column = index + 1;
            if column == PLI_WEIR_TYPE_COLUMN {
                block.weir_types.push(fields[index].to_string());
            } else {
                let value = number(index)?;
                block.numeric.entry(column).or_default().push(value);
            }
        }

        let location = (fields.len() == num_columns + 1).then(|| fields[num_columns].to_string());
        block.location_names.push(location);
        Ok(())
    }

    /// Write features to a file
    pub fn write(&self, path: &Path, features: &[Feature2D], log: &mut LogHandler) -> Result<()> {
        info!("Writing {} features to {}", features.len(), path.display());
        let file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, features, log)
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
        writer
            .flush()
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
    }

    /// Write features to any writer
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        features: &[Feature2D],
        log: &mut LogHandler,
    ) -> std::io::Result<()> {
        for feature in features {
            let mut numeric: Vec<(&String, &Vec<f64>)> = feature.numeric_attributes.iter().collect();
            numeric.sort_by_key(|(key, _)| numeric_column_index(key).unwrap_or(usize::MAX));
            let strings: Vec<(&String, &Vec<String>)> = feature.string_attributes.iter().collect();

            let dimensions = if self.with_z { 3 } else { 2 };
            let num_columns = dimensions + numeric.len() + strings.len();
            let coordinates = feature.geometry.coordinates();

            writeln!(writer, "{}", feature.name)?;
            writeln!(writer, "    {}    {}", coordinates.len(), num_columns)?;

            for (index, coordinate) in coordinates.iter().enumerate() {
                let mut line = if self.with_z {
                    format!(
                        "{}{}{}",
                        format_fixed_width(coordinate.x),
                        format_fixed_width(coordinate.y),
                        format_fixed_width(coordinate.z.unwrap_or(0.0))
                    )
                } else {
                    format!("{}  {}", format_e15(coordinate.x), format_e15(coordinate.y))
                };

                for (key, values) in &numeric {
                    let value = values.get(index).copied().unwrap_or_else(|| {
                        warn_short_column(log, &feature.name, key, "zero");
                        0.0
                    });
                    if self.with_z {
                        line.push_str(&format_fixed_width(value));
                    } else {
                        line.push_str(&format!("  {}", format_e15(value)));
                    }
                }

                for (key, values) in &strings {
                    let value = values.get(index).map(String::as_str).unwrap_or_else(|| {
                        warn_short_column(log, &feature.name, key, STRING_ATTRIBUTE_DEFAULT);
                        STRING_ATTRIBUTE_DEFAULT
                    });
                    line.push_str("  ");
                    line.push_str(value);
                }

                if let Some(location) = feature.location_names.get(index) {
                    if !location.is_empty() {
                        line.push(' ');
                        line.push_str(location);
                    }
                }

                writeln!(writer, "{}", line)?;
            }
        }
        Ok(())
    }
}

fn warn_short_column(log: &mut LogHandler, feature: &str, key: &str, filler: &str) {
    log.report_warning(format!(
        "Feature {} has a smaller number of attribute values than geometry points for {}; filling up remaining entries with {}",
        feature, key, filler
    ));
}

/// Rows of the block being read, split into sub-features at separator rows
struct BlockBuilder {
    name: String,
    num_columns: usize,
    sub_features: usize,
    points: Vec<Coordinate>,
    numeric: BTreeMap<usize, Vec<f64>>,
    weir_types: Vec<String>,
    location_names: Vec<Option<String>>,
}

impl BlockBuilder {
    fn new(name: String, num_columns: usize) -> Self {
        Self {
            name,
            num_columns,
            sub_features: 0,
            points: Vec::new(),
            numeric: BTreeMap::new(),
            weir_types: Vec::new(),
            location_names: Vec::new(),
        }
    }

    /// Close the current sub-feature at a separator row
    fn split(&mut self, features: &mut Vec<Feature2D>) {
        self.sub_features += 1;
        let name = format!("{}-{}", self.name, self.sub_features);
        self.emit(name, features);
    }

    /// Close the last sub-feature at the end of the block
    fn finish(mut self, features: &mut Vec<Feature2D>) {
        if self.points.is_empty() {
            return;
        }
        let name = if self.sub_features > 0 {
            self.sub_features += 1;
            format!("{}-{}", self.name, self.sub_features)
        } else {
            self.name.clone()
        };
        self.emit(name, features);
    }

    fn emit(&mut self, name: String, features: &mut Vec<Feature2D>) {
        let points = std::mem::take(&mut self.points);
        let numeric = std::mem::take(&mut self.numeric);
        let weir_types = std::mem::take(&mut self.weir_types);
        let location_names = std::mem::take(&mut self.location_names);

        let Some(geometry) = Geometry::from_coordinates(points) else {
            return;
        };

        let mut feature = Feature2D::new(name, geometry);
        for (column, values) in numeric {
            feature
                .numeric_attributes
                .insert(numeric_column_key(column), values);
        }
        if !weir_types.is_empty() {
            feature
                .string_attributes
                .insert(PLI_WEIR_TYPE_ATTRIBUTE.to_string(), weir_types);
        }
        if location_names.iter().any(Option::is_some) {
            feature.location_names = location_names
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect();
        }
        features.push(feature);
    }
}
