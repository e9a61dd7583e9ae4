//! INI parsing with line numbers

use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

use super::data::{IniData, IniProperty, IniSection};
use crate::Result;
use crate::app::services::tagged_records::parse_key_value_comment;
use crate::app::services::text_reader::LineReader;

/// Read an INI file
pub fn read_ini(path: &Path) -> Result<IniData> {
    info!("Reading INI file {}", path.display());
    parse_lines(LineReader::open(path)?)
}

/// Parse INI content held in memory
pub fn parse_ini(content: &str, source_name: &str) -> Result<IniData> {
    parse_lines(LineReader::new(content.as_bytes(), source_name))
}

fn parse_lines<R: BufRead>(reader: LineReader<R>) -> Result<IniData> {
    let mut reader = reader.skip_blank_lines().skip_comment_lines();
    let mut data = IniData::new();
    let mut current: Option<IniSection> = None;

    while let Some(line) = reader.next_line()? {
        if line.text.starts_with('[') {
            let name = line
                .text
                .strip_prefix('[')
                .and_then(|rest| rest.split_once(']'))
                .map(|(name, _)| name.trim())
                .filter(|name| !name.is_empty())
                .ok_or_else(|| reader.error(format!("Invalid section header '{}'", line.text)))?;

            if let Some(section) = current.take() {
                data.add_section(section);
            }
            let mut section = IniSection::new(name);
            section.line = line.number;
            current = Some(section);
            continue;
        }

        let entry = parse_key_value_comment(&line.text).map_err(|e| reader.error(e.to_string()))?;
        let section = current.as_mut().ok_or_else(|| {
            reader.error(format!(
                "Property '{}' is not part of a section",
                entry.key
            ))
        })?;

        section.add_property(IniProperty {
            key: entry.key,
            value: entry.value,
            comment: entry.comment,
            line: line.number,
        });
    }

    if let Some(section) = current.take() {
        data.add_section(section);
    }

    debug!(
        "Read {} sections from {}",
        data.sections.len(),
        reader.source_name()
    );
    Ok(data)
}
