//! INI writing with aligned properties

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::data::{IniData, IniProperty};
use crate::constants::{INI_KEY_WIDTH, INI_VALUE_WIDTH};
use crate::{Error, Result};

/// Write an INI file
pub fn write_ini(path: &Path, data: &IniData) -> Result<()> {
    info!("Writing INI file {}", path.display());
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    write_ini_to(&mut writer, data)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
}

/// Write INI data to any writer, sections separated by a blank line
pub fn write_ini_to<W: Write>(writer: &mut W, data: &IniData) -> std::io::Result<()> {
    for (index, section) in data.sections.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "[{}]", section.name)?;
        for property in &section.properties {
            writeln!(writer, "{}", format_property(property))?;
        }
    }
    Ok(())
}

/// `    key<pad>= value<pad>\t# comment`, the comment part only when present
pub fn format_property(property: &IniProperty) -> String {
    let line = format!(
        "    {:<key_width$}= {:<value_width$}",
        property.key,
        property.value,
        key_width = INI_KEY_WIDTH,
        value_width = INI_VALUE_WIDTH
    );
    if property.comment.is_empty() {
        line.trim_end().to_string()
    } else {
        format!("{}\t# {}", line, property.comment)
    }
}
