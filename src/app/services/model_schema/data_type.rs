//! Property data types and their text representation
//!
//! The `type` column of a schema file names a data type. Enumerations are
//! written as `a|b|c` with the matching captions in the caption column as
//! `Caption:Choice A|Choice B|Choice C`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::warn;

use crate::app::models::Steerable;
use crate::app::services::text_reader::{format_f64, parse_f64};
use crate::constants::{DATE_FORMATS, DATE_TIME_FORMATS, DATE_TIME_WRITE_FORMAT, DATE_WRITE_FORMAT};
use crate::{Error, Result};

/// One choice of an enumeration type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumChoice {
    /// Text written in model files
    pub value: String,
    /// Text shown to users
    pub caption: String,
    /// Numeric value; the choice itself when numeric, otherwise its position
    pub index: i32,
}

/// Data type of a model property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "choices")]
pub enum DataType {
    Integer,
    Double,
    DoubleArray,
    TimeFrame,
    Interval,
    DateTime,
    DateOnly,
    String,
    FileName,
    MultipleEntriesFileName,
    Steerable,
    Bool,
    Enum(Vec<EnumChoice>),
}

/// A parsed property value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Integer(i32),
    Double(f64),
    DoubleArray(Vec<f64>),
    /// Seconds
    Interval(f64),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Text(String),
    TextList(Vec<String>),
    Bool(bool),
    Enum(EnumChoice),
    Steerable(Steerable),
}

impl PropertyValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Double(value) | PropertyValue::Interval(value) => Some(*value),
            PropertyValue::Integer(value) => Some(*value as f64),
            PropertyValue::Steerable(Steerable::Constant(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            PropertyValue::Integer(value) => Some(*value),
            PropertyValue::Enum(choice) => Some(choice.index),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            PropertyValue::Enum(choice) => Some(&choice.value),
            _ => None,
        }
    }

    pub fn as_doubles(&self) -> Option<&[f64]> {
        match self {
            PropertyValue::DoubleArray(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_steerable(&self) -> Option<&Steerable> {
        match self {
            PropertyValue::Steerable(steerable) => Some(steerable),
            _ => None,
        }
    }
}

impl DataType {
    /// Resolve the `type` column; returns the type and the caption without its
    /// enumeration choices. Errors are plain messages, located by the loader.
    pub fn from_schema(
        type_field: &str,
        caption_field: &str,
    ) -> std::result::Result<(DataType, String), String> {
        let caption = caption_field.to_string();
        let data_type = match type_field.to_ascii_lowercase().as_str() {
            "integer" => DataType::Integer,
            "double" => DataType::Double,
            "doublearray" => DataType::DoubleArray,
            "timeframe" => DataType::TimeFrame,
            "interval" => DataType::Interval,
            "datetime" => DataType::DateTime,
            "dateonly" => DataType::DateOnly,
            "string" => DataType::String,
            "filename" => DataType::FileName,
            "multipleentriesfilename" => DataType::MultipleEntriesFileName,
            "steerable" => DataType::Steerable,
            _ if type_field.contains('|') => return Self::choice_type(type_field, caption_field),
            _ => return Err(format!("Invalid type field '{}'", type_field)),
        };
        Ok((data_type, caption))
    }

    fn choice_type(
        type_field: &str,
        caption_field: &str,
    ) -> std::result::Result<(DataType, String), String> {
        let is_bool = ((type_field == "0|1" || type_field == "1|0") && !caption_field.contains('|'))
            || type_field == "true|false";
        if is_bool {
            return Ok((DataType::Bool, caption_field.to_string()));
        }

        let (caption, captions) = caption_field
            .split_once(':')
            .filter(|(_, captions)| !captions.contains(':'))
            .ok_or_else(|| format!("Invalid caption field '{}'", caption_field))?;

        let values: Vec<&str> = type_field.split('|').map(str::trim).collect();
        let captions: Vec<&str> = captions.split('|').map(str::trim).collect();
        if values.len() != captions.len() {
            return Err(format!(
                "Inconsistent caption and type field for '{}'",
                caption
            ));
        }

        let numeric: Option<Vec<i32>> = values.iter().map(|value| value.parse().ok()).collect();
        let choices = values
            .iter()
            .zip(captions)
            .enumerate()
            .map(|(position, (value, caption))| EnumChoice {
                value: value.to_string(),
                caption: caption.to_string(),
                index: numeric
                    .as_ref()
                    .map(|numbers| numbers[position])
                    .unwrap_or(position as i32),
            })
            .collect();

        Ok((DataType::Enum(choices), caption.trim().to_string()))
    }

    /// Human readable description of the accepted text, used in error messages
    pub fn description(&self) -> String {
        match self {
            DataType::Integer => "a whole number".to_string(),
            DataType::Double => "a number".to_string(),
            DataType::DoubleArray | DataType::TimeFrame => {
                "a series of space separated numbers".to_string()
            }
            DataType::Interval => "a time span in seconds".to_string(),
            DataType::DateTime | DataType::DateOnly => {
                "a date in yyyyMMdd or yyyyMMddHHmmss format".to_string()
            }
            DataType::String | DataType::FileName | DataType::MultipleEntriesFileName => {
                "a text".to_string()
            }
            DataType::Steerable => "a number or a filepath to a time series".to_string(),
            DataType::Bool => "a '1' or '0'".to_string(),
            DataType::Enum(choices) => format!(
                "Any of the following values: {}",
                choices
                    .iter()
                    .map(|choice| choice.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Parse text as a value of this type
    pub fn parse_value(&self, text: &str) -> Result<PropertyValue> {
        let trimmed = text.trim();
        let invalid = || {
            Error::invalid_argument(format!(
                "Invalid value '{}', expected {}",
                trimmed,
                self.description()
            ))
        };

        let value = match self {
            DataType::Integer => {
                PropertyValue::Integer(trimmed.parse::<i32>().map_err(|_| invalid())?)
            }
            DataType::Double => PropertyValue::Double(parse_f64(trimmed).ok_or_else(invalid)?),
            DataType::DoubleArray | DataType::TimeFrame => {
                PropertyValue::DoubleArray(parse_double_array(trimmed))
            }
            DataType::Interval => {
                if trimmed.is_empty() {
                    PropertyValue::Interval(0.0)
                } else {
                    PropertyValue::Interval(parse_f64(trimmed).ok_or_else(invalid)?)
                }
            }
            DataType::DateTime => PropertyValue::DateTime(parse_date_time(trimmed).ok_or_else(invalid)?),
            DataType::DateOnly => PropertyValue::Date(parse_date(trimmed).ok_or_else(invalid)?),
            DataType::String | DataType::FileName => PropertyValue::Text(trimmed.to_string()),
            DataType::MultipleEntriesFileName => PropertyValue::TextList(
                trimmed.split_whitespace().map(str::to_string).collect(),
            ),
            DataType::Steerable => {
                PropertyValue::Steerable(Steerable::parse(trimmed).ok_or_else(invalid)?)
            }
            DataType::Bool => {
                PropertyValue::Bool(trimmed == "1" || trimmed.eq_ignore_ascii_case("true"))
            }
            DataType::Enum(choices) => PropertyValue::Enum(
                choices
                    .iter()
                    .find(|choice| {
                        same_choice(&choice.value, trimmed) || same_choice(&choice.caption, trimmed)
                    })
                    .cloned()
                    .ok_or_else(invalid)?,
            ),
        };
        Ok(value)
    }

    /// Text of a value as written in model files
    pub fn format_value(&self, value: &PropertyValue) -> String {
        match value {
            PropertyValue::Integer(number) => number.to_string(),
            PropertyValue::Double(number) => format_f64(*number),
            PropertyValue::DoubleArray(numbers) => numbers
                .iter()
                .map(|number| format_f64(*number))
                .collect::<Vec<_>>()
                .join(" "),
            PropertyValue::Interval(seconds) if *seconds == 0.0 => String::new(),
            PropertyValue::Interval(seconds) => format_f64(*seconds),
            PropertyValue::DateTime(time) => time.format(DATE_TIME_WRITE_FORMAT).to_string(),
            PropertyValue::Date(date) => date.format(DATE_WRITE_FORMAT).to_string(),
            PropertyValue::Text(text) => text.clone(),
            PropertyValue::TextList(texts) => texts.join(" "),
            PropertyValue::Bool(flag) => String::from(if *flag { "1" } else { "0" }),
            PropertyValue::Enum(choice) => choice.value.clone(),
            PropertyValue::Steerable(steerable) => steerable.to_string(),
        }
    }
}

/// Choice comparison ignoring case and underscores, so `from_left` matches `fromLeft`
fn same_choice(choice: &str, text: &str) -> bool {
    let normalize = |s: &str| s.replace('_', "").to_ascii_lowercase();
    normalize(choice) == normalize(text)
}

/// Space separated numbers; unreadable items become NaN
fn parse_double_array(text: &str) -> Vec<f64> {
    text.split_whitespace()
        .map(|item| {
            parse_f64(item).unwrap_or_else(|| {
                warn!("Value '{}' in collection cannot be read and is skipped", item);
                f64::NAN
            })
        })
        .collect()
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| parse_date(text).and_then(|date| date.and_hms_opt(0, 0, 0)))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
