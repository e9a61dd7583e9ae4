//! Structures `.ini` file reading and writing
//!
//! Reading runs in two steps. Sections are first turned into validated
//! [`Structure2D`] definitions; warnings go to the [`LogHandler`] and invalid
//! definitions are reported and skipped. Definitions are then converted by the
//! [`StructureFactory`]; a conversion failing with a recoverable error drops only
//! that structure, any other error aborts the read.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::factory::StructureFactory;
use super::structure2d::{Property, Structure2D, Structure2DType};
use super::validator::StructureValidator;
use super::writer::{SectionWriter, general_section};
use crate::app::models::Structure;
use crate::app::services::ini::{IniData, IniProperty, IniSection, read_ini, write_ini};
use crate::app::services::log_handler::LogHandler;
use crate::app::services::model_schema::{DataType, ModelPropertyDefinition, ModelSchema};
use crate::config::{GeometryConfig, ReaderConfig, StructuresConfig};
use crate::constants::{LEGACY_PROPERTY_KEYS, structure_file, structure_keys as keys};
use crate::{Error, Result};

/// Reader and writer of structures files against one structure schema
#[derive(Debug, Clone)]
pub struct StructuresFile<'a> {
    schema: &'a ModelSchema,
    reference_date: NaiveDateTime,
    config: StructuresConfig,
    geometry: GeometryConfig,
    reference_path: Option<PathBuf>,
}

impl<'a> StructuresFile<'a> {
    pub fn new(schema: &'a ModelSchema, config: &ReaderConfig) -> Self {
        Self {
            schema,
            reference_date: config.reference_date,
            config: config.structures.clone(),
            geometry: config.geometry.clone(),
            reference_path: None,
        }
    }

    /// Resolve companion files relative to `path` instead of the structures file
    pub fn with_reference_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_path = Some(path.into());
        self
    }

    pub fn reference_date(&self) -> NaiveDateTime {
        self.reference_date
    }

    fn reference_path(&self, file_path: &Path) -> PathBuf {
        self.reference_path
            .clone()
            .unwrap_or_else(|| file_path.to_path_buf())
    }

    // =========================================================================
    // Reading
    // =========================================================================

    /// Read and convert all structures, reporting collected warnings when done
    pub fn read(&self, path: &Path) -> Result<Vec<Structure>> {
        let mut log = LogHandler::new(format!("reading the structures file ({})", path.display()));
        let result = self.read_with_log(path, &mut log);
        log.log_report();
        result
    }

    /// Read and convert all structures into a caller-supplied log
    pub fn read_with_log(&self, path: &Path, log: &mut LogHandler) -> Result<Vec<Structure>> {
        let definitions = self.read_definitions(path, log).inspect_err(|_| {
            error!(
                "Error while reading and converting 2D structures from {}",
                path.display()
            )
        })?;

        let reference_path = self.reference_path(path);
        let mut structures = Vec::with_capacity(definitions.len());
        for definition in &definitions {
            match StructureFactory::create_structure(definition, &reference_path, self.reference_date)
            {
                Ok(structure) => structures.push(structure),
                Err(e) if e.is_recoverable_structure_error() => {
                    let message = format!(
                        "Failed to convert .ini structure definition '{}' to actual structure (Line {}): {}",
                        definition.name().unwrap_or_default(),
                        definition.line,
                        e
                    );
                    error!("{}", message);
                    log.report_error(message);
                }
                Err(e) => {
                    error!(
                        "Error while reading and converting 2D structures from {}",
                        path.display()
                    );
                    return Err(e);
                }
            }
        }

        info!(
            "Read {} of {} structure definitions from {}",
            structures.len(),
            definitions.len(),
            path.display()
        );
        Ok(structures)
    }

    /// Read the validated structure definitions without converting them
    pub fn read_definitions(&self, path: &Path, log: &mut LogHandler) -> Result<Vec<Structure2D>> {
        let mut ini = read_ini(path)?;
        let file = path.display().to_string();
        self.check_general_header(&ini, &file, log)?;

        for section in &mut ini.sections {
            rename_legacy_properties(section);
        }

        let mut definitions = Vec::new();
        for section in &ini.sections {
            if section.is_named(structure_file::GENERAL_SECTION) {
                continue;
            }

            if !section.is_named(structure_file::STRUCTURE_SECTION) {
                log.report_warning(format!(
                    "Section [{}] not supported for structures and is skipped (Line {})",
                    section.name, section.line
                ));
                continue;
            }

            let Some(type_property) = section.property(keys::TYPE) else {
                log.report_warning(format!(
                    "Obligated property '{}' expected but is missing; structure is skipped (Line {})",
                    keys::TYPE,
                    section.line
                ));
                continue;
            };

            let definition = self.create_definition(&type_property.value, section, &file, log)?;
            let message = StructureValidator::validate(&definition);
            if !message.is_empty() {
                log.report_error(format!(
                    "Failed to convert ini structure definition to actual structure (Line {}): {}",
                    section.line, message
                ));
                continue;
            }

            definitions.push(definition);
        }

        Ok(definitions)
    }

    fn check_general_header(&self, ini: &IniData, file: &str, log: &mut LogHandler) -> Result<()> {
        let Some(general) = ini.section(structure_file::GENERAL_SECTION) else {
            let message = format!(
                "Missing [{}] header with {} and {}",
                structure_file::GENERAL_SECTION,
                structure_file::FILE_VERSION_KEY,
                structure_file::FILE_TYPE_KEY
            );
            if self.config.require_general_header {
                return Err(Error::format(file, 1, message));
            }
            log.report_warning(message);
            return Ok(());
        };

        let version = general
            .property(structure_file::FILE_VERSION_KEY)
            .ok_or_else(|| {
                Error::format(
                    file,
                    general.line,
                    format!(
                        "Missing {} in [{}] header",
                        structure_file::FILE_VERSION_KEY,
                        general.name
                    ),
                )
            })?;
        let (major, minor) = parse_version(&version.value).ok_or_else(|| {
            Error::format(
                file,
                version.line,
                format!("Invalid file version '{}'", version.value),
            )
        })?;

        let supported = (
            self.config.supported_major_version,
            self.config.supported_minor_version,
        );
        let supported_minor = format!("{:02}", supported.1);
        if (major, minor) > (supported.0, decimal_fraction(&supported_minor)) {
            return Err(Error::format(
                file,
                version.line,
                format!(
                    "Unsupported file version {}, the highest supported version is {}.{:02}",
                    version.value, supported.0, supported.1
                ),
            ));
        }

        match general.property(structure_file::FILE_TYPE_KEY) {
            Some(file_type) if file_type.value.eq_ignore_ascii_case(structure_file::FILE_TYPE) => {
                Ok(())
            }
            Some(file_type) => Err(Error::format(
                file,
                file_type.line,
                format!(
                    "Unexpected file type '{}', expected '{}'",
                    file_type.value,
                    structure_file::FILE_TYPE
                ),
            )),
            None => Err(Error::format(
                file,
                general.line,
                format!(
                    "Missing {} in [{}] header",
                    structure_file::FILE_TYPE_KEY,
                    general.name
                ),
            )),
        }
    }

    fn create_definition(
        &self,
        structure_type: &str,
        section: &IniSection,
        file: &str,
        log: &mut LogHandler,
    ) -> Result<Structure2D> {
        let mut definition = Structure2D::new(structure_type).with_line(section.line);

        for property in &section.properties {
            let property_definition = match self
                .schema
                .structure_definition(structure_type, &property.key)
            {
                Some(found) => found.clone(),
                None if is_identity_key(&property.key) => {
                    ModelPropertyDefinition::text(&property.key, structure_type)
                }
                None => {
                    log.report_warning(format!(
                        "Property {} not supported for structures of type {} and is skipped (Line {})",
                        property.key, structure_type, property.line
                    ));
                    continue;
                }
            };

            let description = property_definition.data_type.description();
            let parsed = Property::new(property_definition, &property.value, property.line)
                .map_err(|_| {
                    Error::format(
                        file,
                        property.line,
                        format!(
                            "An invalid value was encountered (expected {}) for property {}",
                            description, property.key
                        ),
                    )
                })?;
            definition.add_property(parsed);
        }

        self.add_schema_defaults(&mut definition, log);
        Ok(definition)
    }

    /// Add absent required properties and steerables that have a schema default
    ///
    /// The factory then reads these values from the definition, so its own
    /// fallbacks only apply where the schema has no default.
    fn add_schema_defaults(&self, definition: &mut Structure2D, log: &mut LogHandler) {
        let required: &[&str] = match definition.structure_type {
            Structure2DType::Pump => &[keys::CAPACITY],
            Structure2DType::Weir | Structure2DType::GeneralStructure => &[keys::CREST_LEVEL],
            Structure2DType::Gate | Structure2DType::LeveeBreach | Structure2DType::InvalidType => {
                &[]
            }
        };

        let defaults: Vec<&ModelPropertyDefinition> = self
            .schema
            .definitions()
            .filter(|found| {
                found
                    .structure_type
                    .eq_ignore_ascii_case(&definition.declared_type)
            })
            .filter(|found| {
                matches!(found.data_type, DataType::Steerable)
                    || required
                        .iter()
                        .any(|key| key.eq_ignore_ascii_case(&found.file_key))
            })
            .filter(|found| !found.default_value.is_empty())
            .filter(|found| definition.get_property(&found.file_key).is_none())
            .collect();

        for schema_definition in defaults {
            match Property::new(
                schema_definition.clone(),
                &schema_definition.default_value,
                definition.line,
            ) {
                Ok(property) => definition.add_property(property),
                Err(e) => log.report_warning(format!(
                    "Default value '{}' of property {} for structures of type {} is not applied: {}",
                    schema_definition.default_value,
                    schema_definition.file_key,
                    definition.declared_type,
                    e
                )),
            }
        }
    }

    // =========================================================================
    // Writing
    // =========================================================================

    /// Write structures with their `.tim` and `.pli` companion files
    pub fn write(&self, path: &Path, structures: &[Structure]) -> Result<()> {
        let reference_path = self.reference_path(path);
        let directory = reference_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut log = LogHandler::new(format!("writing the structures file ({})", path.display()));

        let mut data = IniData::new();
        data.add_section(general_section(&self.config));
        for structure in structures {
            let writer = SectionWriter::new(
                self.schema,
                structure,
                &directory,
                self.reference_date,
                &self.geometry,
            );
            data.add_section(writer.write(&mut log)?);
        }

        write_ini(path, &data)?;
        log.log_report();
        info!("Wrote {} structures to {}", structures.len(), path.display());
        Ok(())
    }

    /// Write structure definitions as they are, without companion files
    pub fn write_definitions(&self, path: &Path, definitions: &[Structure2D]) -> Result<()> {
        let mut data = IniData::new();
        data.add_section(general_section(&self.config));

        for definition in definitions {
            let mut section = IniSection::new(structure_file::STRUCTURE_SECTION);
            for property in definition.properties() {
                section.add_property(IniProperty::new(
                    property.key(),
                    &property.raw,
                    &property.definition.description,
                ));
            }
            data.add_section(section);
        }

        write_ini(path, &data)?;
        info!(
            "Wrote {} structure definitions to {}",
            definitions.len(),
            path.display()
        );
        Ok(())
    }
}

/// `id` and `type` are kept even when the schema does not describe them
fn is_identity_key(key: &str) -> bool {
    key.eq_ignore_ascii_case(keys::ID) || key.eq_ignore_ascii_case(keys::TYPE)
}

/// Legacy keys are matched exactly; `gateheight` is renamed but `gateHeight` is current
fn rename_legacy_properties(section: &mut IniSection) {
    for property in &mut section.properties {
        if let Some((_, key)) = LEGACY_PROPERTY_KEYS
            .iter()
            .find(|(legacy_key, _)| *legacy_key == property.key)
        {
            property.key = key.to_string();
        }
    }
}

/// `<major>.<minor>` or a bare major version, the minor part as a decimal
/// fraction so that `2.1` is read as `2.10`
fn parse_version(text: &str) -> Option<(u32, &str)> {
    match text.trim().split_once('.') {
        Some((major, minor)) => {
            if minor.is_empty() || !minor.bytes().all(|byte| byte.is_ascii_digit()) {
                return None;
            }
            Some((major.parse().ok()?, decimal_fraction(minor)))
        }
        None => Some((text.trim().parse().ok()?, "")),
    }
}

/// Fraction digits without trailing zeros; these order like the fractions
fn decimal_fraction(digits: &str) -> &str {
    digits.trim_end_matches('0')
}
