use std::path::PathBuf;
use thiserror::Error;

use super::worker_status::WorkerStatus;

/// Errors raised while parsing a single wire field into a typed value.
#[derive(Debug, Clone, Error)]
pub enum FieldError {
    #[error("Field {0:?} could not be parsed as a float")]
    BadFloat(String),
    #[error("Field {0:?} could not be parsed as an integer")]
    BadInt(String),
    #[error("Field {0:?} is not a valid hex word")]
    BadHex(String),
    #[error("Field {0:?} does not match the degree-minute position layout")]
    BadPosition(String),
    #[error("Unknown hemisphere {0:?}; expected N, S, E or W")]
    BadHemisphere(String),
    #[error("Field {0:?} does not split into model and serial number")]
    BadInstrumentId(String),
    #[error("Field {0:?} does not match the compact date layout")]
    BadDate(String),
    #[error("Calendar component out of range: {0}")]
    BadCalendar(#[from] time::error::ComponentRange),
}

/// Errors that make a single tagged segment undecodable.
///
/// These are recovered locally: the segment's tag is dropped from the frame
/// and decoding continues. The exception is `MissingCentury`, which the frame
/// decoder escalates because it is a caller contract violation, not bad data.
#[derive(Debug, Clone, Error)]
pub enum TagError {
    #[error("Expected {expected} fields, found {found}")]
    WrongFieldCount { expected: usize, found: usize },
    #[error("Sensor reported no reading")]
    NoReading,
    #[error("A century hint is required to rebuild the date")]
    MissingCentury,
    #[error("Bad field: {0}")]
    Field(#[from] FieldError),
}

#[derive(Debug, Clone, Error)]
pub enum FrameError {
    #[error("Tag [{0}] requires a century hint, but none was supplied")]
    MissingCentury(&'static str),
}

#[derive(Debug, Error)]
pub enum DatStackError {
    #[error("DatStack failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("DatStack did not find any .dat files in {0:?}")]
    NoMatchingFiles(PathBuf),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Export failed to convert to yaml: {0}")]
    ParsingError(#[from] serde_yaml::Error),
    #[error("Export directory {0:?} does not exist")]
    BadExportPath(PathBuf),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to DatStack error: {0}")]
    StackError(#[from] DatStackError),
    #[error("Processor failed due to frame error: {0}")]
    FrameError(#[from] FrameError),
    #[error("Processor failed due to configuration error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to export error: {0}")]
    ExportError(#[from] ExportError),
    #[error("Processor failed due to Send error: {0}")]
    SendError(#[from] std::sync::mpsc::SendError<WorkerStatus>),
    #[error("Processor failed due to IO error: {0}")]
    IoError(#[from] std::io::Error),
}
