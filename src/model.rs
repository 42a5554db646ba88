// Core structs: TourismRecord, StoredRecord and the error types

use thiserror::Error;

/// One extracted table row: a country and its visitor count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourismRecord {
    pub country_name: String,
    pub number_of_foreigners: u64,
}

/// A `TourismRecord` as read back from the store, with its synthetic id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: i64,
    pub country_name: String,
    pub number_of_foreigners: u64,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("browser error: {0}")]
    BrowserError(String),
    #[error("render timed out after {0} seconds")]
    Timeout(u64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountError {
    #[error("not a number: {0}")]
    Invalid(#[from] std::num::ParseIntError),
    #[error("{0} exceeds the storable maximum")]
    OutOfRange(u64),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("HTML parse error: {0}")]
    HtmlParseError(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart window failed: {0}")]
    WindowError(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid target URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
