// Tax Dashboard - Data Access Layer
// CSV → Vec<Record>, re-read in full on every call

use crate::error::DataUnavailable;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Columns every data source must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["place", "type", "year", "amt"];

// ============================================================================
// CORE TYPES
// ============================================================================

/// Category - the tax class a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "residential")]
    Residential,
    #[serde(rename = "business")]
    Business,
    #[serde(rename = "lightindustry")]
    LightIndustry,
}

impl Category {
    /// Tag used in the data file
    pub fn code(&self) -> &'static str {
        match self {
            Category::Residential => "residential",
            Category::Business => "business",
            Category::LightIndustry => "lightindustry",
        }
    }

    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            Category::Residential => "Residential",
            Category::Business => "Business",
            Category::LightIndustry => "Light Industry",
        }
    }
}

/// Record - one row of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "place")]
    pub place: String,

    #[serde(rename = "type")]
    pub category: Category,

    #[serde(rename = "year")]
    pub year: i32,

    #[serde(rename = "amt")]
    pub amount: f64,
}

impl Record {
    pub fn new(place: &str, category: Category, year: i32, amount: f64) -> Self {
        Record {
            place: place.to_string(),
            category,
            year,
            amount,
        }
    }
}

// ============================================================================
// RECORD SOURCES
// ============================================================================

/// RecordSource - anything that can hand the pipeline a full record set
///
/// Implementations are free to cache; the CSV source deliberately does not.
pub trait RecordSource: Send + Sync {
    fn load_records(&self) -> Result<Vec<Record>, DataUnavailable>;
}

/// CsvRecordSource - reads the CSV file from disk on every call
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvRecordSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvRecordSource {
    fn load_records(&self) -> Result<Vec<Record>, DataUnavailable> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            warn!(path = ?self.path, "data source unavailable: {}", e);
            DataUnavailable::Unreadable {
                path: self.path.clone(),
                source: e.into(),
            }
        })?;

        let records = load_records_from_reader(file)?;
        debug!(path = ?self.path, rows = records.len(), "loaded records");
        Ok(records)
    }
}

impl<T: RecordSource + ?Sized> RecordSource for Box<T> {
    fn load_records(&self) -> Result<Vec<Record>, DataUnavailable> {
        (**self).load_records()
    }
}

/// In-memory source, handy for tests and for embedding fixed data
impl RecordSource for Vec<Record> {
    fn load_records(&self) -> Result<Vec<Record>, DataUnavailable> {
        Ok(self.clone())
    }
}

/// Parse records from any CSV reader
///
/// The header must name every column in [`REQUIRED_COLUMNS`]; order is free
/// and extra columns are ignored. Only header names are trimmed, field values
/// keep their exact bytes. Any row that fails to decode (an empty `amt` cell
/// included) fails the whole load.
pub fn load_records_from_reader<R: Read>(reader: R) -> Result<Vec<Record>, DataUnavailable> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let headers = rdr.headers().map_err(DataUnavailable::malformed)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataUnavailable::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: Record = result.map_err(DataUnavailable::malformed)?;
        records.push(record);
    }

    Ok(records)
}

// ============================================================================
// TESTS
// ============================================================================
