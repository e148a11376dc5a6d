//! CSV dataset loading and cleaning
//!
//! Reads the domestic fare table (header row required), keeps the columns
//! the model uses and drops every row with a missing value in any of them.
//! Present-but-malformed values are errors, reported with their line.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns that must appear in the header
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "city1",
    "city2",
    "passengers",
    "fare_lg",
    "quarter",
    "carrier_lg",
];

/// Cell values treated as missing, besides empty cells
const MISSING_MARKERS: [&str; 7] = ["NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// One cleaned fare observation
#[derive(Debug, Clone, PartialEq)]
pub struct FareRecord {
    pub origin: String,
    pub destination: String,
    /// Passenger count; carried along but not used by the model
    pub passengers: Option<f64>,
    /// List fare in USD (target)
    pub fare: f64,
    /// Calendar quarter, 1-4
    pub quarter: u8,
    pub carrier: String,
}

/// Row counts from the missing-value filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningStats {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub rows_kept: usize,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    city1: Option<String>,
    city2: Option<String>,
    passengers: Option<String>,
    fare_lg: Option<String>,
    quarter: Option<String>,
    carrier_lg: Option<String>,
}

/// Cleaned training records
#[derive(Clone, Debug)]
pub struct Dataset {
    pub records: Vec<FareRecord>,
    pub stats: CleaningStats,
}

impl Dataset {
    /// Load and clean a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("Failed to load dataset {}", path.display()))
    }

    /// Load and clean CSV data from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let headers = rdr.headers().context("Failed to read CSV header")?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                bail!("Missing required column '{}'", column);
            }
        }

        let mut records = Vec::new();
        let mut stats = CleaningStats::default();

        for row in rdr.records() {
            let row = row.context("Malformed CSV row")?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            stats.rows_read += 1;

            let raw: RawRecord = row
                .deserialize(Some(&headers))
                .with_context(|| format!("Line {}: unreadable record", line))?;

            match clean_record(raw, line)? {
                Some(record) => records.push(record),
                None => stats.rows_dropped += 1,
            }
        }

        stats.rows_kept = records.len();
        if records.is_empty() {
            bail!(
                "Dataset has no complete records ({} read, {} dropped)",
                stats.rows_read,
                stats.rows_dropped
            );
        }

        Ok(Self { records, stats })
    }

    /// Get number of samples
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if dataset is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fares in record order
    pub fn targets(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.fare).collect()
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && !MISSING_MARKERS.contains(&v.as_str()))
}

/// Returns `Ok(None)` when a used column is missing.
fn clean_record(raw: RawRecord, line: u64) -> Result<Option<FareRecord>> {
    let (Some(origin), Some(destination), Some(fare), Some(quarter), Some(carrier)) = (
        present(raw.city1),
        present(raw.city2),
        present(raw.fare_lg),
        present(raw.quarter),
        present(raw.carrier_lg),
    ) else {
        return Ok(None);
    };

    let fare = fare
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .with_context(|| format!("Line {}: invalid fare_lg {:?}", line, fare))?;

    let quarter = parse_quarter(&quarter)
        .with_context(|| format!("Line {}: invalid quarter {:?}", line, quarter))?;

    let passengers = match present(raw.passengers) {
        Some(p) => Some(
            p.parse::<f64>()
                .with_context(|| format!("Line {}: invalid passengers {:?}", line, p))?,
        ),
        None => None,
    };

    Ok(Some(FareRecord {
        origin,
        destination,
        passengers,
        fare,
        quarter,
        carrier,
    }))
}

/// Accepts `3` as well as `3.0`, which is how float-typed exports write it.
fn parse_quarter(value: &str) -> Option<u8> {
    let quarter = match value.parse::<u8>() {
        Ok(q) => q,
        Err(_) => {
            let q = value.parse::<f64>().ok()?;
            if q.fract() != 0.0 || !(0.0..=255.0).contains(&q) {
                return None;
            }
            q as u8
        }
    };
    (1..=4).contains(&quarter).then_some(quarter)
}
