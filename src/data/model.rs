use std::collections::HashSet;

use thiserror::Error;

// ---------------------------------------------------------------------------
// DataError – validation failures raised while building a dataset
// ---------------------------------------------------------------------------

/// Row and column level problems found in a source file.
///
/// Rows are 1-based data rows (the header is not counted).
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: year '{value}' is not an integer")]
    InvalidYear { row: usize, value: String },

    #[error("row {row}: gross '{value}' is not a non-negative number")]
    InvalidGross { row: usize, value: String },

    #[error("row {row}: column '{column}' is null")]
    NullValue { row: usize, column: &'static str },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType {
        column: &'static str,
        data_type: String,
    },
}

/// Columns every source file must provide.
pub const GENRE_COLUMN: &str = "genre";
pub const YEAR_COLUMN: &str = "year";
pub const GROSS_COLUMN: &str = "gross";

// ---------------------------------------------------------------------------
// GenreRecord – one row of the summary file
// ---------------------------------------------------------------------------

/// Box-office gross for one genre in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreRecord {
    pub genre: String,
    pub year: i32,
    /// Non-negative, finite.
    pub gross: f64,
}

impl GenreRecord {
    /// Validate raw values coming from a loader.  `row` is used for errors only.
    ///
    /// The genre label is trimmed; a blank label counts as a null cell.
    pub fn new(genre: &str, year: i32, gross: f64, row: usize) -> Result<Self, DataError> {
        let genre = genre.trim();
        if genre.is_empty() {
            return Err(DataError::NullValue {
                row,
                column: GENRE_COLUMN,
            });
        }
        if !gross.is_finite() || gross < 0.0 {
            return Err(DataError::InvalidGross {
                row,
                value: gross.to_string(),
            });
        }
        Ok(Self {
            genre: genre.to_string(),
            year,
            gross,
        })
    }
}

/// Parse a textual year.  Integral floats such as `2010.0` are accepted
/// since spreadsheet exports often write them that way; other float
/// notations are not.
pub fn parse_year(value: &str, row: usize) -> Result<i32, DataError> {
    let trimmed = value.trim();
    let digits = match trimmed.split_once('.') {
        Some((int, frac)) if !frac.is_empty() && frac.bytes().all(|b| b == b'0') => int,
        _ => trimmed,
    };
    digits.parse::<i32>().map_err(|_| DataError::InvalidYear {
        row,
        value: value.to_string(),
    })
}

/// Parse a textual gross value.
pub fn parse_gross(value: &str, row: usize) -> Result<f64, DataError> {
    match value.trim().parse::<f64>() {
        Ok(g) if g.is_finite() && g >= 0.0 => Ok(g),
        _ => Err(DataError::InvalidGross {
            row,
            value: value.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// GenreDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed genre list and year bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreDataset {
    records: Vec<GenreRecord>,
    /// Distinct genres in order of first appearance.
    genres: Vec<String>,
    year_bounds: Option<(i32, i32)>,
}

impl GenreDataset {
    /// Build indices from the loaded records.
    pub fn from_records(records: Vec<GenreRecord>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut genres = Vec::new();
        let mut year_bounds: Option<(i32, i32)> = None;

        for rec in &records {
            if seen.insert(rec.genre.as_str()) {
                genres.push(rec.genre.clone());
            }
            year_bounds = Some(match year_bounds {
                None => (rec.year, rec.year),
                Some((lo, hi)) => (lo.min(rec.year), hi.max(rec.year)),
            });
        }

        GenreDataset {
            records,
            genres,
            year_bounds,
        }
    }

    pub fn records(&self) -> &[GenreRecord] {
        &self.records
    }

    /// Distinct genre labels, first-appearance order.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Smallest and largest year, `None` for an empty dataset.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.year_bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
