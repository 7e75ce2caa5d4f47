use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Number;

use super::model::{
    parse_gross, parse_year, DataError, GenreDataset, GenreRecord, GENRE_COLUMN, GROSS_COLUMN,
    YEAR_COLUMN,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a genre summary from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least `genre`, `year`, `gross` (default)
/// * `.json`    – `[{ "genre": "...", "year": 2010, "gross": 1.0 }, ...]`
/// * `.parquet` – `genre` string, `year` integer and `gross` numeric columns
pub fn load_file(path: &Path) -> Result<GenreDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        _ => load_csv(path),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows from {} ({} genres, years {:?})",
        dataset.len(),
        path.display(),
        dataset.genres().len(),
        dataset.year_bounds()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<GenreDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// CSV layout: header row with column names, UTF-8.  Only `genre`, `year`
/// and `gross` are read; any other column (e.g. a saved index) is ignored.
pub fn read_csv<R: Read>(input: R) -> Result<GenreDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let column = |name: &'static str| -> Result<usize, DataError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(DataError::MissingColumn(name))
    };
    let genre_idx = column(GENRE_COLUMN)?;
    let year_idx = column(YEAR_COLUMN)?;
    let gross_idx = column(GROSS_COLUMN)?;

    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.with_context(|| format!("CSV row {row}"))?;

        let genre = record.get(genre_idx).unwrap_or("");
        let year = parse_year(record.get(year_idx).unwrap_or(""), row)?;
        let gross = parse_gross(record.get(gross_idx).unwrap_or(""), row)?;

        records.push(GenreRecord::new(genre, year, gross, row)?);
    }

    Ok(GenreDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One element of the records-oriented JSON layout
/// (`df.to_json(orient='records')`).  Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    genre: Option<String>,
    year: Option<Number>,
    gross: Option<Number>,
}

fn load_json(path: &Path) -> Result<GenreDataset> {
    let file = std::fs::File::open(path).context("opening JSON file")?;
    read_json(std::io::BufReader::new(file))
}

pub fn read_json<R: Read>(input: R) -> Result<GenreDataset> {
    let raw: Vec<JsonRecord> = serde_json::from_reader(input).context("parsing JSON")?;

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(i, rec)| json_to_record(rec, i + 1))
        .collect::<Result<Vec<_>, DataError>>()?;

    Ok(GenreDataset::from_records(records))
}

fn json_to_record(rec: JsonRecord, row: usize) -> Result<GenreRecord, DataError> {
    let genre = rec.genre.ok_or(DataError::NullValue {
        row,
        column: GENRE_COLUMN,
    })?;
    let year = rec.year.ok_or(DataError::NullValue {
        row,
        column: YEAR_COLUMN,
    })?;
    let gross = rec.gross.ok_or(DataError::NullValue {
        row,
        column: GROSS_COLUMN,
    })?;

    let year = parse_year(&year.to_string(), row)?;
    let gross = gross.as_f64().ok_or_else(|| DataError::InvalidGross {
        row,
        value: gross.to_string(),
    })?;
    GenreRecord::new(&genre, year, gross, row)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with `genre`, `year` and `gross` columns.
///
/// Columns are cast to Utf8 / Int64 / Float64 before reading, so files
/// written by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`) work regardless of their integer widths.
fn load_parquet(path: &Path) -> Result<GenreDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();
        records.extend(records_from_batch(&batch, offset)?);
    }

    Ok(GenreDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn required_column<'a>(
    batch: &'a RecordBatch,
    name: &'static str,
) -> Result<&'a ArrayRef, DataError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DataError::MissingColumn(name))?;
    Ok(batch.column(idx))
}

fn check_type(
    col: &ArrayRef,
    column: &'static str,
    accept: fn(&DataType) -> bool,
) -> Result<(), DataError> {
    if accept(col.data_type()) {
        Ok(())
    } else {
        Err(DataError::UnsupportedColumnType {
            column,
            data_type: format!("{:?}", col.data_type()),
        })
    }
}

/// Plain string columns, or dictionary-encoded ones as written for
/// categorical columns.
fn is_string_type(dt: &DataType) -> bool {
    match dt {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => true,
        DataType::Dictionary(_, values) => is_string_type(values),
        _ => false,
    }
}

/// Convert one record batch.  `offset` is the number of rows already read,
/// so row numbers in errors are file-wide.
fn records_from_batch(batch: &RecordBatch, offset: usize) -> Result<Vec<GenreRecord>> {
    let genre_col = required_column(batch, GENRE_COLUMN)?;
    let year_col = required_column(batch, YEAR_COLUMN)?;
    let gross_col = required_column(batch, GROSS_COLUMN)?;

    check_type(genre_col, GENRE_COLUMN, is_string_type)?;
    check_type(year_col, YEAR_COLUMN, DataType::is_integer)?;
    check_type(gross_col, GROSS_COLUMN, DataType::is_numeric)?;

    let genres = cast(genre_col.as_ref(), &DataType::Utf8).context("casting 'genre'")?;
    let years = cast(year_col.as_ref(), &DataType::Int64).context("casting 'year'")?;
    let grosses = cast(gross_col.as_ref(), &DataType::Float64).context("casting 'gross'")?;

    let genres = genres.as_string::<i32>();
    let years = years.as_primitive::<Int64Type>();
    let grosses = grosses.as_primitive::<Float64Type>();

    let mut records = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        let row = offset + i + 1;
        for (column, array) in [
            (GENRE_COLUMN, genres as &dyn Array),
            (YEAR_COLUMN, years as &dyn Array),
            (GROSS_COLUMN, grosses as &dyn Array),
        ] {
            if array.is_null(i) {
                return Err(DataError::NullValue { row, column }.into());
            }
        }

        let year = i32::try_from(years.value(i)).map_err(|_| DataError::InvalidYear {
            row,
            value: years.value(i).to_string(),
        })?;
        records.push(GenreRecord::new(
            genres.value(i),
            year,
            grosses.value(i),
            row,
        )?);
    }
    Ok(records)
}
