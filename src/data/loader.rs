use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Column, Record, Table, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a file into a [`Table`].
/// Loading is the only fallible step; nothing downstream returns an error.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        message: String,
    },

    #[error("dexnum {dexnum} appears twice (rows {first} and {second})")]
    DuplicateId {
        dexnum: u32,
        first: usize,
        second: usize,
    },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON row {row}: {source}")]
    JsonRow {
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one creature per line (recommended)
/// * `.json`    – `[{ "dexnum": 1, "name": "...", ... }, ...]`
/// * `.parquet` – one creature per row, numeric columns of any width
pub fn load_file(path: &Path) -> Result<Table, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::info!(
        "Loaded {} records from {} ({} generations, {} types, special groups {:?})",
        table.len(),
        path.display(),
        table.generations().len(),
        table.types().len(),
        table.distinct_values(Column::SpecialGroup)
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Fail on the first required column absent from `present`.
fn check_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<(), DataLoadError> {
    let present: Vec<&str> = present.into_iter().collect();
    match REQUIRED_COLUMNS.iter().copied().find(|col| !present.contains(col)) {
        Some(missing) => Err(DataLoadError::MissingColumn(missing)),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, comma-delimited.
/// Columns outside [`REQUIRED_COLUMNS`] are ignored.
fn load_csv(path: &Path) -> Result<Table, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(open(path)?));

    let headers = reader.headers()?.clone();
    check_columns(headers.iter())?;

    let records = reader
        .deserialize::<Record>()
        .collect::<Result<Vec<_>, _>>()?;

    Table::from_records(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Table, DataLoadError> {
    let root: JsonValue = serde_json::from_reader(BufReader::new(open(path)?))?;

    let rows = root.as_array().ok_or_else(|| DataLoadError::InvalidValue {
        row: 0,
        column: "dexnum",
        message: "expected a top-level JSON array of records".to_string(),
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        let obj = value.as_object().ok_or_else(|| DataLoadError::InvalidValue {
            row,
            column: "dexnum",
            message: "row is not a JSON object".to_string(),
        })?;
        check_columns(obj.keys().map(String::as_str))?;

        let record = serde_json::from_value::<Record>(value.clone())
            .map_err(|source| DataLoadError::JsonRow { row, source })?;
        records.push(record);
    }

    Table::from_records(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Numeric columns may use any integer or float type; they are cast through
/// Arrow before conversion. Nulls are rejected.
fn load_parquet(path: &Path) -> Result<Table, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    // Checked on the file schema so files without rows are validated too.
    check_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let offset = records.len();
        let dexnum = int_column(&batch, "dexnum", offset)?;
        let generation = string_column(&batch, "generation", offset)?;
        let name = string_column(&batch, "name", offset)?;
        let type1 = string_column(&batch, "type1", offset)?;
        let special_group = string_column(&batch, "special_group", offset)?;
        let hp = float_column(&batch, "hp", offset)?;
        let attack = float_column(&batch, "attack", offset)?;
        let defense = float_column(&batch, "defense", offset)?;
        let speed = float_column(&batch, "speed", offset)?;
        let sp_atk = float_column(&batch, "sp_atk", offset)?;
        let sp_def = float_column(&batch, "sp_def", offset)?;
        let height = float_column(&batch, "height", offset)?;
        let weight = float_column(&batch, "weight", offset)?;

        for i in 0..batch.num_rows() {
            let row = offset + i;
            records.push(Record {
                dexnum: to_u32(dexnum[i], row, "dexnum")?,
                name: name[i].clone(),
                type1: type1[i].clone(),
                generation: generation[i].clone(),
                special_group: special_group[i].clone(),
                hp: hp[i],
                attack: attack[i],
                defense: defense[i],
                speed: speed[i],
                sp_atk: sp_atk[i],
                sp_def: sp_def[i],
                height: height[i],
                weight: weight[i],
            });
        }
    }

    Table::from_records(records)
}

// -- Parquet / Arrow helpers --

fn cast_column(
    batch: &RecordBatch,
    name: &'static str,
    to: &DataType,
) -> Result<ArrayRef, DataLoadError> {
    let idx = batch.schema().index_of(name)?;
    Ok(cast(batch.column(idx).as_ref(), to)?)
}

fn null_value(row: usize, column: &'static str) -> DataLoadError {
    DataLoadError::InvalidValue {
        row,
        column,
        message: "null or non-convertible value".to_string(),
    }
}

fn int_column(
    batch: &RecordBatch,
    name: &'static str,
    offset: usize,
) -> Result<Vec<i64>, DataLoadError> {
    let array = cast_column(batch, name, &DataType::Int64)?;
    let values = array.as_primitive::<Int64Type>();
    (0..values.len())
        .map(|i| {
            if values.is_null(i) {
                Err(null_value(offset + i, name))
            } else {
                Ok(values.value(i))
            }
        })
        .collect()
}

fn float_column(
    batch: &RecordBatch,
    name: &'static str,
    offset: usize,
) -> Result<Vec<f64>, DataLoadError> {
    let array = cast_column(batch, name, &DataType::Float64)?;
    let values = array.as_primitive::<Float64Type>();
    (0..values.len())
        .map(|i| {
            if values.is_null(i) {
                Err(null_value(offset + i, name))
            } else {
                Ok(values.value(i))
            }
        })
        .collect()
}

fn string_column(
    batch: &RecordBatch,
    name: &'static str,
    offset: usize,
) -> Result<Vec<String>, DataLoadError> {
    let array = cast_column(batch, name, &DataType::Utf8)?;
    let values = array.as_string::<i32>();
    (0..values.len())
        .map(|i| {
            if values.is_null(i) {
                Err(null_value(offset + i, name))
            } else {
                Ok(values.value(i).to_string())
            }
        })
        .collect()
}

fn to_u32(value: i64, row: usize, column: &'static str) -> Result<u32, DataLoadError> {
    u32::try_from(value).map_err(|_| DataLoadError::InvalidValue {
        row,
        column,
        message: format!("{value} is not a non-negative 32-bit integer"),
    })
}
