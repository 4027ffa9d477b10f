// Tabular input: delimited text and spreadsheets -> RawTable -> profiles.
//
// Delimited files are decoded with the caller's primary encoding and fall
// back to Latin-1 when that fails. Malformed rows are skipped with a
// warning; file-level failures come back as `InputError`.

use calamine::{open_workbook_auto, Data, Reader};
use prospector_core::config::TextEncoding;
use prospector_core::{PlayerProfile, Position};
use std::path::Path;
use tracing::{info, warn};

use super::header::normalize_header;
use super::resolve::ResolveOptions;
use super::resolve_table;
use super::row::{RawRow, RawTable, RawValue};
use crate::error::ErrorBody;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("unsupported file type `{file_type}`; use csv or xlsx")]
    UnsupportedFileType { file_type: String },

    #[error("failed to read file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: String, message: String },

    #[error("spreadsheet {path} has no worksheets")]
    EmptyWorkbook { path: String },
}

impl InputError {
    pub fn kind(&self) -> &'static str {
        match self {
            InputError::FileNotFound { .. } => "file_not_found",
            InputError::UnsupportedFileType { .. } => "unsupported_file_type",
            InputError::Read { .. } => "read_error",
            InputError::Spreadsheet { .. } => "spreadsheet_error",
            InputError::EmptyWorkbook { .. } => "empty_workbook",
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody::new(self.kind(), self.to_string())
    }
}

// ---------------------------------------------------------------------------
// File kinds and options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Delimited text with the given field separator.
    Delimited(u8),
    Spreadsheet,
}

impl FileKind {
    /// Map a declared file type (`csv`, `xlsx`, ...) to a reader.
    pub fn from_declared(file_type: &str) -> Result<Self, InputError> {
        match file_type.trim().trim_start_matches('.').to_lowercase().as_str() {
            "csv" | "txt" => Ok(FileKind::Delimited(b',')),
            "tsv" => Ok(FileKind::Delimited(b'\t')),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(FileKind::Spreadsheet),
            other => Err(InputError::UnsupportedFileType {
                file_type: other.to_string(),
            }),
        }
    }

    /// Infer the reader from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_declared(ext)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Declared file type; inferred from the extension when `None`.
    pub file_type: Option<String>,
    pub encoding: TextEncoding,
    pub position_hint: Option<Position>,
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Read a player file and resolve every row into a canonical profile.
pub fn read_player_file(
    path: &Path,
    options: &ReadOptions,
) -> Result<Vec<PlayerProfile>, InputError> {
    let kind = match &options.file_type {
        Some(declared) => FileKind::from_declared(declared)?,
        None => FileKind::from_path(path)?,
    };
    let table = read_table(path, kind, options.encoding)?;
    let profiles = resolve_table(
        &table,
        &ResolveOptions {
            position_hint: options.position_hint,
        },
    );
    info!(
        "read {} player rows from {}",
        profiles.len(),
        path.display()
    );
    Ok(profiles)
}

/// Load a file into a `RawTable` without resolving it.
pub fn read_table(path: &Path, kind: FileKind, encoding: TextEncoding) -> Result<RawTable, InputError> {
    match kind {
        FileKind::Delimited(delimiter) => {
            let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
            let text = decode_text(&bytes, encoding);
            Ok(parse_delimited(&text, delimiter))
        }
        FileKind::Spreadsheet => read_spreadsheet(path),
    }
}

fn io_error(path: &Path, e: std::io::Error) -> InputError {
    if e.kind() == std::io::ErrorKind::NotFound {
        InputError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        InputError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Delimited text
// ---------------------------------------------------------------------------

/// Decode bytes with the primary encoding, falling back to Latin-1.
pub fn decode_text(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 => {
            let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
            match std::str::from_utf8(body) {
                Ok(text) => text.to_string(),
                Err(e) => {
                    warn!("input is not valid UTF-8 ({}); retrying as Latin-1", e);
                    decode_latin1(bytes)
                }
            }
        }
        TextEncoding::Latin1 => decode_latin1(bytes),
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse delimited text with a header row. Rows with more fields than the
/// header, or that the CSV reader rejects, are skipped.
pub fn parse_delimited(text: &str, delimiter: u8) -> RawTable {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(normalize_header).collect(),
        Err(e) => {
            warn!("could not read header row: {}", e);
            return RawTable::default();
        }
    };

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed row {}: {}", idx + 2, e);
                continue;
            }
        };
        if record.len() > headers.len() {
            warn!(
                "skipping malformed row {}: expected {} fields, saw {}",
                idx + 2,
                headers.len(),
                record.len()
            );
            continue;
        }
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), RawValue::from_text(cell));
        }
        rows.push(row);
    }

    RawTable { headers, rows }
}

// ---------------------------------------------------------------------------
// Spreadsheets
// ---------------------------------------------------------------------------

fn read_spreadsheet(path: &Path) -> Result<RawTable, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let spreadsheet_error = |message: String| InputError::Spreadsheet {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| InputError::EmptyWorkbook {
            path: path.display().to_string(),
        })?
        .map_err(|e| spreadsheet_error(e.to_string()))?;

    let mut grid = range.rows();
    let Some(header_cells) = grid.next() else {
        return Ok(RawTable::default());
    };
    let headers: Vec<String> = header_cells
        .iter()
        .map(|c| normalize_header(&c.to_string()))
        .collect();

    let mut rows = Vec::new();
    for cells in grid {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(cells.iter()) {
            row.insert(header.clone(), cell_value(cell));
        }
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Float(f) => RawValue::Number(*f),
        Data::Bool(b) => RawValue::Number(if *b { 1.0 } else { 0.0 }),
        Data::String(s) | Data::DateTimeIso(s) => RawValue::from_text(s),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => RawValue::Date(ndt.date()),
            None => RawValue::Number(dt.as_f64()),
        },
        _ => RawValue::Missing,
    }
}
