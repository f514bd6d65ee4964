//! Load roster files (CSV or spreadsheet) into a [Roster].
//! Columns are located by header name: Character, Energy, Fighting, Strength, Intellect,
//! Threat, Special. Threat and Special may be absent or blank.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::Reader;
use tracing::{debug, info, warn};

use crate::data::character::{CharacterName, CharacterRecord, StatDimension, StatLine};
use crate::data::roster::{InsertOutcome, Roster};
use crate::error::DataError;

/// Summary of a load across one or more sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub sources: Vec<PathBuf>,
    pub records_read: usize,
    /// Keys seen more than once (variant spellings across or within files).
    pub merged: Vec<CharacterName>,
}

/// Header row resolved to column positions.
struct RosterColumns {
    character: usize,
    stats: [usize; 4],
    threat: Option<usize>,
    special: Option<usize>,
}

impl RosterColumns {
    fn find(header: &[String], source_name: &str) -> Result<Self, DataError> {
        fn position(header: &[String], name: &str) -> Option<usize> {
            header.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
        }
        let required = |name: &'static str| {
            position(header, name).ok_or_else(|| DataError::MissingColumn {
                source_name: source_name.to_string(),
                column: name,
            })
        };

        let character = required("Character")?;
        let mut stats = [0usize; 4];
        for dimension in StatDimension::ALL {
            stats[dimension.index()] = required(dimension.as_str())?;
        }
        Ok(Self {
            character,
            stats,
            threat: position(header, "Threat"),
            special: position(header, "Special"),
        })
    }
}

/// Load and merge every source, in order. Any failure aborts the whole load.
pub fn load_roster<P: AsRef<Path>>(paths: &[P]) -> Result<(Roster, LoadReport), DataError> {
    let mut roster = Roster::new();
    let mut report = LoadReport::default();

    for path in paths {
        let path = path.as_ref();
        let records = read_source(path)?;
        debug!(path = %path.display(), records = records.len(), "read roster source");
        report.records_read += records.len();
        for record in records {
            let name = record.name.clone();
            if roster.insert(record) == InsertOutcome::Merged {
                warn!(character = %name, path = %path.display(), "duplicate character merged");
                report.merged.push(name);
            }
        }
        report.sources.push(path.to_path_buf());
    }

    info!(
        characters = roster.len(),
        records = report.records_read,
        merged = report.merged.len(),
        "roster loaded"
    );
    Ok((roster, report))
}

/// Parse CSV roster data from any reader.
pub fn load_roster_from_reader<R: Read>(reader: R, source_name: &str) -> Result<Roster, DataError> {
    let records = parse_csv(reader, source_name)?;
    Ok(records.into_iter().collect())
}

fn read_source(path: &Path) -> Result<Vec<CharacterRecord>, DataError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let source_name = path.display().to_string();

    match extension.as_deref() {
        Some("csv") => {
            let file = File::open(path).map_err(|source| DataError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            parse_csv(file, &source_name)
        }
        Some("xlsx" | "xlsm" | "xls" | "ods") => parse_spreadsheet(path, &source_name),
        _ => Err(DataError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn parse_csv<R: Read>(reader: R, source_name: &str) -> Result<Vec<CharacterRecord>, DataError> {
    let csv_error = |source| DataError::Csv {
        source_name: source_name.to_string(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let header: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let columns = RosterColumns::find(&header, source_name)?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row: Vec<String> = result.map_err(csv_error)?.iter().map(str::to_string).collect();
        if let Some(record) = parse_row(&columns, &row, index + 2, source_name)? {
            records.push(record);
        }
    }
    Ok(records)
}

fn parse_spreadsheet(path: &Path, source_name: &str) -> Result<Vec<CharacterRecord>, DataError> {
    let spreadsheet_error = |message: String| DataError::Spreadsheet {
        source_name: source_name.to_string(),
        message,
    };
    let mut workbook =
        calamine::open_workbook_auto(path).map_err(|err| spreadsheet_error(err.to_string()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| spreadsheet_error("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|err| spreadsheet_error(err.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_str).collect())
        .unwrap_or_default();
    let columns = RosterColumns::find(&header, source_name)?;

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let row: Vec<String> = row.iter().map(cell_str).collect();
        if let Some(record) = parse_row(&columns, &row, index + 2, source_name)? {
            records.push(record);
        }
    }
    Ok(records)
}

fn cell_str(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::Empty => String::new(),
        calamine::Data::String(s) => s.clone(),
        calamine::Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        calamine::Data::Float(f) => format!("{f}"),
        calamine::Data::Int(i) => format!("{i}"),
        calamine::Data::Bool(b) => format!("{b}"),
        other => format!("{other:?}"),
    }
}

/// Returns None for a blank row. `line` is the 1-based line in the source (header is line 1).
fn parse_row(
    columns: &RosterColumns,
    row: &[String],
    line: usize,
    source_name: &str,
) -> Result<Option<CharacterRecord>, DataError> {
    if row.iter().all(|cell| cell.trim().is_empty()) {
        return Ok(None);
    }
    let cell = |index: usize| row.get(index).map(|s| s.trim()).unwrap_or("");

    let raw_name = cell(columns.character);
    let name = CharacterName::canonical(raw_name);
    if name.is_empty() {
        return Err(DataError::EmptyName {
            source_name: source_name.to_string(),
            row: line,
        });
    }

    let mut stats = [0u8; 4];
    for dimension in StatDimension::ALL {
        let raw = cell(columns.stats[dimension.index()]);
        stats[dimension.index()] = raw.parse::<u8>().map_err(|_| DataError::InvalidStat {
            source_name: source_name.to_string(),
            row: line,
            column: dimension.as_str(),
            value: raw.to_string(),
        })?;
    }

    let threat = columns.threat.map(cell).unwrap_or("");
    let special = columns.special.map(cell).unwrap_or("");
    Ok(Some(CharacterRecord::new(
        raw_name,
        StatLine(stats),
        threat,
        special,
    )))
}
