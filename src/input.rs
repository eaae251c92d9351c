//! Input table loading
//!
//! Rows come from a CSV file or the first worksheet of a spreadsheet. The
//! header row must contain `Physician Group Name` and `Address`; other
//! columns are ignored.

use crate::LoadError;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

pub const GROUP_NAME_COLUMN: &str = "Physician Group Name";
pub const ADDRESS_COLUMN: &str = "Address";

/// One physician group to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    /// 1-based position among the data rows
    pub row_number: usize,
    pub group_name: String,
    pub address: String,
}

impl InputRow {
    /// Blank names and the "nan" placeholder of exported sheets are not usable
    pub fn has_group_name(&self) -> bool {
        let name = self.group_name.trim();
        !name.is_empty() && !name.eq_ignore_ascii_case("nan")
    }
}

/// Loads every data row of the input file
pub fn load_rows(path: &Path) -> Result<Vec<InputRow>, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "csv" => load_csv(path)?,
        "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => load_spreadsheet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    tracing::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn load_csv(path: &Path) -> Result<Vec<InputRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = Columns::locate(&headers)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(columns.row(i + 1, |idx| record.get(idx).unwrap_or("").to_string()));
    }
    Ok(rows)
}

fn load_spreadsheet(path: &Path) -> Result<Vec<InputRow>, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0).ok_or(LoadError::Empty)??;

    let mut lines = range.rows();
    let header_cells = lines.next().ok_or(LoadError::Empty)?;
    let headers: Vec<String> = header_cells.iter().map(cell_text).collect();
    let columns = Columns::locate(&headers)?;

    Ok(lines
        .enumerate()
        .map(|(i, cells)| columns.row(i + 1, |idx| cells.get(idx).map(cell_text).unwrap_or_default()))
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Positions of the required columns in the header row
struct Columns {
    group_name: usize,
    address: usize,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        match (find(GROUP_NAME_COLUMN), find(ADDRESS_COLUMN)) {
            (Some(group_name), Some(address)) => Ok(Self { group_name, address }),
            (group, address) => {
                let mut missing = Vec::new();
                if group.is_none() {
                    missing.push(GROUP_NAME_COLUMN.to_string());
                }
                if address.is_none() {
                    missing.push(ADDRESS_COLUMN.to_string());
                }
                Err(LoadError::MissingColumns {
                    missing,
                    available: headers.iter().map(|h| h.trim().to_string()).collect(),
                })
            }
        }
    }

    fn row(&self, row_number: usize, cell: impl Fn(usize) -> String) -> InputRow {
        InputRow {
            row_number,
            group_name: cell(self.group_name).trim().to_string(),
            address: cell(self.address).trim().to_string(),
        }
    }
}
