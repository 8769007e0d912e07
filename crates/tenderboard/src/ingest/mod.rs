mod csv;
mod table;
mod xlsx;

pub use table::{CellValue, Table, TableView};

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Csv(::csv::Error),
    Xlsx(calamine::Error),
    UnsupportedFormat { path: PathBuf },
    NoWorksheet { path: PathBuf },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "failed to read dataset file: {}", err),
            DatasetError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            DatasetError::Xlsx(err) => write!(f, "invalid spreadsheet data: {}", err),
            DatasetError::UnsupportedFormat { path } => {
                write!(f, "unsupported dataset format: {}", path.display())
            }
            DatasetError::NoWorksheet { path } => {
                write!(f, "workbook has no usable worksheet: {}", path.display())
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            DatasetError::Csv(err) => Some(err),
            DatasetError::Xlsx(err) => Some(err),
            DatasetError::UnsupportedFormat { .. } | DatasetError::NoWorksheet { .. } => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<::csv::Error> for DatasetError {
    fn from(err: ::csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<calamine::Error> for DatasetError {
    fn from(err: calamine::Error) -> Self {
        Self::Xlsx(err)
    }
}

/// Load a dataset snapshot from disk, dispatching on the file extension.
///
/// CSV is read directly; xlsx, xls, xlsb and ods go through the workbook
/// reader. Anything else is rejected rather than guessed at.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table, DatasetError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let table = match extension.as_deref() {
        Some("csv") => {
            let file = std::fs::File::open(path)?;
            csv::read_table(file)?
        }
        Some("xlsx" | "xls" | "xlsb" | "ods") => xlsx::read_table(path)?,
        _ => {
            return Err(DatasetError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.columns().len(),
        "dataset loaded"
    );

    Ok(table)
}

/// Read a CSV dataset from any reader, for inline payloads and tests.
pub fn read_csv_table<R: Read>(reader: R) -> Result<Table, DatasetError> {
    csv::read_table(reader)
}
