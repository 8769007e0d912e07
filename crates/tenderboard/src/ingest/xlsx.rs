use super::table::{CellValue, Table};
use super::DatasetError;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

pub(crate) fn read_table(path: &Path) -> Result<Table, DatasetError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DatasetError::NoWorksheet {
            path: path.to_path_buf(),
        })?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect::<Vec<_>>(),
        None => {
            return Err(DatasetError::NoWorksheet {
                path: path.to_path_buf(),
            })
        }
    };

    let mut table = Table::new(columns);
    for row in rows {
        let cells = row.iter().map(cell_from_data).collect();
        table.push_row(cells);
    }

    Ok(table)
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::Bool(value) => CellValue::Text(value.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Date(datetime.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(value) | Data::DurationIso(value) => CellValue::from_raw(value),
        Data::String(value) => CellValue::from_raw(value),
        Data::Error(err) => CellValue::Text(format!("{:?}", err)),
    }
}
