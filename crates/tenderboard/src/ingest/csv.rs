use super::table::{CellValue, Table};
use super::DatasetError;
use std::io::Read;

pub(crate) fn read_table<R: Read>(reader: R) -> Result<Table, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect::<Vec<_>>();

    let mut table = Table::new(columns);
    for record in csv_reader.records() {
        let record = record?;
        let cells = record.iter().map(CellValue::from_raw).collect();
        table.push_row(cells);
    }

    Ok(table)
}
