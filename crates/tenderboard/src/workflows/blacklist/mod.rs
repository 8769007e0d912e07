use crate::ingest::{self, DatasetError, Table, TableView};
use serde::Serialize;
use std::path::Path;

/// The blacklist page: a static table rendered as-is, with no ranking or
/// styling pass.
#[derive(Debug, Serialize)]
pub struct BlacklistView {
    pub table: TableView,
    pub total: usize,
}

impl BlacklistView {
    pub fn from_table(table: &Table) -> Self {
        Self {
            table: TableView::from_table(table),
            total: table.row_count(),
        }
    }
}

pub fn load_view<P: AsRef<Path>>(path: P) -> Result<BlacklistView, DatasetError> {
    let table = ingest::load_table(path)?;
    Ok(BlacklistView::from_table(&table))
}
