use super::domain::DatasetKind;

/// Column mapping for one dataset flavor. The railway and accounts sheets
/// run through the same engine; only the names and the optional company
/// step differ.
#[derive(Debug, Clone, Copy)]
pub struct DatasetProfile {
    pub kind: DatasetKind,
    /// Tender group: rows sharing these column values compete against
    /// each other.
    pub group_columns: &'static [&'static str],
    pub rate_column: &'static str,
    pub date_column: &'static str,
    /// Present only for datasets that carry bidder identity; enables the
    /// repeat-competitor marker.
    pub company_column: Option<&'static str>,
    /// Columns offered as categorical dropdown filters, in display order.
    pub filter_columns: &'static [&'static str],
    /// Whether the UI offers a date range picker for `date_column`.
    pub date_range_filter: bool,
}

pub const RAILWAYS: DatasetProfile = DatasetProfile {
    kind: DatasetKind::Railways,
    group_columns: &["Pharmaceutical Content", "Zone", "Tender Due Date"],
    rate_column: "Quoted Rate",
    date_column: "Tender Due Date",
    company_column: None,
    filter_columns: &["Pharmaceutical Content", "Zone"],
    date_range_filter: false,
};

pub const ACCOUNTS: DatasetProfile = DatasetProfile {
    kind: DatasetKind::Accounts,
    group_columns: &["Product Name", "Region", "Publish Date"],
    rate_column: "Rate Quoted",
    date_column: "Publish Date",
    company_column: Some("Company Name"),
    filter_columns: &["Region", "Product Name", "Company Name"],
    date_range_filter: true,
};

impl DatasetProfile {
    pub const fn for_kind(kind: DatasetKind) -> &'static DatasetProfile {
        match kind {
            DatasetKind::Railways => &RAILWAYS,
            DatasetKind::Accounts => &ACCOUNTS,
        }
    }

    pub fn is_filter_column(&self, column: &str) -> bool {
        self.filter_columns.iter().any(|known| *known == column)
    }
}
