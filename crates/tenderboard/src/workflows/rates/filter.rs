use super::domain::RatesError;
use super::profile::DatasetProfile;
use crate::ingest::{CellValue, Table};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Inclusive date window over the profile's date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// User-selected filters for one report pass. Absent columns mean "All",
/// matching the dropdown default; a literal "All" value is accepted as the
/// same no-op so UI clients can send their sentinel through unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub categorical: HashMap<String, String>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl FilterSelection {
    fn active_selections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categorical
            .iter()
            .filter(|(_, value)| !value.trim().is_empty() && !value.trim().eq_ignore_ascii_case("all"))
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }
}

/// Dropdown options for one filterable column: distinct non-empty values,
/// sorted ascending.
#[derive(Debug, Clone, Serialize)]
pub struct Facet {
    pub column: String,
    pub values: Vec<String>,
}

pub fn facets(table: &Table, profile: &DatasetProfile) -> Result<Vec<Facet>, RatesError> {
    profile
        .filter_columns
        .iter()
        .map(|column| {
            let index = require_column(table, column)?;
            let values: BTreeSet<String> = table
                .rows()
                .iter()
                .map(|row| row[index].display())
                .filter(|value| !value.is_empty())
                .collect();

            Ok(Facet {
                column: column.to_string(),
                values: values.into_iter().collect(),
            })
        })
        .collect()
}

/// Apply the selection to the dataset snapshot, producing the rows the
/// engine will rank. Equality is on canonical display text, the same key
/// the grouping step uses.
pub fn apply(
    table: &Table,
    profile: &DatasetProfile,
    selection: &FilterSelection,
) -> Result<Table, RatesError> {
    let mut predicates: Vec<(usize, String)> = Vec::new();
    for (column, value) in selection.active_selections() {
        if !profile.is_filter_column(column) {
            return Err(RatesError::UnknownFilterColumn {
                column: column.to_string(),
            });
        }
        predicates.push((require_column(table, column)?, value.to_string()));
    }

    let date_window = match selection.date_range {
        Some(range) if profile.date_range_filter => {
            if range.from > range.to {
                return Err(RatesError::EmptyDateRange);
            }
            Some((require_column(table, profile.date_column)?, range))
        }
        _ => None,
    };

    Ok(table.filtered(|row| {
        let categorical_match = predicates
            .iter()
            .all(|(index, value)| row[*index].display() == *value);
        if !categorical_match {
            return false;
        }

        match date_window {
            Some((index, range)) => match row[index].as_date() {
                Some(date) => date >= range.from && date <= range.to,
                None => false,
            },
            None => true,
        }
    }))
}

pub(super) fn require_column(table: &Table, column: &str) -> Result<usize, RatesError> {
    table
        .column_index(column)
        .ok_or_else(|| RatesError::MissingColumn {
            column: column.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::rates::profile::{ACCOUNTS, RAILWAYS};

    fn railway_table() -> Table {
        let mut table = Table::new(
            ["Pharmaceutical Content", "Zone", "Tender Due Date", "Quoted Rate"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        );
        for (content, zone, due, rate) in [
            ("Paracetamol", "North", "2025-05-01", "12"),
            ("Paracetamol", "South", "2025-05-01", "14"),
            ("Ibuprofen", "North", "2025-04-01", "9"),
        ] {
            table.push_row(vec![
                CellValue::from_raw(content),
                CellValue::from_raw(zone),
                CellValue::from_raw(due),
                CellValue::from_raw(rate),
            ]);
        }
        table
    }

    #[test]
    fn facets_list_distinct_sorted_values() {
        let table = railway_table();
        let facets = facets(&table, &RAILWAYS).expect("facets build");

        assert_eq!(facets.len(), 2);
        assert_eq!(facets[0].column, "Pharmaceutical Content");
        assert_eq!(facets[0].values, ["Ibuprofen", "Paracetamol"]);
        assert_eq!(facets[1].values, ["North", "South"]);
    }

    #[test]
    fn all_sentinel_and_missing_selection_keep_every_row() {
        let table = railway_table();

        let unfiltered = apply(&table, &RAILWAYS, &FilterSelection::default()).expect("applies");
        assert_eq!(unfiltered.row_count(), 3);

        let mut selection = FilterSelection::default();
        selection
            .categorical
            .insert("Zone".to_string(), "All".to_string());
        let with_sentinel = apply(&table, &RAILWAYS, &selection).expect("applies");
        assert_eq!(with_sentinel.row_count(), 3);
    }

    #[test]
    fn categorical_filters_are_equality_on_display_text() {
        let table = railway_table();
        let mut selection = FilterSelection::default();
        selection
            .categorical
            .insert("Zone".to_string(), "North".to_string());

        let filtered = apply(&table, &RAILWAYS, &selection).expect("applies");
        assert_eq!(filtered.row_count(), 2);
    }

    #[test]
    fn unknown_filter_column_is_rejected() {
        let table = railway_table();
        let mut selection = FilterSelection::default();
        selection
            .categorical
            .insert("Quoted Rate".to_string(), "12".to_string());

        let error = apply(&table, &RAILWAYS, &selection).expect_err("expected rejection");
        assert!(matches!(error, RatesError::UnknownFilterColumn { .. }));
    }

    #[test]
    fn date_range_is_inclusive_and_validated() {
        let mut table = Table::new(
            ["Product Name", "Region", "Publish Date", "Rate Quoted", "Company Name"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        );
        for (product, region, published, rate, company) in [
            ("API-A", "East", "2025-01-10", "5", "Acme"),
            ("API-A", "East", "2025-02-10", "6", "Acme"),
            ("API-A", "East", "2025-03-10", "7", "Acme"),
        ] {
            table.push_row(vec![
                CellValue::from_raw(product),
                CellValue::from_raw(region),
                CellValue::from_raw(published),
                CellValue::from_raw(rate),
                CellValue::from_raw(company),
            ]);
        }

        let mut selection = FilterSelection::default();
        selection.date_range = Some(DateRange {
            from: NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date"),
            to: NaiveDate::from_ymd_opt(2025, 2, 10).expect("valid date"),
        });
        let filtered = apply(&table, &ACCOUNTS, &selection).expect("applies");
        assert_eq!(filtered.row_count(), 2);

        selection.date_range = Some(DateRange {
            from: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"),
            to: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
        });
        let error = apply(&table, &ACCOUNTS, &selection).expect_err("expected rejection");
        assert!(matches!(error, RatesError::EmptyDateRange));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let table = Table::new(vec!["Zone".to_string()]);
        let error = facets(&table, &RAILWAYS).expect_err("expected missing column");
        match error {
            RatesError::MissingColumn { column } => {
                assert_eq!(column, "Pharmaceutical Content")
            }
            other => panic!("expected missing column, got {other:?}"),
        }
    }
}
