use super::domain::{status_label, RatesError, DISQUALIFIED_RANK};
use super::filter::require_column;
use super::profile::DatasetProfile;
use crate::ingest::Table;
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use std::collections::{BTreeSet, HashMap};

/// One dataset row after rank assignment. `row` indexes back into the
/// filtered table the record was ranked from.
#[derive(Debug, Clone)]
pub struct RankedRecord {
    pub row: usize,
    pub rate: Option<f64>,
    pub date: Option<NaiveDate>,
    pub company: Option<String>,
    pub bid_rank: Option<u32>,
    pub status: Option<String>,
}

/// Assign per-group dense bid ranks.
///
/// Rows compete within their tender group (equality over the profile's
/// grouping columns). Within a group, quoted rates are dense-ranked
/// ascending; ties share a rank. Zero and missing rates never enter the
/// ranking domain: zero quotes are disqualified with the sentinel rank,
/// missing quotes stay unranked. A group holding only zero or missing
/// rates therefore never produces an L1.
pub fn compute_bid_ranks(
    table: &Table,
    profile: &DatasetProfile,
) -> Result<Vec<RankedRecord>, RatesError> {
    let group_indices: Vec<usize> = profile
        .group_columns
        .iter()
        .map(|column| require_column(table, column))
        .collect::<Result<_, _>>()?;
    let rate_index = require_column(table, profile.rate_column)?;
    let date_index = require_column(table, profile.date_column)?;
    let company_index = match profile.company_column {
        Some(column) => Some(require_column(table, column)?),
        None => None,
    };

    let mut groups: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
    for (row, cells) in table.rows().iter().enumerate() {
        let key = group_indices
            .iter()
            .map(|index| cells[*index].display())
            .collect();
        groups.entry(key).or_default().push(row);
    }

    let mut ranks: Vec<Option<u32>> = vec![None; table.row_count()];
    for rows in groups.values() {
        let competitive: BTreeSet<OrderedFloat<f64>> = rows
            .iter()
            .filter_map(|row| table.value(*row, rate_index).as_number())
            .filter(|rate| *rate != 0.0)
            .map(OrderedFloat)
            .collect();
        let dense: HashMap<OrderedFloat<f64>, u32> = competitive
            .into_iter()
            .zip(1u32..)
            .collect();

        for row in rows {
            ranks[*row] = match table.value(*row, rate_index).as_number() {
                Some(rate) if rate == 0.0 => Some(DISQUALIFIED_RANK),
                Some(rate) => dense.get(&OrderedFloat(rate)).copied(),
                None => None,
            };
        }
    }

    Ok((0..table.row_count())
        .map(|row| {
            let bid_rank = ranks[row];
            RankedRecord {
                row,
                rate: table.value(row, rate_index).as_number(),
                date: table.value(row, date_index).as_date(),
                company: company_index
                    .map(|index| table.value(row, index).display())
                    .filter(|name| !name.is_empty()),
                bid_rank,
                status: bid_rank.map(status_label),
            }
        })
        .collect())
}

/// Order records for the report table: most recent date first, then bid
/// rank ascending by its numeric value (L1, L2, ... L10, not lexically).
/// Unranked records close out their date group; undated records sort last.
pub fn sort_for_display(records: &mut [RankedRecord]) {
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| rank_order(a).cmp(&rank_order(b)))
    });
}

fn rank_order(record: &RankedRecord) -> u32 {
    record.bid_rank.unwrap_or(u32::MAX)
}
