use super::competitors::CompetitorSet;
use super::domain::{DatasetKind, HighlightClass, RatesError, RowStyle};
use super::filter::{self, Facet, FilterSelection};
use super::profile::DatasetProfile;
use super::ranking::{self, RankedRecord};
use crate::ingest::Table;
use serde::Serialize;
use tracing::debug;

/// One display row: original cells plus the computed rank, status and
/// style directive.
#[derive(Debug, Clone, Serialize)]
pub struct RankedRowView {
    pub cells: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub style: RowStyle,
}

/// The full historic-rates report for one dataset and one filter pass.
#[derive(Debug, Serialize)]
pub struct RatesReportView {
    pub dataset: DatasetKind,
    pub dataset_label: &'static str,
    pub columns: Vec<String>,
    pub facets: Vec<Facet>,
    pub rows: Vec<RankedRowView>,
    /// Set when the filters matched nothing; the UI shows its notice
    /// instead of an empty grid.
    pub no_records: bool,
    pub frequent_competitors: usize,
}

/// Run the whole engine for one interaction: facets from the unfiltered
/// snapshot, then filter, rank, flag competitors, sort and style.
pub fn build_report(
    table: &Table,
    profile: &DatasetProfile,
    selection: &FilterSelection,
    own_company: &str,
) -> Result<RatesReportView, RatesError> {
    let facets = filter::facets(table, profile)?;
    let filtered = filter::apply(table, profile, selection)?;

    if filtered.is_empty() {
        return Ok(RatesReportView {
            dataset: profile.kind,
            dataset_label: profile.kind.label(),
            columns: filtered.columns().to_vec(),
            facets,
            rows: Vec::new(),
            no_records: true,
            frequent_competitors: 0,
        });
    }

    let mut records = ranking::compute_bid_ranks(&filtered, profile)?;
    let competitors = match profile.company_column {
        Some(_) => CompetitorSet::from_ranked(&records, own_company),
        None => CompetitorSet::default(),
    };
    ranking::sort_for_display(&mut records);

    let rows = records
        .iter()
        .map(|record| RankedRowView {
            cells: filtered.display_row(record.row),
            bid_rank: record.bid_rank,
            status: record.status.clone(),
            style: style_row(record, &competitors),
        })
        .collect::<Vec<_>>();

    debug!(
        dataset = profile.kind.label(),
        rows = rows.len(),
        frequent_competitors = competitors.len(),
        "rates report built"
    );

    Ok(RatesReportView {
        dataset: profile.kind,
        dataset_label: profile.kind.label(),
        columns: filtered.columns().to_vec(),
        facets,
        rows,
        no_records: false,
        frequent_competitors: competitors.len(),
    })
}

/// Style directive for one ranked record: background highlight for the
/// top three statuses, competitor emphasis on top of whatever background
/// applies.
fn style_row(record: &RankedRecord, competitors: &CompetitorSet) -> RowStyle {
    let highlight = record.bid_rank.and_then(HighlightClass::for_rank);
    let frequent_competitor = record
        .company
        .as_deref()
        .is_some_and(|company| competitors.contains(company));

    RowStyle {
        highlight,
        frequent_competitor,
    }
}
