pub mod domain;
pub mod profile;

mod competitors;
mod filter;
mod ranking;
mod report;

pub use competitors::CompetitorSet;
pub use domain::{DatasetKind, HighlightClass, RatesError, RowStyle, DISQUALIFIED_RANK};
pub use filter::{apply as apply_filters, facets, DateRange, Facet, FilterSelection};
pub use profile::DatasetProfile;
pub use ranking::{compute_bid_ranks, sort_for_display, RankedRecord};
pub use report::{build_report, RankedRowView, RatesReportView};
