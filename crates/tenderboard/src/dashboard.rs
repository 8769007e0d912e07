use crate::workflows::rates::DatasetKind;
use serde::Serialize;

/// Where the user currently is in the dashboard.
///
/// Navigation is an explicit value with defined transitions rather than
/// hidden session state: Home opens Historic Rates (landing on Railways)
/// or the blacklist, the dataset sub-choice only applies on the Historic
/// Rates page, and Home is reachable from anywhere. Undefined transitions
/// leave the view unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum DashboardView {
    Home,
    HistoricRates { dataset: DatasetKind },
    Blacklist,
}

impl DashboardView {
    pub const fn home() -> Self {
        Self::Home
    }

    pub fn open_historic_rates(self) -> Self {
        match self {
            Self::Home => Self::HistoricRates {
                dataset: DatasetKind::Railways,
            },
            other => other,
        }
    }

    pub fn select_dataset(self, dataset: DatasetKind) -> Self {
        match self {
            Self::HistoricRates { .. } => Self::HistoricRates { dataset },
            other => other,
        }
    }

    pub fn open_blacklist(self) -> Self {
        match self {
            Self::Home => Self::Blacklist,
            other => other,
        }
    }

    pub fn go_home(self) -> Self {
        Self::Home
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home - Procurement Dashboard",
            Self::HistoricRates { .. } => "Historic Rates Dashboard",
            Self::Blacklist => "Blacklist Companies Dashboard",
        }
    }
}
