use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank assigned to zero-rate quotes. Marks the quote as invalid rather
/// than competitive, so it can never shadow a genuine lowest bid.
pub const DISQUALIFIED_RANK: u32 = 99;

/// Ranks L1 through this value count toward competitor detection.
pub const COMPETITOR_RANK_CEILING: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Railways,
    Accounts,
}

impl DatasetKind {
    pub const fn ordered() -> [Self; 2] {
        [Self::Railways, Self::Accounts]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Railways => "Railways",
            Self::Accounts => "Accounts",
        }
    }
}

/// Background highlight classes for ranked rows. The presentation layer
/// decides the actual colors; the engine only names the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightClass {
    Lowest,
    SecondLowest,
    ThirdLowest,
}

impl HighlightClass {
    pub const fn for_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(Self::Lowest),
            2 => Some(Self::SecondLowest),
            3 => Some(Self::ThirdLowest),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lowest => "Lowest Bid",
            Self::SecondLowest => "Second Lowest",
            Self::ThirdLowest => "Third Lowest",
        }
    }
}

/// Visual directive for one row: an optional background highlight plus an
/// independent repeat-competitor emphasis. Both can apply at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightClass>,
    pub frequent_competitor: bool,
}

impl RowStyle {
    pub const fn is_plain(&self) -> bool {
        self.highlight.is_none() && !self.frequent_competitor
    }
}

pub(crate) fn status_label(rank: u32) -> String {
    format!("L{rank}")
}

#[derive(Debug)]
pub enum RatesError {
    MissingColumn { column: String },
    UnknownFilterColumn { column: String },
    EmptyDateRange,
}

impl fmt::Display for RatesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatesError::MissingColumn { column } => {
                write!(f, "dataset is missing required column '{}'", column)
            }
            RatesError::UnknownFilterColumn { column } => {
                write!(f, "'{}' is not a filterable column for this dataset", column)
            }
            RatesError::EmptyDateRange => {
                write!(f, "date range start must not be after its end")
            }
        }
    }
}

impl std::error::Error for RatesError {}
