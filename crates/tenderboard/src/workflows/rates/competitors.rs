use super::domain::COMPETITOR_RANK_CEILING;
use super::ranking::RankedRecord;
use std::collections::{HashMap, HashSet};

/// Companies that keep showing up near the top of tenders.
///
/// A company qualifies when it appears with a ranked status of L1 through
/// L5 at least twice in the current report, and it is not the organization
/// itself. Membership only drives the visual marker; qualifying rows are
/// never filtered out.
#[derive(Debug, Default)]
pub struct CompetitorSet {
    names: HashSet<String>,
}

impl CompetitorSet {
    pub fn from_ranked(records: &[RankedRecord], own_company: &str) -> Self {
        let own = normalize_company(own_company);

        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in records {
            let qualifying = matches!(
                record.bid_rank,
                Some(rank) if rank >= 1 && rank <= COMPETITOR_RANK_CEILING
            );
            if !qualifying {
                continue;
            }

            let Some(company) = record.company.as_deref() else {
                continue;
            };
            let normalized = normalize_company(company);
            if normalized.is_empty() || normalized == own {
                continue;
            }

            *counts.entry(normalized).or_default() += 1;
        }

        Self {
            names: counts
                .into_iter()
                .filter(|(_, count)| *count >= 2)
                .map(|(name, _)| name)
                .collect(),
        }
    }

    pub fn contains(&self, company: &str) -> bool {
        self.names.contains(&normalize_company(company))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Case- and whitespace-insensitive company identity.
fn normalize_company(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::rates::domain::{status_label, DISQUALIFIED_RANK};

    fn record(company: Option<&str>, rank: Option<u32>) -> RankedRecord {
        RankedRecord {
            row: 0,
            rate: Some(1.0),
            date: None,
            company: company.map(str::to_string),
            bid_rank: rank,
            status: rank.map(status_label),
        }
    }

    #[test]
    fn two_qualifying_rows_make_a_competitor_one_does_not() {
        let records = vec![
            record(Some("Acme Pharma"), Some(1)),
            record(Some("Acme Pharma"), Some(2)),
            record(Some("Zenith Labs"), Some(1)),
            record(Some("Zenith Labs"), Some(2)),
            record(Some("Solo Chem"), Some(3)),
        ];
        let set = CompetitorSet::from_ranked(&records, "BAJAJ HEALTHCARE LIMITED");

        assert_eq!(set.len(), 2);
        assert!(set.contains("Acme Pharma"));
        assert!(set.contains("Zenith Labs"));
        assert!(!set.contains("Solo Chem"));
    }

    #[test]
    fn own_company_is_excluded_under_any_casing_or_whitespace() {
        let records = vec![
            record(Some(" bajaj  healthcare limited "), Some(1)),
            record(Some("BAJAJ HEALTHCARE LIMITED"), Some(1)),
            record(Some("Bajaj Healthcare Limited"), Some(2)),
        ];
        let set = CompetitorSet::from_ranked(&records, "BAJAJ HEALTHCARE LIMITED");

        assert!(set.is_empty());
    }

    #[test]
    fn only_l1_through_l5_counts() {
        let records = vec![
            record(Some("Acme Pharma"), Some(5)),
            record(Some("Acme Pharma"), Some(5)),
            record(Some("Zenith Labs"), Some(6)),
            record(Some("Zenith Labs"), Some(6)),
            record(Some("Nadir Ltd"), Some(DISQUALIFIED_RANK)),
            record(Some("Nadir Ltd"), Some(DISQUALIFIED_RANK)),
            record(Some("Blank Corp"), None),
            record(Some("Blank Corp"), None),
        ];
        let set = CompetitorSet::from_ranked(&records, "BAJAJ HEALTHCARE LIMITED");

        assert_eq!(set.len(), 1);
        assert!(set.contains("ACME PHARMA"));
    }

    #[test]
    fn anonymous_records_are_ignored() {
        let records = vec![record(None, Some(1)), record(None, Some(1))];
        let set = CompetitorSet::from_ranked(&records, "BAJAJ HEALTHCARE LIMITED");
        assert!(set.is_empty());
    }
}
