use std::io::Cursor;
use tenderboard::ingest;
use tenderboard::workflows::rates::{
    build_report, compute_bid_ranks, profile::ACCOUNTS, profile::RAILWAYS, DateRange,
    FilterSelection, HighlightClass, DISQUALIFIED_RANK,
};

const OWN: &str = "BAJAJ HEALTHCARE LIMITED";

const RAILWAYS_CSV: &str = "\
Pharmaceutical Content,Zone,Tender Due Date,Quoted Rate,Supplier Remarks
Paracetamol,Northern,2025-05-01,12.5,on time
Paracetamol,Northern,2025-05-01,12.5,duplicate quote
Paracetamol,Northern,2025-05-01,11,preferred
Paracetamol,Northern,2025-05-01,0,void quote
Paracetamol,Northern,2025-05-01,,rate pending
Paracetamol,Northern,2025-03-01,19,older tender
Ibuprofen,Western,2025-05-01,7,separate group
";

const ACCOUNTS_CSV: &str = "\
Product Name,Region,Publish Date,Rate Quoted,Company Name
API-A,East,2025-01-10,10,Acme Pharma
API-A,East,2025-01-10,5,Bajaj Healthcare Limited
API-A,East,2025-01-10,7,Zenith Labs
API-A,East,2025-02-10,4,Acme Pharma
API-A,East,2025-02-10,6,Zenith Labs
API-B,West,2025-02-15,3,Solo Chem
";

#[test]
fn railway_ranks_follow_the_dense_rank_contract() {
    let table = ingest::read_csv_table(Cursor::new(RAILWAYS_CSV)).expect("csv parses");
    let ranked = compute_bid_ranks(&table, &RAILWAYS).expect("ranks compute");

    // May tender, Northern zone: [12.5, 12.5, 11, 0, missing].
    assert_eq!(ranked[0].bid_rank, Some(2));
    assert_eq!(ranked[1].bid_rank, Some(2));
    assert_eq!(ranked[2].bid_rank, Some(1));
    assert_eq!(ranked[3].bid_rank, Some(DISQUALIFIED_RANK));
    assert_eq!(ranked[3].status.as_deref(), Some("L99"));
    assert_eq!(ranked[4].bid_rank, None);
    assert_eq!(ranked[4].status, None);

    // Different due date and different content rank independently.
    assert_eq!(ranked[5].bid_rank, Some(1));
    assert_eq!(ranked[6].bid_rank, Some(1));

    for record in &ranked {
        if let (Some(rank), Some(status)) = (record.bid_rank, record.status.as_deref()) {
            assert_eq!(status, format!("L{rank}"));
        }
    }
}

#[test]
fn railway_report_sorts_recent_tenders_first() {
    let table = ingest::read_csv_table(Cursor::new(RAILWAYS_CSV)).expect("csv parses");
    let report =
        build_report(&table, &RAILWAYS, &FilterSelection::default(), OWN).expect("builds");

    assert!(!report.no_records);
    let due_dates: Vec<&str> = report
        .rows
        .iter()
        .map(|row| row.cells[2].as_str())
        .collect();
    let mut sorted = due_dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(due_dates, sorted, "rows must be grouped by date descending");

    // Within the 2025-05-01 block, ranks ascend numerically and the
    // unranked row comes last.
    let may_ranks: Vec<Option<u32>> = report
        .rows
        .iter()
        .filter(|row| row.cells[2] == "2025-05-01")
        .map(|row| row.bid_rank)
        .collect();
    assert_eq!(
        may_ranks,
        [Some(1), Some(1), Some(2), Some(2), Some(DISQUALIFIED_RANK), None]
    );
}

#[test]
fn accounts_report_flags_repeat_competitors_but_never_the_own_company() {
    let table = ingest::read_csv_table(Cursor::new(ACCOUNTS_CSV)).expect("csv parses");
    let report =
        build_report(&table, &ACCOUNTS, &FilterSelection::default(), OWN).expect("builds");

    assert_eq!(report.frequent_competitors, 2);
    for row in &report.rows {
        let company = row.cells[4].as_str();
        match company {
            "Acme Pharma" | "Zenith Labs" => assert!(row.style.frequent_competitor),
            _ => assert!(!row.style.frequent_competitor),
        }
    }

    // Solo Chem won its tender but appears only once: L1 highlight, no
    // competitor emphasis.
    let solo = report
        .rows
        .iter()
        .find(|row| row.cells[4] == "Solo Chem")
        .expect("solo chem row");
    assert_eq!(solo.style.highlight, Some(HighlightClass::Lowest));
    assert!(!solo.style.frequent_competitor);
}

#[test]
fn accounts_filters_compose_with_the_date_window() {
    let table = ingest::read_csv_table(Cursor::new(ACCOUNTS_CSV)).expect("csv parses");

    let mut selection = FilterSelection::default();
    selection
        .categorical
        .insert("Region".to_string(), "East".to_string());
    selection.date_range = Some(DateRange {
        from: chrono::NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid date"),
        to: chrono::NaiveDate::from_ymd_opt(2025, 2, 28).expect("valid date"),
    });

    let report = build_report(&table, &ACCOUNTS, &selection, OWN).expect("builds");
    assert_eq!(report.rows.len(), 2);
    // Within the narrowed window each company has a single row, so the
    // competitor marker disappears.
    assert_eq!(report.frequent_competitors, 0);
}

#[test]
fn unmatched_filters_yield_the_no_records_notice() {
    let table = ingest::read_csv_table(Cursor::new(ACCOUNTS_CSV)).expect("csv parses");

    let mut selection = FilterSelection::default();
    selection
        .categorical
        .insert("Region".to_string(), "Nowhere".to_string());

    let report = build_report(&table, &ACCOUNTS, &selection, OWN).expect("builds");
    assert!(report.no_records);
    assert!(report.rows.is_empty());
    assert_eq!(report.facets.len(), 3);
}
