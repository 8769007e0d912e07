use crate::infra::parse_date;
use chrono::NaiveDate;
use clap::Args;
use std::io::Cursor;
use std::path::PathBuf;
use tenderboard::config::AppConfig;
use tenderboard::dashboard::DashboardView;
use tenderboard::error::AppError;
use tenderboard::ingest;
use tenderboard::workflows::blacklist::{self, BlacklistView};
use tenderboard::workflows::rates::{
    build_report, DatasetKind, DatasetProfile, DateRange, FilterSelection, RatesReportView,
};

#[derive(Args, Debug)]
pub(crate) struct RatesReportArgs {
    /// Dataset flavor: railways or accounts
    #[arg(long, value_parser = parse_dataset)]
    dataset: DatasetKind,
    /// Spreadsheet path overriding the configured location
    #[arg(long)]
    data: Option<PathBuf>,
    /// Column filter as 'Column=Value'; repeat for several columns
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,
    /// Start of the date window, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// End of the date window, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct BlacklistArgs {
    /// Spreadsheet path overriding the configured location
    #[arg(long)]
    data: Option<PathBuf>,
}

fn parse_dataset(raw: &str) -> Result<DatasetKind, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "railways" => Ok(DatasetKind::Railways),
        "accounts" => Ok(DatasetKind::Accounts),
        other => Err(format!(
            "unknown dataset '{other}' (expected railways or accounts)"
        )),
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected 'Column=Value', got '{raw}'")),
    }
}

pub(crate) fn run_rates_report(args: RatesReportArgs) -> Result<(), AppError> {
    let RatesReportArgs {
        dataset,
        data,
        filters,
        from,
        to,
    } = args;

    let config = AppConfig::load()?;
    let path = data.unwrap_or_else(|| match dataset {
        DatasetKind::Railways => config.data.railways_path.clone(),
        DatasetKind::Accounts => config.data.accounts_path.clone(),
    });

    let table = ingest::load_table(&path)?;
    let selection = FilterSelection {
        categorical: filters.into_iter().collect(),
        date_range: match (from, to) {
            (Some(from), Some(to)) => Some(DateRange { from, to }),
            _ => None,
        },
    };

    let report = build_report(
        &table,
        DatasetProfile::for_kind(dataset),
        &selection,
        &config.data.own_company,
    )?;
    render_rates_report(&report);

    Ok(())
}

pub(crate) fn run_blacklist(args: BlacklistArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = args.data.unwrap_or_else(|| config.data.blacklist_path.clone());
    let view = blacklist::load_view(&path)?;
    render_blacklist(&view);

    Ok(())
}

const DEMO_OWN_COMPANY: &str = "BAJAJ HEALTHCARE LIMITED";

const DEMO_RAILWAYS_CSV: &str = "\
Pharmaceutical Content,Zone,Tender Due Date,Quoted Rate
Paracetamol IP,Northern Railway,2025-06-15,1240
Paracetamol IP,Northern Railway,2025-06-15,1185
Paracetamol IP,Northern Railway,2025-06-15,0
Ondansetron,Western Railway,2025-06-01,310
Ondansetron,Western Railway,2025-06-01,298
";

const DEMO_ACCOUNTS_CSV: &str = "\
Product Name,Region,Publish Date,Rate Quoted,Company Name
Metformin HCL,Maharashtra,2025-05-20,86,Bajaj Healthcare Limited
Metformin HCL,Maharashtra,2025-05-20,81,Crest Remedies
Metformin HCL,Maharashtra,2025-05-20,90,Veritas Drugs
Metformin HCL,Gujarat,2025-05-12,84,Crest Remedies
Metformin HCL,Gujarat,2025-05-12,88,Veritas Drugs
";

const DEMO_BLACKLIST_CSV: &str = "\
Company Name,Reason,Blacklisted On
Shakti Traders,Forged performance certificates,2024-11-02
Medline Impex,Repeated supply failures,2025-02-18
";

/// Walk every dashboard page over bundled sample data, exercising the
/// same navigation transitions the UI drives.
pub(crate) fn run_demo() -> Result<(), AppError> {
    let mut view = DashboardView::home();
    println!("{}", view.title());
    println!("Welcome! Please choose an option below:\n");

    view = view.open_historic_rates();
    println!("{}", view.title());
    let railways = ingest::read_csv_table(Cursor::new(DEMO_RAILWAYS_CSV))?;
    let report = build_report(
        &railways,
        DatasetProfile::for_kind(DatasetKind::Railways),
        &FilterSelection::default(),
        DEMO_OWN_COMPANY,
    )?;
    render_rates_report(&report);

    view = view.select_dataset(DatasetKind::Accounts);
    println!("\n{} ({})", view.title(), DatasetKind::Accounts.label());
    let accounts = ingest::read_csv_table(Cursor::new(DEMO_ACCOUNTS_CSV))?;
    let report = build_report(
        &accounts,
        DatasetProfile::for_kind(DatasetKind::Accounts),
        &FilterSelection::default(),
        DEMO_OWN_COMPANY,
    )?;
    render_rates_report(&report);

    view = view.go_home().open_blacklist();
    println!("\n{}", view.title());
    let blacklist_table = ingest::read_csv_table(Cursor::new(DEMO_BLACKLIST_CSV))?;
    render_blacklist(&BlacklistView::from_table(&blacklist_table));

    Ok(())
}

fn render_rates_report(report: &RatesReportView) {
    println!("Historic rates: {}", report.dataset_label);

    if report.no_records {
        println!("No records found for the selected filters.");
        return;
    }

    println!("Status | {}", report.columns.join(" | "));
    for row in &report.rows {
        let status = row.status.as_deref().unwrap_or("-");
        let mut markers = String::new();
        if let Some(highlight) = row.style.highlight {
            markers.push_str(&format!(" [{}]", highlight.label()));
        }
        if row.style.frequent_competitor {
            markers.push_str(" [frequent competitor]");
        }
        println!("{:>6} | {}{}", status, row.cells.join(" | "), markers);
    }

    if report.frequent_competitors > 0 {
        println!(
            "Frequent competitors flagged: {}",
            report.frequent_competitors
        );
    }
}

fn render_blacklist(view: &BlacklistView) {
    println!("Blacklisted companies: {}", view.total);
    println!("{}", view.table.columns.join(" | "));
    for row in &view.table.rows {
        println!("{}", row.join(" | "));
    }
}
