use crate::demo::{run_blacklist, run_demo, run_rates_report, BlacklistArgs, RatesReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use tenderboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tenderboard",
    about = "Serve and inspect the procurement tender rates dashboard",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Generate a historic-rates report on the command line
    Rates {
        #[command(subcommand)]
        command: RatesCommand,
    },
    /// Print the blacklisted companies table
    Blacklist(BlacklistArgs),
    /// Walk the dashboard pages over bundled sample data
    Demo,
}

#[derive(Subcommand, Debug)]
enum RatesCommand {
    /// Rank, sort and style one dataset with optional filters
    Report(RatesReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rates {
            command: RatesCommand::Report(args),
        } => run_rates_report(args),
        Command::Blacklist(args) => run_blacklist(args),
        Command::Demo => run_demo(),
    }
}
