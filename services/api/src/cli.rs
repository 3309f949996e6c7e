use crate::report::{run_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use prenoms::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Prénoms Dashboard",
    about = "Serve or query French first-name birth statistics by year, sex and department",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP dashboard (default command)
    Serve(ServeArgs),
    /// Print the year series and department totals for one filter
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured birth statistics CSV
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
    /// Override the configured department boundaries URL
    #[arg(long)]
    pub(crate) geojson_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["prenoms-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_accepts_department_lists() {
        let cli = Cli::try_parse_from([
            "prenoms-api",
            "report",
            "--name",
            "MARIE",
            "--sex",
            "2",
            "--departments",
            "75,5",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.name, "MARIE");
                let codes: Vec<&str> = args.departments.iter().map(|d| d.as_str()).collect();
                assert_eq!(codes, vec!["75", "05"]);
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn report_rejects_unknown_sex_codes() {
        let result = Cli::try_parse_from(["prenoms-api", "report", "--name", "MARIE", "--sex", "3"]);
        assert!(result.is_err());
    }
}
