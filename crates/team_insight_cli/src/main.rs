//! Command-line dashboard report.
//!
//! # Responsibility
//! - Open the team store and print the dashboard report as JSON.
//! - Keep output deterministic so it can be diffed and scripted.

use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use team_insight_core::{
    default_log_level, init_logging, open_db, DashboardService, SqliteTeamRepository,
};

const DEFAULT_DB_FILE_NAME: &str = "team_insight.sqlite3";

#[derive(Parser, Debug)]
#[command(version, about = "Print the team health dashboard as JSON")]
struct Cli {
    /// SQLite database file. Defaults to a file in the system temp directory.
    #[arg(long = "db", value_name = "PATH", env = "TEAM_INSIGHT_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Log level (`trace|debug|info|warn|error`).
    #[arg(long, value_name = "LEVEL", env = "TEAM_INSIGHT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging stays off without it.
    #[arg(long, value_name = "DIR", env = "TEAM_INSIGHT_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("team_insight: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, String> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy())?;
    }

    let db_path = cli
        .db_path
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
    let conn = open_db(&db_path).map_err(|err| {
        error!("event=cli_report module=cli status=error stage=open error={err}");
        format!("failed to open `{}`: {err}", db_path.display())
    })?;

    let service = DashboardService::new(SqliteTeamRepository::new(&conn));
    let report = service.report().map_err(|err| {
        error!("event=cli_report module=cli status=error stage=report error={err}");
        format!("dashboard report failed: {err}")
    })?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    rendered.map_err(|err| format!("failed to encode report: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{run, Cli};
    use clap::Parser;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_db_path(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        std::env::temp_dir()
            .join(format!("{prefix}-{}-{nanos}.sqlite3", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["team_insight", "--db", "/tmp/a.sqlite3", "--pretty"]);
        assert_eq!(
            cli.db_path.as_deref(),
            Some(std::path::Path::new("/tmp/a.sqlite3"))
        );
        assert!(cli.pretty);
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn empty_store_reports_full_health() {
        let db = temp_db_path("team-insight-cli-empty");
        let cli = Cli::parse_from(["team_insight", "--db", db.as_str()]);
        let output = run(&cli).expect("report should render");
        let json: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(json["health"]["health"], 100);
        assert_eq!(json["health"]["status_label"], "Healthy");
        assert_eq!(json["counts"]["members"], 0);
        assert_eq!(json["workload"], serde_json::json!([]));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let db = temp_db_path("team-insight-cli-logdir");
        let cli = Cli::parse_from(["team_insight", "--db", db.as_str(), "--log-dir", "logs"]);
        let err = run(&cli).expect_err("relative log dir must fail");
        assert!(err.contains("absolute"));
    }
}
