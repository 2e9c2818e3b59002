//! Item Criteria Verifier CLI Tool
//!
//! Logs in to the mock item API, fetches every item, and checks each
//! criteria row from a YAML/JSON file against the collection.
//!
//! Usage:
//!   itemcheck-verify --criteria criteria.yaml [--api-url URL] [--all]
//!
//! By default verification stops at the first row that matches no item.
//! With `--all` every row is evaluated and all failures are reported.
//! Exits with status 1 when any row fails.

use clap::Parser;
use itemcheck_criteria::{load_criteria, CriterionRow, RowMatch};
use itemcheck_mock::client::{ApiSession, ClientConfig, ClientError, DEFAULT_API_URL};
use itemcheck_mock::diagnostics::{DiagnosticEntry, ScenarioDiagnostics};
use itemcheck_mock::logging::{self, LogFormat};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Item Criteria Verifier - check API items against criteria rows
#[derive(Parser, Debug)]
#[command(name = "itemcheck-verify")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Item API base URL
    #[arg(short, long, env = "API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Criteria file (YAML or JSON)
    #[arg(short, long)]
    criteria: PathBuf,

    /// Evaluate every row instead of stopping at the first failure
    #[arg(long)]
    all: bool,

    /// Bearer token to use instead of calling /login
    #[arg(long, env = "ITEMCHECK_TOKEN")]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// List matched item ids for each row
    #[arg(short, long)]
    verbose: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Default)]
struct VerificationSummary {
    total_items: usize,
    total_rows: usize,
    passed: usize,
    failed: usize,
    not_evaluated: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_level, LogFormat::Text);

    match run(&args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{RED}Error:{RESET} {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<bool> {
    let file = load_criteria(&args.criteria)?;
    let matcher = file.matcher();

    let mut config =
        ClientConfig::new(&args.api_url).with_timeout(Duration::from_secs(args.timeout));
    if let Some(token) = &args.token {
        config = config.with_token(token);
    }
    let mut session = ApiSession::new(config)?;

    println!("{BOLD}{CYAN}Item Criteria Verifier{RESET}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("API URL:  {}", args.api_url);
    println!("Criteria: {}", args.criteria.display());
    println!();

    if session.token().is_none() {
        session.login().await?;
    }
    let total_items = session.fetch_items().await?.len();

    if file.criteria.is_empty() {
        println!("{YELLOW}Warning:{RESET} No criteria rows found");
        return Ok(true);
    }

    let mut diagnostics = ScenarioDiagnostics::new(args.criteria.display().to_string());
    let mut summary = VerificationSummary {
        total_items,
        total_rows: file.criteria.len(),
        ..Default::default()
    };

    if args.all {
        let report = session.evaluate_items(&matcher, &file.criteria)?;
        for row in &report.rows {
            print_row(row, args.verbose);
            if row.is_match() {
                summary.passed += 1;
            } else {
                summary.failed += 1;
                diagnostics.add_error(format!(
                    "row {}: no item matches {}",
                    row.index, row.criteria
                ));
            }
        }
    } else {
        match session.verify_items_with(&matcher, &file.criteria) {
            Ok(rows) => {
                for row in &rows {
                    print_row(row, args.verbose);
                }
                summary.passed = rows.len();
            }
            Err(ClientError::NoMatch(no_match)) => {
                print_passed_prefix(&file.criteria[..no_match.index]);
                print_failure(no_match.index, &no_match.criteria);
                diagnostics.add_error(no_match.to_string());
                summary.passed = no_match.index;
                summary.failed = 1;
                summary.not_evaluated = summary.total_rows - no_match.index - 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let failures = diagnostics.finish();
    print_summary(&summary, &failures);
    Ok(summary.failed == 0)
}

fn print_row(row: &RowMatch, verbose: bool) {
    if row.is_match() {
        println!(
            "  {GREEN}✓{RESET} row {} {} {DIM}({} item(s)){RESET}",
            row.index,
            row.criteria,
            row.matched.len()
        );
        if verbose {
            let ids: Vec<String> = row
                .matched
                .iter()
                .map(|r| r.id().map(|id| id.to_string()).unwrap_or_else(|| "?".into()))
                .collect();
            println!("    {DIM}ids: {}{RESET}", ids.join(", "));
        }
    } else {
        print_failure(row.index, &row.criteria);
    }
}

fn print_passed_prefix(rows: &[CriterionRow]) {
    for (index, row) in rows.iter().enumerate() {
        println!("  {GREEN}✓{RESET} row {index} {row}");
    }
}

fn print_failure(index: usize, criteria: &CriterionRow) {
    println!("  {RED}✗{RESET} row {index} {criteria} {RED}(no matching item){RESET}");
}

fn print_summary(summary: &VerificationSummary, failures: &[DiagnosticEntry]) {
    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{BOLD}Verification Summary{RESET}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Items:      {}", summary.total_items);
    println!("  Rows:       {}", summary.total_rows);
    println!();
    println!("  {}Passed:  {}{}", GREEN, summary.passed, RESET);
    println!("  {}Failed:  {}{}", RED, summary.failed, RESET);
    if summary.not_evaluated > 0 {
        println!("  {}Skipped: {}{}", YELLOW, summary.not_evaluated, RESET);
    }
    println!();

    if !failures.is_empty() {
        println!("{RED}Failure Details{RESET}");
        for (i, failure) in failures.iter().enumerate() {
            println!(
                "{}. {} {DIM}[{}]{RESET}",
                i + 1,
                failure.message,
                failure.recorded_at.format("%H:%M:%S")
            );
        }
        println!();
    }

    if summary.failed == 0 {
        println!("{GREEN}All criteria verified!{RESET}");
    } else {
        println!(
            "{}{} row(s) failed. See details above.{}",
            RED, summary.failed, RESET
        );
    }
}
