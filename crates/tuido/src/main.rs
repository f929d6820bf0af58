#![forbid(unsafe_code)]

//! Binary entry point.
//!
//! Parses args manually (no external dependencies) and supports environment
//! overrides via the `TUIDO_*` prefix.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tuido::config::AppConfig;
use tuido::scenarios::{VisualCtx, scenarios};
use tuido::AppModel;
use tuido_core::SystemClock;
use tuido_harness::ScenarioRunner;
use tuido_runtime::Program;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
tuido — a task-management terminal UI with a built-in visual test harness

USAGE:
    tuido [OPTIONS]

OPTIONS:
    --suite              Run the visual test suite headless and print a JSON
                         report (exit code 1 when any scenario fails)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    F1 / F2         Switch between the Tasks and Tests screens
    Tab / S-Tab     Next / previous form field
    Enter           Submit the form (Tasks) / run selected scenario (Tests)
    Esc             Toggle between form and task list
    Space, d        Toggle / delete the selected task
    r, c            Run all / clear results (Tests screen)
    q (Tests), ^C   Quit

ENVIRONMENT VARIABLES:
    TUIDO_LOG                  Log filter (tracing env-filter syntax)
    TUIDO_CREATE_LATENCY_MS    Simulated creation latency (default 500)
    TUIDO_TICK_MS              Runtime tick interval (default 100)
    TUIDO_SETTLE_MS            Harness settle advance (default 600)
";

fn main() -> ExitCode {
    init_logging();

    let mut run_suite = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print!("{HELP_TEXT}");
                return ExitCode::SUCCESS;
            }
            "--version" | "-V" => {
                println!("tuido {VERSION}");
                return ExitCode::SUCCESS;
            }
            "--suite" => run_suite = true,
            other => {
                eprintln!("unknown option: {other}");
                eprintln!("try 'tuido --help'");
                return ExitCode::FAILURE;
            }
        }
    }

    let config = AppConfig::from_env();
    if run_suite {
        return run_suite_headless(config);
    }

    let app = AppModel::new(Arc::new(SystemClock), config);
    match Program::new(app).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("terminal error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Run every scenario without a terminal and print the JSON report.
fn run_suite_headless(config: AppConfig) -> ExitCode {
    let mut runner = ScenarioRunner::new(scenarios());
    let mut ctx = VisualCtx::new(config);
    runner.run_all(&mut ctx);

    let report = runner.report();
    println!("{}", report.to_json());
    if report.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging() {
    let filter = env::var("TUIDO_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
