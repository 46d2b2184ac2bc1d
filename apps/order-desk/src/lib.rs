//! # Order Desk Library
//!
//! Core library for the Order Desk terminal application.
//! `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! order_desk/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── form.rs         ◄─── Interactive dialoguer form
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database + order book
//! │   └── config.rs   ◄─── Configuration (file, env, flags)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch
//! │   ├── customer.rs ◄─── Customer commands
//! │   ├── product.rs  ◄─── Product commands
//! │   ├── order.rs    ◄─── Order commands
//! │   └── report.rs   ◄─── Reports
//! └── error.rs        ◄─── Error type shown to the operator
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod form;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use is_terminal::IsTerminal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::{AppError, AppResult};
use state::{AppConfig, DbState};

/// Runs the application and maps the outcome to an exit code.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse arguments (clap)                                              │
/// │  2. Initialize logging (stderr, RUST_LOG or -v)                         │
/// │  3. Load config: defaults → config file → ORDER_DESK_* env → --db       │
/// │  4. Open database, run migrations, load the order book                  │
/// │  5. Execute the subcommand, or open the form when none is given         │
/// │  6. Close the pool                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: could not start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_cli(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, json);
            ExitCode::FAILURE
        }
    }
}

async fn run_cli(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load(cli.db)?;
    config.ensure_data_dir()?;
    debug!(?config, "Configuration loaded");

    let mut state = DbState::open(&config.database_path).await?;
    debug!(
        path = %config.database_path.display(),
        customers = state.book().customers().len(),
        orders = state.book().orders().len(),
        "Order book loaded"
    );

    let result = match cli.command {
        Some(command) => commands::execute(command, &mut state, &config, cli.json)
            .await
            .map(|output| println!("{output}")),
        None if std::io::stdin().is_terminal() => form::run_form(&mut state, &config).await,
        None => Err(AppError::validation(
            "No command given and stdin is not a terminal; see 'order-desk --help'",
        )),
    };

    state.close().await;
    result
}

fn report_error(err: &AppError, json: bool) {
    if json {
        match serde_json::to_string(err) {
            Ok(body) => eprintln!("{body}"),
            Err(_) => eprintln!("{err}"),
        }
    } else {
        eprintln!("{err}");
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output stays clean on stdout.
///
/// ## Log Levels
/// - default: warnings, plus info from the order crates
/// - `-v`: info, debug from the order crates
/// - `-vv`: debug everywhere, trace from the order crates
/// - `RUST_LOG` overrides all of the above
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn,order=info,sqlx=warn",
        1 => "info,order=debug,sqlx=warn",
        _ => "debug,order=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
