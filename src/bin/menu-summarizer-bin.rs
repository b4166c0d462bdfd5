use menu_summarizer_rs::constants::DEFAULT_API_BASE;
use menu_summarizer_rs::data_types::SubmitOutcome;
use menu_summarizer_rs::page::{LoadingWatcher, PageContext};
use menu_summarizer_rs::request_dispatcher::{submit_menu_form, HttpMenuClient};
use menu_summarizer_rs::shared_main::{build_form, logger_init};

use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode, time::Duration};

/// Looks up a restaurant's lunch menu through the menu summarizer API and
/// prints it as HTML.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Restaurant page to summarize
    #[arg(short, long, env = "MENU_URL", required_unless_present = "health")]
    url: Option<String>,
    /// Day of the menu: YYYY-MM-DD, DD.MM.YYYY or DD.MM.{n}[default: today]
    #[arg(short, long)]
    date: Option<String>,
    /// Base URL of the menu summarizer API
    #[arg(long, env = "MENU_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,
    /// Write the rendered HTML to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Only check whether the API is up
    #[arg(long)]
    health: bool,
    /// Enable verbose logging (request timings){n}[SETS: debug level for this crate]
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    logger_init("menu_summarizer_rs", args.verbose);

    let client = HttpMenuClient::new(&args.api_base)?;

    if args.health {
        let health = client
            .check_health()
            .await
            .with_context(|| format!("Health check against {} failed", args.api_base))?;
        println!("{} ({})", health.status, health.service.as_deref().unwrap_or("-"));
        return Ok(if health.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let today = chrono::Local::now().date_naive();
    let form = build_form(args.url.as_deref().unwrap_or_default(), args.date.as_deref(), today)?;

    let mut page = PageContext::new();
    let progress = tokio::spawn(report_progress(page.loading_overlay.watcher()));

    log::info!("Requesting menu from {}...", args.api_base);
    let outcome = submit_menu_form(&mut page, &form, &client).await;
    progress.abort();

    match outcome {
        SubmitOutcome::Skipped => {
            log::debug!("nothing submitted");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rendered(response) => {
            match args.output {
                Some(path) => {
                    std::fs::write(&path, page.result_display.html())
                        .with_context(|| format!("Could not write {}", path.display()))?;
                    log::info!("Menu written to {}", path.display());
                }
                None => print!("{}", page.result_display.html()),
            }
            // a 2xx reply can still carry an error payload
            Ok(if response.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        SubmitOutcome::ApplicationError(_) | SubmitOutcome::TransportError(_) => {
            eprintln!("{}", page.error_display.text());
            Ok(ExitCode::FAILURE)
        }
    }
}

// the backend scrapes and summarizes, this can take a while
async fn report_progress(loading: LoadingWatcher) {
    let mut waited = 0;
    loop {
        tokio::time::sleep(Duration::from_secs(5)).await;
        waited += 5;
        if loading.is_visible() {
            log::info!("Still waiting for the menu ({}s)...", waited);
        }
    }
}
