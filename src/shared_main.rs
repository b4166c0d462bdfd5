use std::env;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::menu_form::{normalize_date_input, MenuForm};

/// Info everywhere, Debug for `module` when `RUST_LOG=debug` or `verbose`.
pub fn logger_init(module: &str, verbose: bool) {
    let debug = verbose
        || env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV).unwrap_or_default()
            == "debug";

    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(
            module,
            if debug {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            },
        )
        .init();
}

/// Fills a fresh form from command line input. A missing date keeps the
/// form's default (today).
pub fn build_form(url: &str, date: Option<&str>, today: NaiveDate) -> Result<MenuForm> {
    let mut form = MenuForm::new(today);
    form.set_url(url);

    if let Some(raw) = date {
        let iso = normalize_date_input(raw, today)
            .with_context(|| format!("Invalid --date value '{}'", raw))?;
        form.set_date(iso);
    }

    Ok(form)
}
