use chrono::{Datelike, NaiveDate};
use regex_lite::Regex;
use static_init::dynamic;

use crate::data_types::MenuQuery;
use crate::errors::DateParseError;

pub const ISO_DATE_FMT: &str = "%Y-%m-%d";

/// The two input fields of the lookup form.
#[derive(Debug, Clone)]
pub struct MenuForm {
    url: String,
    date: String,
    min_date: NaiveDate,
}

impl MenuForm {
    /// Empty URL, date field prefilled with `today`, which is also the
    /// lowest date the form offers.
    pub fn new(today: NaiveDate) -> Self {
        MenuForm {
            url: String::new(),
            date: today.format(ISO_DATE_FMT).to_string(),
            min_date: today,
        }
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Reads the fields for submission. `None` means a field is empty and the
    /// submission should be dropped without any message.
    pub fn collect(&self) -> Option<MenuQuery> {
        let url = self.url.trim();
        let date = self.date.as_str();

        if url.is_empty() || date.is_empty() {
            log::debug!("empty form field, not submitting");
            return None;
        }

        // min is only a hint, the backend has the final say
        if let Ok(d) = NaiveDate::parse_from_str(date, ISO_DATE_FMT) {
            if d < self.min_date {
                log::warn!("{} is before the earliest offered date {}", d, self.min_date);
            }
        }

        Some(MenuQuery {
            url: url.to_string(),
            date: date.to_string(),
        })
    }
}

/// Turns the date spellings the backend understands (`YYYY-MM-DD`,
/// `DD.MM.YYYY`, `DD.MM.YYYY.`, `DD.MM.`) into `YYYY-MM-DD`. Day-month input
/// takes the year of `today`.
pub fn normalize_date_input(raw: &str, today: NaiveDate) -> Result<String, DateParseError> {
    #[dynamic]
    static ISO_RE: Regex = Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap();
    #[dynamic]
    static DMY_RE: Regex = Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})\.?$").unwrap();
    #[dynamic]
    static DM_RE: Regex = Regex::new(r"^(\d{1,2})\.(\d{1,2})\.?$").unwrap();

    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(DateParseError::NoDatePassed);
    }

    let invalid = || DateParseError::InvalidDatePassed(raw.trim().to_string());

    let (year, month, day) = if let Some(caps) = ISO_RE.captures(&cleaned) {
        (&caps[1], &caps[2], &caps[3]).to_ymd().ok_or_else(invalid)?
    } else if let Some(caps) = DMY_RE.captures(&cleaned) {
        (&caps[3], &caps[2], &caps[1]).to_ymd().ok_or_else(invalid)?
    } else if let Some(caps) = DM_RE.captures(&cleaned) {
        let (_, month, day) = ("0", &caps[2], &caps[1]).to_ymd().ok_or_else(invalid)?;
        (today.year(), month, day)
    } else {
        return Err(invalid());
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.format(ISO_DATE_FMT).to_string())
        .ok_or_else(invalid)
}

trait ToYmd {
    fn to_ymd(&self) -> Option<(i32, u32, u32)>;
}

impl ToYmd for (&str, &str, &str) {
    fn to_ymd(&self) -> Option<(i32, u32, u32)> {
        Some((self.0.parse().ok()?, self.1.parse().ok()?, self.2.parse().ok()?))
    }
}
