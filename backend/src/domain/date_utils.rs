//! Month label formatting for the monthly spending aggregation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const SPANISH_MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio",
    "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre",
];

/// Language used for "month year" labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthLabelLocale {
    /// "January 2024"
    #[default]
    English,
    /// "enero de 2024"
    Spanish,
}

impl MonthLabelLocale {
    /// Label for a month, `month` being 1-based. Out-of-range months fall
    /// back to a numeric `YYYY-MM` label.
    pub fn month_label(&self, year: i32, month: u32) -> String {
        let index = match month {
            1..=12 => (month - 1) as usize,
            _ => return format!("{:04}-{:02}", year, month),
        };

        match self {
            MonthLabelLocale::English => format!("{} {}", ENGLISH_MONTHS[index], year),
            MonthLabelLocale::Spanish => format!("{} de {}", SPANISH_MONTHS[index], year),
        }
    }

    pub fn label_for_date(&self, date: NaiveDate) -> String {
        self.month_label(date.year(), date.month())
    }
}
