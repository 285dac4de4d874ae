use chrono::{DateTime, Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};

/// Short encouragement message. `id` is the creation time in epoch millis,
/// unique enough for a single-user local collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hope {
    pub id: i64,
    pub text: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiaryEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date: String,
}

const MONTHS_SHORT_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

const MONTHS_LONG_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// "5 Agu" — the hope-card date format.
pub fn short_display_date(at: DateTime<Local>) -> String {
    format!("{} {}", at.day(), MONTHS_SHORT_ID[at.month0() as usize])
}

/// "5 Agustus 2026, 14.30" — the diary-entry date format.
pub fn long_display_date(at: DateTime<Local>) -> String {
    format!(
        "{} {} {}, {:02}.{:02}",
        at.day(),
        MONTHS_LONG_ID[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    )
}
