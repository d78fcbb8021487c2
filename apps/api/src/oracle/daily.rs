//! Daily header for the landing page: a Japanese date label and a tagline that
//! stays fixed for the whole day.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

const TAGLINES: [&str; 5] = [
    "今日は「整える」ほど運が味方します。",
    "小さな選択が、静かに未来を形づくります。",
    "焦りより、丁寧さが良い流れを呼びます。",
    "気づきは、日常の中に隠れています。",
    "いまの自分に優しくするほど、道が開けます。",
];

#[derive(Debug, Clone, Serialize)]
pub struct DailyHeader {
    pub date: NaiveDate,
    pub date_label: String,
    pub tagline: &'static str,
}

/// `2026.10.16（金）`
pub fn date_label(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!("{}（{weekday}）", date.format("%Y.%m.%d"))
}

/// Day seed `yyyymmdd` as an integer.
fn day_seed(date: NaiveDate) -> u32 {
    date.year().unsigned_abs() * 10_000 + date.month() * 100 + date.day()
}

pub fn tagline(date: NaiveDate) -> &'static str {
    TAGLINES[day_seed(date) as usize % TAGLINES.len()]
}

pub fn daily_header(date: NaiveDate) -> DailyHeader {
    DailyHeader {
        date,
        date_label: date_label(date),
        tagline: tagline(date),
    }
}
