//! 日付ユーティリティ
//!
//! 日付はすべてUTCの暦日（`NaiveDate`）として扱う。
//! タイムゾーンやサマータイムの補正を挟まないため、連続日の判定がずれない。

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

/// 保存・表示に使う日付形式
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// ISO形式以外で受け付ける日時形式
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// ISO形式以外で受け付ける日付形式
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// 今日の日付（UTC）
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 任意の文字列を暦日に正規化する
///
/// 解析できない場合は今日の日付を返す。失敗しない。
pub fn normalize(value: &str) -> NaiveDate {
    normalize_or(value, today())
}

/// 解析できない場合に `fallback` を返す `normalize`
///
/// 時刻を注入する呼び出し側はこちらを使う。
pub fn normalize_or(value: &str, fallback: NaiveDate) -> NaiveDate {
    parse_date(value).unwrap_or(fallback)
}

/// 文字列を暦日として解析
///
/// 1. `YYYY-MM-DD` で実在する日付ならそのまま
/// 2. RFC 3339 / RFC 2822（UTCに変換した日付）
/// 3. その他のよくある表記
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    lazy_static::lazy_static! {
        static ref ISO_DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    }

    if ISO_DATE_RE.is_match(value) {
        // 2024-02-30 のような存在しない日付は他の形式でも解析できないので、ここで打ち切る
        return NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok().map(|dt| dt.date()))
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
}

/// 指定日を含む週の月曜日
///
/// 日曜=0 の曜日番号から `(weekday + 6) % 7` 日戻す。
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let weekday = u64::from(date.weekday().num_days_from_sunday());
    let diff = (weekday + 6) % 7;
    date.checked_sub_days(Days::new(diff)).unwrap_or(date)
}

/// `later` が `earlier` のちょうど翌日か
pub fn is_consecutive_day(later: NaiveDate, earlier: NaiveDate) -> bool {
    earlier.succ_opt() == Some(later)
}
