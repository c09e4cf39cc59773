//! 날짜/시간 변환 헬퍼
//!
//! - 요청 문자열 → `chrono::DateTime<Utc>` (RFC 3339 또는 `YYYY-MM-DD`)
//! - MongoDB `bson::DateTime` ↔ `chrono` (밀리초 기준)
//! - 응답용 ISO-8601 문자열, 내보내기용 현지 시각 문자열

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use mongodb::bson;

use crate::core::errors::{AppError, AppResult};

/// 클라이언트가 보낸 날짜 문자열을 UTC 시각으로 해석합니다.
///
/// `2025-12-01T10:30:00Z`, `2025-12-01T10:30:00.123-03:00` 같은 RFC 3339 형식과,
/// 날짜만 있는 `2025-12-01`(UTC 자정)을 허용합니다.
pub fn parse_datetime(raw: &str) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::ValidationError(format!("Data inválida: {}", raw)))
}

pub fn to_bson(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

pub fn to_chrono(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

/// `2025-12-01T13:30:00.000Z` 형식 (밀리초, `Z` 접미사)
pub fn to_iso_string(value: bson::DateTime) -> String {
    to_chrono(value).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 내보내기용 현지 시각 문자열 `dd/mm/YYYY, HH:MM:SS`
///
/// `offset_minutes`는 UTC 기준 오프셋이며 범위를 벗어나면 UTC로 출력합니다.
pub fn format_local(value: bson::DateTime, offset_minutes: i32) -> String {
    const FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

    let utc = to_chrono(value);
    match FixedOffset::east_opt(offset_minutes * 60) {
        Some(offset) => utc.with_timezone(&offset).format(FORMAT).to_string(),
        None => utc.format(FORMAT).to_string(),
    }
}
