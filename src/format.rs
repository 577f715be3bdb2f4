//! Date and time rendering for timestamps stored as epoch milliseconds.
//!
//! Everything user-visible that depends on a calendar goes through
//! [`DateFormatter`], so the day grouping and the report text can be pinned to
//! a fixed offset in tests.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Utc, Weekday};

pub trait DateFormatter: Send + Sync {
    /// Calendar day a timestamp falls on in the display zone.
    fn local_date(&self, timestamp: i64) -> NaiveDate;
    /// History group heading, e.g. `2026년 1월 5일 월요일`.
    fn day_label(&self, timestamp: i64) -> String;
    /// Report range date, e.g. `2026. 1. 5.`.
    fn short_date(&self, timestamp: i64) -> String;
    /// Report line date, e.g. `1/5`.
    fn month_day(&self, timestamp: i64) -> String;
    /// Chart axis label, e.g. `1. 5.`.
    fn chart_label(&self, timestamp: i64) -> String;
    /// Hour and minute, e.g. `오후 03:04`.
    fn time(&self, timestamp: i64) -> String;
    /// Full timestamp, e.g. `2026. 1. 5. 오후 3:04:05`.
    fn full(&self, timestamp: i64) -> String;
}

/// Korean (`ko-KR`) conventions at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct KoreanFormatter {
    offset: FixedOffset,
}

impl KoreanFormatter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    fn at(&self, timestamp: i64) -> DateTime<FixedOffset> {
        DateTime::<Utc>::from_timestamp_millis(timestamp)
            .unwrap_or_default()
            .with_timezone(&self.offset)
    }
}

impl DateFormatter for KoreanFormatter {
    fn local_date(&self, timestamp: i64) -> NaiveDate {
        self.at(timestamp).date_naive()
    }

    fn day_label(&self, timestamp: i64) -> String {
        let at = self.at(timestamp);
        format!(
            "{}년 {}월 {}일 {}",
            at.year(),
            at.month(),
            at.day(),
            weekday_name(at.weekday())
        )
    }

    fn short_date(&self, timestamp: i64) -> String {
        let at = self.at(timestamp);
        format!("{}. {}. {}.", at.year(), at.month(), at.day())
    }

    fn month_day(&self, timestamp: i64) -> String {
        let at = self.at(timestamp);
        format!("{}/{}", at.month(), at.day())
    }

    fn chart_label(&self, timestamp: i64) -> String {
        let at = self.at(timestamp);
        format!("{}. {}.", at.month(), at.day())
    }

    fn time(&self, timestamp: i64) -> String {
        let at = self.at(timestamp);
        let (meridiem, hour) = twelve_hour(at.hour());
        format!("{meridiem} {hour:02}:{:02}", at.minute())
    }

    fn full(&self, timestamp: i64) -> String {
        let at = self.at(timestamp);
        let (meridiem, hour) = twelve_hour(at.hour());
        format!(
            "{} {meridiem} {hour}:{:02}:{:02}",
            self.short_date(timestamp),
            at.minute(),
            at.second()
        )
    }
}

fn twelve_hour(hour: u32) -> (&'static str, u32) {
    let meridiem = if hour < 12 { "오전" } else { "오후" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    (meridiem, hour)
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seoul() -> KoreanFormatter {
        KoreanFormatter::new(FixedOffset::east_opt(9 * 3600).unwrap())
    }

    // 2026-01-05 15:04:05 +09:00 (a Monday)
    const AFTERNOON: i64 = 1_767_593_045_000;

    #[test]
    fn formats_afternoon_in_korean() {
        let fmt = seoul();
        assert_eq!(fmt.day_label(AFTERNOON), "2026년 1월 5일 월요일");
        assert_eq!(fmt.short_date(AFTERNOON), "2026. 1. 5.");
        assert_eq!(fmt.month_day(AFTERNOON), "1/5");
        assert_eq!(fmt.chart_label(AFTERNOON), "1. 5.");
        assert_eq!(fmt.time(AFTERNOON), "오후 03:04");
        assert_eq!(fmt.full(AFTERNOON), "2026. 1. 5. 오후 3:04:05");
        assert_eq!(
            fmt.local_date(AFTERNOON),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
        );
    }

    #[test]
    fn midnight_and_noon_use_twelve() {
        let fmt = seoul();
        // 2026-01-05 00:30:00 +09:00
        let midnight = AFTERNOON - (14 * 3600 + 34 * 60 + 5) * 1000;
        assert_eq!(fmt.time(midnight), "오전 12:30");
        let noon = midnight + 12 * 3600 * 1000;
        assert_eq!(fmt.time(noon), "오후 12:30");
    }

    #[test]
    fn offset_moves_day_boundary() {
        let utc = KoreanFormatter::new(FixedOffset::east_opt(0).unwrap());
        // 2026-01-05 00:30 +09:00 is still 2026-01-04 in UTC.
        let early = AFTERNOON - (14 * 3600 + 34 * 60 + 5) * 1000;
        assert_eq!(seoul().day_label(early), "2026년 1월 5일 월요일");
        assert_eq!(utc.day_label(early), "2026년 1월 4일 일요일");
    }
}
