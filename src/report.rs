use crate::format::DateFormatter;
use crate::models::PainRecord;
use crate::stats::compute_stats;

pub const REPORT_TITLE: &str = "[아야로그 - 통증 리포트]";
pub const SHARE_TITLE: &str = "아야로그 통증 리포트";
pub const ATTRIBUTION: &str = "@acedoctor2026";
pub const EMPTY_REPORT: &str = "기록이 없습니다.";

/// Plain-text summary handed verbatim to copy/share. Depends only on
/// `records` and the formatter, never on the current time.
pub fn generate_text_report(records: &[PainRecord], fmt: &dyn DateFormatter) -> String {
    let Some(stats) = compute_stats(records) else {
        return EMPTY_REPORT.to_string();
    };

    let mut sorted: Vec<&PainRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let detailed = sorted
        .into_iter()
        .map(|record| report_line(record, fmt))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{REPORT_TITLE}\n\
         기간: {start} ~ {end}\n\
         총 기록: {count}회\n\
         \n\
         [통계 요약]\n\
         - 평균: {avg:.1} / 최대: {max} / 최소: {min}\n\
         \n\
         [상세 기록]\n\
         {detailed}\n\
         \n\
         {ATTRIBUTION}",
        start = fmt.short_date(stats.range_start),
        end = fmt.short_date(stats.range_end),
        count = stats.count,
        avg = stats.average,
        max = stats.max,
        min = stats.min,
    )
}

fn report_line(record: &PainRecord, fmt: &dyn DateFormatter) -> String {
    let mut line = format!(
        "- {} {} | 통증 {}",
        fmt.month_day(record.timestamp),
        fmt.time(record.timestamp),
        record.score
    );
    if !record.note.is_empty() {
        line.push_str(" \n   └ 📝 ");
        line.push_str(&record.note);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::KoreanFormatter;
    use chrono::FixedOffset;

    // 2026-01-05 09:00 +09:00
    const MONDAY_9AM: i64 = 1_767_571_200_000;
    const HOUR: i64 = 3_600_000;

    fn seoul() -> KoreanFormatter {
        KoreanFormatter::new(FixedOffset::east_opt(9 * 3600).unwrap())
    }

    fn record(id: &str, timestamp: i64, score: u8, note: &str) -> PainRecord {
        PainRecord {
            id: id.to_string(),
            timestamp,
            score,
            note: note.to_string(),
        }
    }

    #[test]
    fn empty_collection_reports_no_records() {
        assert_eq!(generate_text_report(&[], &seoul()), "기록이 없습니다.");
    }

    #[test]
    fn report_matches_expected_layout() {
        let records = vec![
            record("b", MONDAY_9AM + 30 * HOUR, 8, "after medication"),
            record("a", MONDAY_9AM + 6 * HOUR, 4, ""),
        ];
        let expected = "[아야로그 - 통증 리포트]\n\
                        기간: 2026. 1. 5. ~ 2026. 1. 6.\n\
                        총 기록: 2회\n\
                        \n\
                        [통계 요약]\n\
                        - 평균: 6.0 / 최대: 8 / 최소: 4\n\
                        \n\
                        [상세 기록]\n\
                        - 1/6 오후 03:00 | 통증 8 \n   └ 📝 after medication\n\
                        - 1/5 오후 03:00 | 통증 4\n\
                        \n\
                        @acedoctor2026";
        assert_eq!(generate_text_report(&records, &seoul()), expected);
    }

    #[test]
    fn report_sorts_newest_first_regardless_of_input_order() {
        let records = vec![
            record("a", MONDAY_9AM, 2, ""),
            record("b", MONDAY_9AM + HOUR, 9, ""),
        ];
        let report = generate_text_report(&records, &seoul());
        let nine = report.find("통증 9").unwrap();
        let two = report.find("통증 2").unwrap();
        assert!(nine < two);
    }

    #[test]
    fn report_is_deterministic() {
        let records = vec![
            record("b", MONDAY_9AM + HOUR, 7, "x"),
            record("a", MONDAY_9AM, 3, ""),
        ];
        let fmt = seoul();
        assert_eq!(
            generate_text_report(&records, &fmt),
            generate_text_report(&records, &fmt)
        );
    }
}
