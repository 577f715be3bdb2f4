use crate::format::DateFormatter;
use crate::models::{ChartPoint, DayGroup, PainRecord, PainStats, StatsResponse};
use chrono::NaiveDate;
use std::collections::HashMap;

pub fn build_stats(records: &[PainRecord], fmt: &dyn DateFormatter) -> StatsResponse {
    StatsResponse {
        stats: compute_stats(records),
        series: build_chronological_series(records, fmt),
        days: group_by_day(records, fmt),
    }
}

/// Partitions records by local calendar day. Days come out in the order their
/// first record appears; records keep their relative order inside a day.
pub fn group_by_day(records: &[PainRecord], fmt: &dyn DateFormatter) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for record in records {
        let day = fmt.local_date(record.timestamp);
        let slot = *index.entry(day).or_insert_with(|| {
            groups.push(DayGroup {
                label: fmt.day_label(record.timestamp),
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].records.push(record.clone());
    }

    groups
}

/// `None` when there is nothing to summarise.
pub fn compute_stats(records: &[PainRecord]) -> Option<PainStats> {
    let first = records.first()?;

    let mut sum = 0u64;
    let mut max = first.score;
    let mut min = first.score;
    let mut range_start = first.timestamp;
    let mut range_end = first.timestamp;

    for record in records {
        sum += u64::from(record.score);
        max = max.max(record.score);
        min = min.min(record.score);
        range_start = range_start.min(record.timestamp);
        range_end = range_end.max(record.timestamp);
    }

    Some(PainStats {
        average: rounded_mean(sum, records.len() as u64),
        max,
        min,
        count: records.len(),
        range_start,
        range_end,
    })
}

/// Mean to one decimal place, halves rounded up.
fn rounded_mean(sum: u64, count: u64) -> f64 {
    let tenths = (sum * 20 + count) / (count * 2);
    tenths as f64 / 10.0
}

/// Oldest first, whatever order the store keeps.
pub fn build_chronological_series(
    records: &[PainRecord],
    fmt: &dyn DateFormatter,
) -> Vec<ChartPoint> {
    let mut sorted: Vec<&PainRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.timestamp);

    sorted
        .into_iter()
        .map(|record| ChartPoint {
            time: fmt.chart_label(record.timestamp),
            full_date: fmt.full(record.timestamp),
            score: record.score,
            note: record.note.clone(),
        })
        .collect()
}
