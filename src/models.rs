use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;
pub const DEFAULT_SCORE: u8 = 3;

/// One logged pain observation. Records are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainRecord {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub score: u8,
    pub note: String,
}

pub fn is_valid_score(score: u8) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PainLevelConfig {
    pub score: u8,
    pub emoji: &'static str,
    pub label: &'static str,
    pub background: &'static str,
    pub text_color: &'static str,
}

pub static PAIN_LEVELS: [PainLevelConfig; 10] = [
    level(1, "😆", "평화로움", "#34d399", "#064e3b"),
    level(2, "🙂", "거슬리지 않음", "#6ee7b7", "#064e3b"),
    level(3, "😐", "살짝 뻐근", "#bef264", "#365314"),
    level(4, "😕", "신경 쓰임", "#fde047", "#713f12"),
    level(5, "😣", "꽤 아픔", "#fcd34d", "#78350f"),
    level(6, "😖", "진통제 필요", "#fbbf24", "#78350f"),
    level(7, "😫", "너무 아파요", "#fb923c", "#7c2d12"),
    level(8, "😭", "못 참겠음", "#f97316", "#7c2d12"),
    level(9, "😱", "응급실각", "#ef4444", "#ffffff"),
    level(10, "🤯", "기절초풍", "#dc2626", "#ffffff"),
];

const fn level(
    score: u8,
    emoji: &'static str,
    label: &'static str,
    background: &'static str,
    text_color: &'static str,
) -> PainLevelConfig {
    PainLevelConfig {
        score,
        emoji,
        label,
        background,
        text_color,
    }
}

pub fn pain_level(score: u8) -> Option<&'static PainLevelConfig> {
    if is_valid_score(score) {
        PAIN_LEVELS.get(usize::from(score - MIN_SCORE))
    } else {
        None
    }
}

#[derive(Debug, Deserialize)]
pub struct AddRecordRequest {
    pub score: u8,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRecordRequest {
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordsResponse {
    pub version: u64,
    pub records: Vec<PainRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainStats {
    pub average: f64,
    pub max: u8,
    pub min: u8,
    pub count: usize,
    pub range_start: i64,
    pub range_end: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    pub label: String,
    pub records: Vec<PainRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: String,
    pub full_date: String,
    pub score: u8,
    pub note: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub stats: Option<PainStats>,
    pub series: Vec<ChartPoint>,
    pub days: Vec<DayGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pain_levels_cover_every_score() {
        for score in MIN_SCORE..=MAX_SCORE {
            let config = pain_level(score).expect("missing level");
            assert_eq!(config.score, score);
        }
        assert!(pain_level(0).is_none());
        assert!(pain_level(11).is_none());
    }

    #[test]
    fn record_uses_storage_field_names() {
        let json = r#"{"id":"a","timestamp":1700000000000,"score":4,"note":""}"#;
        let record: PainRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.score, 4);
        assert_eq!(serde_json::to_string(&record).unwrap(), json);
    }
}
