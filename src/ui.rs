use crate::format::DateFormatter;
use crate::models::{pain_level, ChartPoint, PainRecord, DEFAULT_SCORE, PAIN_LEVELS};
use crate::report::{generate_text_report, ATTRIBUTION, SHARE_TITLE};
use crate::stats::{build_chronological_series, compute_stats, group_by_day};
use crate::store::DELETE_PROMPT;
use crate::view::Tab;
use std::fmt::Write;

pub struct PageContext<'a> {
    pub tab: Tab,
    pub records: &'a [PainRecord],
    /// Show the transient "saved" confirmation on the tracker.
    pub saved: bool,
}

pub fn render_page(context: &PageContext<'_>, fmt: &dyn DateFormatter) -> String {
    let content = match context.tab {
        Tab::Tracker => render_tracker(context.records.first(), context.saved, fmt),
        Tab::History => render_history(context.records, fmt),
        Tab::Report => render_report(context.records, fmt),
    };

    PAGE_HTML
        .replace("{{TITLE}}", context.tab.title())
        .replace("{{NAV}}", &render_nav(context.tab))
        .replace("{{CONTENT}}", &content)
}

fn render_nav(active: Tab) -> String {
    let mut nav = String::new();
    for tab in Tab::ALL {
        let class = if tab == active { "tab active" } else { "tab" };
        let _ = write!(
            nav,
            r#"<a class="{class}" href="/?tab={}">{}</a>"#,
            tab.as_str(),
            tab.title()
        );
    }
    nav
}

fn render_tracker(latest: Option<&PainRecord>, saved: bool, fmt: &dyn DateFormatter) -> String {
    let mut html = String::new();

    if let Some(record) = latest {
        let _ = write!(
            html,
            r#"<p class="last-record">마지막 기록: {} (통증 {}점)</p>"#,
            fmt.time(record.timestamp),
            record.score
        );
    }

    let level = pain_level(DEFAULT_SCORE).unwrap_or(&PAIN_LEVELS[0]);
    let levels = serde_json::to_string(&PAIN_LEVELS).unwrap_or_else(|_| "[]".to_string());
    let button = if saved {
        r#"<button type="submit" class="save done">저장했어요! ✨</button>"#
    } else {
        r#"<button type="submit" class="save">기록 저장하기</button>"#
    };

    let _ = write!(
        html,
        r#"<form method="post" action="/records" class="tracker">
  <div class="level-card" id="level-card" style="background:{background};color:{text}">
    <div class="score-badge"><span id="score-value">{score}</span> 점</div>
    <div class="face" id="level-emoji">{emoji}</div>
    <h2 id="level-label">"{label}"</h2>
    <input type="range" name="score" id="score" min="1" max="10" step="1" value="{score}" />
    <div class="scale"><span>하나도 안 아픔 (1)</span><span>너무 아파요 (10)</span></div>
  </div>
  <label class="note-card" for="note">특이사항 메모 (선택)
    <textarea id="note" name="note" placeholder="예: 진통제 먹고 30분 뒤, 운동하고 나서 등..."></textarea>
  </label>
  {button}
</form>
<script>
  const levels = {levels};
  const slider = document.getElementById('score');
  slider.addEventListener('input', () => {{
    const level = levels[Number(slider.value) - 1];
    const card = document.getElementById('level-card');
    card.style.background = level.background;
    card.style.color = level.text_color;
    document.getElementById('score-value').textContent = level.score;
    document.getElementById('level-emoji').textContent = level.emoji;
    document.getElementById('level-label').textContent = '"' + level.label + '"';
  }});
</script>"#,
        background = level.background,
        text = level.text_color,
        score = level.score,
        emoji = level.emoji,
        label = level.label,
    );

    html
}

fn render_history(records: &[PainRecord], fmt: &dyn DateFormatter) -> String {
    if records.is_empty() {
        return r#"<div class="empty"><p class="strong">아직 기록이 없어요</p><p>첫 번째 통증 기록을 남겨보세요!</p></div>"#
            .to_string();
    }

    let prompt = escape_html(DELETE_PROMPT);
    let mut html = String::new();
    for group in group_by_day(records, fmt) {
        let _ = write!(
            html,
            r#"<section class="day"><h3>{}</h3>"#,
            escape_html(&group.label)
        );
        for record in &group.records {
            let Some(level) = pain_level(record.score) else {
                continue;
            };
            let note = if record.note.is_empty() {
                r#"<p class="note muted">메모 없음</p>"#.to_string()
            } else {
                format!(r#"<p class="note">{}</p>"#, escape_html(&record.note))
            };
            let _ = write!(
                html,
                r#"<article class="entry">
  <div class="face small" style="background:{background}">{emoji}</div>
  <div class="body">
    <div class="title">{label} <span class="chip" style="background:{background};color:{text}">{score}점</span></div>
    <div class="time">{time}</div>
    {note}
  </div>
  <form method="post" action="/records/{id}/delete" onsubmit="this.confirmed.value = confirm('{prompt}') ? 'true' : 'false'; return this.confirmed.value === 'true';">
    <input type="hidden" name="confirmed" value="false" />
    <button type="submit" class="delete" aria-label="삭제">✕</button>
  </form>
</article>"#,
                background = level.background,
                text = level.text_color,
                emoji = level.emoji,
                label = level.label,
                score = record.score,
                time = fmt.time(record.timestamp),
                id = escape_html(&record.id),
            );
        }
        html.push_str("</section>");
    }
    html
}

fn render_report(records: &[PainRecord], fmt: &dyn DateFormatter) -> String {
    let Some(stats) = compute_stats(records) else {
        return r#"<div class="empty"><p class="strong">데이터가 부족해요</p><p>기록을 먼저 남겨주세요.</p></div>"#
            .to_string();
    };

    let chart = render_chart(&build_chronological_series(records, fmt));
    let report = escape_html(&generate_text_report(records, fmt));

    format!(
        r#"<section class="card"><h3>통증 변화 그래프</h3>{chart}</section>
<div class="stats">
  <div class="stat avg"><span class="label">평균 통증</span><span class="value">{avg:.1}</span></div>
  <div class="stat max"><span class="label">최대 통증</span><span class="value">{max}</span></div>
  <div class="stat min"><span class="label">최소 통증</span><span class="value">{min}</span></div>
</div>
<section class="card dark">
  <h3>진료실용 요약</h3>
  <p class="hint">의사 선생님께 이 화면을 보여주거나 공유하세요.</p>
  <pre id="report-text">{report}</pre>
  <div class="actions">
    <button type="button" id="copy-btn">복사</button>
    <button type="button" id="share-btn" class="primary">공유하기</button>
  </div>
</section>
<p class="attribution">{ATTRIBUTION}</p>
<script>
  const reportText = () => document.getElementById('report-text').textContent;
  const copyButton = document.getElementById('copy-btn');
  const copyReport = async () => {{
    await navigator.clipboard.writeText(reportText());
    copyButton.textContent = '복사됨';
    setTimeout(() => {{ copyButton.textContent = '복사'; }}, 2000);
  }};
  copyButton.addEventListener('click', () => copyReport().catch(console.error));
  document.getElementById('share-btn').addEventListener('click', async () => {{
    const shareData = {{ title: '{SHARE_TITLE}', text: reportText() }};
    if (navigator.share && navigator.canShare && navigator.canShare(shareData)) {{
      try {{
        await navigator.share(shareData);
      }} catch (err) {{
        console.error('Share failed:', err);
      }}
    }} else {{
      copyReport().catch(console.error);
      alert('공유하기를 지원하지 않는 브라우저입니다. 클립보드에 복사되었습니다.');
    }}
  }});
</script>"#,
        avg = stats.average,
        max = stats.max,
        min = stats.min,
    )
}

fn render_chart(series: &[ChartPoint]) -> String {
    const WIDTH: f64 = 320.0;
    const HEIGHT: f64 = 200.0;
    const PAD: f64 = 24.0;

    let y = |score: f64| HEIGHT - PAD - score / 10.0 * (HEIGHT - 2.0 * PAD);
    let step = if series.len() > 1 {
        (WIDTH - 2.0 * PAD) / (series.len() - 1) as f64
    } else {
        0.0
    };
    let x = |index: usize| {
        if series.len() > 1 {
            PAD + index as f64 * step
        } else {
            WIDTH / 2.0
        }
    };

    let mut svg = format!(
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img">
<line class="reference" x1="{PAD}" x2="{x2}" y1="{ref_y:.1}" y2="{ref_y:.1}" />"#,
        x2 = WIDTH - PAD,
        ref_y = y(5.0),
    );

    for tick in [0u8, 2, 4, 6, 8, 10] {
        let _ = write!(
            svg,
            r#"<text class="axis" x="4" y="{:.1}">{tick}</text>"#,
            y(f64::from(tick)) + 4.0
        );
    }

    let points = series
        .iter()
        .enumerate()
        .map(|(index, point)| format!("{:.1},{:.1}", x(index), y(f64::from(point.score))))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(svg, r#"<polyline class="line" points="{points}" />"#);

    for (index, point) in series.iter().enumerate() {
        let mut tooltip = format!("{} · 통증 {}", point.full_date, point.score);
        if !point.note.is_empty() {
            tooltip.push_str(" · ");
            tooltip.push_str(&point.note);
        }
        let _ = write!(
            svg,
            r#"<circle class="dot" cx="{:.1}" cy="{:.1}" r="4"><title>{}</title></circle>"#,
            x(index),
            y(f64::from(point.score)),
            escape_html(&tooltip)
        );
    }

    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        let _ = write!(
            svg,
            r#"<text class="axis" x="{PAD}" y="{bottom}">{}</text><text class="axis end" x="{right}" y="{bottom}">{}</text>"#,
            escape_html(&first.time),
            escape_html(&last.time),
            bottom = HEIGHT - 4.0,
            right = WIDTH - PAD,
        );
    }

    svg.push_str("</svg>");
    svg
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>아야로그 · {{TITLE}}</title>
  <style>
    :root {
      --bg: #fffbeb;
      --ink: #1f2937;
      --muted: #9ca3af;
      --accent: #f59e0b;
      --card: #ffffff;
      --line: #fde68a;
      --shadow: 0 12px 32px rgba(31, 41, 55, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Pretendard", "Apple SD Gothic Neo", "Noto Sans KR", sans-serif;
    }

    .app {
      max-width: 32rem;
      margin: 0 auto;
      min-height: 100vh;
      display: flex;
      flex-direction: column;
      box-shadow: var(--shadow);
    }

    header {
      background: var(--card);
      padding: 16px 24px;
      border-bottom: 1px solid var(--line);
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    header h1 {
      margin: 0;
      font-size: 1.5rem;
    }

    header h1 span {
      color: var(--accent);
    }

    header .badge {
      font-size: 0.75rem;
      font-weight: 700;
      color: var(--muted);
      background: #f3f4f6;
      border-radius: 999px;
      padding: 4px 12px;
    }

    main {
      flex: 1;
      padding: 16px;
      display: grid;
      gap: 20px;
      align-content: start;
    }

    nav {
      display: flex;
      background: var(--card);
      border-top: 1px solid var(--line);
    }

    .tab {
      flex: 1;
      text-align: center;
      padding: 14px 0;
      font-size: 0.8rem;
      font-weight: 700;
      color: var(--muted);
      text-decoration: none;
    }

    .tab.active {
      color: #d97706;
      background: rgba(255, 251, 235, 0.6);
    }

    .last-record {
      text-align: center;
      font-size: 0.75rem;
      color: #6b7280;
      margin: 0;
    }

    .tracker {
      display: grid;
      gap: 20px;
    }

    .level-card {
      position: relative;
      border-radius: 24px;
      padding: 32px;
      min-height: 340px;
      display: grid;
      justify-items: center;
      align-content: center;
      gap: 12px;
      box-shadow: var(--shadow);
      transition: background 400ms ease;
    }

    .score-badge {
      position: absolute;
      top: 20px;
      right: 20px;
      background: rgba(255, 255, 255, 0.25);
      border-radius: 16px;
      padding: 4px 12px;
      font-weight: 700;
      font-size: 1.25rem;
    }

    .face {
      font-size: 140px;
      line-height: 1;
    }

    .face.small {
      font-size: 2rem;
      width: 56px;
      height: 56px;
      border-radius: 16px;
      display: grid;
      place-items: center;
      flex-shrink: 0;
    }

    .level-card input[type="range"] {
      width: 100%;
    }

    .scale {
      width: 100%;
      display: flex;
      justify-content: space-between;
      font-size: 0.75rem;
      font-weight: 700;
      opacity: 0.8;
    }

    .note-card,
    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 24px;
      padding: 20px;
      display: grid;
      gap: 8px;
      font-weight: 700;
    }

    textarea {
      min-height: 96px;
      border-radius: 12px;
      border: 1px solid #e5e7eb;
      padding: 12px;
      font: inherit;
      font-weight: 400;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 16px;
      padding: 14px 20px;
      font: inherit;
      font-weight: 700;
      cursor: pointer;
    }

    .save {
      background: var(--ink);
      color: white;
      font-size: 1.2rem;
    }

    .save.done {
      background: #22c55e;
    }

    .day h3 {
      font-size: 0.875rem;
      color: #6b7280;
      margin: 0 0 12px 8px;
    }

    .entry {
      display: flex;
      gap: 16px;
      align-items: flex-start;
      background: var(--card);
      border-radius: 20px;
      padding: 16px;
      margin-bottom: 12px;
    }

    .entry .body {
      flex: 1;
      min-width: 0;
    }

    .entry .title {
      font-weight: 700;
      font-size: 1.1rem;
    }

    .chip {
      font-size: 0.75rem;
      border-radius: 999px;
      padding: 2px 8px;
    }

    .time {
      font-size: 0.75rem;
      color: var(--muted);
      margin: 4px 0 8px;
    }

    .note {
      background: #f9fafb;
      border-radius: 12px;
      padding: 12px;
      font-size: 0.875rem;
      margin: 0;
      overflow-wrap: anywhere;
      white-space: pre-wrap;
    }

    .note.muted {
      background: none;
      padding: 0;
      color: #d1d5db;
      font-style: italic;
    }

    .delete {
      background: none;
      color: #d1d5db;
      padding: 8px;
    }

    .empty {
      text-align: center;
      color: var(--muted);
      padding: 96px 0;
    }

    .empty .strong {
      font-weight: 700;
      font-size: 1.1rem;
      color: #6b7280;
    }

    .chart {
      width: 100%;
      height: auto;
    }

    .chart .reference {
      stroke: #e5e7eb;
      stroke-dasharray: 3 3;
    }

    .chart .line {
      fill: none;
      stroke: #3b82f6;
      stroke-width: 3;
    }

    .chart .dot {
      fill: #3b82f6;
      stroke: white;
      stroke-width: 2;
    }

    .chart .axis {
      fill: var(--muted);
      font-size: 10px;
    }

    .chart .axis.end {
      text-anchor: end;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
    }

    .stat {
      border-radius: 16px;
      padding: 16px;
      text-align: center;
      display: grid;
      gap: 4px;
    }

    .stat .label {
      font-size: 0.75rem;
      font-weight: 700;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 700;
    }

    .stat.avg {
      background: #eff6ff;
      color: #1e3a8a;
    }

    .stat.max {
      background: #fef2f2;
      color: #7f1d1d;
    }

    .stat.min {
      background: #f0fdf4;
      color: #14532d;
    }

    .card.dark {
      background: #1f2937;
      color: white;
      border: none;
    }

    .card.dark .hint {
      margin: 0;
      font-size: 0.75rem;
      font-weight: 400;
      color: var(--muted);
    }

    pre {
      background: rgba(55, 65, 81, 0.5);
      border: 1px solid #4b5563;
      border-radius: 12px;
      padding: 16px;
      font-size: 0.75rem;
      font-weight: 400;
      color: #d1d5db;
      white-space: pre-wrap;
      max-height: 20rem;
      overflow-y: auto;
    }

    .actions {
      display: flex;
      gap: 12px;
    }

    .actions button {
      flex: 1;
      background: #374151;
      color: #e5e7eb;
    }

    .actions button.primary {
      flex: 1.5;
      background: white;
      color: #111827;
    }

    .attribution {
      text-align: center;
      font-family: monospace;
      font-size: 0.75rem;
      color: var(--muted);
    }
  </style>
</head>
<body>
  <div class="app">
    <header>
      <h1>아야<span>로그</span></h1>
      <div class="badge">통증 기록기</div>
    </header>
    <main>
{{CONTENT}}
    </main>
    <nav>{{NAV}}</nav>
  </div>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::KoreanFormatter;
    use chrono::FixedOffset;

    // 2026-01-05 09:00 +09:00
    const MONDAY_9AM: i64 = 1_767_571_200_000;

    fn seoul() -> KoreanFormatter {
        KoreanFormatter::new(FixedOffset::east_opt(9 * 3600).unwrap())
    }

    fn records() -> Vec<PainRecord> {
        vec![
            PainRecord {
                id: "b".to_string(),
                timestamp: MONDAY_9AM + 3_600_000,
                score: 8,
                note: "<b>after</b> medication".to_string(),
            },
            PainRecord {
                id: "a".to_string(),
                timestamp: MONDAY_9AM,
                score: 4,
                note: String::new(),
            },
        ]
    }

    fn page(tab: Tab, records: &[PainRecord]) -> String {
        let context = PageContext {
            tab,
            records,
            saved: false,
        };
        render_page(&context, &seoul())
    }

    #[test]
    fn tracker_shows_last_record() {
        let html = page(Tab::Tracker, &records());
        assert!(html.contains("마지막 기록: 오전 10:00 (통증 8점)"));
        assert!(html.contains(r#"class="tab active" href="/?tab=tracker""#));
        assert!(!html.contains("{{CONTENT}}"));
    }

    #[test]
    fn history_escapes_notes_and_marks_empty_ones() {
        let html = page(Tab::History, &records());
        assert!(html.contains("2026년 1월 5일 월요일"));
        assert!(html.contains("&lt;b&gt;after&lt;/b&gt; medication"));
        assert!(!html.contains("<b>after</b>"));
        assert!(html.contains("메모 없음"));
        assert!(html.contains(r#"action="/records/a/delete""#));
    }

    #[test]
    fn delete_form_only_confirms_through_prompt() {
        let html = page(Tab::History, &records());
        assert!(html.contains(r#"name="confirmed" value="false""#));
        assert!(!html.contains(r#"name="confirmed" value="true""#));
        assert!(html.contains("confirm('정말 이 기록을 지울까요?')"));
    }

    #[test]
    fn empty_views_show_placeholders() {
        assert!(page(Tab::History, &[]).contains("아직 기록이 없어요"));
        assert!(page(Tab::Report, &[]).contains("데이터가 부족해요"));
    }

    #[test]
    fn report_view_embeds_report_text() {
        let html = page(Tab::Report, &records());
        assert!(html.contains("통증 8 \n   └ 📝 &lt;b&gt;after&lt;/b&gt; medication"));
        assert!(html.contains(r#"<span class="value">6.0</span>"#));
        assert!(html.contains("<polyline"));
    }

    #[test]
    fn escape_html_handles_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
