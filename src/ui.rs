use crate::errors::AppError;
use crate::models::{HabitView, MonthlySummary};
use axum::http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// Conflicts are warnings, other rejections are errors.
    pub fn from_error(err: &AppError) -> Self {
        let kind = if err.status == StatusCode::CONFLICT {
            NoticeKind::Warning
        } else {
            NoticeKind::Error
        };
        Self {
            kind,
            message: err.message.clone(),
        }
    }

    fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Warning => "warn",
            NoticeKind::Error => "error",
        }
    }
}

pub fn render_login(message: Option<&str>) -> String {
    let status = message
        .map(|message| format!(r#"<div class="status" data-type="error">{}</div>"#, escape_html(message)))
        .unwrap_or_default();
    LOGIN_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{STATUS}}", &status)
}

pub fn render_index(view: &HabitView, notice: Option<&Notice>) -> String {
    let user = escape_html(&view.username);
    let selected = view.selected.as_deref().map(escape_html).unwrap_or_default();
    let percent = if view.total > 0 {
        view.completed * 100 / view.total
    } else {
        0
    };
    let status = notice
        .map(|notice| {
            format!(
                r#"<div class="status" data-type="{}">{}</div>"#,
                notice.css_class(),
                escape_html(&notice.message)
            )
        })
        .unwrap_or_default();

    INDEX_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{STATUS}}", &status)
        .replace("{{HABITS}}", &render_habit_rows(view, &user, &selected))
        .replace("{{OPTIONS}}", &render_options(view))
        .replace("{{CHART}}", &render_chart(view))
        .replace("{{COMPLETED}}", &view.completed.to_string())
        .replace("{{TOTAL}}", &view.total.to_string())
        .replace("{{PERCENT}}", &percent.to_string())
        .replace("{{DATE}}", &view.date.to_string())
        .replace("{{SELECTED}}", &selected)
        .replace("{{USER}}", &user)
}

fn render_habit_rows(view: &HabitView, user: &str, selected: &str) -> String {
    if view.habits.is_empty() {
        return r#"<p class="hint">No habits tracked yet. Add one below.</p>"#.to_string();
    }

    view.habits
        .iter()
        .map(|habit| {
            let name = escape_html(&habit.name);
            let checked = if habit.done_today { " checked" } else { "" };
            format!(
                r#"<div class="habit-row">
          <form method="post" action="/toggle" class="habit-check">
            <input type="hidden" name="user" value="{user}" />
            <input type="hidden" name="habit" value="{name}" />
            <input type="hidden" name="done" value="{done}" />
            <input type="hidden" name="selected" value="{selected}" />
            <label><input type="checkbox"{checked} onchange="this.form.submit()" /> {icon} {name}</label>
          </form>
          <form method="post" action="/habits/delete">
            <input type="hidden" name="user" value="{user}" />
            <input type="hidden" name="habit" value="{name}" />
            <input type="hidden" name="selected" value="{selected}" />
            <button class="btn-delete" type="submit">Delete</button>
          </form>
        </div>"#,
                done = !habit.done_today,
                icon = habit_icon(&habit.name),
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn render_options(view: &HabitView) -> String {
    view.habits
        .iter()
        .map(|habit| {
            let selected = if view.selected.as_deref() == Some(habit.name.as_str()) {
                " selected"
            } else {
                ""
            };
            let name = escape_html(&habit.name);
            format!(r#"<option value="{name}"{selected}>{name}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("")
}

fn render_chart(view: &HabitView) -> String {
    match &view.summary {
        Some(summary) => render_bars(summary),
        None => r#"<p class="hint">No data available for this habit yet.</p>"#.to_string(),
    }
}

/// Bars are drawn in the order given, oldest month on the left.
fn render_bars(summary: &MonthlySummary) -> String {
    const WIDTH: u64 = 600;
    const HEIGHT: u64 = 240;
    const BASELINE: u64 = 200;
    const BAR_WIDTH: u64 = 120;

    let max = summary.iter().map(|month| month.count).max().unwrap_or(0).max(1);
    let slot = WIDTH / summary.len() as u64;
    let bars: String = summary
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let height = month.count * (BASELINE - 30) / max;
            let x = slot * index as u64 + (slot - BAR_WIDTH) / 2;
            let center = x + BAR_WIDTH / 2;
            format!(
                r#"<rect class="chart-bar" x="{x}" y="{y}" width="{BAR_WIDTH}" height="{height}" rx="8" />
          <text class="chart-value" x="{center}" y="{value_y}" text-anchor="middle">{count}</text>
          <text class="chart-label" x="{center}" y="{label_y}" text-anchor="middle">{label}</text>"#,
                y = BASELINE - height,
                value_y = BASELINE - height - 8,
                label_y = BASELINE + 22,
                count = month.count,
                label = escape_html(&month.label),
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ");

    format!(
        r#"<svg id="chart" viewBox="0 0 {WIDTH} {HEIGHT}" aria-label="Monthly completions" role="img">
          <line class="chart-axis" x1="0" y1="{BASELINE}" x2="{WIDTH}" y2="{BASELINE}" />
          {bars}
        </svg>"#
    )
}

fn habit_icon(habit: &str) -> &'static str {
    match habit {
        "Exercise" => "🏃",
        "Read" => "📚",
        "Meditate" => "🧘",
        "Work on project" => "💻",
        "Sleep early" => "🌙",
        "Drink 1L Water" => "💧",
        _ => "✅",
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            // keeps user text from matching a template placeholder
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const STYLE: &str = r#"
    :root {
      --bg: #eef4ef;
      --ink: #22302a;
      --accent: #2c6e49;
      --accent-soft: rgba(44, 110, 73, 0.12);
      --danger: #b5432f;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 20px 50px rgba(34, 48, 42, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #dcebe0 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      text-align: center;
      color: var(--accent);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
    }

    .habit-row {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 10px 0;
      border-bottom: 1px solid var(--accent-soft);
      font-size: 1.1rem;
    }

    .progress {
      text-align: center;
      font-weight: 600;
      color: var(--accent);
      display: grid;
      gap: 10px;
    }

    progress {
      width: 100%;
      height: 14px;
      accent-color: var(--accent);
    }

    input[type="text"], select {
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid var(--accent-soft);
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    .btn-delete {
      background: transparent;
      color: var(--danger);
      border: 1px solid var(--danger);
    }

    .inline {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    #chart {
      width: 100%;
      height: 240px;
      display: block;
    }

    .chart-bar {
      fill: var(--accent);
    }

    .chart-axis {
      stroke: rgba(34, 48, 42, 0.25);
    }

    .chart-label, .chart-value {
      fill: #5d6b63;
      font-size: 13px;
    }

    .status {
      padding: 10px 14px;
      border-radius: 12px;
      background: var(--accent-soft);
    }

    .status[data-type="error"] {
      color: #c63b2b;
      background: rgba(198, 59, 43, 0.1);
    }

    .status[data-type="warn"] {
      color: #8a6100;
      background: rgba(224, 168, 0, 0.15);
    }

    .status[data-type="ok"] {
      color: var(--accent);
    }

    .hint {
      margin: 0;
      color: #6b756f;
      font-size: 0.9rem;
    }
"#;

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <h1>My Habit Tracker</h1>
    {{STATUS}}
    <form class="inline" method="get" action="/session">
      <input type="text" name="user" placeholder="Enter your username" autofocus />
      <button type="submit">Start</button>
    </form>
  </main>
</body>
</html>
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>My Habit Tracker</h1>
      <p class="hint">Welcome, {{USER}}! Today is {{DATE}}.</p>
    </header>

    {{STATUS}}

    <section>
      {{HABITS}}
    </section>

    <section class="progress">
      <span id="progress">Daily Completion: {{COMPLETED}} / {{TOTAL}} habits</span>
      <progress max="100" value="{{PERCENT}}"></progress>
    </section>

    <section>
      <h2>Add a New Habit</h2>
      <form class="inline" method="post" action="/habits/add">
        <input type="hidden" name="user" value="{{USER}}" />
        <input type="hidden" name="selected" value="{{SELECTED}}" />
        <input type="text" name="name" placeholder="New habit name" />
        <button type="submit">Add Habit</button>
      </form>
    </section>

    <section>
      <h2>Last 3 Months Habit Completions</h2>
      <form class="inline" method="get" action="/">
        <input type="hidden" name="user" value="{{USER}}" />
        <select name="habit" onchange="this.form.submit()">{{OPTIONS}}</select>
      </form>
      {{CHART}}
    </section>

    <form method="get" action="/">
      <button class="btn-delete" type="submit">Switch user</button>
    </form>
  </main>
</body>
</html>
"#;
