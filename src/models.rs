use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Habits every new user starts with.
pub const DEFAULT_HABITS: [&str; 6] = [
    "Drink 1L Water",
    "Exercise",
    "Read",
    "Meditate",
    "Work on project",
    "Sleep early",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub username: String,
    pub habit: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub label: String,
    pub month: String,
    pub count: u64,
}

/// Three months, oldest first.
pub type MonthlySummary = [MonthlyCount; 3];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitStatus {
    pub name: String,
    pub done_today: bool,
}

/// Everything the page needs, reloaded after each interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitView {
    pub username: String,
    pub date: NaiveDate,
    pub habits: Vec<HabitStatus>,
    pub completed: usize,
    pub total: usize,
    pub selected: Option<String>,
    pub summary: Option<MonthlySummary>,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user: Option<String>,
    pub habit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub user: String,
}

#[derive(Debug, Deserialize)]
pub struct AddHabitRequest {
    pub user: String,
    pub name: String,
    #[serde(default)]
    pub selected: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HabitRequest {
    pub user: String,
    pub habit: String,
    #[serde(default)]
    pub selected: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub user: String,
    pub habit: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub done: bool,
    #[serde(default)]
    pub selected: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitListResponse {
    pub habits: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogListResponse {
    pub logs: Vec<LogEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub habit: String,
    pub months: Option<MonthlySummary>,
}
