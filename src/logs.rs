use crate::models::LogEntry;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::warn;

/// Completion records keyed by (username, habit, date).
pub struct LogStore<'a> {
    conn: &'a Connection,
}

impl<'a> LogStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns `false` when the completion was already recorded.
    pub fn log_completion(&self, username: &str, habit: &str, date: NaiveDate) -> rusqlite::Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO habits (username, habit, date) VALUES (?1, ?2, ?3)",
            params![username, habit, date_key(date)],
        )?;
        Ok(inserted > 0)
    }

    /// Returns `false` when there was nothing to remove.
    pub fn remove_completion(&self, username: &str, habit: &str, date: NaiveDate) -> rusqlite::Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM habits WHERE username = ?1 AND habit = ?2 AND date = ?3",
            params![username, habit, date_key(date)],
        )?;
        Ok(removed > 0)
    }

    pub fn remove_all_for_habit(&self, username: &str, habit: &str) -> rusqlite::Result<usize> {
        self.conn.execute(
            "DELETE FROM habits WHERE username = ?1 AND habit = ?2",
            params![username, habit],
        )
    }

    pub fn get_all_logs(&self, username: &str) -> rusqlite::Result<Vec<LogEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT habit, date FROM habits WHERE username = ?1 ORDER BY date, rowid")?;
        let rows = stmt.query_map([username], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut logs = Vec::new();
        for row in rows {
            let (habit, raw_date) = row?;
            match parse_log_date(&raw_date) {
                Some(date) => logs.push(LogEntry {
                    username: username.to_string(),
                    habit,
                    date,
                }),
                None => warn!("skipping log for {username}/{habit} with unreadable date {raw_date:?}"),
            }
        }
        Ok(logs)
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Reads the calendar date of a stored value, ignoring any time of day.
pub fn parse_log_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
