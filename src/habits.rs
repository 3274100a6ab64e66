use crate::logs::LogStore;
use crate::models::DEFAULT_HABITS;
use rusqlite::{params, Connection, OptionalExtension};

/// Per-user list of tracked habit names.
pub struct HabitRegistry<'a> {
    conn: &'a Connection,
}

impl<'a> HabitRegistry<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Habit names in the order they were added.
    pub fn list_habits(&self, username: &str) -> rusqlite::Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT habit FROM user_habits WHERE username = ?1 ORDER BY rowid")?;
        let rows = stmt.query_map([username], |row| row.get::<_, String>(0))?;
        rows.collect()
    }

    pub fn contains(&self, username: &str, habit: &str) -> rusqlite::Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM user_habits WHERE username = ?1 AND habit = ?2",
                params![username, habit],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Returns `false` when the habit was already tracked.
    pub fn add_habit(&self, username: &str, habit: &str) -> rusqlite::Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO user_habits (username, habit) VALUES (?1, ?2)",
            params![username, habit],
        )?;
        Ok(inserted > 0)
    }

    /// Stops tracking the habit and drops its logs in the same transaction.
    /// Returns how many log rows went with it.
    pub fn remove_habit(&self, username: &str, habit: &str) -> rusqlite::Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM user_habits WHERE username = ?1 AND habit = ?2",
            params![username, habit],
        )?;
        let removed_logs = LogStore::new(&tx).remove_all_for_habit(username, habit)?;
        tx.commit()?;
        Ok(removed_logs)
    }

    /// Seeds the default habits for a user who tracks nothing yet.
    pub fn ensure_defaults(&self, username: &str) -> rusqlite::Result<bool> {
        if !self.list_habits(username)?.is_empty() {
            return Ok(false);
        }

        let tx = self.conn.unchecked_transaction()?;
        for habit in DEFAULT_HABITS {
            HabitRegistry::new(&tx).add_habit(username, habit)?;
        }
        tx.commit()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_db;
    use chrono::NaiveDate;

    #[test]
    fn adding_twice_tracks_once() {
        let conn = memory_db();
        let registry = HabitRegistry::new(&conn);

        assert!(registry.add_habit("ana", "Yoga").unwrap());
        assert!(!registry.add_habit("ana", "Yoga").unwrap());

        assert_eq!(registry.list_habits("ana").unwrap(), vec!["Yoga".to_string()]);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let conn = memory_db();
        let registry = HabitRegistry::new(&conn);
        for habit in ["Zumba", "Archery", "Meditate"] {
            registry.add_habit("ana", habit).unwrap();
        }

        assert_eq!(registry.list_habits("ana").unwrap(), vec!["Zumba", "Archery", "Meditate"]);
    }

    #[test]
    fn remove_cascades_to_logs_of_that_habit_only() {
        let conn = memory_db();
        let registry = HabitRegistry::new(&conn);
        let logs = LogStore::new(&conn);
        registry.add_habit("ana", "Read").unwrap();
        registry.add_habit("ana", "Exercise").unwrap();
        registry.add_habit("ben", "Read").unwrap();
        for d in [1, 2, 3] {
            let date = NaiveDate::from_ymd_opt(2025, 7, d).unwrap();
            logs.log_completion("ana", "Read", date).unwrap();
            logs.log_completion("ana", "Exercise", date).unwrap();
            logs.log_completion("ben", "Read", date).unwrap();
        }

        assert_eq!(registry.remove_habit("ana", "Read").unwrap(), 3);

        assert!(!registry.contains("ana", "Read").unwrap());
        let remaining = logs.get_all_logs("ana").unwrap();
        assert_eq!(remaining.len(), 3);
        assert!(remaining.iter().all(|log| log.habit == "Exercise"));
        assert_eq!(logs.get_all_logs("ben").unwrap().len(), 3);
    }

    #[test]
    fn defaults_are_seeded_only_for_empty_users() {
        let conn = memory_db();
        let registry = HabitRegistry::new(&conn);

        assert!(registry.ensure_defaults("ana").unwrap());
        assert_eq!(registry.list_habits("ana").unwrap(), DEFAULT_HABITS.to_vec());
        assert!(!registry.ensure_defaults("ana").unwrap());

        registry.add_habit("ben", "Yoga").unwrap();
        assert!(!registry.ensure_defaults("ben").unwrap());
        assert_eq!(registry.list_habits("ben").unwrap(), vec!["Yoga"]);
    }
}
