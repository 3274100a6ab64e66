//! User actions. Each one performs a single mutation; callers then reload the
//! view with [`load_view`] before rendering.

use crate::errors::AppError;
use crate::habits::HabitRegistry;
use crate::logs::LogStore;
use crate::models::{HabitStatus, HabitView};
use crate::session::Session;
use crate::stats::monthly_summary_at;
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::info;

/// Seeds the default habits on first login, then loads the view.
pub fn start_session(conn: &Connection, session: &Session) -> Result<HabitView, AppError> {
    if HabitRegistry::new(conn).ensure_defaults(&session.username)? {
        info!("seeded default habits for {}", session.username);
    }
    load_view(conn, session, None)
}

pub fn load_view(conn: &Connection, session: &Session, selected: Option<&str>) -> Result<HabitView, AppError> {
    let habits = HabitRegistry::new(conn).list_habits(&session.username)?;
    let logs = LogStore::new(conn).get_all_logs(&session.username)?;

    let statuses: Vec<HabitStatus> = habits
        .iter()
        .map(|name| HabitStatus {
            done_today: logs
                .iter()
                .any(|log| log.habit == *name && log.date == session.today),
            name: name.clone(),
        })
        .collect();
    let completed = statuses.iter().filter(|habit| habit.done_today).count();

    let selected = selected
        .map(str::trim)
        .filter(|wanted| habits.iter().any(|habit| habit.as_str() == *wanted))
        .map(str::to_string)
        .or_else(|| habits.first().cloned());
    let summary = selected
        .as_deref()
        .and_then(|habit| monthly_summary_at(session.today, &logs, habit));

    Ok(HabitView {
        username: session.username.clone(),
        date: session.today,
        total: statuses.len(),
        habits: statuses,
        completed,
        selected,
        summary,
    })
}

/// Marks `habit` done or not done on `date`. Repeating the same request
/// changes nothing.
pub fn set_completion(
    conn: &Connection,
    session: &Session,
    habit: &str,
    date: NaiveDate,
    done: bool,
) -> Result<(), AppError> {
    require_tracked(conn, session, habit)?;

    let logs = LogStore::new(conn);
    let changed = if done {
        logs.log_completion(&session.username, habit, date)?
    } else {
        logs.remove_completion(&session.username, habit, date)?
    };
    if changed {
        info!("{} marked {habit} {} on {date}", session.username, if done { "done" } else { "not done" });
    }
    Ok(())
}

/// Starts tracking a new habit and returns its cleaned-up name.
pub fn add_habit(conn: &Connection, session: &Session, raw_name: &str) -> Result<String, AppError> {
    let name = raw_name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Please enter a valid habit name"));
    }

    if !HabitRegistry::new(conn).add_habit(&session.username, name)? {
        return Err(AppError::conflict(format!("Habit '{name}' already exists")));
    }
    info!("{} added habit {name}", session.username);
    Ok(name.to_string())
}

pub fn remove_habit(conn: &Connection, session: &Session, habit: &str) -> Result<(), AppError> {
    require_tracked(conn, session, habit)?;

    let removed_logs = HabitRegistry::new(conn).remove_habit(&session.username, habit)?;
    info!("{} removed habit {habit} and {removed_logs} logs", session.username);
    Ok(())
}

fn require_tracked(conn: &Connection, session: &Session, habit: &str) -> Result<(), AppError> {
    if HabitRegistry::new(conn).contains(&session.username, habit)? {
        Ok(())
    } else {
        Err(AppError::not_found(format!("Habit '{habit}' is not tracked")))
    }
}
