use rusqlite::Connection;
use std::{env, path::Path, path::PathBuf, time::Duration};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub fn resolve_db_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("HABIT_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/habits.db"))
}

/// Creates the database file and its tables if they do not exist yet.
pub fn init_db(path: &Path) -> rusqlite::Result<()> {
    let conn = open_connection(path)?;
    init_schema(&conn)
}

/// Opens a connection scoped to a single interaction.
pub fn open_connection(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS habits (
            username TEXT NOT NULL,
            habit TEXT NOT NULL,
            date TEXT NOT NULL,
            PRIMARY KEY (username, habit, date)
        );

        CREATE TABLE IF NOT EXISTS user_habits (
            username TEXT NOT NULL,
            habit TEXT NOT NULL,
            PRIMARY KEY (username, habit)
        );
        ",
    )
}

#[cfg(test)]
pub(crate) fn memory_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_init_is_repeatable() {
        let conn = memory_db();
        init_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tables, vec!["habits".to_string(), "user_habits".to_string()]);
    }
}
