use crate::errors::AppError;
use chrono::{Local, NaiveDate};

/// Who is acting and which day counts as "today" for this interaction.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub today: NaiveDate,
}

impl Session {
    pub fn new(raw_username: &str) -> Result<Self, AppError> {
        Self::at(raw_username, Local::now().date_naive())
    }

    pub fn at(raw_username: &str, today: NaiveDate) -> Result<Self, AppError> {
        let username = raw_username.trim();
        if username.is_empty() {
            return Err(AppError::bad_request("username is required"));
        }

        Ok(Self {
            username: username.to_string(),
            today,
        })
    }
}
