//! Homework status domain: the closed status enum, its verdicts, and
//! notification formatting for a single homework record.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{BotError, Result};

/// Review status of a submission as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Wire value used by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the student
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(BotError::InvalidStatus(Some(other.to_string()))),
        }
    }
}

/// A validated homework record and the message announcing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub name: String,
    pub status: HomeworkStatus,
    pub message: String,
}

impl StatusUpdate {
    /// Build an update from a raw homework record
    pub fn from_record(homework: &Value) -> Result<Self> {
        let name = homework
            .get("homework_name")
            .and_then(Value::as_str)
            .ok_or(BotError::MissingHomeworkName)?;

        let status = match homework.get("status") {
            Some(Value::String(s)) => s.parse::<HomeworkStatus>()?,
            Some(other) => return Err(BotError::InvalidStatus(Some(other.to_string()))),
            None => return Err(BotError::InvalidStatus(None)),
        };

        Ok(Self {
            name: name.to_string(),
            status,
            message: format_message(name, status),
        })
    }

    /// Whether this update carries the same `(name, status)` pair
    pub fn same_state(&self, other: &StatusUpdate) -> bool {
        self.name == other.name && self.status == other.status
    }
}

fn format_message(name: &str, status: HomeworkStatus) -> String {
    format!("Changed review status for \"{}\". Status: {}", name, status.verdict())
}

/// Format the notification text for a single homework record
pub fn parse_status(homework: &Value) -> Result<String> {
    StatusUpdate::from_record(homework).map(|update| update.message)
}
