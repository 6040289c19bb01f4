//! Project, task and employee records

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::DbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[repr(i64)]
pub enum Status {
    Completed = 0,
    InProgress = 1,
    Cancelled = 2,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Completed => "Completed",
            Status::InProgress => "InProgress",
            Status::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect();
        [Status::Completed, Status::InProgress, Status::Cancelled]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| DbError::invalid_value("status", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[repr(i64)]
pub enum Position {
    Junior = 0,
    Middle = 1,
    Senior = 2,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Junior => "Junior",
            Position::Middle => "Middle",
            Position::Senior => "Senior",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Position::Junior, Position::Middle, Position::Senior]
            .into_iter()
            .find(|position| position.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DbError::invalid_value("position", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub status: Status,
    pub project_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub age: i64,
    pub position: Position,
}

/// Task with its assigned employees loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskWithEmployees {
    #[serde(flatten)]
    pub task: Task,
    pub employees: Vec<Employee>,
}

/// Project with its tasks, and each task's employees, loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectWithTasks {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<TaskWithEmployees>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_separators() {
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("InProgress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("cancelled".parse::<Status>().unwrap(), Status::Cancelled);
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn position_round_trips_through_display() {
        for position in [Position::Junior, Position::Middle, Position::Senior] {
            assert_eq!(position.to_string().parse::<Position>().unwrap(), position);
        }
    }
}
