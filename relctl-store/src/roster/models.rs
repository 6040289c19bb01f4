//! Roster records

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::DbError;

/// Role a guest holds at an event, stored as its discriminant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i64)]
#[allow(clippy::upper_case_acronyms)] // VIP reads as a name, not an acronym
pub enum Role {
    Regular = 0,
    Speaker = 1,
    Organizer = 2,
    Sponsor = 3,
    VIP = 4,
    Performer = 5,
    Volunteer = 6,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Regular,
        Role::Speaker,
        Role::Organizer,
        Role::Sponsor,
        Role::VIP,
        Role::Performer,
        Role::Volunteer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Regular => "Regular",
            Role::Speaker => "Speaker",
            Role::Organizer => "Organizer",
            Role::Sponsor => "Sponsor",
            Role::VIP => "VIP",
            Role::Performer => "Performer",
            Role::Volunteer => "Volunteer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DbError;

    /// Parse a role name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DbError::invalid_value("role", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Guest {
    pub id: i64,
    pub full_name: String,
    pub age: i64,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// Join row between a guest and an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct GuestRole {
    pub id: i64,
    pub guest_id: i64,
    pub event_id: i64,
    pub role: Role,
}

/// A guest ranked by how many role rows they hold, with the distinct events
/// those rows point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopGuest {
    pub guest_id: i64,
    pub full_name: String,
    pub participation_count: i64,
    pub events: Vec<Event>,
}
