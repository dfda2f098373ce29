use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::StorageError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Hackathon {
    pub hackathon_id: Uuid,
    pub name: String,
    pub slug: String,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
}

impl Hackathon {
    pub fn lifecycle(&self) -> Result<HackathonStatus, StorageError> {
        self.status.parse()
    }
}

/// Lifecycle of a hackathon
///
/// The status is the only gate for leaderboard visibility and for whether
/// assignments, criteria and evaluations may still change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HackathonStatus {
    Draft,
    Open,
    Running,
    Closed,
    Archived,
}

impl HackathonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Running => "running",
            Self::Closed => "closed",
            Self::Archived => "archived",
        }
    }

    pub fn accepts_changes(&self) -> bool {
        matches!(self, Self::Draft | Self::Open | Self::Running)
    }

    pub fn leaderboard_visible(&self) -> bool {
        matches!(self, Self::Closed | Self::Archived)
    }
}

impl fmt::Display for HackathonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HackathonStatus {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "open" => Ok(Self::Open),
            "running" => Ok(Self::Running),
            "closed" => Ok(Self::Closed),
            "archived" => Ok(Self::Archived),
            other => Err(StorageError::Validation(format!(
                "unknown hackathon status '{}'",
                other
            ))),
        }
    }
}
