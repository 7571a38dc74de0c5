use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

/// Cached display-name entry for one racing participant, upserted
/// whenever that participant completes authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RacerProfile {
    pub iracing_id: i64,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RacerProfile {
    pub fn new(input: RacerProfileInput) -> Self {
        RacerProfile {
            iracing_id: input.iracing_id,
            display_name: input.display_name,
            first_name: input.first_name,
            last_name: input.last_name,
            updated_at: None,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for RacerProfile {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(RacerProfile {
            iracing_id: row.try_get("iracing_id")?,
            display_name: row.try_get("display_name")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RacerProfileInput {
    pub iracing_id: i64,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Aggregated yearly statistics summed across the provider's
/// category buckets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DriverStats {
    pub wins: u64,
    pub top5s: u64,
    pub starts: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub iracing_id: i64,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub stats: DriverStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatsResponse {
    pub success: bool,
    pub iracing_id: i64,
    pub display_name: String,
}
