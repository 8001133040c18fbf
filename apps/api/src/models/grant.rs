use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A public funding opportunity tracked by the company.
///
/// `id` is absent on inbound payloads and assigned by the grant store at
/// insert time. `budget` is free text, conventionally `"$N"` or `"$N - $M"`;
/// it is parsed leniently at aggregation time, never validated at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingOpportunity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub url: String,
    pub summary: String,
    pub deadline: NaiveDate,
    /// Free-text label. Observed values: "Open", "Upcoming", "Closed".
    pub status: String,
    pub budget: String,
    /// Percentage in [0, 100].
    pub company_affinity: f64,
    /// Defaults to false so records created before the field existed
    /// deserialize cleanly instead of being backfilled on read.
    #[serde(default)]
    pub won: bool,
}
