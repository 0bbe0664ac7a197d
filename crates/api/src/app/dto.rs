//! Request DTOs and JSON mapping helpers.
//!
//! Required fields are `Option` here so the services can report exactly
//! what is missing as a 400 instead of the framework's generic body
//! rejection. `type` and `date` arrive as strings and are parsed the same
//! way, for the same reason. Unknown fields (a `userId` in an update
//! payload, say) are ignored by deserialization and can never reach the
//! services.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerly_auth::AuthSession;
use ledgerly_budgets::{BudgetDraft, BudgetPatch};
use ledgerly_core::{DomainError, DomainResult};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BudgetEntryRequest {
    pub category: Option<String>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl BudgetEntryRequest {
    pub fn into_draft(self) -> DomainResult<BudgetDraft> {
        Ok(BudgetDraft {
            category: self.category,
            amount: self.amount,
            kind: self.kind.as_deref().map(str::parse).transpose()?,
            date: self.date.as_deref().map(parse_date).transpose()?,
            description: self.description,
        })
    }

    pub fn into_patch(self) -> DomainResult<BudgetPatch> {
        Ok(BudgetPatch {
            category: self.category,
            amount: self.amount,
            kind: self.kind.as_deref().map(str::parse).transpose()?,
            date: self.date.as_deref().map(parse_date).transpose()?,
            description: self.description,
        })
    }
}

// -------------------------
// Response mapping
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: ledgerly_auth::PublicUser,
    pub access_token: String,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user,
            access_token: session.access_token,
        }
    }
}

/// Accept RFC 3339 timestamps and plain `YYYY-MM-DD` dates (what a date
/// input submits); plain dates become midnight UTC.
pub fn parse_date(s: &str) -> DomainResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(d) = s.parse::<NaiveDate>() {
        return Ok(DateTime::from_naive_utc_and_offset(
            d.and_time(NaiveTime::MIN),
            Utc,
        ));
    }
    Err(DomainError::validation(format!("invalid date: {s:?}")))
}
