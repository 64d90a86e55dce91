//! User records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::HasId;
use crate::types::{Role, UserId};

/// A registered user as seen by the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    #[serde(rename = "nombreDeUsuario")]
    pub username: String,
    pub email: String,
    #[serde(rename = "pais", default)]
    pub country: String,
    /// Birth date as sent by the API (`YYYY-MM-DD` or a full ISO timestamp).
    #[serde(rename = "fechaNacimiento", default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Set while the account is suspended.
    #[serde(
        rename = "fechaSuspension",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub suspended_at: Option<DateTime<Utc>>,
}

impl HasId for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

impl User {
    /// Whether the account is currently suspended.
    #[must_use]
    pub const fn is_suspended(&self) -> bool {
        self.suspended_at.is_some()
    }

    /// Whole days elapsed since suspension, if suspended.
    #[must_use]
    pub fn suspended_days(&self, now: DateTime<Utc>) -> Option<i64> {
        self.suspended_at.map(|at| (now - at).num_days())
    }

    /// The birth date's calendar day in `YYYY-MM-DD` form, if present.
    #[must_use]
    pub fn birth_day(&self) -> Option<String> {
        let raw = self.birth_date.as_deref()?.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc).date_naive().format("%Y-%m-%d").to_string());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Whether the user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
