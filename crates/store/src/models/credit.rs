//! Credit balance record.

use sceneflow_core::credits::units_to_credits;
use sceneflow_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

/// A user's credit balance, in integer hundredths of a credit.
///
/// Read-only for the gateway; the payment system owns mutation. The
/// pipeline ingest surface can upsert balances on its behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditBalance {
    pub id: RecordId,
    pub user_email: String,
    pub credit_units: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CreditBalance {
    /// A zero balance for a user with no balance row yet.
    ///
    /// Reads return this instead of 404 so new users see `0.0` credits
    /// rather than an error.
    pub fn empty(user_email: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: RecordId::new_v4(),
            user_email: user_email.into(),
            credit_units: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// The balance in display credits.
    pub fn credits(&self) -> f64 {
        units_to_credits(self.credit_units)
    }
}
