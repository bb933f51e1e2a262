use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::amount::deserialize_lenient;
use crate::domain::period::Period;

/// The payment recorded for one person in one period.
///
/// `amount` is absolute for the period; a later write replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub person_id: Uuid,
    #[serde(alias = "month")]
    pub period: Period,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub amount: f64,
    pub updated_at: DateTime<Utc>,
}

impl Contribution {
    pub fn new(person_id: Uuid, period: Period, amount: f64, updated_at: DateTime<Utc>) -> Self {
        Self {
            person_id,
            period,
            amount,
            updated_at,
        }
    }
}
