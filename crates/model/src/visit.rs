//! Clinical visit records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, VisitId};

/// A clinical visit linking a patient to the treating doctor.
///
/// Visits exist in the core only as far as role-scoped visibility requires;
/// report generation and richer clinical documentation live outside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// Unique visit identifier.
    pub id: VisitId,
    /// The patient seen.
    pub patient: AccountId,
    /// The treating doctor.
    pub doctor: AccountId,
    /// Calendar date of the visit.
    pub visit_date: NaiveDate,
    /// Recorded diagnosis.
    pub diagnosis: String,
    /// Recorded prescription.
    pub prescription: String,
}
