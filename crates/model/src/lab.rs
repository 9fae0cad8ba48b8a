//! Lab test requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, LabRequestId};

/// A test request placed at a lab for a patient.
///
/// This relation is what makes a patient visible to a lab: the access-scope
/// policy grants a LAB actor visibility over exactly the patients that have
/// a request at that lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabRequest {
    /// Unique request identifier.
    pub id: LabRequestId,
    /// The patient the test concerns.
    pub patient: AccountId,
    /// The lab the test was requested at.
    pub lab: AccountId,
    /// When the request was placed.
    pub requested_at: DateTime<Utc>,
}
