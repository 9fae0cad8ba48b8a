//! Clinical record storage trait.

use async_trait::async_trait;

use medivault_model::{LabRequest, Visit, VisitFilter};

use crate::error::StorageResult;

/// Storage for visit records and lab test requests.
///
/// Visits are queried through an access-scope filter like profiles. Lab
/// requests exist to back the lab-side patient visibility rule and the
/// core only ever inserts and joins them.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts a visit record.
    async fn insert_visit(&self, visit: Visit) -> StorageResult<Visit>;

    /// Lists the visits visible through the filter, newest first.
    async fn list_visits(&self, filter: VisitFilter) -> StorageResult<Vec<Visit>>;

    /// Inserts a lab test request.
    async fn insert_lab_request(&self, request: LabRequest) -> StorageResult<LabRequest>;
}
