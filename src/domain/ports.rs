use crate::domain::model::CompanyRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can produce the full, unpaged list of company records.
#[async_trait]
pub trait CompanySource: Send + Sync {
    /// Returns every record in upstream order, or the first error hit.
    /// Records gathered before a failure are never returned.
    async fn fetch_all(&self) -> Result<Vec<CompanyRecord>>;
}
