use crate::domain::board_filter::{BoardFilter, PageRequest};
use crate::domain::error::Result;
use crate::domain::flat_row::{ExecutionStatus, FlatRowPage};
use async_trait::async_trait;

/// Source of truth for test assets, seen through the flat (point x case) query.
#[async_trait]
pub trait TestAssetSource: Send + Sync {
    async fn fetch_flat_rows(&self, filter: &BoardFilter, page: PageRequest)
        -> Result<FlatRowPage>;

    /// Deletes the given test points and their case links; returns how many points went away.
    async fn delete_test_points(&self, ids: &[i64]) -> Result<u64>;

    async fn update_case_execution_status(
        &self,
        case_id: i64,
        status: ExecutionStatus,
    ) -> Result<()>;
}
