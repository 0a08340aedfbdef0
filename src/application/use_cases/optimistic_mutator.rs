//! Local execution status changes applied ahead of backend confirmation.
//!
//! Only the flat row collection is changed; the tree is rebuilt from it afterwards. There is
//! no field-level undo: when the backend rejects the change the rows are reloaded.

use crate::domain::error::{AppError, Result};
use crate::domain::flat_row::{ExecutionStatus, FlatRow};
use tracing::debug;

/// Sets `status` on every row carrying `case_id` and stamps `last_run` with `executed_at`.
/// Returns the number of rows touched.
pub fn apply_execution_status_at(
    rows: &mut [FlatRow],
    case_id: i64,
    status: ExecutionStatus,
    executed_at: i64,
) -> Result<usize> {
    let mut touched = 0usize;
    for row in rows.iter_mut().filter(|row| row.case_id == Some(case_id)) {
        row.execution_status = status;
        row.last_run = Some(executed_at);
        touched += 1;
    }
    if touched == 0 {
        return Err(AppError::NotFound(format!(
            "Test case {} is not on the current page",
            case_id
        )));
    }
    debug!(case_id, status = %status, rows = touched, "Applied optimistic execution status");
    Ok(touched)
}

pub fn apply_execution_status(
    rows: &mut [FlatRow],
    case_id: i64,
    status: ExecutionStatus,
) -> Result<usize> {
    apply_execution_status_at(rows, case_id, status, chrono::Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flat_row::fixtures::row;

    #[test]
    fn test_updates_every_row_of_the_case() {
        let mut rows = vec![row(1, 7, "auth"), row(2, 7, "auth"), row(2, 8, "auth")];
        let touched =
            apply_execution_status_at(&mut rows, 7, ExecutionStatus::Passed, 1_700_000_900_000)
                .unwrap();
        assert_eq!(touched, 2);
        assert_eq!(rows[0].execution_status, ExecutionStatus::Passed);
        assert_eq!(rows[1].last_run, Some(1_700_000_900_000));
        assert_eq!(rows[2].execution_status, ExecutionStatus::Pending);
    }

    #[test]
    fn test_unknown_case_leaves_rows_alone() {
        let mut rows = vec![row(1, 7, "auth")];
        let before = rows.clone();
        let result = apply_execution_status(&mut rows, 99, ExecutionStatus::Failed);
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(rows, before);
    }
}
