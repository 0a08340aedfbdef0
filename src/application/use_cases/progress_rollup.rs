//! Execution progress, computed bottom-up from case execution status.
//!
//! Percentages are rounded half-up in integer arithmetic. Scenario progress is weighted by
//! case count, so a large point counts for more than a point with a single case.

use crate::domain::test_tree::ScenarioGroup;

/// `round(100 * executed / total)`, half-up; 0 when there is nothing to execute.
pub fn progress_percent(executed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let executed = executed.min(total) as u64;
    let total = total as u64;
    ((executed * 200 + total) / (total * 2)) as u8
}

pub fn annotate(scenarios: &mut [ScenarioGroup]) {
    for scenario in scenarios.iter_mut() {
        let mut executed = 0usize;
        let mut total = 0usize;
        for point in scenario.test_points.iter_mut() {
            let point_executed = point.executed_case_count();
            let point_total = point.total_case_count();
            point.progress = progress_percent(point_executed, point_total);
            executed += point_executed;
            total += point_total;
        }
        scenario.progress = progress_percent(executed, total);
    }
}

/// Case-weighted progress over the whole tree.
pub fn tree_progress(scenarios: &[ScenarioGroup]) -> u8 {
    let (executed, total) = scenarios.iter().fold((0, 0), |(executed, total), scenario| {
        (
            executed + scenario.executed_case_count(),
            total + scenario.total_case_count(),
        )
    });
    progress_percent(executed, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::identity_resolver::TagIdentityResolver;
    use crate::application::use_cases::tree_aggregator::TreeAggregator;
    use crate::domain::flat_row::fixtures::row_with_status;
    use crate::domain::flat_row::ExecutionStatus::{self, Blocked, Failed, Passed, Pending};
    use crate::domain::test_tree::TestPointGroup;

    fn build(rows: Vec<crate::domain::flat_row::FlatRow>) -> Vec<ScenarioGroup> {
        let mut tree = TreeAggregator::new(TagIdentityResolver::default())
            .aggregate(&rows)
            .scenarios;
        annotate(&mut tree);
        tree
    }

    fn point_rows(
        point_id: i64,
        first_case: i64,
        statuses: &[ExecutionStatus],
    ) -> Vec<crate::domain::flat_row::FlatRow> {
        statuses
            .iter()
            .enumerate()
            .map(|(offset, status)| {
                row_with_status(point_id, first_case + offset as i64, "auth", *status)
            })
            .collect()
    }

    #[test]
    fn test_progress_percent_rounds_half_up() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(1, 2), 50);
        assert_eq!(progress_percent(1, 8), 13);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn test_point_progress_counts_failed_and_blocked_as_executed() {
        let tree = build(point_rows(1, 10, &[Pending, Passed, Failed]));
        assert_eq!(tree[0].test_points[0].progress, 67);

        let tree = build(point_rows(1, 10, &[Blocked, Pending, Pending]));
        assert_eq!(tree[0].test_points[0].progress, 33);
    }

    #[test]
    fn test_scenario_progress_is_case_weighted() {
        let mut rows = point_rows(
            1,
            100,
            &[Passed, Passed, Passed, Failed, Failed, Blocked, Passed, Passed, Passed, Pending],
        );
        rows.extend(point_rows(2, 200, &[Pending]));
        let tree = build(rows);
        assert_eq!(tree[0].test_points[0].progress, 90);
        assert_eq!(tree[0].test_points[1].progress, 0);
        assert_eq!(tree[0].progress, 82);
    }

    #[test]
    fn test_empty_point_and_scenario_report_zero() {
        let mut scenario = ScenarioGroup::new("empty".to_string(), "Empty".to_string(), None);
        scenario.test_points.push(TestPointGroup::from_row(
            1,
            &crate::domain::flat_row::FlatRow::default(),
        ));
        let mut tree = vec![scenario, ScenarioGroup::new("none".to_string(), "None".to_string(), None)];
        annotate(&mut tree);
        assert_eq!(tree[0].test_points[0].progress, 0);
        assert_eq!(tree[0].progress, 0);
        assert_eq!(tree[1].progress, 0);
    }

    #[test]
    fn test_annotate_does_not_touch_statuses() {
        let rows = point_rows(1, 10, &[Pending, Passed]);
        let tree = build(rows);
        let statuses: Vec<ExecutionStatus> = tree[0].test_points[0]
            .test_cases
            .iter()
            .map(|case| case.execution_status)
            .collect();
        assert_eq!(statuses, vec![Pending, Passed]);
    }

    #[test]
    fn test_tree_progress_spans_scenarios() {
        let mut rows = point_rows(1, 10, &[Passed, Pending]);
        rows.push(row_with_status(2, 20, "billing", Passed));
        let tree = build(rows);
        assert_eq!(tree_progress(&tree), 67);
        assert_eq!(tree_progress(&[]), 0);
    }
}
