use crate::application::use_cases::identity_resolver::IdentityResolver;
use crate::domain::asset_stats::AssetStats;
use crate::domain::flat_row::{CaseSource, FlatRow};
use std::collections::HashSet;

/// Distinct scenario, point and case counts plus cases by source. Works on the rows
/// directly, independent of the tree. Rows without ids are skipped; a case without a
/// source counts as manual.
pub fn compute_asset_stats<R: IdentityResolver>(rows: &[FlatRow], resolver: &R) -> AssetStats {
    let mut scenarios: HashSet<String> = HashSet::new();
    let mut points: HashSet<i64> = HashSet::new();
    let mut cases: HashSet<i64> = HashSet::new();
    let mut stats = AssetStats::default();

    for row in rows {
        let (Ok(point_id), Ok(case_id)) =
            (resolver.resolve_point_id(row), resolver.resolve_case_id(row))
        else {
            continue;
        };
        scenarios.insert(resolver.resolve_scenario_id(row));
        points.insert(point_id);
        if cases.insert(case_id) {
            match row.source {
                Some(CaseSource::Ai) => stats.ai_generated_cases += 1,
                Some(CaseSource::Manual) | None => stats.manual_cases += 1,
            }
        }
    }

    stats.scenario_count = scenarios.len();
    stats.test_point_count = points.len();
    stats.test_case_count = cases.len();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::identity_resolver::TagIdentityResolver;
    use crate::domain::flat_row::fixtures::row;

    #[test]
    fn test_counts_distinct_assets_and_sources() {
        let mut ai_case = row(1, 10, "auth");
        ai_case.source = Some(CaseSource::Ai);
        let mut manual_case = row(2, 11, "");
        manual_case.source = Some(CaseSource::Manual);
        let mut missing_point = row(3, 12, "auth");
        missing_point.test_point_id = None;
        let rows = vec![
            ai_case.clone(),
            ai_case,
            row(2, 10, "auth"),
            manual_case,
            row(4, 13, "billing"),
            missing_point,
        ];

        let stats = compute_asset_stats(&rows, &TagIdentityResolver::default());
        assert_eq!(
            stats,
            AssetStats {
                scenario_count: 3,
                test_point_count: 3,
                test_case_count: 3,
                ai_generated_cases: 1,
                manual_cases: 2,
            }
        );
    }

    #[test]
    fn test_empty_rows() {
        let stats = compute_asset_stats(&[], &TagIdentityResolver::default());
        assert_eq!(stats, AssetStats::default());
    }
}
