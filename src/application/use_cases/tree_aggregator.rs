//! Rebuilds the Scenario -> Test Point -> Test Case tree from denormalized rows.
//!
//! A single pass over the rows: scenarios are located through a hash index, points and
//! cases by a linear scan of their (small) parent. Every level keeps first-seen order.
//! Rows repeating a known (point, case) pair never add nodes, they only refresh the
//! execution fields of the existing case.

use crate::application::use_cases::identity_resolver::IdentityResolver;
use crate::domain::error::AppError;
use crate::domain::flat_row::FlatRow;
use crate::domain::test_tree::{ScenarioGroup, TestCaseItem, TestPointGroup};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub scenarios: Vec<ScenarioGroup>,
    pub rejected_rows: usize,
    /// One error summarizing every rejected row, `None` when all rows were accepted.
    pub ingestion_error: Option<AppError>,
}

impl Aggregation {
    pub fn is_complete(&self) -> bool {
        self.rejected_rows == 0
    }
}

pub struct TreeAggregator<R: IdentityResolver> {
    resolver: R,
}

impl<R: IdentityResolver> TreeAggregator<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn aggregate(&self, rows: &[FlatRow]) -> Aggregation {
        let mut scenarios: Vec<ScenarioGroup> = Vec::new();
        let mut scenario_index: HashMap<String, usize> = HashMap::new();
        let mut rejected_rows = 0usize;
        let mut first_rejection: Option<AppError> = None;

        for row in rows {
            let ids = self
                .resolver
                .resolve_point_id(row)
                .and_then(|point_id| Ok((point_id, self.resolver.resolve_case_id(row)?)));
            let (point_id, case_id) = match ids {
                Ok(ids) => ids,
                Err(err) => {
                    debug!(error = %err, "Rejecting flat row");
                    rejected_rows += 1;
                    first_rejection.get_or_insert(err);
                    continue;
                }
            };

            let scenario_id = self.resolver.resolve_scenario_id(row);
            let scenario_slot = match scenario_index.get(&scenario_id) {
                Some(&slot) => slot,
                None => {
                    scenarios.push(ScenarioGroup::new(
                        scenario_id.clone(),
                        self.resolver.resolve_scenario_name(row),
                        row.scenario_description.clone(),
                    ));
                    scenario_index.insert(scenario_id, scenarios.len() - 1);
                    scenarios.len() - 1
                }
            };
            let scenario = &mut scenarios[scenario_slot];

            let point_slot = match scenario
                .test_points
                .iter()
                .position(|point| point.id == point_id)
            {
                Some(slot) => slot,
                None => {
                    scenario
                        .test_points
                        .push(TestPointGroup::from_row(point_id, row));
                    scenario.test_points.len() - 1
                }
            };
            let point = &mut scenario.test_points[point_slot];

            if let Some(case) = point.find_case_mut(case_id) {
                case.merge_execution_from(row);
            } else {
                point.test_cases.push(TestCaseItem::from_row(case_id, row));
            }
        }

        let ingestion_error = first_rejection.map(|first| {
            warn!(
                rejected_rows,
                total_rows = rows.len(),
                "Flat rows rejected during aggregation"
            );
            AppError::IngestionError(format!(
                "{} of {} rows rejected (first: {})",
                rejected_rows,
                rows.len(),
                first
            ))
        });

        Aggregation {
            scenarios,
            rejected_rows,
            ingestion_error,
        }
    }
}
