use crate::domain::error::{AppError, Result};
use crate::domain::flat_row::FlatRow;
use crate::infrastructure::config::{BoardConfig, DEFAULT_UNCLASSIFIED_ID};

/// Derives the tree keys for a flat row.
///
/// The aggregator and the stats reducer share one resolver so both always agree on what
/// counts as "the same" scenario, point or case.
pub trait IdentityResolver {
    fn resolve_scenario_id(&self, row: &FlatRow) -> String;

    fn resolve_scenario_name(&self, row: &FlatRow) -> String;

    fn resolve_point_id(&self, row: &FlatRow) -> Result<i64> {
        row.test_point_id.ok_or_else(|| {
            AppError::IngestionError(format!(
                "Row for case {} has no test point id",
                describe_id(row.case_id)
            ))
        })
    }

    fn resolve_case_id(&self, row: &FlatRow) -> Result<i64> {
        row.case_id.ok_or_else(|| {
            AppError::IngestionError(format!(
                "Row for test point {} has no case id",
                describe_id(row.test_point_id)
            ))
        })
    }
}

/// Groups rows by their tag; untagged rows share one unclassified bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagIdentityResolver {
    unclassified_id: String,
    unclassified_name: String,
}

impl TagIdentityResolver {
    pub fn new(unclassified_id: impl Into<String>, unclassified_name: impl Into<String>) -> Self {
        Self {
            unclassified_id: unclassified_id.into(),
            unclassified_name: unclassified_name.into(),
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(
            config.unclassified_scenario_id.clone(),
            config.unclassified_scenario_name.clone(),
        )
    }
}

impl Default for TagIdentityResolver {
    fn default() -> Self {
        Self::new(DEFAULT_UNCLASSIFIED_ID, "Uncategorized")
    }
}

impl IdentityResolver for TagIdentityResolver {
    fn resolve_scenario_id(&self, row: &FlatRow) -> String {
        match row.tag.as_deref() {
            Some(tag) if !tag.is_empty() => tag.to_string(),
            _ => self.unclassified_id.clone(),
        }
    }

    fn resolve_scenario_name(&self, row: &FlatRow) -> String {
        if let Some(name) = row.scenario_name.as_deref() {
            if !name.trim().is_empty() {
                return name.to_string();
            }
        }
        match row.tag.as_deref() {
            Some(tag) if !tag.is_empty() => tag.to_string(),
            _ => self.unclassified_name.clone(),
        }
    }
}

fn describe_id(id: Option<i64>) -> String {
    id.map(|value| value.to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}
