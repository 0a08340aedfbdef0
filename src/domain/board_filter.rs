use crate::domain::flat_row::{ExecutionStatus, Priority, RiskLevel};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query predicate for the test point board. Two filters that compare equal after
/// [`BoardFilter::normalized`] describe the same result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardFilter {
    pub project_id: Option<i64>,
    pub version: Option<String>,
    pub module: Option<String>,
    pub scenario: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub priority: Option<Priority>,
    pub execution_status: Option<ExecutionStatus>,
    pub keyword: Option<String>,
}

impl BoardFilter {
    pub fn normalized(self) -> Self {
        Self {
            version: normalize_optional(self.version),
            module: normalize_optional(self.module),
            scenario: normalize_optional(self.scenario),
            keyword: normalize_optional(self.keyword),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[validate(range(min = 1))]
    pub page: u32,
    #[validate(range(min = 1, max = 500))]
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.page_size as i64
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|val| {
        let trimmed = val.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
