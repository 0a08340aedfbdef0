use crate::domain::flat_row::{CaseSource, CaseStatus, ExecutionStatus, Priority, RiskLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestPointInput {
    pub id: i64,
    pub project_id: Option<i64>,
    pub version: Option<String>,
    pub index: i64,
    pub name: String,
    pub purpose: Option<String>,
    pub steps: String,
    pub expected_result: String,
    pub risk_level: RiskLevel,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCaseInput {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub system: String,
    pub module: String,
    pub priority: Priority,
    pub status: CaseStatus,
    pub execution_status: ExecutionStatus,
    pub creator: Option<String>,
    pub source: Option<CaseSource>,
}
