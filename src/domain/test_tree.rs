use crate::domain::flat_row::{
    CaseStatus, ExecutionLogEntry, ExecutionStatus, FlatRow, Priority, RiskLevel,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioGroup {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub test_points: Vec<TestPointGroup>,
    pub progress: u8,
}

impl ScenarioGroup {
    pub fn new(id: String, name: String, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
            test_points: Vec::new(),
            progress: 0,
        }
    }

    pub fn executed_case_count(&self) -> usize {
        self.test_points
            .iter()
            .map(TestPointGroup::executed_case_count)
            .sum()
    }

    pub fn total_case_count(&self) -> usize {
        self.test_points
            .iter()
            .map(TestPointGroup::total_case_count)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPointGroup {
    pub id: i64,
    pub index: i64,
    pub name: String,
    pub purpose: Option<String>,
    pub steps: String,
    pub expected_result: String,
    pub risk_level: RiskLevel,
    pub test_cases: Vec<TestCaseItem>,
    pub progress: u8,
}

impl TestPointGroup {
    pub fn from_row(id: i64, row: &FlatRow) -> Self {
        Self {
            id,
            index: row.test_point_index,
            name: row.test_point_name.clone(),
            purpose: row.test_purpose.clone(),
            steps: row.test_point_steps.clone(),
            expected_result: row.test_point_expected_result.clone(),
            risk_level: row.test_point_risk_level,
            test_cases: Vec::new(),
            progress: 0,
        }
    }

    pub fn find_case_mut(&mut self, case_id: i64) -> Option<&mut TestCaseItem> {
        self.test_cases.iter_mut().find(|case| case.id == case_id)
    }

    pub fn executed_case_count(&self) -> usize {
        self.test_cases
            .iter()
            .filter(|case| case.execution_status.is_executed())
            .count()
    }

    pub fn total_case_count(&self) -> usize {
        self.test_cases.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub system: String,
    pub module: String,
    pub priority: Priority,
    pub status: CaseStatus,
    pub execution_status: ExecutionStatus,
    pub last_run: Option<i64>,
    pub logs: Vec<ExecutionLogEntry>,
    pub created_at: i64,
    pub creator_username: Option<String>,
}

impl TestCaseItem {
    pub fn from_row(id: i64, row: &FlatRow) -> Self {
        Self {
            id,
            name: row.name.clone(),
            description: row.description.clone(),
            system: row.system.clone(),
            module: row.module.clone(),
            priority: row.priority,
            status: row.status,
            execution_status: row.execution_status,
            last_run: row.last_run,
            logs: row.execution_logs.clone(),
            created_at: row.created_at,
            creator_username: row.creator.clone(),
        }
    }

    /// Overwrites the fields that change when a case is executed. Everything else keeps the
    /// value from the first row that introduced the case.
    pub fn merge_execution_from(&mut self, row: &FlatRow) {
        self.execution_status = row.execution_status;
        self.last_run = row.last_run;
        self.logs = row.execution_logs.clone();
    }
}
