use serde::{Deserialize, Serialize};

/// Header counters for the test point board, reduced from the flat rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStats {
    pub scenario_count: usize,
    pub test_point_count: usize,
    pub test_case_count: usize,
    pub ai_generated_cases: usize,
    pub manual_cases: usize,
}
