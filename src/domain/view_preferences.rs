use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const VIEW_PREFERENCES_KEY: &str = "testdesk.board.preferences";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewPreferences {
    pub page_size: Option<u32>,
    pub collapsed_scenarios: BTreeSet<String>,
}
