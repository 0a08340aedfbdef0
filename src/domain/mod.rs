pub mod asset_stats;
pub mod board_filter;
pub mod error;
pub mod flat_row;
pub mod test_asset_input;
pub mod test_tree;
pub mod view_preferences;
