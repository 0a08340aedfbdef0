pub mod asset_stats;
pub mod identity_resolver;
pub mod optimistic_mutator;
pub mod progress_rollup;
pub mod request_sequencer;
pub mod selection_set;
pub mod test_point_board;
pub mod tree_aggregator;
pub mod view_preferences;
