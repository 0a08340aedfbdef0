pub mod use_cases;

pub use use_cases::identity_resolver::{IdentityResolver, TagIdentityResolver};
pub use use_cases::selection_set::{SelectionResetReason, SelectionSet};
pub use use_cases::test_point_board::TestPointBoard;
pub use use_cases::tree_aggregator::{Aggregation, TreeAggregator};
