//! Test asset aggregation for the test management console.
//!
//! Flat (test point x test case) rows are rebuilt into a Scenario -> Test Point -> Test Case
//! tree annotated with execution progress, and a selection of test points is kept across
//! pages for bulk actions. [`TestPointBoard`] ties these together over a
//! [`TestAssetSource`].

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use crate::application::{
    Aggregation, IdentityResolver, SelectionResetReason, SelectionSet, TagIdentityResolver,
    TestPointBoard, TreeAggregator,
};
pub use crate::domain::error::{AppError, Result};
pub use crate::domain::flat_row::{ExecutionStatus, FlatRow, FlatRowPage};
pub use crate::domain::test_tree::{ScenarioGroup, TestCaseItem, TestPointGroup};
pub use crate::infrastructure::asset_source::TestAssetSource;
pub use crate::infrastructure::config::BoardConfig;

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. `RUST_LOG` wins over the configured filter;
/// calling this again once a subscriber is installed does nothing.
pub fn init_tracing(config: &BoardConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
