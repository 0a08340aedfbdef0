//! The test point board: one filtered, paginated view over the test assets.
//!
//! Every fetch replaces the flat rows and rebuilds the annotated tree from scratch. The
//! selection survives paging and plain refreshes, and is cleared when the filter changes
//! or a bulk delete succeeds.

use crate::application::use_cases::asset_stats::compute_asset_stats;
use crate::application::use_cases::identity_resolver::{IdentityResolver, TagIdentityResolver};
use crate::application::use_cases::optimistic_mutator::apply_execution_status;
use crate::application::use_cases::progress_rollup::{annotate, tree_progress};
use crate::application::use_cases::request_sequencer::{RequestSequencer, RequestToken};
use crate::application::use_cases::selection_set::{SelectionResetReason, SelectionSet};
use crate::application::use_cases::tree_aggregator::TreeAggregator;
use crate::application::use_cases::view_preferences::{load_preferences, save_preferences};
use crate::domain::asset_stats::AssetStats;
use crate::domain::board_filter::{BoardFilter, PageRequest};
use crate::domain::error::{AppError, Result};
use crate::domain::flat_row::{ExecutionStatus, FlatRow, FlatRowPage};
use crate::domain::test_tree::ScenarioGroup;
use crate::domain::view_preferences::ViewPreferences;
use crate::infrastructure::asset_source::TestAssetSource;
use crate::infrastructure::config::BoardConfig;
use crate::infrastructure::storage::KeyValueStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use validator::Validate;

pub struct TestPointBoard<R: IdentityResolver = TagIdentityResolver> {
    source: Arc<dyn TestAssetSource>,
    store: Arc<dyn KeyValueStore>,
    config: BoardConfig,
    aggregator: TreeAggregator<R>,
    preferences: ViewPreferences,
    sequencer: RequestSequencer,
    filter: BoardFilter,
    page: PageRequest,
    rows: Vec<FlatRow>,
    tree: Vec<ScenarioGroup>,
    selection: SelectionSet,
    total_count: i64,
    total_pages: i64,
    ingestion_error: Option<AppError>,
}

impl TestPointBoard<TagIdentityResolver> {
    pub fn new(
        source: Arc<dyn TestAssetSource>,
        store: Arc<dyn KeyValueStore>,
        config: BoardConfig,
    ) -> Self {
        let resolver = TagIdentityResolver::from_config(&config);
        Self::with_resolver(source, store, config, resolver)
    }
}

impl<R: IdentityResolver> TestPointBoard<R> {
    pub fn with_resolver(
        source: Arc<dyn TestAssetSource>,
        store: Arc<dyn KeyValueStore>,
        config: BoardConfig,
        resolver: R,
    ) -> Self {
        let preferences = load_preferences(store.as_ref());
        let page_size = match preferences.page_size {
            Some(size) if size >= 1 && size <= config.max_page_size => size,
            _ => config.default_page_size,
        };

        Self {
            source,
            store,
            aggregator: TreeAggregator::new(resolver),
            preferences,
            sequencer: RequestSequencer::new(),
            filter: BoardFilter::default(),
            page: PageRequest::new(1, page_size),
            rows: Vec::new(),
            tree: Vec::new(),
            selection: SelectionSet::new(),
            total_count: 0,
            total_pages: 0,
            ingestion_error: None,
            config,
        }
    }

    pub fn tree(&self) -> &[ScenarioGroup] {
        &self.tree
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn filter(&self) -> &BoardFilter {
        &self.filter
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    /// Rows the last rebuild had to drop, summarized as one error.
    pub fn ingestion_error(&self) -> Option<&AppError> {
        self.ingestion_error.as_ref()
    }

    pub fn stats(&self) -> AssetStats {
        compute_asset_stats(&self.rows, self.aggregator.resolver())
    }

    pub fn overall_progress(&self) -> u8 {
        tree_progress(&self.tree)
    }

    /// Starts a fetch; only the most recently issued token is accepted by [`Self::accept_page`].
    pub fn begin_fetch(&mut self) -> RequestToken {
        self.sequencer.issue()
    }

    /// Installs a fetched page unless a newer fetch was started in the meantime.
    pub fn accept_page(&mut self, token: RequestToken, page: FlatRowPage) -> bool {
        if !self.sequencer.is_current(token) {
            debug!(token = token.value(), "Discarding stale test point page");
            return false;
        }
        self.rows = page.rows;
        self.total_count = page.total_count;
        self.total_pages = page.total_pages;
        self.rebuild();
        true
    }

    pub async fn load(&mut self) -> Result<()> {
        let token = self.begin_fetch();
        let page = self
            .source
            .fetch_flat_rows(&self.filter, self.page)
            .await
            .map_err(|err| {
                error!(error = %err, page = self.page.page, "Failed to fetch test points");
                err
            })?;
        self.accept_page(token, page);
        Ok(())
    }

    /// Refetches with the current filter and page; the selection is kept.
    pub async fn refresh(&mut self) -> Result<()> {
        self.load().await
    }

    pub async fn set_filter(&mut self, filter: BoardFilter) -> Result<()> {
        let filter = filter.normalized();
        if filter != self.filter {
            self.selection.reset(SelectionResetReason::FilterChanged);
            self.filter = filter;
            self.page.page = 1;
        }
        self.load().await
    }

    pub async fn set_page(&mut self, page: u32) -> Result<()> {
        let request = PageRequest::new(page, self.page.page_size);
        request.validate()?;
        self.page = request;
        self.load().await
    }

    pub async fn set_page_size(&mut self, page_size: u32) -> Result<()> {
        if page_size == 0 || page_size > self.config.max_page_size {
            return Err(AppError::ValidationError(format!(
                "Page size must be between 1 and {}.",
                self.config.max_page_size
            )));
        }
        let request = PageRequest::new(1, page_size);
        request.validate()?;
        self.page = request;

        self.preferences.page_size = Some(page_size);
        if let Err(err) = save_preferences(self.store.as_ref(), &self.preferences) {
            warn!(error = %err, "Failed to persist page size preference");
        }
        self.load().await
    }

    /// Point ids rendered on the current page, in tree order, without repeats.
    pub fn visible_point_ids(&self) -> Vec<i64> {
        let mut seen = HashSet::new();
        self.tree
            .iter()
            .flat_map(|scenario| scenario.test_points.iter().map(|point| point.id))
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn toggle_point(&mut self, point_id: i64) -> bool {
        self.selection.toggle(point_id)
    }

    pub fn select_visible(&mut self, selected: bool) {
        let visible = self.visible_point_ids();
        self.selection.batch_set(&visible, selected);
    }

    pub fn visible_selected_count(&self) -> usize {
        self.selection
            .current_page_selected_count(&self.visible_point_ids())
    }

    pub fn is_all_visible_selected(&self) -> bool {
        self.selection
            .is_all_visible_selected(&self.visible_point_ids())
    }

    pub fn is_selection_indeterminate(&self) -> bool {
        self.selection.is_indeterminate(&self.visible_point_ids())
    }

    /// Deletes every selected point, including those selected on other pages.
    pub async fn delete_selected(&mut self) -> Result<u64> {
        if self.selection.is_empty() {
            return Err(AppError::ValidationError(
                "Select at least one test point to delete.".to_string(),
            ));
        }
        let ids = self.selection.ids();
        let deleted = self.source.delete_test_points(&ids).await.map_err(|err| {
            error!(error = %err, requested = ids.len(), "Bulk test point delete failed");
            err
        })?;

        info!(requested = ids.len(), deleted, "Deleted selected test points");
        self.selection
            .reset(SelectionResetReason::BatchMutationSucceeded);
        if let Err(err) = self.reload_after_delete().await {
            error!(error = %err, deleted, "Reload after bulk delete failed");
        }
        Ok(deleted)
    }

    /// Reloads the current page, stepping back to the last page when the delete left the
    /// board past the end of the result set.
    async fn reload_after_delete(&mut self) -> Result<()> {
        self.load().await?;
        let last_page = self.total_pages.max(1);
        if i64::from(self.page.page) > last_page {
            self.page.page = last_page as u32;
            self.load().await?;
        }
        Ok(())
    }

    /// Applies the status to the local rows and rebuilds the tree immediately.
    pub fn apply_local_status(&mut self, case_id: i64, status: ExecutionStatus) -> Result<()> {
        apply_execution_status(&mut self.rows, case_id, status)?;
        self.rebuild();
        Ok(())
    }

    /// Sends the status to the backend. On failure the rows are reloaded, which throws the
    /// optimistic value away, and the backend error is returned.
    pub async fn confirm_execution_status(
        &mut self,
        case_id: i64,
        status: ExecutionStatus,
    ) -> Result<()> {
        let remote = self
            .source
            .update_case_execution_status(case_id, status)
            .await;
        if let Err(err) = remote {
            warn!(error = %err, case_id, "Execution status rejected, reloading test points");
            if let Err(reload_err) = self.load().await {
                error!(error = %reload_err, case_id, "Reload after rejected status update failed");
            }
            return Err(err);
        }
        Ok(())
    }

    pub async fn update_execution_status(
        &mut self,
        case_id: i64,
        status: ExecutionStatus,
    ) -> Result<()> {
        self.apply_local_status(case_id, status)?;
        self.confirm_execution_status(case_id, status).await
    }

    pub fn is_scenario_collapsed(&self, scenario_id: &str) -> bool {
        self.preferences.collapsed_scenarios.contains(scenario_id)
    }

    /// Flips the collapsed state of a scenario; returns whether it is collapsed afterwards.
    pub fn toggle_scenario_collapsed(&mut self, scenario_id: &str) -> Result<bool> {
        let collapsed = if self.preferences.collapsed_scenarios.remove(scenario_id) {
            false
        } else {
            self.preferences
                .collapsed_scenarios
                .insert(scenario_id.to_string());
            true
        };
        save_preferences(self.store.as_ref(), &self.preferences)?;
        Ok(collapsed)
    }

    fn rebuild(&mut self) {
        let aggregation = self.aggregator.aggregate(&self.rows);
        let mut tree = aggregation.scenarios;
        annotate(&mut tree);
        self.tree = tree;
        self.ingestion_error = aggregation.ingestion_error;
    }
}
