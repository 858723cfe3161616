//! Lazy, idempotent detail-pane materialization
//!
//! Reveal lifecycle for one item:
//! 1. check-and-set `Unloaded | Failed` -> `Loading` (no await before this)
//! 2. fetch the record
//! 3. render blocks for the item kind
//! 4. attach a delete control if the auth flag allows it
//! 5. commit the pane and set `Loaded` together
//!
//! A failure anywhere in 2-4 leaves the item `Failed` so a later reveal
//! retries. The same holds when the reveal future is dropped mid-load.

use crate::auth::AuthGate;
use crate::error::TimelineError;
use crate::page::TimelinePage;
use futures::future::join_all;
use std::sync::Arc;
use timeline_client::RecordFetcher;
use timeline_render::{DetailPane, DiffRenderer};
use timeline_types::{DeleteTrigger, ItemId, LoadState, TimelineItem};

/// Result of a reveal signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// This reveal fetched, rendered and committed the pane
    Materialized,
    /// Nothing done; the item was already in this state
    Skipped(LoadState),
}

/// Materializes detail panes on first reveal
pub struct ItemExpansionController {
    page: Arc<TimelinePage>,
    fetcher: Arc<dyn RecordFetcher>,
    renderer: DiffRenderer,
    gate: AuthGate,
}

impl ItemExpansionController {
    /// Create controller over a page
    #[must_use]
    pub fn new(
        page: Arc<TimelinePage>,
        fetcher: Arc<dyn RecordFetcher>,
        renderer: DiffRenderer,
        gate: AuthGate,
    ) -> Self {
        Self {
            page,
            fetcher,
            renderer,
            gate,
        }
    }

    /// Page this controller materializes into
    #[inline]
    #[must_use]
    pub fn page(&self) -> &Arc<TimelinePage> {
        &self.page
    }

    /// Load state of an item, `None` if it is not on the page
    #[inline]
    #[must_use]
    pub fn load_state(&self, id: &ItemId) -> Option<LoadState> {
        self.page.load_state(id)
    }

    /// Handle a reveal signal for one item
    ///
    /// # Errors
    /// - `TimelineError::UnknownItem` if the id is not on the page
    /// - `TimelineError::Fetch` / `TimelineError::Render` when materialization
    ///   fails; the item is left `Failed`
    #[tracing::instrument(skip(self), fields(item_id = %id))]
    pub async fn reveal(&self, id: &ItemId) -> Result<RevealOutcome, TimelineError> {
        let item = self
            .page
            .item(id)
            .cloned()
            .ok_or_else(|| TimelineError::UnknownItem(id.clone()))?;

        if let Some(state) = self.page.begin_load(id)? {
            tracing::debug!(%state, "reveal skipped");
            return Ok(RevealOutcome::Skipped(state));
        }

        let load = LoadGuard::new(&self.page, id);
        match self.materialize(&item).await {
            Ok(pane) => {
                let blocks = pane.blocks.len();
                load.commit(pane);
                tracing::info!(kind = %item.kind, blocks, "pane materialized");
                Ok(RevealOutcome::Materialized)
            }
            Err(e) => {
                drop(load);
                tracing::warn!(kind = %item.kind, error = %e, "reveal failed");
                Err(e)
            }
        }
    }

    /// Reveal every item on the page concurrently
    pub async fn reveal_all(&self) -> Vec<(ItemId, Result<RevealOutcome, TimelineError>)> {
        let reveals = self.page.items().iter().map(|item| async move {
            (item.id.clone(), self.reveal(&item.id).await)
        });
        join_all(reveals).await
    }

    async fn materialize(&self, item: &TimelineItem) -> Result<DetailPane, TimelineError> {
        let record = self.fetcher.fetch(item.kind, &item.id).await?;
        let blocks = self.renderer.render(item.kind, &record)?;

        let mut pane = DetailPane::new(item.kind, blocks);
        if self.gate.can_delete(item.auth) {
            pane.attach_delete_trigger(DeleteTrigger::for_item(item));
        }
        Ok(pane)
    }
}

/// Owns an item's `Loading` state until the pane is committed
///
/// Dropped without a commit (error or cancelled reveal), it marks the item
/// `Failed`.
struct LoadGuard<'a> {
    page: &'a TimelinePage,
    id: &'a ItemId,
    committed: bool,
}

impl<'a> LoadGuard<'a> {
    fn new(page: &'a TimelinePage, id: &'a ItemId) -> Self {
        Self {
            page,
            id,
            committed: false,
        }
    }

    fn commit(mut self, pane: DetailPane) {
        self.page.commit(self.id, pane);
        self.committed = true;
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.page.mark_failed(self.id);
        }
    }
}

impl std::fmt::Debug for ItemExpansionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemExpansionController")
            .field("items", &self.page.items().len())
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}
