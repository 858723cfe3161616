//! Timeline page: the root container of items and their detail panes
//!
//! The page owns the per-item [`LoadState`] lookup. Every controller
//! operating on the same page shares it, so an item is materialized at most
//! once no matter how many controllers receive reveal signals.

use crate::error::TimelineError;
use dashmap::DashMap;
use html_escape::encode_double_quoted_attribute;
use std::collections::HashSet;
use timeline_render::DetailPane;
use timeline_types::{DeleteTrigger, ItemId, LoadState, TimelineItem};

/// Root container for one rendered timeline
#[derive(Debug)]
pub struct TimelinePage {
    /// Items in display order
    items: Vec<TimelineItem>,
    /// Load state per item
    states: DashMap<ItemId, LoadState>,
    /// Committed panes
    panes: DashMap<ItemId, DetailPane>,
    /// Resource-level delete control, if the viewer owns the resource
    resource_trigger: Option<DeleteTrigger>,
}

impl TimelinePage {
    /// Create a page from items in display order
    ///
    /// # Errors
    /// - `TimelineError::DuplicateItem` if two items share an id
    pub fn new(items: impl IntoIterator<Item = TimelineItem>) -> Result<Self, TimelineError> {
        let items: Vec<TimelineItem> = items.into_iter().collect();
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(TimelineError::DuplicateItem(item.id.clone()));
            }
        }

        let states = items
            .iter()
            .map(|item| (item.id.clone(), LoadState::Unloaded))
            .collect();

        Ok(Self {
            items,
            states,
            panes: DashMap::new(),
            resource_trigger: None,
        })
    }

    /// With a resource-level delete control
    #[inline]
    #[must_use]
    pub fn with_resource_trigger(mut self, trigger: DeleteTrigger) -> Self {
        self.resource_trigger = Some(trigger);
        self
    }

    /// Items in display order
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    /// Look up an item
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&TimelineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Current load state of an item
    #[must_use]
    pub fn load_state(&self, id: &ItemId) -> Option<LoadState> {
        self.states.get(id).map(|state| *state)
    }

    /// Committed pane of an item
    #[must_use]
    pub fn pane(&self, id: &ItemId) -> Option<DetailPane> {
        self.panes.get(id).map(|pane| pane.clone())
    }

    /// Number of committed panes
    #[inline]
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Resource-level delete control
    #[inline]
    #[must_use]
    pub fn resource_trigger(&self) -> Option<&DeleteTrigger> {
        self.resource_trigger.as_ref()
    }

    /// Check-and-set the load state for a reveal
    ///
    /// Returns `Ok(None)` when the caller now owns the load (state set to
    /// `Loading`), or `Ok(Some(state))` when the reveal must be skipped.
    pub(crate) fn begin_load(&self, id: &ItemId) -> Result<Option<LoadState>, TimelineError> {
        let mut state = self
            .states
            .get_mut(id)
            .ok_or_else(|| TimelineError::UnknownItem(id.clone()))?;

        if state.admits_reveal() {
            *state = LoadState::Loading;
            Ok(None)
        } else {
            Ok(Some(*state))
        }
    }

    /// Store the pane and mark the item loaded as one step
    pub(crate) fn commit(&self, id: &ItemId, pane: DetailPane) {
        if let Some(mut state) = self.states.get_mut(id) {
            self.panes.insert(id.clone(), pane);
            *state = LoadState::Loaded;
        }
    }

    /// Mark a load attempt as failed
    pub(crate) fn mark_failed(&self, id: &ItemId) {
        if let Some(mut state) = self.states.get_mut(id) {
            *state = LoadState::Failed;
        }
    }

    /// Render committed panes in display order
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            if let Some(pane) = self.panes.get(&item.id) {
                out.push_str(&format!(
                    "<div class=\"accordion-item\" data-id=\"{}\" data-type=\"{}\">{}</div>\n",
                    encode_double_quoted_attribute(item.id.as_str()),
                    item.kind.marker(),
                    pane.to_html(),
                ));
            }
        }
        if let Some(trigger) = &self.resource_trigger {
            out.push_str(&timeline_render::html::render_delete_trigger(trigger));
            out.push('\n');
        }
        out
    }

    /// Render committed panes as terminal text
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            if let Some(pane) = self.panes.get(&item.id) {
                out.push_str(&format!("--- {} {} ---\n", item.kind, item.id));
                out.push_str(&pane.to_text());
            }
        }
        out
    }
}
