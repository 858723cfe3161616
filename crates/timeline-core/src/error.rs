//! Error types for the timeline engine
//!
//! - [`TimelineError`]: a reveal could not materialize its item
//! - [`RouterError`]: a delete flow signal was rejected or the request failed

use crate::router::FlowPhase;
use timeline_client::{DeleteError, FetchError};
use timeline_render::RenderError;
use timeline_types::{FlowKind, ItemId};

/// Reveal and page-construction failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    /// No item with this id on the page
    #[error("unknown timeline item: {0}")]
    UnknownItem(ItemId),

    /// Two items share one id
    #[error("duplicate timeline item: {0}")]
    DuplicateItem(ItemId),

    /// Record retrieval failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Record could not be rendered for the item's kind
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

impl TimelineError {
    /// Check if revealing the item again may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_retryable(),
            Self::UnknownItem(_) | Self::DuplicateItem(_) | Self::Render(_) => false,
        }
    }
}

/// Delete flow failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// Confirm arrived with no context bound for the current cycle
    #[error("{0} flow has nothing armed")]
    NotArmed(FlowKind),

    /// The flow already has a request in flight
    #[error("{0} flow is busy deleting")]
    Busy(FlowKind),

    /// Delete request was not accepted
    #[error("delete failed: {0}")]
    Delete(#[from] DeleteError),

    /// Flow state machine violation
    #[error("illegal flow transition: {from:?} -> {to:?}")]
    IllegalTransition { from: FlowPhase, to: FlowPhase },
}
