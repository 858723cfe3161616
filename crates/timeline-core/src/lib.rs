//! Timeline Core
//!
//! The engine behind an expandable revision timeline:
//! - [`TimelinePage`]: items, per-item load states, committed panes
//! - [`ItemExpansionController`]: fetch, render and commit a pane on first reveal
//! - [`AuthGate`]: delete affordance from the server-supplied flag
//! - [`DeleteActionRouter`]: two shared confirmation flows with per-open context
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use timeline_client::{ApiClient, ClientConfig};
//! use timeline_core::prelude::*;
//! use timeline_types::TimelineItem;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(ApiClient::new(ClientConfig::new())?);
//! let item = TimelineItem::from_markers("42", "edit", Some("logged-in"))?;
//! let page = Arc::new(TimelinePage::new([item.clone()])?);
//!
//! let controller =
//!     ItemExpansionController::new(page, client, DiffRenderer::new(), AuthGate::new());
//! controller.reveal(&item.id).await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod auth;
pub mod error;
pub mod expansion;
pub mod page;
pub mod router;

pub use auth::AuthGate;
pub use error::{RouterError, TimelineError};
pub use expansion::{ItemExpansionController, RevealOutcome};
pub use page::TimelinePage;
pub use router::{
    allowed_transitions, validate_transition, CompletionAction, DeleteActionRouter,
    DeleteOutcome, FlowPhase, FlowState, Navigator,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a timeline
    pub use crate::{
        AuthGate, CompletionAction, DeleteActionRouter, ItemExpansionController, Navigator,
        RevealOutcome, TimelinePage,
    };
    pub use timeline_render::DiffRenderer;
    pub use timeline_types::{DeleteTrigger, FlowKind, ItemId, LoadState};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
