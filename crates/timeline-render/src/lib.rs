//! Timeline Render
//!
//! Turns revision records into detail-pane content:
//! - Field-level unified diffs between two edit snapshots
//! - Plain field blocks for the creation revision
//! - Heading / subheading / body for experiment runs
//!
//! Panes render to markup ([`html`]) or terminal text ([`text`]).
//!
//! # Example
//!
//! ```rust
//! use timeline_render::DiffRenderer;
//! use timeline_types::{EditRecord, FieldSet, ItemKind};
//!
//! let prev = FieldSet::new("B", "", "", "");
//! let curr = FieldSet::new("A", "", "", "");
//! let blocks = DiffRenderer::new()
//!     .render(ItemKind::Edit, &EditRecord::new(curr, prev).into())
//!     .unwrap();
//! assert_eq!(blocks.len(), 1);
//! ```

#![warn(unreachable_pub)]

pub mod block;
pub mod diff;
pub mod error;
pub mod html;
pub mod renderer;
pub mod text;

pub use block::{Block, DetailPane};
pub use diff::{DiffLine, FieldDiff, Hunk, LineTag, DEFAULT_CONTEXT_LINES};
pub use error::RenderError;
pub use renderer::DiffRenderer;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
