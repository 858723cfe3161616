//! Timeline Types
//!
//! The data model shared by every timeline crate:
//! - Timeline items and the markers they are parsed from
//! - Explicit per-item load states
//! - Revision records (edit snapshots and experiment metadata)
//! - Delete triggers and the transient delete context bound at open time
//!
//! # Example
//!
//! ```rust
//! use timeline_types::{DeleteTrigger, ItemKind, TimelineItem};
//!
//! let item = TimelineItem::from_markers("42", "edit", Some("logged-in")).unwrap();
//! assert_eq!(item.kind, ItemKind::Edit);
//!
//! let trigger = DeleteTrigger::for_item(&item);
//! assert_eq!(trigger.target_url, "/api/edit/42");
//! ```

#![warn(unreachable_pub)]

pub mod delete;
pub mod error;
pub mod item;
pub mod record;

pub use delete::{DeleteContext, DeleteTrigger, DeletionKind, FlowKind};
pub use error::SurfaceError;
pub use item::{AuthFlag, ItemId, ItemKind, LoadState, TimelineItem, LOGGED_IN_MARKER};
pub use record::{EditRecord, ExperimentRecord, Field, FieldSet, Record};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
