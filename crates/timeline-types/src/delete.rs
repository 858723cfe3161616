//! Delete triggers and the context they bind at open time
//!
//! A [`DeleteTrigger`] is a control on the page. A [`DeleteContext`] is the
//! value a confirmation dialog holds for exactly one open→confirm cycle; it
//! is rebuilt from the trigger on every open signal.

use crate::error::SurfaceError;
use crate::item::TimelineItem;
use serde::{Deserialize, Serialize};

/// What a deletion removes, and what happens after it succeeds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeletionKind {
    /// A single timeline item; completion reloads the view
    Item,
    /// The whole resource; completion redirects to the owner's page
    Resource {
        /// Owning username, captured from the trigger
        owner_username: String,
    },
}

impl DeletionKind {
    /// Flow handling this kind
    #[inline]
    #[must_use]
    pub fn flow(&self) -> FlowKind {
        match self {
            DeletionKind::Item => FlowKind::ItemDelete,
            DeletionKind::Resource { .. } => FlowKind::ResourceDelete,
        }
    }

    /// Owner username for resource deletions
    #[inline]
    #[must_use]
    pub fn owner_username(&self) -> Option<&str> {
        match self {
            DeletionKind::Item => None,
            DeletionKind::Resource { owner_username } => Some(owner_username),
        }
    }
}

/// One of the two shared confirmation flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowKind {
    /// Item-delete dialog
    ItemDelete,
    /// Resource-delete dialog
    ResourceDelete,
}

impl FlowKind {
    /// Both flows
    pub const ALL: [FlowKind; 2] = [FlowKind::ItemDelete, FlowKind::ResourceDelete];

    /// The other flow
    #[inline]
    #[must_use]
    pub fn other(&self) -> FlowKind {
        match self {
            FlowKind::ItemDelete => FlowKind::ResourceDelete,
            FlowKind::ResourceDelete => FlowKind::ItemDelete,
        }
    }

    /// Dialog element id the flow is bound to
    #[inline]
    #[must_use]
    pub fn dialog_id(&self) -> &'static str {
        match self {
            FlowKind::ItemDelete => "confirm-item-delete-modal",
            FlowKind::ResourceDelete => "confirm-recipe-delete-modal",
        }
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowKind::ItemDelete => f.write_str("item-delete"),
            FlowKind::ResourceDelete => f.write_str("resource-delete"),
        }
    }
}

/// A control that opens a confirmation dialog for one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTrigger {
    /// Precomputed delete-target URL
    pub target_url: String,
    /// Deletion kind
    pub kind: DeletionKind,
}

impl DeleteTrigger {
    /// Trigger deleting a single item
    #[inline]
    #[must_use]
    pub fn item(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            kind: DeletionKind::Item,
        }
    }

    /// Trigger deleting the whole resource
    #[inline]
    #[must_use]
    pub fn resource(target_url: impl Into<String>, owner_username: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            kind: DeletionKind::Resource {
                owner_username: owner_username.into(),
            },
        }
    }

    /// Build a trigger from its surface markers
    ///
    /// A present owner marker makes the trigger resource-level.
    ///
    /// # Errors
    /// - `SurfaceError::MissingTarget` if the target marker is blank
    /// - `SurfaceError::MissingOwner` if the owner marker is present but empty
    pub fn from_markers(target_url: &str, owner_marker: Option<&str>) -> Result<Self, SurfaceError> {
        if target_url.trim().is_empty() {
            return Err(SurfaceError::MissingTarget);
        }
        match owner_marker {
            None => Ok(Self::item(target_url)),
            Some("") => Err(SurfaceError::MissingOwner),
            Some(owner) => Ok(Self::resource(target_url, owner)),
        }
    }

    /// Item trigger targeting `/api/{segment}/{id}`
    #[must_use]
    pub fn for_item(item: &TimelineItem) -> Self {
        Self::item(format!("/api/{}/{}", item.kind.api_segment(), item.id))
    }

    /// Flow this trigger opens
    #[inline]
    #[must_use]
    pub fn flow(&self) -> FlowKind {
        self.kind.flow()
    }
}

/// Binding of a dialog to one deletion target for one cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteContext {
    /// URL the confirm click will `DELETE`
    pub target_url: String,
    /// Deletion kind and completion data
    pub kind: DeletionKind,
}

impl DeleteContext {
    /// Fresh context captured from a trigger
    #[inline]
    #[must_use]
    pub fn from_trigger(trigger: &DeleteTrigger) -> Self {
        Self {
            target_url: trigger.target_url.clone(),
            kind: trigger.kind.clone(),
        }
    }

    /// Flow this context belongs to
    #[inline]
    #[must_use]
    pub fn flow(&self) -> FlowKind {
        self.kind.flow()
    }

    /// Owner username for resource deletions
    #[inline]
    #[must_use]
    pub fn owner_username(&self) -> Option<&str> {
        self.kind.owner_username()
    }
}
