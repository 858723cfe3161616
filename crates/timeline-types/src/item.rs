//! Timeline items
//!
//! Items arrive on the page with string markers attached by the template
//! layer. They are parsed once, here, into exhaustive enums so nothing
//! downstream ever matches on raw strings again.

use crate::error::SurfaceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Auth marker value that enables the delete affordance
pub const LOGGED_IN_MARKER: &str = "logged-in";

/// Opaque item identifier, unique within one page
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create item id from a marker value
    ///
    /// # Errors
    /// - `SurfaceError::EmptyItemId` if the value is empty
    pub fn new(id: impl Into<String>) -> Result<Self, SurfaceError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SurfaceError::EmptyItemId);
        }
        Ok(Self(id))
    }

    /// Raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemId {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of change event an item represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Content edit with a previous revision
    #[serde(rename = "edit")]
    Edit,
    /// Experiment run
    #[serde(rename = "experiment")]
    Experiment,
    /// First revision, created together with the resource
    #[serde(rename = "createEdit")]
    CreationEdit,
}

impl ItemKind {
    /// All kinds
    pub const ALL: [ItemKind; 3] = [ItemKind::Edit, ItemKind::Experiment, ItemKind::CreationEdit];

    /// Marker string carried on the item surface
    #[inline]
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            ItemKind::Edit => "edit",
            ItemKind::Experiment => "experiment",
            ItemKind::CreationEdit => "createEdit",
        }
    }

    /// API resource segment records of this kind live under
    ///
    /// Creation edits are stored as ordinary edits.
    #[inline]
    #[must_use]
    pub fn api_segment(&self) -> &'static str {
        match self {
            ItemKind::Edit | ItemKind::CreationEdit => "edit",
            ItemKind::Experiment => "experiment",
        }
    }

    /// Whether records of this kind are edit snapshots
    #[inline]
    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(self, ItemKind::Edit | ItemKind::CreationEdit)
    }
}

impl FromStr for ItemKind {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edit" => Ok(ItemKind::Edit),
            "experiment" => Ok(ItemKind::Experiment),
            "createEdit" => Ok(ItemKind::CreationEdit),
            other => Err(SurfaceError::UnknownItemKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.marker())
    }
}

/// Server-decided delete capability, rendered ahead of time
///
/// This is an affordance flag only. The server authorizes every deletion
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthFlag {
    /// Viewer may see the delete control
    LoggedIn,
    /// Anything else, including an absent marker
    #[default]
    Anonymous,
}

impl AuthFlag {
    /// Read the auth marker verbatim
    ///
    /// Only the exact [`LOGGED_IN_MARKER`] value yields `LoggedIn`.
    #[inline]
    #[must_use]
    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            Some(LOGGED_IN_MARKER) => AuthFlag::LoggedIn,
            _ => AuthFlag::Anonymous,
        }
    }

    /// Check for the logged-in marker
    #[inline]
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthFlag::LoggedIn)
    }
}

/// Materialization state of one item's detail pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoadState {
    /// Never revealed
    #[default]
    Unloaded,
    /// Fetch in flight
    Loading,
    /// Pane committed
    Loaded,
    /// Last attempt failed; a later reveal may retry
    Failed,
}

impl LoadState {
    /// Whether a reveal signal should start a load from this state
    #[inline]
    #[must_use]
    pub fn admits_reveal(&self) -> bool {
        matches!(self, LoadState::Unloaded | LoadState::Failed)
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LoadState::Unloaded => "unloaded",
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
            LoadState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One collapsible entry on the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Item id
    pub id: ItemId,
    /// Item kind
    pub kind: ItemKind,
    /// Delete affordance flag
    pub auth: AuthFlag,
}

impl TimelineItem {
    /// Create item
    #[inline]
    #[must_use]
    pub fn new(id: ItemId, kind: ItemKind, auth: AuthFlag) -> Self {
        Self { id, kind, auth }
    }

    /// Build an item from its surface markers
    ///
    /// # Errors
    /// - `SurfaceError::EmptyItemId` for an empty id
    /// - `SurfaceError::UnknownItemKind` for an unrecognised kind marker
    pub fn from_markers(
        id: &str,
        kind_marker: &str,
        auth_marker: Option<&str>,
    ) -> Result<Self, SurfaceError> {
        Ok(Self {
            id: ItemId::new(id)?,
            kind: kind_marker.parse()?,
            auth: AuthFlag::from_marker(auth_marker),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn item_kind_parses_known_markers() {
        for kind in ItemKind::ALL {
            assert_eq!(kind.marker().parse::<ItemKind>().unwrap(), kind);
        }
    }

    #[test]
    fn item_kind_rejects_unknown_marker() {
        let err = "Edit".parse::<ItemKind>().unwrap_err();
        assert_eq!(err, SurfaceError::UnknownItemKind("Edit".to_string()));
    }

    #[test]
    fn creation_edit_uses_edit_segment() {
        assert_eq!(ItemKind::CreationEdit.api_segment(), "edit");
        assert_eq!(ItemKind::Experiment.api_segment(), "experiment");
        assert!(ItemKind::CreationEdit.is_edit());
        assert!(!ItemKind::Experiment.is_edit());
    }

    #[test]
    fn auth_flag_requires_exact_marker() {
        assert_eq!(AuthFlag::from_marker(Some("logged-in")), AuthFlag::LoggedIn);
        assert_eq!(AuthFlag::from_marker(Some("Logged-In")), AuthFlag::Anonymous);
        assert_eq!(AuthFlag::from_marker(Some(" logged-in")), AuthFlag::Anonymous);
        assert_eq!(AuthFlag::from_marker(Some("true")), AuthFlag::Anonymous);
        assert_eq!(AuthFlag::from_marker(None), AuthFlag::Anonymous);
    }

    #[test]
    fn load_state_reveal_admission() {
        assert!(LoadState::Unloaded.admits_reveal());
        assert!(LoadState::Failed.admits_reveal());
        assert!(!LoadState::Loading.admits_reveal());
        assert!(!LoadState::Loaded.admits_reveal());
    }

    #[test]
    fn item_from_markers() {
        let item = TimelineItem::from_markers("7", "createEdit", None).unwrap();
        assert_eq!(item.id.as_str(), "7");
        assert_eq!(item.kind, ItemKind::CreationEdit);
        assert_eq!(item.auth, AuthFlag::Anonymous);

        assert_eq!(
            TimelineItem::from_markers("", "edit", None),
            Err(SurfaceError::EmptyItemId)
        );
    }

    #[test]
    fn item_kind_serde_uses_markers() {
        let json = serde_json::to_string(&ItemKind::CreationEdit).unwrap();
        assert_eq!(json, "\"createEdit\"");
    }

    proptest! {
        #[test]
        fn prop_only_exact_marker_logs_in(marker in ".*") {
            let flag = AuthFlag::from_marker(Some(&marker));
            prop_assert_eq!(flag.is_logged_in(), marker == LOGGED_IN_MARKER);
        }
    }
}
