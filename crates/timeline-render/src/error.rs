//! Render errors

use timeline_types::ItemKind;

/// Errors while turning a record into blocks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Record shape does not belong to the item kind
    #[error("record shape '{record}' does not match item kind '{kind}'")]
    KindMismatch {
        /// Item kind being rendered
        kind: ItemKind,
        /// Record shape received
        record: &'static str,
    },
}
