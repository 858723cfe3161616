//! Errors raised while reading item-surface markers

/// Malformed item-surface markers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// Item-kind marker is not one of the known kinds
    #[error("unknown item kind marker: '{0}'")]
    UnknownItemKind(String),

    /// Item id marker is empty
    #[error("item id must not be empty")]
    EmptyItemId,

    /// Delete-target marker is empty
    #[error("delete trigger requires a target url")]
    MissingTarget,

    /// Owner-username marker missing or empty on a resource trigger
    #[error("resource delete trigger requires an owner username")]
    MissingOwner,
}
