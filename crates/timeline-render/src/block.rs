//! Rendered content of a detail pane

use crate::diff::FieldDiff;
use timeline_types::{DeleteTrigger, Field, ItemKind};

/// One visual block inside a detail pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Diff of a changed field
    Diff(FieldDiff),
    /// Plain labeled field value
    Field {
        /// Field shown
        field: Field,
        /// Current text
        text: String,
    },
    /// Heading line
    Heading(String),
    /// Subheading line, shown verbatim
    Subheading(String),
    /// Free-text body
    Body(String),
}

impl Block {
    /// Diff payload, if this is a diff block
    #[inline]
    #[must_use]
    pub fn as_diff(&self) -> Option<&FieldDiff> {
        match self {
            Block::Diff(diff) => Some(diff),
            _ => None,
        }
    }

    /// Field this block belongs to, if any
    #[inline]
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self {
            Block::Diff(diff) => Some(diff.field),
            Block::Field { field, .. } => Some(*field),
            Block::Heading(_) | Block::Subheading(_) | Block::Body(_) => None,
        }
    }
}

/// Materialized detail pane of one timeline item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPane {
    /// Kind of the item the pane belongs to
    pub kind: ItemKind,
    /// Content blocks in display order
    pub blocks: Vec<Block>,
    /// Delete control, attached only when the viewer may delete
    pub delete_trigger: Option<DeleteTrigger>,
}

impl DetailPane {
    /// Create pane without a delete control
    #[inline]
    #[must_use]
    pub fn new(kind: ItemKind, blocks: Vec<Block>) -> Self {
        Self {
            kind,
            blocks,
            delete_trigger: None,
        }
    }

    /// Attach a delete control
    #[inline]
    pub fn attach_delete_trigger(&mut self, trigger: DeleteTrigger) {
        self.delete_trigger = Some(trigger);
    }

    /// Fields that produced diff blocks, in order
    #[must_use]
    pub fn diffed_fields(&self) -> Vec<Field> {
        self.blocks
            .iter()
            .filter_map(Block::as_diff)
            .map(|d| d.field)
            .collect()
    }

    /// Render as markup
    #[must_use]
    pub fn to_html(&self) -> String {
        crate::html::render_pane(self)
    }

    /// Render as terminal text
    #[must_use]
    pub fn to_text(&self) -> String {
        crate::text::render_pane(self)
    }
}
