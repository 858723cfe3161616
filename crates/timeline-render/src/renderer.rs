//! Per-kind block rendering
//!
//! - Edit: one diff block per changed field, fixed field order
//! - CreationEdit: all four fields as plain blocks, no comparison
//! - Experiment: heading, subheading, body

use crate::block::Block;
use crate::diff::{FieldDiff, DEFAULT_CONTEXT_LINES};
use crate::error::RenderError;
use timeline_types::{EditRecord, ExperimentRecord, Field, FieldSet, ItemKind, Record};

/// Turns revision records into pane blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRenderer {
    context_lines: usize,
}

impl DiffRenderer {
    /// Create renderer with default context
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With number of context lines per hunk
    #[inline]
    #[must_use]
    pub fn with_context_lines(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }

    /// Context lines per hunk
    #[inline]
    #[must_use]
    pub fn context_lines(&self) -> usize {
        self.context_lines
    }

    /// Render a record for an item of `kind`
    ///
    /// # Errors
    /// - `RenderError::KindMismatch` if the record shape does not belong to `kind`
    pub fn render(&self, kind: ItemKind, record: &Record) -> Result<Vec<Block>, RenderError> {
        match (kind, record) {
            (ItemKind::Edit, Record::Edit(edit)) => Ok(self.render_edit(edit)),
            (ItemKind::CreationEdit, Record::Edit(edit)) => Ok(Self::render_creation(&edit.curr)),
            (ItemKind::Experiment, Record::Experiment(exp)) => Ok(Self::render_experiment(exp)),
            (kind, Record::Edit(_)) => Err(RenderError::KindMismatch {
                kind,
                record: "edit",
            }),
            (kind, Record::Experiment(_)) => Err(RenderError::KindMismatch {
                kind,
                record: "experiment",
            }),
        }
    }

    /// Diff blocks for every changed field
    ///
    /// A missing previous snapshot is compared as empty text.
    #[must_use]
    pub fn render_edit(&self, record: &EditRecord) -> Vec<Block> {
        let empty = FieldSet::default();
        let prev = record.prev.as_ref().unwrap_or(&empty);

        let blocks: Vec<Block> = Field::ORDER
            .into_iter()
            .filter(|field| record.curr.get(*field) != prev.get(*field))
            .map(|field| {
                Block::Diff(FieldDiff::compute(
                    field,
                    prev.get(field),
                    record.curr.get(field),
                    self.context_lines,
                ))
            })
            .collect();

        if blocks.is_empty() {
            tracing::debug!("edit changed no fields");
        }
        blocks
    }

    /// Plain blocks for all four fields
    #[must_use]
    pub fn render_creation(curr: &FieldSet) -> Vec<Block> {
        Field::ORDER
            .into_iter()
            .map(|field| Block::Field {
                field,
                text: curr.get(field).to_string(),
            })
            .collect()
    }

    /// Heading, subheading and body
    #[must_use]
    pub fn render_experiment(record: &ExperimentRecord) -> Vec<Block> {
        vec![
            Block::Heading(record.commit_message.clone()),
            Block::Subheading(record.commit_date.clone()),
            Block::Body(record.notes.clone()),
        ]
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}
