//! Plain-text rendering for terminals

use crate::block::{Block, DetailPane};
use timeline_types::Field;

/// Render a whole pane as text
#[must_use]
pub fn render_pane(pane: &DetailPane) -> String {
    let mut out = String::new();
    for block in &pane.blocks {
        out.push_str(&render_block(block));
    }
    if let Some(trigger) = &pane.delete_trigger {
        out.push_str(&format!("[delete: {}]\n", trigger.target_url));
    }
    out
}

/// Render one block as text
#[must_use]
pub fn render_block(block: &Block) -> String {
    match block {
        Block::Diff(diff) => format!("== {} ==\n{}", diff.field, diff.unified()),
        Block::Field {
            field: Field::Title,
            text,
        } => format!("# {text}\n"),
        Block::Field { field, text } => format!("{field}:\n{}\n", with_newline(text)),
        Block::Heading(text) => format!("# {text}\n"),
        Block::Subheading(text) => format!("({text})\n"),
        Block::Body(text) => with_newline(text),
    }
}

fn with_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}
