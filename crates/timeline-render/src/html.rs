//! Markup rendering of detail panes
//!
//! Diff blocks use diff2html's line-by-line class names so existing
//! stylesheets keep working. All record text is escaped.

use crate::block::{Block, DetailPane};
use crate::diff::{DiffLine, FieldDiff, LineTag};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;
use timeline_types::{DeleteTrigger, Field, FlowKind, ItemKind};

/// Render a whole pane container
#[must_use]
pub fn render_pane(pane: &DetailPane) -> String {
    let class = match pane.kind {
        ItemKind::Edit => "accordion-body",
        ItemKind::Experiment => "accordion-body newline",
        ItemKind::CreationEdit => "newline",
    };

    let mut out = format!("<div class=\"{class}\">");
    for block in &pane.blocks {
        out.push_str(&render_block(block));
    }
    if let Some(trigger) = &pane.delete_trigger {
        out.push_str(&render_delete_trigger(trigger));
    }
    out.push_str("</div>");
    out
}

/// Render one block
#[must_use]
pub fn render_block(block: &Block) -> String {
    match block {
        Block::Diff(diff) => format!("<div>{}</div>", render_diff(diff)),
        Block::Field {
            field: Field::Title,
            text,
        } => format!("<h3 data-field=\"title\">{}</h3>", encode_text(text)),
        Block::Field { field, text } => {
            format!("<p data-field=\"{field}\">{}</p>", encode_text(text))
        }
        Block::Heading(text) => format!("<h3>{}</h3>", encode_text(text)),
        Block::Subheading(text) => format!("<p>({})</p>", encode_text(text)),
        Block::Body(text) => format!("<p>{}</p>", encode_text(text)),
    }
}

/// Line-by-line diff table for one field
#[must_use]
pub fn render_diff(diff: &FieldDiff) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<div class=\"d2h-file-wrapper\" data-field=\"{field}\">\
         <div class=\"d2h-file-header\"><span class=\"d2h-file-name\">{field}</span></div>\
         <table class=\"d2h-diff-table\"><tbody class=\"d2h-diff-tbody\">",
        field = diff.field
    );

    for hunk in &diff.hunks {
        let _ = write!(
            out,
            "<tr><td class=\"d2h-code-linenumber d2h-info\"></td>\
             <td class=\"d2h-info\">{}</td></tr>",
            encode_text(&hunk.header())
        );
        for line in &hunk.lines {
            out.push_str(&render_line(line));
        }
    }

    out.push_str("</tbody></table></div>");
    out
}

fn render_line(line: &DiffLine) -> String {
    let class = match line.tag {
        LineTag::Insert => "d2h-ins",
        LineTag::Delete => "d2h-del",
        LineTag::Context => "d2h-cntx",
    };
    format!(
        "<tr><td class=\"d2h-code-linenumber {class}\">\
         <div class=\"line-num1\">{old}</div><div class=\"line-num2\">{new}</div></td>\
         <td class=\"{class}\"><div class=\"d2h-code-line\">\
         <span class=\"d2h-code-line-prefix\">{prefix}</span>\
         <span class=\"d2h-code-line-ctn\">{content}</span></div></td></tr>",
        old = line.old_line.map(|n| n.to_string()).unwrap_or_default(),
        new = line.new_line.map(|n| n.to_string()).unwrap_or_default(),
        prefix = line.tag.prefix(),
        content = encode_text(&line.content),
    )
}

/// Delete control opening the shared confirmation dialog
#[must_use]
pub fn render_delete_trigger(trigger: &DeleteTrigger) -> String {
    let flow: FlowKind = trigger.flow();
    let mut out = format!(
        "<a class=\"btn btn-outline-danger\" role=\"button\" type=\"button\" \
         data-bs-toggle=\"modal\" data-bs-target=\"#{}\" data-bs-href=\"{}\"",
        flow.dialog_id(),
        encode_double_quoted_attribute(&trigger.target_url),
    );
    if let Some(owner) = trigger.kind.owner_username() {
        let _ = write!(
            out,
            " data-bs-username=\"{}\"",
            encode_double_quoted_attribute(owner)
        );
    }
    out.push_str(">Delete</a>");
    out
}
