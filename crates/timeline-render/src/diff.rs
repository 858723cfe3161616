//! Line-oriented diffs of a single field
//!
//! Built on `similar`. A [`FieldDiff`] keeps owned hunks so it can be
//! rendered after the source snapshots are gone.

use similar::{ChangeTag, TextDiff};
use timeline_types::Field;

/// Default number of unchanged lines kept around each change
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Per-line marking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    /// Line only in the current revision
    Insert,
    /// Line only in the previous revision
    Delete,
    /// Unchanged line
    Context,
}

impl LineTag {
    /// Unified-diff line prefix
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> char {
        match self {
            LineTag::Insert => '+',
            LineTag::Delete => '-',
            LineTag::Context => ' ',
        }
    }
}

impl From<ChangeTag> for LineTag {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Insert => LineTag::Insert,
            ChangeTag::Delete => LineTag::Delete,
            ChangeTag::Equal => LineTag::Context,
        }
    }
}

/// One line of a hunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Marking
    pub tag: LineTag,
    /// 1-based line number in the previous revision (None for insertions)
    pub old_line: Option<usize>,
    /// 1-based line number in the current revision (None for deletions)
    pub new_line: Option<usize>,
    /// Line text without its terminator
    pub content: String,
}

/// Contiguous group of changes with surrounding context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// 0-based start in the previous revision
    pub old_start: usize,
    /// Lines covered in the previous revision
    pub old_len: usize,
    /// 0-based start in the current revision
    pub new_start: usize,
    /// Lines covered in the current revision
    pub new_len: usize,
    /// Lines in order
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Unified hunk header, e.g. `@@ -1,3 +1,4 @@`
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            format_range(self.old_start, self.old_len),
            format_range(self.new_start, self.new_len)
        )
    }
}

fn format_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{start},0"),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}

/// Diff of one field between two revisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    /// Field compared
    pub field: Field,
    /// Hunks in order
    pub hunks: Vec<Hunk>,
}

impl FieldDiff {
    /// Compute the diff of `prev` → `curr`
    #[must_use]
    pub fn compute(field: Field, prev: &str, curr: &str, context_lines: usize) -> Self {
        let diff = TextDiff::from_lines(prev, curr);
        let hunks = diff
            .grouped_ops(context_lines)
            .into_iter()
            .filter_map(|group| {
                let first = group.first()?;
                let last = group.last()?;
                let old_start = first.old_range().start;
                let new_start = first.new_range().start;

                let lines = group
                    .iter()
                    .flat_map(|op| diff.iter_changes(op))
                    .map(|change| DiffLine {
                        tag: change.tag().into(),
                        old_line: change.old_index().map(|i| i + 1),
                        new_line: change.new_index().map(|i| i + 1),
                        content: change
                            .value()
                            .trim_end_matches(&['\r', '\n'][..])
                            .to_string(),
                    })
                    .collect();

                Some(Hunk {
                    old_start,
                    old_len: last.old_range().end - old_start,
                    new_start,
                    new_len: last.new_range().end - new_start,
                    lines,
                })
            })
            .collect();

        Self { field, hunks }
    }

    /// Inserted line count
    #[must_use]
    pub fn insertions(&self) -> usize {
        self.count(LineTag::Insert)
    }

    /// Deleted line count
    #[must_use]
    pub fn deletions(&self) -> usize {
        self.count(LineTag::Delete)
    }

    /// Whether any line changed
    #[inline]
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.insertions() > 0 || self.deletions() > 0
    }

    /// Unified diff text
    ///
    /// Hunk headers only: no `---`/`+++` file header and no path prefixes.
    #[must_use]
    pub fn unified(&self) -> String {
        let mut out = String::new();
        for hunk in &self.hunks {
            out.push_str(&hunk.header());
            out.push('\n');
            for line in &hunk.lines {
                out.push(line.tag.prefix());
                out.push_str(&line.content);
                out.push('\n');
            }
        }
        out
    }

    fn count(&self, tag: LineTag) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.tag == tag)
            .count()
    }
}
