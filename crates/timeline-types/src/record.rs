//! Revision records
//!
//! Two record shapes exist, selected entirely by item kind:
//! - [`EditRecord`]: current and previous field snapshots
//! - [`ExperimentRecord`]: commit message, pre-formatted date and notes

use serde::{Deserialize, Deserializer, Serialize};

/// Known text fields of a revision, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Title
    Title,
    /// Description
    Description,
    /// Ingredients
    Ingredients,
    /// Instructions
    Instructions,
}

impl Field {
    /// Fixed display order
    pub const ORDER: [Field; 4] = [
        Field::Title,
        Field::Description,
        Field::Ingredients,
        Field::Instructions,
    ];

    /// Field label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Ingredients => "ingredients",
            Field::Instructions => "instructions",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One snapshot of the four text fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldSet {
    /// Title
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Description
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Ingredients
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: String,
    /// Instructions
    #[serde(default, deserialize_with = "null_as_empty")]
    pub instructions: String,
}

impl FieldSet {
    /// Create snapshot
    #[inline]
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        ingredients: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ingredients: ingredients.into(),
            instructions: instructions.into(),
        }
    }

    /// Text of one field
    #[inline]
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Ingredients => &self.ingredients,
            Field::Instructions => &self.instructions,
        }
    }

    /// Replace one field
    #[inline]
    #[must_use]
    pub fn with(mut self, field: Field, text: impl Into<String>) -> Self {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Ingredients => &mut self.ingredients,
            Field::Instructions => &mut self.instructions,
        };
        *slot = text.into();
        self
    }

    /// Fields whose text differs from `other`, in display order
    #[must_use]
    pub fn changed_fields(&self, other: &FieldSet) -> Vec<Field> {
        Field::ORDER
            .into_iter()
            .filter(|f| self.get(*f) != other.get(*f))
            .collect()
    }
}

/// Edit revision: current snapshot plus the one it replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    /// Snapshot after the edit
    pub curr: FieldSet,
    /// Snapshot before the edit; `None` only for the creation revision
    #[serde(default)]
    pub prev: Option<FieldSet>,
}

impl EditRecord {
    /// Edit with a previous snapshot
    #[inline]
    #[must_use]
    pub fn new(curr: FieldSet, prev: FieldSet) -> Self {
        Self {
            curr,
            prev: Some(prev),
        }
    }

    /// Creation revision
    #[inline]
    #[must_use]
    pub fn creation(curr: FieldSet) -> Self {
        Self { curr, prev: None }
    }
}

/// Experiment run metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperimentRecord {
    /// Commit message
    #[serde(rename = "commit_msg", default, deserialize_with = "null_as_empty")]
    pub commit_message: String,
    /// Commit date, already formatted upstream
    #[serde(default, deserialize_with = "null_as_empty")]
    pub commit_date: String,
    /// Free-text notes
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

impl ExperimentRecord {
    /// Create experiment record
    #[inline]
    #[must_use]
    pub fn new(
        commit_message: impl Into<String>,
        commit_date: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            commit_message: commit_message.into(),
            commit_date: commit_date.into(),
            notes: notes.into(),
        }
    }
}

/// Any revision record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Edit or creation-edit snapshot pair
    Edit(EditRecord),
    /// Experiment metadata
    Experiment(ExperimentRecord),
}

impl From<EditRecord> for Record {
    fn from(record: EditRecord) -> Self {
        Record::Edit(record)
    }
}

impl From<ExperimentRecord> for Record {
    fn from(record: ExperimentRecord) -> Self {
        Record::Experiment(record)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_record_decodes_null_prev() {
        let json = r#"{"curr": {"title": "Bread", "description": "crusty",
            "ingredients": "flour", "instructions": "bake"}, "prev": null}"#;
        let record: EditRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.curr.title, "Bread");
        assert!(record.prev.is_none());
    }

    #[test]
    fn field_set_null_fields_become_empty() {
        let json = r#"{"title": "Bread", "description": null,
            "ingredients": "flour", "instructions": "bake"}"#;
        let fields: FieldSet = serde_json::from_str(json).unwrap();
        assert_eq!(fields.description, "");
    }

    #[test]
    fn experiment_record_uses_wire_names() {
        let json = r#"{"commit_msg": "less salt", "commit_date": "Jan 3, 2023",
            "notes": "better"}"#;
        let record: ExperimentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.commit_message, "less salt");
        assert_eq!(record.commit_date, "Jan 3, 2023");
        assert_eq!(record.notes, "better");
    }

    #[test]
    fn changed_fields_follow_display_order() {
        let prev = FieldSet::new("a", "b", "c", "d");
        let curr = prev
            .clone()
            .with(Field::Instructions, "D")
            .with(Field::Title, "A");
        assert_eq!(
            curr.changed_fields(&prev),
            vec![Field::Title, Field::Instructions]
        );
        assert!(prev.changed_fields(&prev).is_empty());
    }
}
