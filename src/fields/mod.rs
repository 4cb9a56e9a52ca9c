// src/fields/mod.rs
//! Field descriptors: the columns a folder listing can show and sort by.

pub mod builder;
pub mod variant;

pub use builder::{FieldSetBuilder, Transform};
pub use variant::Protocol;

use crate::filesystem::{Entry, FileIcon, Value};
use crate::utils::formatter::format_size;
use crate::utils::DateFormat;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub const NAME_FIELD: &str = "name";

pub type ValueFn = Arc<dyn Fn(&Entry) -> Value + Send + Sync>;
pub type DisplayFn = Arc<dyn Fn(&Entry) -> String + Send + Sync>;
pub type CompareFn = Arc<dyn Fn(&Entry, &Entry) -> Ordering + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Char,
    Text,
    Datetime,
    Integer,
    Other(String),
}

impl FieldType {
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldType::Char | FieldType::Text)
    }
}

#[derive(Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub sequence: u32,
    pub optional: bool,
    /// Sort value used when the entry has no truthy attribute of the same name.
    pub value: Option<ValueFn>,
    /// Presentation only; never consulted by the comparator.
    pub display: Option<DisplayFn>,
    /// Replaces the type-based comparison entirely.
    pub compare: Option<CompareFn>,
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("sequence", &self.sequence)
            .field("optional", &self.optional)
            .field("value", &self.value.is_some())
            .field("display", &self.display.is_some())
            .field("compare", &self.compare.is_some())
            .finish()
    }
}

impl FieldDescriptor {
    pub fn new(name: &str, label: &str, field_type: FieldType, sequence: u32) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            sequence,
            optional: false,
            value: None,
            display: None,
            compare: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_value(mut self, f: impl Fn(&Entry) -> Value + Send + Sync + 'static) -> Self {
        self.value = Some(Arc::new(f));
        self
    }

    pub fn with_display(mut self, f: impl Fn(&Entry) -> String + Send + Sync + 'static) -> Self {
        self.display = Some(Arc::new(f));
        self
    }

    pub fn with_compare(
        mut self,
        f: impl Fn(&Entry, &Entry) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.compare = Some(Arc::new(f));
        self
    }

    pub fn is_name(&self) -> bool {
        self.name == NAME_FIELD
    }

    /// Value the comparator sees: own attribute, then extractor, then empty.
    pub fn sort_value(&self, entry: &Entry) -> Value {
        if let Some(v) = entry.attribute(&self.name).filter(Value::is_truthy) {
            return v;
        }
        self.value
            .as_ref()
            .map(|f| f(entry))
            .filter(Value::is_truthy)
            .unwrap_or(Value::Empty)
    }

    pub fn render(&self, entry: &Entry) -> String {
        match &self.display {
            Some(f) => f(entry),
            None => self.sort_value(entry).to_text(),
        }
    }
}

/// Ordered, name-unique collection of field descriptors.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<FieldDescriptor>,
}

impl FieldSet {
    pub(crate) fn from_vec(fields: Vec<FieldDescriptor>) -> Self {
        FieldSet { fields }
    }

    /// Base columns of every folder listing.
    pub fn base(format: &DateFormat) -> Self {
        FieldSet::from_vec(vec![
            FieldDescriptor::new(NAME_FIELD, "Name", FieldType::Char, 10).with_display(|entry| {
                format!("{} {}", FileIcon::for_entry(entry).glyph(), entry.name)
            }),
            datetime_column("created", "Created on", 20, format),
            FieldDescriptor::new("uid", "User", FieldType::Char, 30).optional(),
            datetime_column("mtime", "Modified on", 40, format),
        ])
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Display order. Stable for equal sequences.
    pub fn by_sequence(&self) -> Vec<&FieldDescriptor> {
        let mut fields: Vec<_> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.sequence);
        fields
    }
}

/// Byte size shown human readable. Only local listings carry `size`.
pub fn size_column() -> FieldDescriptor {
    FieldDescriptor::new("size", "Size", FieldType::Integer, 50).optional().with_display(|entry| {
        entry.extra.get("size").and_then(|v| v.as_u64()).map(format_size).unwrap_or_default()
    })
}

fn datetime_column(name: &str, label: &str, sequence: u32, format: &DateFormat) -> FieldDescriptor {
    let key = name.to_string();
    let format = format.clone();
    FieldDescriptor::new(name, label, FieldType::Datetime, sequence)
        .optional()
        .with_display(move |entry| {
            entry.extra.get(&key).map(|v| format.format_value(v)).unwrap_or_default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> DateFormat {
        DateFormat { pattern: "%Y-%m-%d".to_string(), utc: true }
    }

    #[test]
    fn test_base_fields() {
        let fields = FieldSet::base(&utc());
        assert_eq!(fields.names(), vec!["name", "created", "uid", "mtime"]);
        assert!(!fields.get("name").unwrap().optional);
        assert!(fields.get("uid").unwrap().optional);
        assert!(fields.get("size").is_none());
    }

    #[test]
    fn test_name_display_is_decorated_but_sort_value_is_raw() {
        let fields = FieldSet::base(&utc());
        let name = fields.get("name").unwrap();
        let entry = Entry::directory("docs");
        assert_eq!(name.render(&entry), "📁 docs");
        assert_eq!(name.sort_value(&entry), Value::Text("docs".into()));
    }

    #[test]
    fn test_datetime_display() {
        let fields = FieldSet::base(&utc());
        let mtime = fields.get("mtime").unwrap();
        assert_eq!(mtime.render(&Entry::file("a").with("mtime", 86_400)), "1970-01-02");
        assert_eq!(mtime.render(&Entry::file("a")), "");
        assert_eq!(mtime.sort_value(&Entry::file("a").with("mtime", 5)), Value::Number(5.0));
    }

    #[test]
    fn test_sort_value_falls_through_falsy_attribute() {
        let field = FieldDescriptor::new("size", "Size", FieldType::Integer, 50)
            .with_value(|_| Value::Number(7.0));
        assert_eq!(field.sort_value(&Entry::file("a").with("size", 0)), Value::Number(7.0));
        assert_eq!(field.sort_value(&Entry::file("a").with("size", 3)), Value::Number(3.0));

        let bare = FieldDescriptor::new("size", "Size", FieldType::Integer, 50);
        assert_eq!(bare.sort_value(&Entry::file("a")), Value::Empty);
    }

    #[test]
    fn test_size_column() {
        let size = size_column();
        assert_eq!(size.render(&Entry::file("a").with("size", 2_300_000)), "2.3M");
        assert_eq!(size.render(&Entry::directory("docs")), "");
        assert_eq!(size.sort_value(&Entry::file("a").with("size", 12)), Value::Number(12.0));

        let fields = FieldSetBuilder::new(FieldSet::base(&utc())).append(size_column()).build().unwrap();
        assert_eq!(fields.by_sequence().last().map(|f| f.name.as_str()), Some("size"));
    }

    #[test]
    fn test_by_sequence() {
        let fields = FieldSet::from_vec(vec![
            FieldDescriptor::new("b", "B", FieldType::Char, 20),
            FieldDescriptor::new("a", "A", FieldType::Char, 10),
            FieldDescriptor::new("c", "C", FieldType::Char, 20),
        ]);
        let names: Vec<_> = fields.by_sequence().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
