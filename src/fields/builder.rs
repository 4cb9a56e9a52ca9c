// src/fields/builder.rs
use super::{FieldDescriptor, FieldSet};
use crate::error::FieldError;
use std::collections::HashSet;

/// One named change applied to a base field list.
#[derive(Debug, Clone)]
pub enum Transform {
    Remove(String),
    Append(FieldDescriptor),
    /// Swap the descriptor with the same name in place; no-op if absent.
    Replace(FieldDescriptor),
}

/// Assembles one immutable [`FieldSet`] from a base list plus ordered
/// transformations.
pub struct FieldSetBuilder {
    base: Vec<FieldDescriptor>,
    transforms: Vec<Transform>,
}

impl FieldSetBuilder {
    pub fn new(base: FieldSet) -> Self {
        FieldSetBuilder { base: base.fields, transforms: Vec::new() }
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn remove(self, name: &str) -> Self {
        self.transform(Transform::Remove(name.to_string()))
    }

    pub fn append(self, field: FieldDescriptor) -> Self {
        self.transform(Transform::Append(field))
    }

    pub fn replace(self, field: FieldDescriptor) -> Self {
        self.transform(Transform::Replace(field))
    }

    pub fn build(self) -> Result<FieldSet, FieldError> {
        let mut fields = self.base;
        for transform in self.transforms {
            match transform {
                Transform::Remove(name) => fields.retain(|f| f.name != name),
                Transform::Append(field) => fields.push(field),
                Transform::Replace(field) => {
                    match fields.iter_mut().find(|f| f.name == field.name) {
                        Some(slot) => *slot = field,
                        None => log::debug!("replace skipped, no field named '{}'", field.name),
                    }
                }
            }
        }

        if fields.is_empty() {
            return Err(FieldError::Empty);
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(FieldError::DuplicateName(field.name.clone()));
            }
        }
        Ok(FieldSet::from_vec(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldType;

    fn base() -> FieldSet {
        FieldSet::from_vec(vec![
            FieldDescriptor::new("name", "Name", FieldType::Char, 10),
            FieldDescriptor::new("created", "Created on", FieldType::Datetime, 20),
            FieldDescriptor::new("uid", "User", FieldType::Char, 30),
            FieldDescriptor::new("mtime", "Modified on", FieldType::Datetime, 40),
        ])
    }

    #[test]
    fn test_transforms_preserve_base_order() {
        let fields = FieldSetBuilder::new(base())
            .remove("uid")
            .append(FieldDescriptor::new("size", "Size", FieldType::Integer, 25))
            .replace(FieldDescriptor::new("created", "Created", FieldType::Char, 20))
            .build()
            .unwrap();
        assert_eq!(fields.names(), vec!["name", "created", "mtime", "size"]);
        assert_eq!(fields.get("created").unwrap().field_type, FieldType::Char);
    }

    #[test]
    fn test_replace_missing_is_noop() {
        let fields = FieldSetBuilder::new(base())
            .replace(FieldDescriptor::new("nope", "Nope", FieldType::Char, 1))
            .build()
            .unwrap();
        assert_eq!(fields.len(), 4);
        assert!(fields.get("nope").is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = FieldSetBuilder::new(base())
            .append(FieldDescriptor::new("uid", "Owner", FieldType::Char, 50))
            .build()
            .unwrap_err();
        assert_eq!(err, FieldError::DuplicateName("uid".to_string()));
    }

    #[test]
    fn test_removing_everything_fails() {
        let err = FieldSetBuilder::new(base())
            .remove("name")
            .remove("created")
            .remove("uid")
            .remove("mtime")
            .build()
            .unwrap_err();
        assert_eq!(err, FieldError::Empty);
    }
}
