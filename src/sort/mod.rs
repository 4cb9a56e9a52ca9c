// src/sort/mod.rs
pub mod collate;
pub mod compare;

pub use compare::{compare_entries, compare_field, sort_entries, sort_in_place};

use crate::fields::FieldDescriptor;
use crate::filesystem::Entry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Ascending => "▲",
            Direction::Descending => "▼",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => f.write_str("asc"),
            Direction::Descending => f.write_str("desc"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Ascending),
            "desc" | "descending" => Ok(Direction::Descending),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortCriterion {
    pub field: FieldDescriptor,
    pub direction: Direction,
}

impl SortCriterion {
    pub fn new(field: FieldDescriptor, direction: Direction) -> Self {
        SortCriterion { field, direction }
    }
}

/// Active sort criteria, primary first. A field appears at most once.
#[derive(Debug, Clone, Default)]
pub struct SortStack {
    criteria: Vec<SortCriterion>,
}

impl SortStack {
    pub fn new() -> Self {
        SortStack::default()
    }

    /// Sort request on `field`: flips the primary, otherwise promotes
    /// `field` to primary ascending and keeps the rest in order.
    pub fn toggle(&mut self, field: &FieldDescriptor) {
        if let Some(primary) = self.criteria.first_mut() {
            if primary.field.name == field.name {
                primary.direction = primary.direction.flipped();
                log::debug!("sort on '{}' flipped to {}", field.name, primary.direction);
                return;
            }
        }
        self.criteria.retain(|c| c.field.name != field.name);
        self.criteria.insert(0, SortCriterion::new(field.clone(), Direction::Ascending));
        log::debug!("sort on '{}' promoted to primary", field.name);
    }

    pub fn toggled(mut self, field: &FieldDescriptor) -> Self {
        self.toggle(field);
        self
    }

    pub fn criteria(&self) -> &[SortCriterion] {
        &self.criteria
    }

    pub fn primary(&self) -> Option<&SortCriterion> {
        self.criteria.first()
    }

    pub fn direction_of(&self, name: &str) -> Option<Direction> {
        self.criteria.iter().find(|c| c.field.name == name).map(|c| c.direction)
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn clear(&mut self) {
        self.criteria.clear();
    }

    pub fn sort(&self, entries: &mut [Entry]) {
        sort_in_place(entries, &self.criteria);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldSet;
    use crate::utils::DateFormat;

    fn fields() -> FieldSet {
        FieldSet::base(&DateFormat::default())
    }

    fn order(stack: &SortStack) -> Vec<(String, Direction)> {
        stack.criteria().iter().map(|c| (c.field.name.clone(), c.direction)).collect()
    }

    #[test]
    fn test_toggle_promotes_new_field() {
        let fields = fields();
        let mut stack = SortStack::new();
        stack.toggle(fields.get("name").unwrap());
        stack.toggle(fields.get("mtime").unwrap());
        assert_eq!(
            order(&stack),
            vec![("mtime".to_string(), Direction::Ascending), ("name".to_string(), Direction::Ascending)]
        );
    }

    #[test]
    fn test_toggle_primary_flips_direction() {
        let fields = fields();
        let name = fields.get("name").unwrap();
        let stack = SortStack::new().toggled(name);
        let flipped = stack.clone().toggled(name);
        assert_eq!(flipped.direction_of("name"), Some(Direction::Descending));
        assert_eq!(flipped.len(), 1);
        let back = flipped.toggled(name);
        assert_eq!(order(&back), order(&stack));
    }

    #[test]
    fn test_toggle_moves_existing_field_without_duplicates() {
        let fields = fields();
        let mut stack = SortStack::new();
        for name in ["uid", "mtime", "name"] {
            stack.toggle(fields.get(name).unwrap());
        }
        // mtime descending, then promote uid again
        stack.toggle(fields.get("mtime").unwrap());
        stack.toggle(fields.get("mtime").unwrap());
        stack.toggle(fields.get("uid").unwrap());
        assert_eq!(
            order(&stack),
            vec![
                ("uid".to_string(), Direction::Ascending),
                ("mtime".to_string(), Direction::Descending),
                ("name".to_string(), Direction::Ascending),
            ]
        );
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("desc".parse::<Direction>(), Ok(Direction::Descending));
        assert_eq!("Ascending".parse::<Direction>(), Ok(Direction::Ascending));
        assert!("up".parse::<Direction>().is_err());
        assert_eq!(Direction::Descending.to_string(), "desc");
    }
}
