// src/sort/compare.rs
use super::collate::compare_text;
use super::{Direction, SortCriterion};
use crate::fields::FieldDescriptor;
use crate::filesystem::{Entry, Value};
use std::cmp::Ordering;

/// Orders two entries by the first criterion that tells them apart.
///
/// On the name field directories always come before files; that partition
/// ignores the criterion's direction.
pub fn compare_entries(a: &Entry, b: &Entry, criteria: &[SortCriterion]) -> Ordering {
    for criterion in criteria {
        let field = &criterion.field;
        if field.is_name() {
            let kind = a.kind_tag().cmp(b.kind_tag());
            if kind != Ordering::Equal {
                return kind;
            }
        }
        let ordering = match criterion.direction {
            Direction::Ascending => compare_field(field, a, b),
            Direction::Descending => compare_field(field, a, b).reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Ascending comparison on one field, before direction is applied.
pub fn compare_field(field: &FieldDescriptor, a: &Entry, b: &Entry) -> Ordering {
    if let Some(compare) = &field.compare {
        return compare(a, b);
    }
    let left = field.sort_value(a);
    let right = field.sort_value(b);
    compare_values(field, &left, &right)
}

/// On textual fields every non-empty value is collated by its text form,
/// whichever side holds text. That keeps the relation a total order when a
/// listing mixes numbers and strings under one attribute.
fn compare_values(field: &FieldDescriptor, left: &Value, right: &Value) -> Ordering {
    if !field.field_type.is_textual() {
        return left.generic_cmp(right);
    }
    match (left, right) {
        (Value::Empty, Value::Empty) => Ordering::Equal,
        (Value::Empty, _) => Ordering::Less,
        (_, Value::Empty) => Ordering::Greater,
        _ => compare_text(&left.to_text(), &right.to_text()),
    }
}

/// Sorted copy of `entries`; empty criteria leave the order untouched.
pub fn sort_entries(mut entries: Vec<Entry>, criteria: &[SortCriterion]) -> Vec<Entry> {
    sort_in_place(&mut entries, criteria);
    entries
}

pub fn sort_in_place(entries: &mut [Entry], criteria: &[SortCriterion]) {
    if criteria.is_empty() {
        return;
    }
    entries.sort_by(|a, b| compare_entries(a, b, criteria));
}
