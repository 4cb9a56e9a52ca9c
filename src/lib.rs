// src/lib.rs
//! Folder listings with sortable, protocol-dependent columns.
//!
//! Entries come from an [`filesystem::EntryProvider`], columns from a
//! [`fields::FieldSet`], and the order from a [`sort::SortStack`] that the
//! user reshapes one column click at a time.

pub mod app;
pub mod config;
pub mod error;
pub mod fields;
pub mod filesystem;
pub mod logger;
pub mod sort;
pub mod utils;

pub use error::{ConfigError, FieldError, ProviderError, ViewError};
pub use fields::{FieldDescriptor, FieldSet, FieldType, Protocol};
pub use filesystem::{Entry, EntryKind, EntryProvider, FolderView, Value};
pub use sort::{sort_entries, Direction, SortCriterion, SortStack};
