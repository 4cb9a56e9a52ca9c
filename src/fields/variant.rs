// src/fields/variant.rs
use super::{FieldDescriptor, FieldSet, FieldSetBuilder, FieldType};
use crate::error::FieldError;
use crate::filesystem::{Entry, Value};
use crate::utils::formatter::{datetime_value, parse_rfc3339, parse_space_separated_utc};
use crate::utils::DateFormat;
use std::fmt;
use std::str::FromStr;

/// Storage protocol behind a folder; decides which columns exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    #[default]
    Default,
    WebDav,
    MsGraph,
}

impl Protocol {
    pub fn tag(&self) -> &'static str {
        match self {
            Protocol::Default => "default",
            Protocol::WebDav => "webdav",
            Protocol::MsGraph => "msgd",
        }
    }

    /// Reads a folder record's `protocol` value, a tag or a list of tags.
    pub fn detect(value: &serde_json::Value) -> Self {
        let tags: Vec<&str> = match value {
            serde_json::Value::String(s) => vec![s.as_str()],
            serde_json::Value::Array(items) => items.iter().filter_map(|v| v.as_str()).collect(),
            _ => Vec::new(),
        };
        if tags.contains(&Protocol::MsGraph.tag()) {
            Protocol::MsGraph
        } else if tags.contains(&Protocol::WebDav.tag()) {
            Protocol::WebDav
        } else {
            Protocol::Default
        }
    }

    pub fn fields(&self, format: &DateFormat) -> Result<FieldSet, FieldError> {
        let builder = FieldSetBuilder::new(FieldSet::base(format));
        let builder = match self {
            Protocol::Default => builder,
            Protocol::WebDav => builder.remove("uid").remove("created").replace(webdav_mtime(format)),
            Protocol::MsGraph => builder
                .remove("uid")
                .append(graph_text("description", "Description", 15, "/item_info/description"))
                .append(graph_text(
                    "createdBy",
                    "Created By",
                    35,
                    "/item_info/createdBy/user/displayName",
                ))
                .append(graph_text(
                    "modifiedBy",
                    "Modified By",
                    45,
                    "/item_info/lastModifiedBy/user/displayName",
                ))
                .replace(graph_created(format))
                .replace(graph_datetime(
                    "mtime",
                    "Modified on",
                    40,
                    GRAPH_MODIFIED,
                    format,
                )),
        };
        builder.build()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "default" | "file" => Ok(Protocol::Default),
            "webdav" => Ok(Protocol::WebDav),
            "msgd" | "msgraph" => Ok(Protocol::MsGraph),
            other => Err(format!("unknown protocol '{}'", other)),
        }
    }
}

const GRAPH_CREATED: &str = "/item_info/fileSystemInfo/createdDateTime";
const GRAPH_MODIFIED: &str = "/item_info/fileSystemInfo/lastModifiedDateTime";

fn webdav_mtime(format: &DateFormat) -> FieldDescriptor {
    let format = format.clone();
    let modified = |entry: &Entry| {
        entry.extra.get("modified").and_then(|v| v.as_str()).and_then(parse_space_separated_utc)
    };
    FieldDescriptor::new("mtime", "Modified on", FieldType::Datetime, 40)
        .optional()
        .with_value(move |entry| datetime_value(modified(entry)))
        .with_display(move |entry| modified(entry).map(|dt| format.format(&dt)).unwrap_or_default())
}

fn graph_text(name: &str, label: &str, sequence: u32, pointer: &'static str) -> FieldDescriptor {
    FieldDescriptor::new(name, label, FieldType::Char, sequence)
        .optional()
        .with_value(move |entry| {
            entry.pointer_str(pointer).map(Value::from).unwrap_or(Value::Empty)
        })
}

fn graph_datetime(
    name: &str,
    label: &str,
    sequence: u32,
    pointer: &'static str,
    format: &DateFormat,
) -> FieldDescriptor {
    let format = format.clone();
    FieldDescriptor::new(name, label, FieldType::Datetime, sequence)
        .optional()
        .with_value(move |entry| datetime_value(entry.pointer_str(pointer).and_then(parse_rfc3339)))
        .with_display(move |entry| {
            entry
                .pointer_str(pointer)
                .and_then(parse_rfc3339)
                .map(|dt| format.format(&dt))
                .unwrap_or_default()
        })
}

fn graph_created(format: &DateFormat) -> FieldDescriptor {
    let instant = |entry: &Entry| entry.pointer_str(GRAPH_CREATED).and_then(parse_rfc3339);
    graph_datetime("created", "Created on", 20, GRAPH_CREATED, format)
        .with_compare(move |a, b| instant(a).cmp(&instant(b)))
}
