// src/error.rs
//! Error types for the library side of fsfolder.
//!
//! The comparator itself never fails; these cover field set assembly,
//! entry providers, the folder view and configuration loading.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("duplicate field name '{0}'")]
    DuplicateName(String),

    #[error("field set is empty")]
    Empty,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid listing: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no such entry: {0}")]
    NotFound(String),

    #[error("invalid path segment '{0}'")]
    InvalidPath(String),

    #[error("'{0}' already exists")]
    AlreadyExists(String),

    #[error("{0} is not supported by this provider")]
    Unsupported(&'static str),
}

impl ProviderError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ProviderError::Io { path: path.into(), source }
    }
}

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("'{0}' is not a directory")]
    NotADirectory(String),

    #[error("'{0}' is not a file")]
    NotAFile(String),

    #[error("field '{0}' cannot be hidden")]
    RequiredField(String),

    #[error("nothing to paste")]
    EmptyClipboard,

    #[error("invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
