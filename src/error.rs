//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ChangeError: Invalid or unreadable change declarations
//! - GraphError: Dependency cycles among changed projects
//! - ManifestError: Issues with project manifest files
//! - ConfigError: Issues with the workspace configuration
//! - IoError: File system operation failures

use crate::domain::ChangeType;
use semver::Version;
use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Change declaration related errors
    #[error(transparent)]
    Change(#[from] ChangeError),

    /// Dependency graph related errors
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to change declarations
#[derive(Error, Debug)]
pub enum ChangeError {
    /// A declaration targets a project that is not in the workspace
    #[error("change declared for unknown project '{name}'")]
    UnknownProject { name: String },

    /// Failed to read a change file
    #[error("failed to read change file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Change file is not valid JSON or has the wrong shape
    #[error("failed to parse change file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Bumping the project's version would overflow a version component
    #[error("cannot apply {change_type} bump to '{name}' at {version}: version component overflows")]
    VersionOverflow {
        name: String,
        version: Version,
        change_type: ChangeType,
    },
}

/// Errors related to the dependency graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// Changed projects depend on each other in a cycle
    #[error("dependency cycle among changed projects: {}", projects.join(", "))]
    Cycle { projects: Vec<String> },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Project version is not a valid semantic version
    #[error("invalid version '{version}' in {path}: {message}")]
    InvalidVersion {
        path: PathBuf,
        version: String,
        message: String,
    },

    /// Manifest name does not match the configured project name
    #[error("manifest {path} is named '{found}', expected '{expected}'")]
    NameMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// A field to rewrite was not found in the manifest text
    #[error("field '{field}' with value '{value}' not found in {path}")]
    FieldNotFound {
        path: PathBuf,
        field: String,
        value: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file exists but could not be read
    #[error("failed to read configuration file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// The same project name is configured twice
    #[error("project '{name}' is configured more than once")]
    DuplicateProject { name: String },

    /// No projects configured
    #[error("no projects configured in {path}")]
    EmptyWorkspace { path: PathBuf },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChangeError {
    /// Creates a new UnknownProject error
    pub fn unknown_project(name: impl Into<String>) -> Self {
        ChangeError::UnknownProject { name: name.into() }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChangeError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new FieldNotFound error
    pub fn field_not_found(
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ManifestError::FieldNotFound {
            path: path.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

impl IoError {
    /// Creates a new Generic IO error
    pub fn generic(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Generic {
            path: path.into(),
            source,
        }
    }
}
