//! Core types used throughout the run orchestrator

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Global run ID singleton - set once at startup
static RUN_ID: OnceLock<RunId> = OnceLock::new();

/// Identifier stamped on every log line of a single orchestrator run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Initialize the global run ID (subsequent calls return the first value)
    pub fn init() -> &'static RunId {
        RUN_ID.get_or_init(|| RunId(Uuid::new_v4()))
    }

    /// Get the global run ID, initializing it on first use
    pub fn current() -> &'static RunId {
        Self::init()
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps log lines readable
        let full = self.0.simple().to_string();
        write!(f, "{}", &full[..8])
    }
}

/// The four stages of a demo run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStep {
    /// Dataset acquisition (download + extract, skipped when cached)
    Fetch,
    /// Resolution of the processing tool's install directory
    Locate,
    /// Configuration file overrides
    Patch,
    /// Processing entry point invocation
    Invoke,
}

impl fmt::Display for RunStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStep::Fetch => write!(f, "fetch"),
            RunStep::Locate => write!(f, "locate"),
            RunStep::Patch => write!(f, "patch"),
            RunStep::Invoke => write!(f, "invoke"),
        }
    }
}

/// Dotted address of a field inside a JSON document, e.g. `general_options.debug_mode`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final key of the path
    pub fn leaf(&self) -> &str {
        // Parsing guarantees at least one segment
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl FromStr for FieldPath {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SharedError::InvalidFieldPath { path: s.to_string() });
        }

        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(SharedError::InvalidFieldPath { path: s.to_string() });
        }

        Ok(Self { segments })
    }
}

impl TryFrom<String> for FieldPath {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// A single "set this field to this value" mutation of a JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOverride {
    pub path: FieldPath,
    pub value: Value,
}

impl FieldOverride {
    pub fn new(path: FieldPath, value: impl Into<Value>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }

    /// Set the value at `path` inside `document`.
    ///
    /// Missing or `null` intermediates (and a `null` root) become empty
    /// objects. Any other non-object intermediate is rejected rather than
    /// overwritten, and the document is left untouched in that case.
    pub fn apply(&self, document: &mut Value) -> SharedResult<()> {
        let (leaf, parents) = match self.path.segments.split_last() {
            Some(split) => split,
            None => {
                return Err(SharedError::InvalidFieldPath {
                    path: self.path.to_string(),
                })
            }
        };

        if document.is_null() {
            *document = Value::Object(Map::new());
        }
        let mut current = document.as_object_mut().ok_or_else(|| SharedError::NotAnObject {
            path: String::from("."),
        })?;

        for (depth, segment) in parents.iter().enumerate() {
            let entry = current.entry(segment.clone()).or_insert(Value::Null);
            if entry.is_null() {
                *entry = Value::Object(Map::new());
            }

            current = entry.as_object_mut().ok_or_else(|| SharedError::NotAnObject {
                path: self.path.segments[..=depth].join("."),
            })?;
        }

        current.insert(leaf.clone(), self.value.clone());
        Ok(())
    }
}

impl fmt::Display for FieldOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.path, self.value)
    }
}
