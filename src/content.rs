use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{MAX_CLASS_ID, MIN_CLASS_ID};

/// Module a class belongs to: system design or low-level design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassModule {
    Sys,
    Lld,
}

/// Lightweight entry in the class index, used by the catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub id: u32,
    pub module: ClassModule,
    pub slug: String,
    pub title: String,
    pub topics: Vec<String>,
    pub estimated_read_minutes: u32,
}

/// Full topic record for one class.
///
/// Section members are kept as raw JSON values: their inner shape is owned
/// by the content authors and the study-guide front-end, and the backend
/// passes them through untouched. Shape minimums are checked by content
/// tests, not at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTopic {
    pub id: u32,
    pub module: ClassModule,
    pub slug: String,
    pub title: String,
    pub topics: Vec<String>,
    pub estimated_read_minutes: u32,
    pub sections: ClassSections,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSections {
    pub concepts: Vec<serde_json::Value>,
    pub architecture: serde_json::Value,
    pub tradeoffs: Vec<serde_json::Value>,
    pub examples: Vec<serde_json::Value>,
    pub interview_qa: Vec<serde_json::Value>,
    pub revision: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentPayload {
    class_index: Vec<ClassSummary>,
    classes: Vec<ClassTopic>,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable catalog payload, loaded once at startup and shared by
/// reference across request handlers. Never mutated after load.
#[derive(Debug)]
pub struct ContentStore {
    class_index: Vec<ClassSummary>,
    classes: Vec<ClassTopic>,
}

impl ContentStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let payload: ContentPayload =
            serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        let mut classes = payload.classes;
        classes.sort_by_key(|c| c.id);
        let mut class_index = payload.class_index;
        class_index.sort_by_key(|c| c.id);

        Ok(Self {
            class_index,
            classes,
        })
    }

    /// The full class index, ascending by id.
    pub fn class_index(&self) -> &[ClassSummary] {
        &self.class_index
    }

    /// Full topic record for one class, or None when the id is absent.
    /// Callers must validate the id range first; ids outside [1, 24]
    /// are a caller error, not a lookup miss.
    pub fn class_by_id(&self, id: u32) -> Option<&ClassTopic> {
        debug_assert!((MIN_CLASS_ID..=MAX_CLASS_ID).contains(&id));
        self.classes.iter().find(|c| c.id == id)
    }
}
