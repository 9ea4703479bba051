//! Card image metadata.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image registered for use on card faces.
///
/// Persisted as `{ "id", "name", "filePath", "dateAdded" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    id: String,
    name: String,
    file_path: PathBuf,
    date_added: DateTime<Utc>,
}

impl CardImage {
    /// Create an image entry with a fresh random id, dated now.
    #[must_use]
    pub fn new(name: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, file_path)
    }

    /// Create an image entry under a known id, dated now.
    #[must_use]
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            file_path: file_path.into(),
            date_added: Utc::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    #[must_use]
    pub fn date_added(&self) -> DateTime<Utc> {
        self.date_added
    }
}
