//! The marker file rewritten before every commit.
//!
//! Its only job is to give each commit a change to stage; the content is
//! the timestamp of the commit being made.

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default marker file name, relative to the repository root.
pub const MARKER_FILE: &str = "data.json";

/// On-disk content of the marker file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// RFC 3339 timestamp of the commit the marker was written for
    pub date: String,
}

impl Marker {
    pub fn new(timestamp: &DateTime<FixedOffset>) -> Self {
        Self {
            date: timestamp.to_rfc3339(),
        }
    }

    /// Serialize as a single JSON line.
    pub fn to_json(&self) -> Result<String, Error> {
        let mut json = serde_json::to_string(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Overwrite `path` with this marker.
    pub async fn write(&self, path: &Path) -> Result<(), Error> {
        let json = self.to_json()?;
        tokio::fs::write(path, json).await.map_err(|e| Error::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// Errors writing the marker file.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to serialize marker")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write marker to '{path}'")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
