//! Profile and exam input files.
//!
//! The persistence layer that owns a user's exams lives outside this crate;
//! these files are how it (or a person at a terminal) hands data to the
//! engine. Both TOML and JSON are accepted:
//!
//! ```toml
//! [profile]
//! goal_mode = "good"
//! weekly_hours = 14
//!
//! [[exams]]
//! name = "Linear Algebra"
//! date = "2026-02-10"
//! cfu = 9
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Config;
use crate::error::{InputError, Result};
use crate::exam::Exam;
use crate::profile::Profile;

/// Contents of an input file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyInput {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub exams: Vec<Exam>,
}

impl StudyInput {
    /// Read an input file, choosing the format by extension.
    ///
    /// Exams without an id get a fresh UUID. Exams missing a name or date
    /// are kept here and ignored later by the engine.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let parse_failed = |message: String| InputError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let mut input: StudyInput = match extension.as_deref() {
            Some("toml") => toml::from_str(&content).map_err(|e| parse_failed(e.to_string()))?,
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| parse_failed(e.to_string()))?
            }
            _ => return Err(InputError::UnsupportedFormat(path.to_path_buf()).into()),
        };

        input.assign_missing_ids();
        tracing::debug!(path = %path.display(), exams = input.exams.len(), "loaded study input");
        Ok(input)
    }

    fn assign_missing_ids(&mut self) {
        for exam in self.exams.iter_mut().filter(|e| e.id.trim().is_empty()) {
            exam.id = Uuid::new_v4().to_string();
        }
    }

    /// The file's profile, or the configured default.
    pub fn resolve_profile(&self, config: &Config) -> Profile {
        self.profile.clone().unwrap_or_else(|| config.profile.clone())
    }
}
