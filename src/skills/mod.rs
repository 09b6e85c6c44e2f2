//! Skill catalog for autocomplete search and role-based suggestions.
//!
//! The bundled catalog is compiled in from `data/skills.json`; a replacement
//! file can be supplied at startup.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::errors::AppError;

/// Maximum number of skills returned by a search.
pub const MAX_SEARCH_RESULTS: usize = 15;

const BUNDLED_CATALOG: &str = include_str!("../../data/skills.json");

#[derive(Debug, Clone, Deserialize)]
pub struct RoleSkills {
    pub role: String,
    pub skills: Vec<String>,
}

/// In-memory skill corpus.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCatalog {
    all_skills: Vec<String>,
    role_suggestions: Vec<RoleSkills>,
    general_skills: Vec<String>,
}

impl SkillCatalog {
    /// Load the catalog from `path`, or the bundled one when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Internal(format!(
                        "Failed to read skill catalog {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_json(&raw)
            }
            None => Self::from_json(BUNDLED_CATALOG),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::Internal(format!("Invalid skill catalog: {}", e)))
    }

    /// Case-insensitive substring search in catalog order, capped at
    /// [`MAX_SEARCH_RESULTS`].
    pub fn search(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        self.all_skills
            .iter()
            .filter(|skill| skill.to_lowercase().contains(&needle))
            .take(MAX_SEARCH_RESULTS)
            .cloned()
            .collect()
    }

    /// Union of the skill lists of every role matching one of `job_titles`.
    ///
    /// A role matches when it contains the lower-cased title or the title
    /// contains it. Falls back to the general list when nothing matches.
    /// The result is sorted and free of duplicates.
    pub fn suggestions<'a>(&self, job_titles: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut found = BTreeSet::new();

        for title in job_titles {
            let title = title.trim().to_lowercase();
            if title.is_empty() {
                continue;
            }
            for entry in &self.role_suggestions {
                if title.contains(&entry.role) || entry.role.contains(&title) {
                    found.extend(entry.skills.iter().cloned());
                }
            }
        }

        if found.is_empty() {
            found.extend(self.general_skills.iter().cloned());
        }

        found.into_iter().collect()
    }

    /// Role names in catalog order.
    pub fn categories(&self) -> Vec<String> {
        self.role_suggestions
            .iter()
            .map(|entry| entry.role.clone())
            .collect()
    }
}
