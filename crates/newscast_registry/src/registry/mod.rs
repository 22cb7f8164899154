use std::{collections::HashSet, path::Path};

use crate::ShowDefinition;

const BUILTIN_SHOWS: &str = include_str!("../../shows.json");

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Failed to read show registry: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse show registry: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Show registry contains no shows")]
    Empty,
    #[error("Show '{0}' is listed more than once")]
    DuplicateShow(String),
    #[error("Show '{show}' lists quality '{quality}' more than once")]
    DuplicateQuality { show: String, quality: String },
    #[error("Show '{0}' has no keywords")]
    NoKeywords(String),
    #[error("Default quality '{quality}' of show '{show}' is not one of its qualities")]
    UnknownDefaultQuality { show: String, quality: String },
}

/// Immutable table of every supported show, kept in declaration order.
#[derive(Debug, Clone)]
pub struct ShowRegistry {
    shows: Vec<ShowDefinition>,
}

impl ShowRegistry {
    /// The registry embedded into the binary at build time
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json(BUILTIN_SHOWS)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).inspect_err(
            |e| tracing::error!(error = ?e, path = %path.display(), "Failed to read show registry"),
        )?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let shows = serde_json::from_str::<Vec<ShowDefinition>>(json)?;
        Self::new(shows)
    }

    /// Normalizes and validates the given shows.
    pub fn new(mut shows: Vec<ShowDefinition>) -> Result<Self, RegistryError> {
        if shows.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut names = HashSet::new();
        for show in shows.iter_mut() {
            show.normalize()?;

            if !names.insert(show.name.clone()) {
                return Err(RegistryError::DuplicateShow(show.name.clone()));
            }
            if show.keywords.is_empty() {
                return Err(RegistryError::NoKeywords(show.name.clone()));
            }
            if show.default_quality().is_none() {
                return Err(RegistryError::UnknownDefaultQuality {
                    show: show.name.clone(),
                    quality: show.default_quality.clone(),
                });
            }
        }

        tracing::debug!(count = shows.len(), "Loaded show registry");
        Ok(ShowRegistry { shows })
    }

    /// All shows listing `keyword` among their keywords, in registry order.
    /// No match is an empty result, not an error.
    pub fn lookup(&self, keyword: &str) -> Vec<&ShowDefinition> {
        let keyword = keyword.to_lowercase();
        self.shows
            .iter()
            .filter(|show| show.matches_keyword(&keyword))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShowDefinition> {
        self.shows.iter()
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }
}

impl<'a> IntoIterator for &'a ShowRegistry {
    type Item = &'a ShowDefinition;
    type IntoIter = std::slice::Iter<'a, ShowDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.shows.iter()
    }
}
