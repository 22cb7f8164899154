use std::{collections::BTreeMap, fmt};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::RegistryError;

/// A single feed variant of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// RSS feed with an iTunes enclosure per item
    Podcast { url: String },
    /// Atom channel feed of the video platform. The channel mixes several
    /// shows, so entries are filtered by `title_filter`.
    VideoPlatform { url: String, title_filter: String },
}

impl Quality {
    pub fn url(&self) -> &str {
        match self {
            Quality::Podcast { url } | Quality::VideoPlatform { url, .. } => url,
        }
    }

    pub fn is_video_platform(&self) -> bool {
        matches!(self, Quality::VideoPlatform { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowDefinition {
    pub name: String,
    pub keywords: Vec<String>,
    pub qualities: BTreeMap<String, Quality>,
    pub default_quality: String,
    /// Send the media url as plain text instead of an embedded video, for
    /// feeds whose files are too large to be attached inline
    #[serde(default)]
    pub render_as_link_only: bool,
}

impl ShowDefinition {
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    pub fn quality(&self, key: &str) -> Option<&Quality> {
        self.qualities.get(key)
    }

    /// Returns the default quality key together with its feed.
    ///
    /// The registry validates on load that the key exists, so this only
    /// returns `None` for hand-built definitions.
    pub fn default_quality(&self) -> Option<(&str, &Quality)> {
        self.qualities
            .get_key_value(&self.default_quality)
            .map(|(key, quality)| (key.as_str(), quality))
    }

    /// Lowercases keywords, quality keys and title filters so lookups can
    /// compare against an already lowercased query.
    ///
    /// Fails when two quality keys differ only in case.
    pub(crate) fn normalize(&mut self) -> Result<(), RegistryError> {
        self.keywords = self
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .unique()
            .collect();

        let mut qualities = BTreeMap::new();
        for (key, quality) in std::mem::take(&mut self.qualities) {
            let quality = match quality {
                Quality::VideoPlatform { url, title_filter } => Quality::VideoPlatform {
                    url,
                    title_filter: title_filter.to_lowercase(),
                },
                podcast => podcast,
            };
            let key = key.to_lowercase();
            if qualities.contains_key(&key) {
                return Err(RegistryError::DuplicateQuality {
                    show: self.name.clone(),
                    quality: key,
                });
            }
            qualities.insert(key, quality);
        }
        self.qualities = qualities;

        self.default_quality = self.default_quality.to_lowercase();
        Ok(())
    }
}

impl fmt::Display for ShowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [keywords: {}] [qualities: {}] [default: {}]{}",
            self.name,
            self.keywords.iter().join(", "),
            self.qualities.keys().join(", "),
            self.default_quality,
            if self.render_as_link_only {
                " [link only]"
            } else {
                ""
            }
        )
    }
}
