/// Tag reader implementation using lofty
use crate::error::{MetadataError, Result};
use lofty::{AudioFile, TaggedFileExt};
use std::time::Duration;
use std::path::Path;

/// Descriptive tags of a file; every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Duration from the file's audio properties; `None` when lofty reports zero
    pub duration: Option<Duration>,
}

/// Tag reader using the lofty library
pub struct LoftyTagReader;

impl LoftyTagReader {
    /// Create a new tag reader
    pub fn new() -> Self {
        Self
    }

    /// Extract tags from lofty tag
    fn extract_from_tag(tag: &lofty::Tag) -> RawTags {
        let mut tags = RawTags::default();

        // lofty 0.18 API - iterate through items
        for item in tag.items() {
            match item.key() {
                lofty::ItemKey::TrackTitle => {
                    tags.title = item.value().text().map(|s| s.to_string());
                }
                lofty::ItemKey::TrackArtist => {
                    tags.artist = item.value().text().map(|s| s.to_string());
                }
                lofty::ItemKey::AlbumTitle => {
                    tags.album = item.value().text().map(|s| s.to_string());
                }
                _ => {}
            }
        }

        tags
    }

    /// Read title/artist/album from `path`
    pub fn read(&self, path: &Path) -> Result<RawTags> {
        if !path.exists() {
            return Err(MetadataError::unreadable(
                path.display().to_string(),
                "file not found",
            ));
        }

        let tagged_file = lofty::read_from_path(path)?;

        // Primary tag first, then whatever the container carries
        let mut tags = if let Some(primary) = tagged_file.primary_tag() {
            Self::extract_from_tag(primary)
        } else if let Some(first) = tagged_file.tags().first() {
            Self::extract_from_tag(first)
        } else {
            RawTags::default()
        };

        let duration = tagged_file.properties().duration();
        tags.duration = (!duration.is_zero()).then_some(duration);

        Ok(tags)
    }
}

impl Default for LoftyTagReader {
    fn default() -> Self {
        Self::new()
    }
}
