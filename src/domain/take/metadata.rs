//! Metadata written into accepted takes

use crate::domain::script::{Block, Progression};

/// Filename format used to mark an abandoned take
pub const SKIP_FILENAME: &str = "skip";

/// Filename stem for a block: `"<script_file>-<one-based index>"`.
///
/// Retakes reuse the stem, so the backend overwrites the previous attempt.
pub fn filename_stem(script_file: &str, position: usize) -> String {
    format!("{}-{}", script_file, position + 1)
}

/// Author and copyright strings supplied by configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credits {
    pub author: Option<String>,
    pub copyright: Option<String>,
}

/// Tags for one accepted take
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeMetadata {
    pub title: String,
    pub track: String,
    pub description: String,
    pub lyrics: String,
    pub album: String,
    pub copyright: Option<String>,
    pub author: Option<String>,
    pub album_artist: Option<String>,
}

impl TakeMetadata {
    /// Derive the tags from the script title, position and block
    pub fn compute(
        script_title: &str,
        progression: Progression,
        block: &Block,
        credits: &Credits,
    ) -> Self {
        let track = progression.to_string();
        Self {
            title: format!("{} - {}", script_title, track),
            track,
            description: block.text.clone(),
            lyrics: block.text.clone(),
            album: script_title.to_string(),
            copyright: credits.copyright.clone(),
            author: credits.author.clone(),
            album_artist: credits.author.clone(),
        }
    }

    /// Key/value pairs in tagger key naming, absent values included
    pub fn entries(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("title", Some(self.title.as_str())),
            ("track", Some(self.track.as_str())),
            ("description", Some(self.description.as_str())),
            ("lyrics", Some(self.lyrics.as_str())),
            ("album", Some(self.album.as_str())),
            ("copyright", self.copyright.as_deref()),
            ("author", self.author.as_deref()),
            ("album_artist", self.album_artist.as_deref()),
        ]
    }
}
