//! In-memory handle over the franchise library.
//!
//! Entries are kept most-recent-first. Only `competitors` and `performance`
//! are ever edited in place; everything else is fixed once an entry is added.

use crate::models::{LibraryEntry, Performance, Trend, VideoFormat};
use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Fields supplied when a user adds an entry by hand
#[derive(Debug, Clone)]
pub struct ManualEntry {
    pub title: String,
    pub format: VideoFormat,
    pub link: Option<String>,
}

/// Ordered collection of library entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    entries: Vec<LibraryEntry>,
}

impl Library {
    pub fn from_entries(entries: Vec<LibraryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&LibraryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Case-sensitive exact title match
    pub fn contains_title(&self, title: &str) -> bool {
        self.entries.iter().any(|e| e.title == title)
    }

    /// Allocate an id derived from the current time, unique within the library
    pub fn next_id(&self) -> i64 {
        self.next_id_from(Utc::now().timestamp_millis())
    }

    fn next_id_from(&self, now_millis: i64) -> i64 {
        let mut id = now_millis;
        while self.get(id).is_some() {
            id += 1;
        }
        id
    }

    /// Put an entry at the front; a clashing id is reassigned
    pub fn insert(&mut self, mut entry: LibraryEntry) -> i64 {
        if self.get(entry.id).is_some() {
            entry.id = self.next_id_from(entry.id);
        }
        let id = entry.id;
        debug!(id = id, title = %entry.title, "Library entry added");
        self.entries.insert(0, entry);
        id
    }

    /// Insert unless an entry with the same title already exists
    pub fn insert_unique_title(&mut self, entry: LibraryEntry) -> Option<i64> {
        if self.contains_title(&entry.title) {
            info!(title = %entry.title, "Title already in library, skipping save");
            return None;
        }
        Some(self.insert(entry))
    }

    /// Add a hand-written entry; titles need not be unique here
    pub fn add_manual(&mut self, manual: ManualEntry) -> Result<i64> {
        let title = manual.title.trim();
        if title.is_empty() {
            bail!("Library entries need a title");
        }

        let entry = LibraryEntry {
            id: self.next_id(),
            title: title.to_string(),
            format: manual.format,
            media_type: None,
            unit_count: None,
            virality_score: 5,
            trend: Trend::Unknown,
            reasoning: String::new(),
            competitors: Vec::new(),
            performance: Performance::default(),
            link: manual.link.filter(|l| !l.trim().is_empty()),
        };
        Ok(self.insert(entry))
    }

    /// Remove by id; returns whether anything was removed
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    pub fn add_competitor(&mut self, id: i64, url: &str) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            bail!("Competitor link is empty");
        }
        self.entry_mut(id)?.competitors.push(url.to_string());
        Ok(())
    }

    /// Remove the competitor at `index`, returning its URL
    pub fn remove_competitor(&mut self, id: i64, index: usize) -> Result<String> {
        let entry = self.entry_mut(id)?;
        if index >= entry.competitors.len() {
            bail!(
                "Entry {} has {} competitor links, no index {}",
                id,
                entry.competitors.len(),
                index
            );
        }
        Ok(entry.competitors.remove(index))
    }

    pub fn set_performance(&mut self, id: i64, performance: Performance) -> Result<()> {
        self.entry_mut(id)?.performance = performance;
        Ok(())
    }

    fn entry_mut(&mut self, id: i64) -> Result<&mut LibraryEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| anyhow!("No library entry with id {}", id))
    }
}

fn youtube_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
            .expect("static regex is valid")
    })
}

/// Extract the 11-character YouTube video id from a link
pub fn youtube_id(link: &str) -> Option<String> {
    let caps = youtube_pattern().captures(link)?;
    let id = caps.get(2)?.as_str();
    (id.len() == 11).then(|| id.to_string())
}

/// Medium-quality thumbnail URL for a YouTube link
pub fn thumbnail_url(link: &str) -> Option<String> {
    youtube_id(link).map(|id| format!("https://img.youtube.com/vi/{}/mqdefault.jpg", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual(title: &str) -> ManualEntry {
        ManualEntry {
            title: title.to_string(),
            format: VideoFormat::Ranking,
            link: None,
        }
    }

    #[test]
    fn test_manual_entries_prepend_and_allow_duplicates() -> Result<()> {
        let mut library = Library::default();
        let first = library.add_manual(manual("Marvel"))?;
        let second = library.add_manual(manual("Marvel"))?;

        assert_ne!(first, second);
        assert_eq!(library.len(), 2);
        assert_eq!(library.entries()[0].id, second);

        Ok(())
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut library = Library::default();
        assert!(library.add_manual(manual("   ")).is_err());
        assert!(library.is_empty());
    }

    #[test]
    fn test_unique_title_insert() -> Result<()> {
        let mut library = Library::default();
        let id = library.add_manual(manual("Naruto"))?;
        let mut dup = library.get(id).cloned().unwrap();
        dup.id += 1;

        assert!(library.insert_unique_title(dup.clone()).is_none());

        dup.title = "naruto".to_string();
        assert!(library.insert_unique_title(dup).is_some());
        assert_eq!(library.len(), 2);

        Ok(())
    }

    #[test]
    fn test_ids_stay_unique() {
        let mut library = Library::default();
        let id = library.next_id_from(1000);
        let entry = LibraryEntry {
            id,
            title: "A".to_string(),
            format: VideoFormat::Ranking,
            media_type: None,
            unit_count: None,
            virality_score: 5,
            trend: Trend::Unknown,
            reasoning: String::new(),
            competitors: Vec::new(),
            performance: Performance::default(),
            link: None,
        };
        library.insert(entry.clone());
        let clash = library.insert(entry);

        assert_eq!(clash, 1001);
        assert_eq!(library.next_id_from(1000), 1002);
    }

    #[test]
    fn test_remove_and_competitors() -> Result<()> {
        let mut library = Library::default();
        let id = library.add_manual(manual("Pixar"))?;

        library.add_competitor(id, "https://youtube.com/watch?v=aaaaaaaaaaa")?;
        library.add_competitor(id, "https://youtube.com/watch?v=bbbbbbbbbbb")?;
        let removed = library.remove_competitor(id, 0)?;
        assert!(removed.ends_with("aaaaaaaaaaa"));
        assert_eq!(library.get(id).unwrap().competitors.len(), 1);
        assert!(library.remove_competitor(id, 5).is_err());

        library.set_performance(
            id,
            Performance {
                views: "1.2M".to_string(),
                ctr: "8%".to_string(),
            },
        )?;
        assert_eq!(library.get(id).unwrap().performance.views, "1.2M");

        assert!(library.remove(id));
        assert!(!library.remove(id));
        assert!(library.add_competitor(id, "x").is_err());

        Ok(())
    }

    #[test]
    fn test_youtube_id() {
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_id("https://youtu.be/dQw4w9WgXcQ?t=10").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_id("https://example.com/video"), None);
        assert_eq!(
            thumbnail_url("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg")
        );
    }
}
