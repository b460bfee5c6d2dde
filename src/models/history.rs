//! Most-recent-first list of generated pages

use std::collections::VecDeque;

/// Maximum number of pages kept in [`RecentPages`]
pub const MAX_RECENT_PAGES: usize = 6;

/// A previously generated page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentPage {
    /// Prompt as typed by the user (before enhancement)
    pub prompt: String,
    /// Encoded PNG bytes of the binarized page
    pub png: Vec<u8>,
}

/// Bounded history of generated pages, newest first.
///
/// Prompts are unique: pushing a page whose prompt is already present
/// replaces the old entry and moves it to the front.
#[derive(Debug, Clone, Default)]
pub struct RecentPages {
    pages: VecDeque<RecentPage>,
}

impl RecentPages {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a page at the front, evicting duplicates and the oldest overflow
    pub fn push(&mut self, page: RecentPage) {
        self.pages.retain(|p| p.prompt != page.prompt);
        self.pages.push_front(page);
        self.pages.truncate(MAX_RECENT_PAGES);
    }

    /// Look up a page by its prompt
    pub fn get(&self, prompt: &str) -> Option<&RecentPage> {
        self.pages.iter().find(|p| p.prompt == prompt)
    }

    /// Most recent page
    pub fn latest(&self) -> Option<&RecentPage> {
        self.pages.front()
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &RecentPage> {
        self.pages.iter()
    }

    /// Number of pages held
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when nothing has been generated yet
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
