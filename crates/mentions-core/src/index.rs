//! Bidirectional mention index.
//!
//! Keeps two maps that are each other's transpose:
//!
//! - forward: mentioned title → paths of the pages that mention it
//! - reverse: page path → titles that page mentions
//!
//! When a page titled `T` changes, `pages_to_update(T)` is the worklist of
//! pages whose outgoing links must be regenerated, found without scanning the
//! rest of the corpus.
//!
//! The index is a plain owned value with no interior locking. Callers that
//! share it across threads must serialise access themselves.

use crate::extract::{MIN_MENTION_LEN, extract_mentions_with_min_len};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Snapshot of index size, as reported by [`MentionIndex::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MentionStats {
    /// Pages the index currently knows about.
    pub total_pages: usize,
    /// Distinct titles mentioned by at least one page.
    pub total_mentions: usize,
    /// Mean size of a page's mention set; `0.0` for an empty index.
    pub avg_mentions_per_page: f64,
}

impl fmt::Display for MentionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pages: {}, distinct mentions: {}, avg mentions/page: {:.2}",
            self.total_pages, self.total_mentions, self.avg_mentions_per_page,
        )
    }
}

/// Inverted index from mentioned titles to the pages that mention them.
#[derive(Debug, Clone)]
pub struct MentionIndex {
    forward: HashMap<String, HashSet<String>>,
    reverse: HashMap<String, HashSet<String>>,
    min_mention_len: usize,
}

impl Default for MentionIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl MentionIndex {
    /// Create an empty index using the default mention length threshold.
    pub fn new() -> Self {
        Self::with_min_mention_len(MIN_MENTION_LEN)
    }

    /// Create an empty index whose extraction discards spans shorter than
    /// `min_mention_len` characters.
    pub fn with_min_mention_len(min_mention_len: usize) -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
            min_mention_len,
        }
    }

    pub fn min_mention_len(&self) -> usize {
        self.min_mention_len
    }

    /// Index `content` as the current body of `path`.
    ///
    /// `title` is the page's own display title. It is accepted so callers can
    /// pass their page model straight through, but it does not affect the
    /// index: only what the page mentions is tracked here.
    ///
    /// Adding a path that is already indexed replaces its previous entry,
    /// exactly like [`update_page`](Self::update_page).
    pub fn add_page(&mut self, path: &str, content: &str, title: &str) {
        if self.reverse.contains_key(path) {
            log::debug!("add_page on indexed path {path}; replacing previous entry");
            self.remove_page(path);
        }

        let mentions = extract_mentions_with_min_len(content, self.min_mention_len);
        log::debug!(
            "indexing {path} ({title}): {} mention(s)",
            mentions.len()
        );

        for mention in &mentions {
            log::trace!("{path} -> {mention}");
            self.forward
                .entry(mention.clone())
                .or_default()
                .insert(path.to_string());
        }
        self.reverse.insert(path.to_string(), mentions);
    }

    /// Drop `path` from the index. Unknown paths are ignored.
    pub fn remove_page(&mut self, path: &str) {
        let Some(mentions) = self.reverse.remove(path) else {
            return;
        };

        for mention in &mentions {
            if let Some(pages) = self.forward.get_mut(mention) {
                pages.remove(path);
                if pages.is_empty() {
                    log::trace!("last reference to {mention} gone");
                    self.forward.remove(mention);
                }
            }
        }
        log::debug!("removed {path} ({} mention(s))", mentions.len());
    }

    /// Re-index `path` with new content: a remove followed by an add.
    pub fn update_page(&mut self, path: &str, content: &str, title: &str) {
        self.remove_page(path);
        self.add_page(path, content, title);
    }

    /// Pages that mention `title`. Empty for a title nobody mentions.
    pub fn pages_to_update(&self, title: &str) -> HashSet<String> {
        self.forward.get(title).cloned().unwrap_or_default()
    }

    /// Union of [`pages_to_update`](Self::pages_to_update) over `titles`.
    pub fn pages_to_update_for_multiple<I, S>(&self, titles: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pages = HashSet::new();
        for title in titles {
            if let Some(mentioning) = self.forward.get(title.as_ref()) {
                pages.extend(mentioning.iter().cloned());
            }
        }
        pages
    }

    /// Titles mentioned by `path`. Empty for an unknown path.
    pub fn mentions_of(&self, path: &str) -> HashSet<String> {
        self.reverse.get(path).cloned().unwrap_or_default()
    }

    pub fn contains_page(&self, path: &str) -> bool {
        self.reverse.contains_key(path)
    }

    pub fn page_count(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Indexed page paths, in no particular order.
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.reverse.keys().map(String::as_str)
    }

    /// Titles mentioned by at least one page, in no particular order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.forward.keys().map(String::as_str)
    }

    pub fn stats(&self) -> MentionStats {
        let total_pages = self.reverse.len();
        let mention_sum: usize = self.reverse.values().map(HashSet::len).sum();
        let avg_mentions_per_page = if total_pages == 0 {
            0.0
        } else {
            mention_sum as f64 / total_pages as f64
        };

        MentionStats {
            total_pages,
            total_mentions: self.forward.len(),
            avg_mentions_per_page,
        }
    }

    /// Reset to the empty state, keeping the configured threshold.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    /// Check that forward and reverse maps are exact transposes with no empty
    /// forward sets. Returns a description of the first violation found.
    #[cfg(test)]
    pub(crate) fn check_consistency(&self) -> Result<(), String> {
        for (title, pages) in &self.forward {
            if pages.is_empty() {
                return Err(format!("dangling forward entry for {title:?}"));
            }
            for page in pages {
                let listed = self.reverse.get(page).is_some_and(|m| m.contains(title));
                if !listed {
                    return Err(format!("forward {title:?} -> {page:?} has no reverse entry"));
                }
            }
        }
        for (page, mentions) in &self.reverse {
            for title in mentions {
                let listed = self.forward.get(title).is_some_and(|p| p.contains(page));
                if !listed {
                    return Err(format!("reverse {page:?} -> {title:?} has no forward entry"));
                }
            }
        }
        Ok(())
    }
}
