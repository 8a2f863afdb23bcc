//! Corpus walker that keeps a [`MentionIndex`] in step with a directory of pages.
//!
//! Each [`Corpus::sync`] walks the root (respecting `.gitignore` unless told
//! otherwise), detects changes via mtime + size, and feeds only the new,
//! changed and deleted pages through the index. The returned report carries
//! the worklist of *other* pages whose outgoing links mention a changed page.

use crate::config::CorpusConfig;
use crate::error::CorpusError;
use crate::index::MentionIndex;
use ignore::WalkBuilder;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Outcome of one [`Corpus::sync`] pass.
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub pages_scanned: u32,
    pub pages_added: u32,
    pub pages_updated: u32,
    pub pages_removed: u32,
    pub pages_skipped: u32,
    /// Added, updated and removed paths, sorted.
    pub changed: Vec<String>,
    /// Unchanged pages that mention a changed page's title, sorted.
    pub affected: Vec<String>,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scanned: {}, added: {}, updated: {}, removed: {}, skipped (unchanged): {}, affected: {}",
            self.pages_scanned,
            self.pages_added,
            self.pages_updated,
            self.pages_removed,
            self.pages_skipped,
            self.affected.len(),
        )
    }
}

/// What the corpus remembers about a page between syncs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint {
    modified: Option<SystemTime>,
    size: u64,
}

/// A new or changed page, read but not yet indexed.
struct PendingPage {
    rel_path: String,
    fingerprint: Fingerprint,
    content: String,
    title: String,
}

#[derive(Debug, Clone)]
struct PageRecord {
    fingerprint: Fingerprint,
    title: String,
}

/// A directory of pages plus the mention index built from them.
#[derive(Debug)]
pub struct Corpus {
    root: PathBuf,
    config: CorpusConfig,
    index: MentionIndex,
    pages: HashMap<String, PageRecord>,
}

impl Corpus {
    /// Create an empty corpus rooted at `root`. Nothing is read until
    /// [`sync`](Self::sync) is called.
    pub fn open(root: impl Into<PathBuf>, config: CorpusConfig) -> Self {
        let index = MentionIndex::with_min_mention_len(config.min_mention_len);
        Self {
            root: root.into(),
            config,
            index,
            pages: HashMap::new(),
        }
    }

    /// Open `root` with the config found in its `mentions.toml`, if any.
    pub fn load(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config = CorpusConfig::load(&root);
        Self::open(root, config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn index(&self) -> &MentionIndex {
        &self.index
    }

    /// Display title recorded for `path` at the last sync.
    pub fn page_title(&self, path: &str) -> Option<&str> {
        self.pages.get(path).map(|record| record.title.as_str())
    }

    /// Path of the page whose display title is `title`. When several pages
    /// share a title the smallest path wins.
    pub fn resolve_title(&self, title: &str) -> Option<&str> {
        self.pages
            .iter()
            .filter(|(_, record)| record.title == title)
            .map(|(path, _)| path.as_str())
            .min()
    }

    /// Sorted worklist of pages mentioning any of `titles`.
    pub fn affected_by<I, S>(&self, titles: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pages: Vec<String> = self
            .index
            .pages_to_update_for_multiple(titles)
            .into_iter()
            .collect();
        pages.sort();
        pages
    }

    /// Walk the root, re-index what changed, and report the pages that need
    /// their links regenerated.
    ///
    /// Every changed page is read before the index is touched, so a read
    /// failure leaves the corpus exactly as the previous sync left it and a
    /// retry reports the full set of changes.
    pub fn sync(&mut self) -> Result<SyncReport, CorpusError> {
        if !self.root.is_dir() {
            return Err(CorpusError::NotADirectory(self.root.clone()));
        }

        let mut report = SyncReport::default();
        let (seen, pending) = self.scan(&mut report)?;

        // Titles of every page that changed, before and after the change.
        let mut changed_titles: HashSet<String> = HashSet::new();

        for page in pending {
            match self.pages.get(&page.rel_path) {
                Some(record) => {
                    changed_titles.insert(record.title.clone());
                    self.index
                        .update_page(&page.rel_path, &page.content, &page.title);
                    report.pages_updated += 1;
                }
                None => {
                    self.index.add_page(&page.rel_path, &page.content, &page.title);
                    report.pages_added += 1;
                }
            }
            changed_titles.insert(page.title.clone());
            report.changed.push(page.rel_path.clone());
            self.pages.insert(
                page.rel_path,
                PageRecord {
                    fingerprint: page.fingerprint,
                    title: page.title,
                },
            );
        }

        // Pages that disappeared from disk.
        let removed: Vec<String> = self
            .pages
            .keys()
            .filter(|path| !seen.contains(*path))
            .cloned()
            .collect();
        for path in &removed {
            if let Some(record) = self.pages.remove(path) {
                changed_titles.insert(record.title);
            }
            self.index.remove_page(path);
            report.pages_removed += 1;
            report.changed.push(path.clone());
        }

        let changed: HashSet<&String> = report.changed.iter().collect();
        let mut affected: Vec<String> = self
            .index
            .pages_to_update_for_multiple(&changed_titles)
            .into_iter()
            .filter(|path| !changed.contains(path))
            .collect();
        affected.sort();
        report.affected = affected;
        report.changed.sort();

        log::debug!("sync {}: {report}", self.root.display());
        Ok(report)
    }

    /// Walk the root and read every new or changed page. Counts scanned and
    /// skipped pages into `report`; mutates nothing else.
    fn scan(
        &self,
        report: &mut SyncReport,
    ) -> Result<(HashSet<String>, Vec<PendingPage>), CorpusError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut pending = Vec::new();

        let respect = self.config.respect_gitignore;
        let walker = WalkBuilder::new(&self.root)
            .hidden(!self.config.include_hidden)
            .git_ignore(respect)
            .git_exclude(respect)
            .git_global(respect)
            .ignore(respect)
            .parents(respect)
            .require_git(false)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            if entry.file_type().map(|t| !t.is_file()).unwrap_or(true) {
                continue;
            }

            let abs_path = entry.path();
            if !self.config.is_page(abs_path) {
                continue;
            }
            let rel_path = relative_key(&self.root, abs_path);

            report.pages_scanned += 1;
            seen.insert(rel_path.clone());

            let meta = std::fs::metadata(abs_path).map_err(|source| CorpusError::Read {
                path: abs_path.to_path_buf(),
                source,
            })?;
            let fingerprint = Fingerprint {
                modified: meta.modified().ok(),
                size: meta.len(),
            };

            let unchanged = self
                .pages
                .get(&rel_path)
                .is_some_and(|record| record.fingerprint == fingerprint);
            if unchanged {
                report.pages_skipped += 1;
                continue;
            }

            let bytes = std::fs::read(abs_path).map_err(|source| CorpusError::Read {
                path: abs_path.to_path_buf(),
                source,
            })?;
            let content = String::from_utf8_lossy(&bytes).into_owned();
            let title = page_title(&content, abs_path);

            pending.push(PendingPage {
                rel_path,
                fingerprint,
                content,
                title,
            });
        }

        Ok((seen, pending))
    }
}

/// Root-relative, `/`-separated key for a page path.
fn relative_key(root: &Path, abs_path: &Path) -> String {
    let rel = abs_path.strip_prefix(root).unwrap_or(abs_path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Display title of a page: its first `# ` heading, else the file stem.
pub fn page_title(content: &str, path: &Path) -> String {
    let heading = content.lines().find_map(|line| {
        let line = line.trim_start();
        let text = line.strip_prefix("# ")?;
        let text = text.trim().trim_end_matches('#').trim_end();
        (!text.is_empty()).then(|| text.to_string())
    });

    heading.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}
