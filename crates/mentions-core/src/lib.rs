//! mentions-core: bidirectional index of bold page mentions.
//!
//! Tracks which pages of a documentation corpus mention which other pages by
//! name (`**Page Title**`), so that after an edit only the pages that actually
//! reference the edited page need their links regenerated.
//!
//! # Quick Start
//!
//! ```
//! use mentions_core::MentionIndex;
//!
//! let mut index = MentionIndex::new();
//! index.add_page("a.md", "See **Target**", "A");
//! index.add_page("b.md", "Also **Target**", "B");
//!
//! let mut pages: Vec<_> = index.pages_to_update("Target").into_iter().collect();
//! pages.sort();
//! assert_eq!(pages, ["a.md", "b.md"]);
//! assert_eq!(index.stats().total_mentions, 1);
//! ```
//!
//! To keep an index in step with a directory of markdown files, use
//! [`Corpus`].

pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod index;

pub use config::{CONFIG_FILE_NAME, CorpusConfig};
pub use corpus::{Corpus, SyncReport, page_title};
pub use error::{ConfigError, CorpusError};
pub use extract::{MIN_MENTION_LEN, extract_mentions, extract_mentions_with_min_len};
pub use index::{MentionIndex, MentionStats};
