//! Reading (sender, recipients) records from a mail corpus.
//!
//! The corpus is a directory tree of raw messages, one per file, as in the
//! Enron dataset. Only headers are read: the sender comes from `From:`, the
//! recipients from `To:` and, if [configured](MailDirConfig), `Cc:` and
//! `Bcc:`.

mod headers;
pub use headers::*;

mod maildir;
pub use maildir::*;

use std::path::PathBuf;
use thiserror::Error;

/// A message as seen by the graph: who sent it, and to whom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// The sender, if one was found.
    pub sender: Option<String>,
    /// The recipients, in header order; may contain repetitions.
    pub recipients: Vec<String>,
}

/// A header listing recipients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipientField {
    To,
    Cc,
    Bcc,
}

impl RecipientField {
    /// The header name, including the trailing colon.
    pub fn header(self) -> &'static str {
        match self {
            RecipientField::To => "To:",
            RecipientField::Cc => "Cc:",
            RecipientField::Bcc => "Bcc:",
        }
    }
}

/// Errors raised while reading a corpus.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("corpus root {0:?} is not a directory")]
    NotADirectory(PathBuf),
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Counters collected while reading a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Files read successfully.
    pub files: usize,
    /// Files that could not be read and were skipped.
    pub failed_files: usize,
    /// Records that contributed no arc, because they had no sender or no
    /// recipients.
    pub skipped_records: usize,
}
