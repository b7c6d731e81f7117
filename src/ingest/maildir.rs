use super::{parse_headers, IngestError, IngestStats, Record, RecipientField};
use crate::graph::{GraphBuilder, GraphError, WeightedDirectedGraph};
use dsi_progress_logger::ProgressLog;
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// The configuration of a [`MailDir`] corpus.
///
/// # Examples
///
/// ```
/// use mailgraph_algo::ingest::{MailDirConfig, RecipientField};
///
/// let config = MailDirConfig::new("dataset").with_cc(true);
/// assert_eq!(config.fields(), &[RecipientField::To, RecipientField::Cc]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDirConfig {
    root: PathBuf,
    fields: Vec<RecipientField>,
}

impl MailDirConfig {
    /// Creates a configuration for the corpus rooted at `root`, reading
    /// recipients from `To:` only.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fields: vec![RecipientField::To],
        }
    }

    /// Sets whether `Cc:` recipients count.
    pub fn with_cc(self, cc: bool) -> Self {
        self.with_field(RecipientField::Cc, cc)
    }

    /// Sets whether `Bcc:` recipients count.
    pub fn with_bcc(self, bcc: bool) -> Self {
        self.with_field(RecipientField::Bcc, bcc)
    }

    fn with_field(mut self, field: RecipientField, enabled: bool) -> Self {
        self.fields.retain(|&f| f != field);
        if enabled {
            self.fields.push(field);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fields(&self) -> &[RecipientField] {
        &self.fields
    }
}

/// A corpus of raw messages, one per file, under a root directory.
///
/// Files are enumerated recursively in a deterministic order (entries of
/// each directory sorted by name).
#[derive(Debug, Clone)]
pub struct MailDir {
    config: MailDirConfig,
}

impl MailDir {
    /// Creates a corpus, failing if the root is not a directory.
    pub fn new(config: MailDirConfig) -> Result<Self, IngestError> {
        if !config.root.is_dir() {
            return Err(IngestError::NotADirectory(config.root));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &MailDirConfig {
        &self.config
    }

    /// Returns the records of the corpus, one per file.
    ///
    /// Errors concern single files or directory entries: callers may skip
    /// them and go on.
    pub fn records(&self) -> impl Iterator<Item = Result<Record, IngestError>> + '_ {
        WalkDir::new(&self.config.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(self.read(entry.path())),
                Ok(_) => None,
                Err(err) => Some(Err(err.into())),
            })
    }

    fn read(&self, path: &Path) -> Result<Record, IngestError> {
        let io_error = |source| IngestError::Io {
            path: path.to_owned(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        parse_headers(BufReader::new(file), &self.config.fields).map_err(io_error)
    }

    /// Reads the whole corpus into `builder`.
    ///
    /// Files that cannot be read are logged, counted, and skipped.
    pub fn load_into(
        &self,
        builder: &mut GraphBuilder,
        pl: &mut impl ProgressLog,
    ) -> Result<IngestStats, GraphError> {
        info!("Reading messages from {}", self.config.root.display());
        load_records(self.records(), builder, pl)
    }

    /// Builds the communication graph of the corpus.
    pub fn build_graph(
        &self,
        pl: &mut impl ProgressLog,
    ) -> Result<(Arc<WeightedDirectedGraph>, IngestStats), GraphError> {
        let mut builder = GraphBuilder::new();
        let stats = self.load_into(&mut builder, pl)?;
        Ok((builder.finalize(), stats))
    }
}

/// Adds `records` to `builder`, one record per file.
///
/// Errors are logged, counted in [`IngestStats::failed_files`], and skipped:
/// a failure never prevents the following records from being added.
pub fn load_records(
    records: impl IntoIterator<Item = Result<Record, IngestError>>,
    builder: &mut GraphBuilder,
    pl: &mut impl ProgressLog,
) -> Result<IngestStats, GraphError> {
    pl.item_name("file");
    pl.start("Reading messages...");

    let mut stats = IngestStats::default();
    let skipped_before = builder.num_skipped();
    for record in records {
        match record {
            Ok(record) => {
                builder.add_record(record.sender.as_deref(), &record.recipients)?;
                stats.files += 1;
            }
            Err(err) => {
                warn!("Skipping unreadable entry: {err}");
                stats.failed_files += 1;
            }
        }
        pl.light_update();
    }
    stats.skipped_records = builder.num_skipped() - skipped_before;

    pl.done();
    info!(
        "Read {} files ({} failed, {} records without arcs)",
        stats.files, stats.failed_files, stats.skipped_records
    );
    Ok(stats)
}
