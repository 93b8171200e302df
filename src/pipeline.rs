use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::error::{NormalizeError, Result};
use crate::output::write_records;
use crate::registry::ParserRegistry;
use crate::types::CanonicalAddress;

/// Counts reported after a run over several input files
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub records_written: usize,
}

/// Resolves each input path to a parser and writes its records in order
pub struct Normalizer {
    registry: ParserRegistry,
    strict_extensions: bool,
}

impl Normalizer {
    pub fn new(registry: ParserRegistry) -> Self {
        Self {
            registry,
            strict_extensions: false,
        }
    }

    /// Treat a path with no registered parser as an error instead of skipping it
    pub fn with_strict_extensions(mut self, strict: bool) -> Self {
        self.strict_extensions = strict;
        self
    }

    /// Normalize one file. `Ok(None)` means the suffix has no parser and the
    /// path was skipped.
    pub fn normalize_path(&self, path: &Path) -> Result<Option<Vec<CanonicalAddress>>> {
        if !path.exists() {
            return Err(NormalizeError::InvalidPath(path.to_path_buf()));
        }

        let Some(parser) = self.registry.for_path(path) else {
            if self.strict_extensions {
                return Err(NormalizeError::UnrecognizedExtension(path.to_path_buf()));
            }
            warn!("No parser for {}; skipping", path.display());
            return Ok(None);
        };

        info!("Parsing with {}", parser.name());
        let records = parser.parse_file(path)?;
        info!("Normalized {} records", records.len());
        Ok(Some(records))
    }

    /// Process `paths` in order, writing each file's records as soon as it is
    /// parsed. The first failing file aborts the run.
    pub fn run<W: Write>(&self, paths: &[PathBuf], writer: &mut W) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for path in paths {
            let span = tracing::info_span!("Normalizing file", path = %path.display());
            let _enter = span.enter();

            let records = self
                .normalize_path(path)
                .with_context(|| format!("Failed to normalize {}", path.display()))?;

            match records {
                Some(records) => {
                    write_records(writer, &records)
                        .with_context(|| format!("Failed to write records for {}", path.display()))?;
                    summary.files_processed += 1;
                    summary.records_written += records.len();
                }
                None => summary.files_skipped += 1,
            }
        }

        info!(
            "Run finished: files_processed={} files_skipped={} records_written={}",
            summary.files_processed, summary.files_skipped, summary.records_written
        );
        Ok(summary)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(ParserRegistry::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_path_is_invalid() {
        let normalizer = Normalizer::default();
        let err = normalizer
            .normalize_path(Path::new("/nonexistent/input.txt"))
            .unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidPath(_)));
    }

    #[test]
    fn test_unknown_suffix_is_skipped_unless_strict() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "nothing to see").unwrap();

        let normalizer = Normalizer::default();
        assert!(normalizer.normalize_path(&path).unwrap().is_none());

        let strict = Normalizer::default().with_strict_extensions(true);
        assert!(matches!(
            strict.normalize_path(&path),
            Err(NormalizeError::UnrecognizedExtension(_))
        ));
    }
}
