//! Parallel conversion of independent files.
//!
//! Each job gets its own renderer state and its own recorder, so one
//! document failing leaves the others untouched and never leaves partial
//! output behind for itself.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::render::{OpRecorder, PageOp, RenderStats};

use super::{ConversionOptions, ConverterRegistry};

/// Result of one file in a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Source path
    pub path: PathBuf,
    /// Complete operation list and stats, or the error
    pub result: Result<(Vec<PageOp>, RenderStats)>,
}

impl BatchOutcome {
    /// Check whether this file converted.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Render every path in parallel, one outcome per path in input order.
pub fn render_batch<P: AsRef<Path> + Sync>(
    paths: &[P],
    options: &ConversionOptions,
) -> Vec<BatchOutcome> {
    render_batch_with(paths, options, |_| {})
}

/// Like [`render_batch`], calling `on_done` from the worker as each file
/// finishes. Completion order is unspecified; the returned outcomes are
/// still in input order.
pub fn render_batch_with<P, F>(
    paths: &[P],
    options: &ConversionOptions,
    on_done: F,
) -> Vec<BatchOutcome>
where
    P: AsRef<Path> + Sync,
    F: Fn(&BatchOutcome) + Sync,
{
    let registry = ConverterRegistry::with_defaults();
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let mut recorder = OpRecorder::new();
            let result = registry
                .render_file(path, &options.render, &mut recorder)
                .map(|stats| (recorder.into_ops(), stats));
            if let Err(e) = &result {
                log::warn!("Skipping {}: {}", path.display(), e);
            }
            let outcome = BatchOutcome {
                path: path.to_path_buf(),
                result,
            };
            on_done(&outcome);
            outcome
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_batch_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.md");
        let bad = dir.path().join("bad.md");
        let missing = dir.path().join("missing.md");
        fs::write(&good, "# Good\n\ntext").unwrap();
        fs::write(&bad, "```\nnever closed").unwrap();

        let outcomes = render_batch(&[&good, &bad, &missing], &ConversionOptions::default());
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].path, good);
        assert!(outcomes[0].is_ok());
        assert!(!outcomes[1].is_ok());
        assert!(!outcomes[2].is_ok());

        let (ops, stats) = outcomes[0].result.as_ref().unwrap();
        assert_eq!(stats.heading_count, 1);
        assert!(ops.contains(&PageOp::WriteTextBlock {
            text: "Good".into(),
            filled: false
        }));
    }

    #[test]
    fn test_batch_reports_each_file_as_it_finishes() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for i in 0..8 {
            let path = dir.path().join(format!("doc{}.md", i));
            fs::write(&path, format!("# Doc {}\n\nbody", i)).unwrap();
            paths.push(path);
        }
        paths.push(dir.path().join("missing.md"));

        let done = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);
        let outcomes = render_batch_with(&paths, &ConversionOptions::default(), |outcome| {
            done.fetch_add(1, Ordering::SeqCst);
            if !outcome.is_ok() {
                failed.fetch_add(1, Ordering::SeqCst);
            }
        });

        assert_eq!(done.load(Ordering::SeqCst), paths.len());
        assert_eq!(failed.load(Ordering::SeqCst), 1);
        assert_eq!(outcomes.len(), paths.len());
        assert_eq!(outcomes[8].path, paths[8]);
    }
}
