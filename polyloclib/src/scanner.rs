//! Traversal scheduler, worker pool, and result aggregation.
//!
//! [`scan`] walks the directory tree on the calling thread while a fixed
//! pool of worker threads consumes discovered file paths from an unbounded
//! channel. Each worker resolves the file's language, runs the file counter,
//! and sends the outcome over a result channel. A single fold on the calling
//! thread merges outcomes into the [`ScanReport`]; because only that fold
//! mutates the aggregate, merges are race-free by construction.
//!
//! The snapshot is produced only after the work queue is drained and every
//! worker has exited. Merging is commutative over addition, so the report is
//! identical for any worker count or scheduling order.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::counter::count_file;
use crate::error::{PolylocError, ScanError};
use crate::language;
use crate::options::ScanOptions;
use crate::stats::ScanReport;
use crate::Result;

/// Outcome of one queued file, sent from a worker to the aggregator.
enum WorkerMessage {
    /// File counted successfully
    Record(crate::stats::FileRecord),
    /// File has no registered language
    Skipped,
    /// File could not be read
    Failed(ScanError),
}

/// Scan a directory tree (or a single file) and return the aggregate report.
///
/// The only fatal condition is a root that does not exist or cannot be
/// inspected; it fails before any worker starts. Per-file and per-directory
/// failures are recorded in the report and never abort the scan.
pub fn scan(root: impl AsRef<Path>, options: ScanOptions) -> Result<ScanReport> {
    let root = root.as_ref();
    let meta = std::fs::metadata(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PolylocError::RootNotFound(root.to_path_buf()),
        _ => PolylocError::Io(e),
    })?;
    if !meta.is_dir() && !meta.is_file() {
        return Err(PolylocError::NotScannable(root.to_path_buf()));
    }

    let workers = options.effective_workers();
    debug!(root = %root.display(), workers, "starting scan");

    let (work_tx, work_rx) = unbounded::<PathBuf>();
    let (result_tx, result_rx) = unbounded::<WorkerMessage>();

    let handles = spawn_workers(workers, &work_rx, &result_tx)?;
    // The aggregator holds only the receiving ends; workers exit when the
    // work channel closes, and the result channel closes when they do.
    drop(work_rx);
    drop(result_tx);

    let dir_errors = if meta.is_file() {
        let _ = work_tx.send(root.to_path_buf());
        Vec::new()
    } else {
        enumerate(root, &options, &work_tx)
    };
    drop(work_tx);

    let mut report = ScanReport::new();
    for message in result_rx {
        match message {
            WorkerMessage::Record(record) => report.merge_record(&record),
            WorkerMessage::Skipped => report.merge_skip(),
            WorkerMessage::Failed(error) => report.merge_error(error),
        }
    }
    for error in dir_errors {
        report.merge_error(error);
    }

    for handle in handles {
        if handle.join().is_err() {
            warn!("worker thread panicked");
        }
    }

    debug!(
        processed = report.processed,
        skipped = report.skipped,
        errors = report.errors.len(),
        "scan complete"
    );
    Ok(report.finish())
}

/// Spawn the fixed-size worker pool.
fn spawn_workers(
    count: usize,
    work_rx: &Receiver<PathBuf>,
    result_tx: &Sender<WorkerMessage>,
) -> Result<Vec<JoinHandle<()>>> {
    let mut handles = Vec::with_capacity(count);
    for id in 0..count {
        let work_rx = work_rx.clone();
        let result_tx = result_tx.clone();
        let handle = thread::Builder::new()
            .name(format!("counter-{id}"))
            .spawn(move || worker_loop(id, work_rx, result_tx))
            .map_err(PolylocError::Io)?;
        handles.push(handle);
    }
    Ok(handles)
}

/// Pull file paths off the queue until it closes.
fn worker_loop(id: usize, work_rx: Receiver<PathBuf>, result_tx: Sender<WorkerMessage>) {
    for path in work_rx.iter() {
        let message = match language::resolve(&path) {
            None => {
                trace!(worker = id, path = %path.display(), "no language, skipping");
                WorkerMessage::Skipped
            }
            Some(lang) => match count_file(&path, lang) {
                Ok(record) => WorkerMessage::Record(record),
                Err(error) => {
                    if error.is_permission() {
                        warn!(worker = id, path = %path.display(), "permission denied");
                    } else {
                        debug!(worker = id, path = %path.display(), error = %error, "file failed");
                    }
                    WorkerMessage::Failed(error)
                }
            },
        };
        if result_tx.send(message).is_err() {
            break;
        }
    }
}

/// Walk the tree, applying the exclusion policy before queuing each file.
///
/// Runs on the calling thread, concurrent with the workers. Unreadable
/// directories are recorded and traversal continues into siblings.
fn enumerate(root: &Path, options: &ScanOptions, work_tx: &Sender<PathBuf>) -> Vec<ScanError> {
    let mut errors = Vec::new();
    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        e.depth() == 0 || !options.policy.should_skip(e.path(), e.file_type().is_dir())
    }) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                let _ = work_tx.send(entry.into_path());
            }
            Ok(_) => {}
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let scan_err = match err.io_error() {
                    Some(io) => ScanError::directory(&path, io),
                    None => ScanError::directory(
                        &path,
                        &std::io::Error::new(std::io::ErrorKind::Other, err.to_string()),
                    ),
                };
                debug!(path = %path.display(), "directory failed");
                errors.push(scan_err);
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ExcludePolicy;
    use std::fs;
    use tempfile::tempdir;

    /// A small polyglot tree with known counts.
    fn create_tree(root: &Path) {
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("scripts")).unwrap();
        fs::create_dir_all(root.join("vendor")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();

        // Rust: 3 code, 1 comment, 1 blank
        fs::write(
            root.join("src/main.rs"),
            "fn main() {\n    // entry\n    println!(\"hi\");\n\n}\n",
        )
        .unwrap();
        // Go: 2 code, 1 comment
        fs::write(
            root.join("src/util.go"),
            "package util\n// helper\nfunc F() {}\n",
        )
        .unwrap();
        // Python: 1 code, 1 comment
        fs::write(root.join("scripts/run.py"), "# runner\nprint(1)\n").unwrap();
        // Unknown extension: skipped, not an error
        fs::write(root.join("src/data.xyz"), "opaque\n").unwrap();
        // Hidden: excluded by default policy
        fs::write(root.join(".cache/tmp.rs"), "fn hidden() {}\n").unwrap();
        // Denylisted dir content (only pruned when the policy says so)
        fs::write(root.join("vendor/dep.rs"), "fn dep() {}\n").unwrap();
        // Empty file still counts toward its language's file count
        fs::write(root.join("src/empty.rs"), "").unwrap();
    }

    #[test]
    fn test_scan_counts_by_language() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let report = scan(temp.path(), ScanOptions::new()).unwrap();

        // main.rs + empty.rs + vendor/dep.rs
        assert_eq!(report.languages["Rust"].files, 3);
        assert_eq!(report.languages["Rust"].code, 4);
        assert_eq!(report.languages["Rust"].comment, 1);
        assert_eq!(report.languages["Rust"].blank, 1);

        assert_eq!(report.languages["Go"].files, 1);
        assert_eq!(report.languages["Go"].code, 2);

        assert_eq!(report.languages["Python"].files, 1);

        assert_eq!(report.skipped, 1);
        assert_eq!(report.processed, 5);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_aggregate_invariants() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let report = scan(temp.path(), ScanOptions::new()).unwrap();

        assert_eq!(
            report.total.total,
            report.total.code + report.total.comment + report.total.blank
        );
        let summed = report
            .languages
            .values()
            .fold(crate::stats::LanguageStats::new(), |acc, s| acc + *s);
        assert_eq!(summed, report.total);
    }

    #[test]
    fn test_worker_count_does_not_change_results() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let base = scan(temp.path(), ScanOptions::new().workers(1)).unwrap();
        for workers in [2, 8] {
            let report = scan(temp.path(), ScanOptions::new().workers(workers)).unwrap();
            assert_eq!(report, base, "worker count {workers} changed the report");
        }
    }

    #[test]
    fn test_dir_denylist_prunes_subtree() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let policy = ExcludePolicy::new().exclude_dir("vendor");
        let report = scan(temp.path(), ScanOptions::new().policy(policy)).unwrap();

        assert_eq!(report.languages["Rust"].files, 2);
    }

    #[test]
    fn test_glob_ignore_filters_files() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let policy = ExcludePolicy::new().ignore("**/*.go").unwrap();
        let report = scan(temp.path(), ScanOptions::new().policy(policy)).unwrap();

        assert!(!report.languages.contains_key("Go"));
        assert!(report.languages.contains_key("Rust"));
    }

    #[test]
    fn test_hidden_files_included_on_request() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let policy = ExcludePolicy::new().with_hidden(true);
        let report = scan(temp.path(), ScanOptions::new().policy(policy)).unwrap();

        // .cache/tmp.rs now joins the three visible Rust files.
        assert_eq!(report.languages["Rust"].files, 4);
    }

    #[test]
    fn test_scan_single_file_root() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("one.c");
        fs::write(&path, "int x;\n// note\n").unwrap();

        let report = scan(&path, ScanOptions::new()).unwrap();
        assert_eq!(report.languages["C"].files, 1);
        assert_eq!(report.total.code, 1);
        assert_eq!(report.total.comment, 1);
    }

    #[test]
    fn test_empty_directory() {
        let temp = tempdir().unwrap();
        let report = scan(temp.path(), ScanOptions::new()).unwrap();

        assert!(report.languages.is_empty());
        assert_eq!(report.processed, 0);
        assert_eq!(report.total, crate::stats::LanguageStats::new());
    }

    #[cfg(unix)]
    #[test]
    fn test_traversal_error_recorded_and_scan_continues() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("a")).unwrap();
        fs::write(temp.path().join("a/x.rs"), "fn x() {}\n").unwrap();
        // A symlink cycle makes walkdir report a directory-level error.
        std::os::unix::fs::symlink(temp.path().join("a"), temp.path().join("a/loop")).unwrap();

        let report = scan(temp.path(), ScanOptions::new()).unwrap();

        assert!(!report.errors.is_empty());
        assert!(report
            .errors
            .iter()
            .all(|e| e.target == crate::error::ErrorTarget::Directory));
        // The sibling file is still counted.
        assert_eq!(report.languages["Rust"].files, 1);
        assert_eq!(report.total.code, 1);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let result = scan("/nonexistent/root/path", ScanOptions::new());
        assert!(matches!(result, Err(PolylocError::RootNotFound(_))));
    }
}
