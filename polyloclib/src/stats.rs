//! Core data structures for per-file and aggregated line statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

use crate::error::ScanError;

/// Line counts for one classified file.
///
/// Created by the file counter, owned by a single worker until it is handed
/// to the aggregator. `total` always equals `code + comment + blank`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path to the file
    pub path: PathBuf,
    /// Detected language name
    pub language: &'static str,
    /// Lines containing code (and no comment content)
    pub code: u64,
    /// Comment lines, including mixed code/comment lines
    pub comment: u64,
    /// Whitespace-only lines
    pub blank: u64,
    /// Total physical lines read
    pub total: u64,
}

impl FileRecord {
    /// Create an all-zero record for a file of the given language.
    pub fn new(path: PathBuf, language: &'static str) -> Self {
        Self {
            path,
            language,
            code: 0,
            comment: 0,
            blank: 0,
            total: 0,
        }
    }
}

/// Running sums for one language (or for the grand total).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStats {
    /// Number of files counted
    pub files: u64,
    /// Blank lines
    pub blank: u64,
    /// Comment lines
    pub comment: u64,
    /// Code lines
    pub code: u64,
    /// Total lines
    pub total: u64,
}

impl LanguageStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's counts into these sums.
    pub fn merge(&mut self, record: &FileRecord) {
        self.files += 1;
        self.blank += record.blank;
        self.comment += record.comment;
        self.code += record.code;
        self.total += record.total;
    }
}

impl Add for LanguageStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            files: self.files + other.files,
            blank: self.blank + other.blank,
            comment: self.comment + other.comment,
            code: self.code + other.code,
            total: self.total + other.total,
        }
    }
}

impl AddAssign for LanguageStats {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.blank += other.blank;
        self.comment += other.comment;
        self.code += other.code;
        self.total += other.total;
    }
}

/// Final snapshot of a completed scan.
///
/// Produced by the aggregator only after every worker has finished; read-only
/// from the caller's point of view. The language map is a `BTreeMap` so
/// iteration order (and serialized output) is independent of worker
/// scheduling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Per-language statistics, keyed by language name
    pub languages: BTreeMap<String, LanguageStats>,
    /// Grand total across all languages
    pub total: LanguageStats,
    /// Files successfully classified
    pub processed: u64,
    /// Files with no registered language (not an error)
    pub skipped: u64,
    /// Per-path errors, sorted by path
    pub errors: Vec<ScanError>,
}

impl ScanReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's counts into its language and the grand total.
    pub fn merge_record(&mut self, record: &FileRecord) {
        self.languages
            .entry(record.language.to_string())
            .or_default()
            .merge(record);
        self.total.merge(record);
        self.processed += 1;
    }

    /// Record a file with no registered language.
    pub fn merge_skip(&mut self) {
        self.skipped += 1;
    }

    /// Record a non-fatal error.
    pub fn merge_error(&mut self, error: ScanError) {
        self.errors.push(error);
    }

    /// Normalize the report after quiescence: the error list is sorted by
    /// path so the snapshot does not depend on worker scheduling order.
    pub fn finish(mut self) -> Self {
        self.errors.sort_by(|a, b| a.path.cmp(&b.path));
        self
    }

    /// Number of recorded errors.
    pub fn error_count(&self) -> u64 {
        self.errors.len() as u64
    }
}
