//! # polyloclib
//!
//! A concurrent lines-of-code counter library that classifies every line of
//! a directory tree as code, comment, or blank, per detected language.
//!
//! ## Overview
//!
//! The engine has five parts, wired leaf-first:
//!
//! - **Language table**: static filename/extension mapping to lexical rules
//!   (comment markers, block delimiters, string quoting) for 40+ languages
//! - **Line classifier**: per-file state machine tagging each physical line,
//!   carrying block-comment and string state across line boundaries
//! - **File counter**: drives the classifier over one file and produces a
//!   per-file record
//! - **Scanner**: walks the tree, applies the exclusion policy, and fans
//!   files out to a fixed pool of worker threads over a shared queue
//! - **Aggregator**: folds worker results into per-language and grand-total
//!   statistics, snapshotted only after all workers have finished
//!
//! Classification follows the common LOC-tool conventions: a line mixing
//! code and comment content counts as comment (comment dominance), and
//! comment markers inside string literals are inert.
//!
//! ## Example
//!
//! ```rust
//! use polyloclib::{scan, ExcludePolicy, ScanOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(
//!     dir.path().join("main.rs"),
//!     "fn main() {\n    // say hi\n    println!(\"hi\");\n}\n",
//! )
//! .unwrap();
//!
//! let options = ScanOptions::new()
//!     .workers(2)
//!     .policy(ExcludePolicy::new().exclude_dir("target"));
//! let report = scan(dir.path(), options).unwrap();
//!
//! assert_eq!(report.languages["Rust"].code, 3);
//! assert_eq!(report.languages["Rust"].comment, 1);
//! ```

pub mod classifier;
pub mod counter;
pub mod error;
pub mod filter;
pub mod language;
pub mod options;
pub mod scanner;
pub mod stats;

pub use classifier::{classify_text, Classifier, LineClass};
pub use counter::count_file;
pub use error::{ErrorKind, ErrorTarget, PolylocError, ScanError};
pub use filter::ExcludePolicy;
pub use language::{resolve, LanguageDescriptor, LanguageTable};
pub use options::ScanOptions;
pub use scanner::scan;
pub use stats::{FileRecord, LanguageStats, ScanReport};

/// Result type for polyloclib operations
pub type Result<T> = std::result::Result<T, PolylocError>;
