//! # polyloc
//!
//! A CLI tool for counting lines of code across a directory tree, broken
//! down by language.
//!
//! ## Overview
//!
//! polyloc is built on top of polyloclib and provides a command-line
//! interface for analyzing multi-language codebases. Every file with a
//! recognized language is classified line by line into code, comment, and
//! blank counts, concurrently across a pool of worker threads.
//!
//! ## Features
//!
//! - **Per-language breakdown**: code, comment, and blank counts for 60+ languages
//! - **Concurrent**: worker pool sized to the host by default, tunable with `-j`
//! - **Glob filtering**: skip files with `--exclude`, prune directories with `--exclude-dir`
//! - **Multiple output formats**: table (default), JSON, compact one-liner
//!
//! ## Usage
//!
//! ```bash
//! # Count LOC in current directory
//! polyloc .
//!
//! # Skip vendored code and generated files
//! polyloc . --exclude-dir vendor --exclude "**/*.gen.go"
//!
//! # Output as JSON
//! polyloc . --output json
//!
//! # Single-threaded, sorted by file count
//! polyloc . -j 1 --by-files
//! ```

use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use polyloclib::{scan, ExcludePolicy, ScanOptions};

mod render;

use render::SortBy;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("polyloc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Concurrent lines-of-code counter with per-language breakdown")
        .arg(
            Arg::new("path")
                .help("Path to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("workers")
                .short('j')
                .long("workers")
                .value_parser(clap::value_parser!(usize))
                .help("Number of worker threads (defaults to the CPU count)"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern (can be specified multiple times)"),
        )
        .arg(
            Arg::new("exclude-dir")
                .long("exclude-dir")
                .action(ArgAction::Append)
                .help("Skip directories with this name (can be specified multiple times)"),
        )
        .arg(
            Arg::new("hidden")
                .long("hidden")
                .action(ArgAction::SetTrue)
                .help("Include hidden files and directories"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json", "compact"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("by-files")
                .long("by-files")
                .action(ArgAction::SetTrue)
                .help("Sort the table by file count instead of code lines"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase diagnostic verbosity (-v info, -vv debug)"),
        )
}

/// Build the scan options from parsed arguments.
fn build_options(matches: &ArgMatches) -> Result<ScanOptions, anyhow::Error> {
    let mut policy = ExcludePolicy::new().with_hidden(matches.get_flag("hidden"));

    if let Some(dirs) = matches.get_many::<String>("exclude-dir") {
        for dir in dirs {
            policy = policy.exclude_dir(dir);
        }
    }
    if let Some(patterns) = matches.get_many::<String>("exclude") {
        for pattern in patterns {
            policy = policy.ignore(pattern)?;
        }
    }

    let mut options = ScanOptions::new().policy(policy);
    if let Some(workers) = matches.get_one::<usize>("workers") {
        options = options.workers(*workers);
    }
    Ok(options)
}

/// Route diagnostics to stderr. `RUST_LOG` overrides the `-v` level.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let options = build_options(matches)?;

    let report = scan(path, options)?;

    let format = matches
        .get_one::<String>("output")
        .map(|s| s.as_str())
        .unwrap_or("table");
    match format {
        "json" => println!("{}", render::render_json(&report)?),
        "compact" => print!("{}", render::render_compact(&report)),
        _ => {
            let sort = if matches.get_flag("by-files") {
                SortBy::Files
            } else {
                SortBy::Code
            };
            print!("{}", render::render_table(&report, sort));
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parses_defaults() {
        let matches = build_command().get_matches_from(["polyloc"]);
        assert_eq!(matches.get_one::<String>("path").unwrap(), ".");
        assert_eq!(matches.get_one::<String>("output").unwrap(), "table");
        assert!(!matches.get_flag("hidden"));
        assert!(!matches.get_flag("by-files"));
    }

    #[test]
    fn test_command_parses_all_flags() {
        let matches = build_command().get_matches_from([
            "polyloc",
            "src",
            "-j",
            "4",
            "-e",
            "**/*.min.js",
            "-e",
            "**/gen/**",
            "--exclude-dir",
            "vendor",
            "--hidden",
            "-o",
            "json",
            "-vv",
        ]);
        assert_eq!(matches.get_one::<String>("path").unwrap(), "src");
        assert_eq!(*matches.get_one::<usize>("workers").unwrap(), 4);
        assert_eq!(
            matches
                .get_many::<String>("exclude")
                .unwrap()
                .collect::<Vec<_>>(),
            ["**/*.min.js", "**/gen/**"]
        );
        assert!(matches.get_flag("hidden"));
        assert_eq!(matches.get_one::<String>("output").unwrap(), "json");
        assert_eq!(matches.get_count("verbose"), 2);
    }

    #[test]
    fn test_invalid_output_format_rejected() {
        let result = build_command().try_get_matches_from(["polyloc", "-o", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_options_collects_policy() {
        let matches = build_command().get_matches_from([
            "polyloc",
            "--exclude-dir",
            "target",
            "-e",
            "**/*.lock",
            "--hidden",
        ]);
        let options = build_options(&matches).unwrap();
        assert_eq!(options.policy.exclude_dirs, ["target"]);
        assert_eq!(options.policy.ignore.len(), 1);
        assert!(options.policy.include_hidden);
    }

    #[test]
    fn test_build_options_rejects_bad_glob() {
        let matches = build_command().get_matches_from(["polyloc", "-e", "[oops"]);
        assert!(build_options(&matches).is_err());
    }
}
