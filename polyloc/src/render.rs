//! Output rendering for scan reports: table, JSON, and compact formats.

use polyloclib::{LanguageStats, ScanReport};

// Table column widths
const COL_LANGUAGE: usize = 20;
const COL_FILES: usize = 10;
const COL_COUNT: usize = 12;

/// Maximum number of detailed error entries shown under the table.
const MAX_ERROR_LINES: usize = 10;

/// How table rows are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Code lines, descending (default)
    Code,
    /// File count, descending
    Files,
}

/// Render the full table: header, per-language rows, total, summary footer,
/// and the capped error list.
pub fn render_table(report: &ScanReport, sort: SortBy) -> String {
    let mut out = String::new();

    out.push('\n');
    push_separator(&mut out);
    out.push_str(&format!(
        "{:<lang$} {:>files$} {:>n$} {:>n$} {:>n$} {:>n$}\n",
        "Language",
        "Files",
        "Blank",
        "Comment",
        "Code",
        "Total",
        lang = COL_LANGUAGE,
        files = COL_FILES,
        n = COL_COUNT,
    ));
    push_separator(&mut out);

    for (name, stats) in sorted_languages(report, sort) {
        push_row(&mut out, name, stats);
    }

    push_separator(&mut out);
    push_row(&mut out, "Total", &report.total);
    push_separator(&mut out);

    out.push('\n');
    out.push_str("Summary:\n");
    out.push_str(&format!("  Files processed: {}\n", report.processed));
    out.push_str(&format!("  Files skipped:   {}\n", report.skipped));

    let warnings = report.errors.iter().filter(|e| e.is_permission()).count();
    let errors = report.errors.len() - warnings;
    if errors > 0 {
        out.push_str(&format!("  Errors:          {errors}\n"));
    }
    if warnings > 0 {
        out.push_str(&format!("  Warnings:        {warnings}\n"));
    }

    if !report.errors.is_empty() {
        out.push('\n');
        out.push_str("Errors encountered:\n");
        for error in report.errors.iter().take(MAX_ERROR_LINES) {
            out.push_str(&format!("  - {error}\n"));
        }
        if report.errors.len() > MAX_ERROR_LINES {
            out.push_str(&format!(
                "  ... and {} more errors\n",
                report.errors.len() - MAX_ERROR_LINES
            ));
        }
    }

    out.push('\n');
    out
}

/// Render the report as pretty JSON.
pub fn render_json(report: &ScanReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a one-line summary.
pub fn render_compact(report: &ScanReport) -> String {
    format!(
        "Files: {} | Blank: {} | Comment: {} | Code: {} | Total: {}\n",
        report.total.files,
        report.total.blank,
        report.total.comment,
        report.total.code,
        report.total.total,
    )
}

/// Languages in display order for the chosen sort, ties broken by name.
fn sorted_languages(report: &ScanReport, sort: SortBy) -> Vec<(&str, &LanguageStats)> {
    let mut rows: Vec<(&str, &LanguageStats)> = report
        .languages
        .iter()
        .map(|(name, stats)| (name.as_str(), stats))
        .collect();

    match sort {
        SortBy::Code => rows.sort_by(|a, b| b.1.code.cmp(&a.1.code).then(a.0.cmp(b.0))),
        SortBy::Files => rows.sort_by(|a, b| b.1.files.cmp(&a.1.files).then(a.0.cmp(b.0))),
    }
    rows
}

fn push_separator(out: &mut String) {
    // 5 spaces between the 6 columns
    let width = COL_LANGUAGE + COL_FILES + COL_COUNT * 4 + 5;
    out.push_str(&"-".repeat(width));
    out.push('\n');
}

fn push_row(out: &mut String, name: &str, stats: &LanguageStats) {
    out.push_str(&format!(
        "{:<lang$} {:>files$} {:>n$} {:>n$} {:>n$} {:>n$}\n",
        truncate_name(name),
        format_count(stats.files),
        format_count(stats.blank),
        format_count(stats.comment),
        format_count(stats.code),
        format_count(stats.total),
        lang = COL_LANGUAGE,
        files = COL_FILES,
        n = COL_COUNT,
    ));
}

/// Truncate a language name to the label column, `...`-terminated.
fn truncate_name(name: &str) -> String {
    if name.chars().count() > COL_LANGUAGE {
        let head: String = name.chars().take(COL_LANGUAGE - 3).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

/// Format a number with thousands separators.
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let mut result = String::new();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}
