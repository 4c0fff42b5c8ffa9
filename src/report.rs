use crate::filter::Filter;
use crate::pattern::{Entry, MatchOptions};
use colored::Colorize;
use comfy_table::{Cell, Table};
use serde::Serialize;
use serde_json::json;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Outcome of evaluating one filter against a list of records
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub filter: String,
    pub total: usize,
    /// Zero-based indices of matching records
    pub matched: Vec<usize>,
}

impl MatchReport {
    pub fn is_match(&self, index: usize) -> bool {
        self.matched.binary_search(&index).is_ok()
    }
}

pub fn evaluate_records(filter: &Filter, records: &[Entry], options: &MatchOptions) -> MatchReport {
    let matched = records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches_with(*record, options))
        .map(|(index, _)| index)
        .collect();

    MatchReport {
        filter: filter.to_string(),
        total: records.len(),
        matched,
    }
}

/// Table of records with their result, followed by a summary line
pub fn format_report_text(report: &MatchReport, records: &[Entry]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Matched", "Record"]);

    for (index, record) in records.iter().enumerate() {
        let matched = if report.is_match(index) {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        };
        let body = serde_json::to_string(record).unwrap_or_default();
        table.add_row(vec![Cell::new(index), Cell::new(matched), Cell::new(body)]);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Filter: {}", report.filter.cyan());
    let _ = writeln!(out, "{table}");
    let _ = writeln!(
        out,
        "{} of {} records matched",
        report.matched.len(),
        report.total
    );
    out
}

pub fn format_report_json(report: &MatchReport) -> String {
    serde_json::to_string_pretty(&json!({
        "filter": report.filter,
        "total": report.total,
        "matched_count": report.matched.len(),
        "matched": report.matched,
    }))
    .unwrap_or_default()
}

/// Colored line diff: removed lines in red, added lines in green
pub fn compute_text_diff(before: &str, after: &str) -> String {
    let diff = TextDiff::from_lines(before, after);
    let mut result = String::new();

    for change in diff.iter_all_changes() {
        let line = change.to_string();
        let line = line.trim_end_matches('\n');
        match change.tag() {
            ChangeTag::Delete => {
                let _ = writeln!(result, "{}", format!("-{line}").red());
            }
            ChangeTag::Insert => {
                let _ = writeln!(result, "{}", format!("+{line}").green());
            }
            ChangeTag::Equal => {
                let _ = writeln!(result, " {line}");
            }
        }
    }

    result
}
