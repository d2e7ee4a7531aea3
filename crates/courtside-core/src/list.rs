use std::path::Path;

use anyhow::{Context, Result};

use crate::spec::CategorySet;

/// Summary row for a single category set file.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySetRow {
    pub file: String,
    pub tournament: String,
    pub categories: usize,
    pub seats_taken: i64,
    pub seats_total: i64,
}

/// Scan a directory for .json category sets and produce summary rows.
///
/// Files that do not parse as a category set are skipped with a warning.
pub fn scan_dir(dir: &str) -> Result<Vec<CategorySetRow>> {
    let entries = std::fs::read_dir(dir).with_context(|| format!("cannot read directory {dir}"))?;

    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut rows = Vec::new();
    for path in paths {
        match load_row(&path) {
            Ok(row) => rows.push(row),
            Err(e) => tracing::warn!(file = %path.display(), "skip: {e:#}"),
        }
    }
    Ok(rows)
}

fn load_row(path: &Path) -> Result<CategorySetRow> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let set: CategorySet = serde_json::from_str(&content)
        .with_context(|| format!("{}: not a category set", path.display()))?;

    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();
    let (seats_total, seats_taken) = set.seats();

    Ok(CategorySetRow {
        file,
        tournament: set.tournament,
        categories: set.categories.len(),
        seats_taken,
        seats_total,
    })
}

/// Render rows as an aligned table.
pub fn render_table(rows: &[CategorySetRow]) -> String {
    if rows.is_empty() {
        return "(no category sets found)\n".to_string();
    }
    let w_file = rows.iter().map(|r| r.file.len()).max().unwrap_or(4).max(4);
    let w_tour = rows
        .iter()
        .map(|r| r.tournament.len())
        .max()
        .unwrap_or(10)
        .max(10);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<w_file$}  {:<w_tour$}  {:<10}  SEATS\n",
        "FILE", "TOURNAMENT", "CATEGORIES"
    ));
    out.push_str(&format!(
        "{:<w_file$}  {:<w_tour$}  {:<10}  -----\n",
        "-".repeat(w_file),
        "-".repeat(w_tour),
        "----------"
    ));
    for r in rows {
        out.push_str(&format!(
            "{:<w_file$}  {:<w_tour$}  {:<10}  {}/{}\n",
            r.file, r.tournament, r.categories, r.seats_taken, r.seats_total
        ));
    }
    out
}
