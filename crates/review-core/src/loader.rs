/// Loader for the sensitive term table.
///
/// The table is a CSV file with a header row. Two columns are required:
/// - `category`: label grouping the term, e.g. "政治相关"
/// - `word`: the term itself
///
/// Columns are located by name (case-insensitive, a leading UTF-8 BOM is ignored)
/// and any other columns are skipped. Each row contributes one term to its
/// category, in file order.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{error, info, warn};

use crate::error::CoreError;
use crate::model::TermIndex;

pub const CATEGORY_COLUMN: &str = "category";
pub const TERM_COLUMN: &str = "word";

/// Read and parse the term table at `path`.
pub fn load_term_index(path: &Path) -> Result<TermIndex, CoreError> {
    let file = File::open(path).map_err(|source| CoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let index = parse_term_table(BufReader::new(file))?;
    info!(
        path = %path.display(),
        categories = index.len(),
        terms = index.term_count(),
        "term table loaded"
    );
    Ok(index)
}

/// Load the term table, degrading to an empty index on failure.
///
/// The failure is logged once here and returned as a message so the caller can
/// show it to the operator.
pub fn load_or_empty(path: &Path) -> (TermIndex, Option<String>) {
    match load_term_index(path) {
        Ok(index) => (index, None),
        Err(e) => {
            error!(error = %e, path = %path.display(), "term table failed to load, continuing with empty index");
            (TermIndex::empty(), Some(format!("敏感词库加载失败：{e}")))
        }
    }
}

/// Parse CSV term rows from any reader.
///
/// Rows with an empty category or term, or too few fields, are skipped with a warning.
pub fn parse_term_table<R: Read>(reader: R) -> Result<TermIndex, CoreError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let category_idx = column_index(&headers, CATEGORY_COLUMN)?;
    let term_idx = column_index(&headers, TERM_COLUMN)?;

    let mut index = TermIndex::empty();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let category = record.get(category_idx).unwrap_or_default();
        let term = record.get(term_idx).unwrap_or_default();

        if category.is_empty() || term.is_empty() {
            // +2: one for the header, one for 1-based numbering.
            warn!(line = row + 2, category, term, "skipping term row with empty field");
            continue;
        }
        index.push(category, term);
    }

    Ok(index)
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, CoreError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
        .ok_or(CoreError::MissingColumn(name))
}
