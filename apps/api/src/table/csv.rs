use thiserror::Error;

use crate::models::{Candidate, SkillParameter};

pub const DEFAULT_FILENAME: &str = "candidates.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

const ROW_SEPARATOR: &str = "\r\n";

#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("No data to export")]
    EmptyView,
}

/// A rendered CSV download.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Renders the current view as CSV.
///
/// Skill columns follow `confirmed` exactly. Text fields are always quoted,
/// numbers never are. An empty view is an error: no file is produced.
pub fn export_csv(
    view: &[&Candidate],
    confirmed: &[SkillParameter],
    filename: Option<&str>,
) -> Result<CsvExport, ExportError> {
    if view.is_empty() {
        return Err(ExportError::EmptyView);
    }

    let mut rows = Vec::with_capacity(view.len() + 1);
    rows.push(header_row(confirmed));
    rows.extend(view.iter().map(|candidate| candidate_row(candidate, confirmed)));

    let filename = filename
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FILENAME);

    Ok(CsvExport {
        filename: filename.to_string(),
        content_type: CSV_CONTENT_TYPE,
        body: rows.join(ROW_SEPARATOR),
    })
}

fn header_row(confirmed: &[SkillParameter]) -> String {
    let mut headers = vec![
        "Candidate Name".to_string(),
        "Phone Number".to_string(),
        "Email".to_string(),
    ];
    headers.extend(confirmed.iter().map(|p| format!("{} Score", p.name)));
    headers.push("Overall Score (%)".to_string());
    headers
        .iter()
        .map(|h| header_cell(h))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header cells stay bare unless a skill name would break the row.
fn header_cell(cell: &str) -> String {
    if cell.contains(|c: char| matches!(c, ',' | '"' | '\r' | '\n')) {
        quote(cell)
    } else {
        cell.to_string()
    }
}

fn candidate_row(candidate: &Candidate, confirmed: &[SkillParameter]) -> String {
    let mut fields = vec![
        quote(&candidate.name),
        quote(&candidate.phone),
        quote(&candidate.email),
    ];
    fields.extend(
        confirmed
            .iter()
            .map(|p| candidate.skill_score(&p.name).to_string()),
    );
    fields.push(candidate.overall_score.to_string());
    fields.join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
