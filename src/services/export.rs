//! Export serialization: JSON envelope or CSV, delivered as a download.

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::{ExportDocument, Headline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

pub struct ExportFile {
    pub body: String,
    pub content_type: &'static str,
    pub filename: String,
}

pub fn render(
    format: ExportFormat,
    headlines: Vec<Headline>,
    filter: Option<&str>,
) -> AppResult<ExportFile> {
    let now = Utc::now();
    let filename = build_filename(format, filter, now);
    let body = match format {
        ExportFormat::Json => render_json(headlines, filter, now)?,
        ExportFormat::Csv => render_csv(&headlines)?,
    };

    Ok(ExportFile {
        body,
        content_type: format.content_type(),
        filename,
    })
}

fn render_json(
    headlines: Vec<Headline>,
    filter: Option<&str>,
    now: DateTime<Utc>,
) -> AppResult<String> {
    let document = ExportDocument {
        export_date: now.to_rfc3339(),
        total_items: headlines.len(),
        filter_applied: filter.map(str::to_string),
        headlines,
    };

    serde_json::to_string_pretty(&document)
        .map_err(|err| AppError::internal(format!("failed to serialize JSON export: {}", err)))
}

fn render_csv(headlines: &[Headline]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Title", "Link", "Published_At", "Source"])
        .map_err(|err| AppError::internal(format!("failed to write CSV header: {}", err)))?;

    for headline in headlines {
        writer
            .write_record([
                sanitize_field(&headline.title),
                sanitize_field(&headline.link),
                sanitize_field(&headline.published_at),
                sanitize_field(&headline.source),
            ])
            .map_err(|err| AppError::internal(format!("failed to write CSV row: {}", err)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| AppError::internal(format!("failed to flush CSV writer: {}", err)))?;
    String::from_utf8(bytes)
        .map_err(|err| AppError::internal(format!("CSV output was not UTF-8: {}", err)))
}

/// Fields starting with a spreadsheet formula trigger character get a
/// leading apostrophe.
fn sanitize_field(value: &str) -> String {
    match value.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{}", value),
        _ => value.to_string(),
    }
}

fn build_filename(format: ExportFormat, filter: Option<&str>, now: DateTime<Utc>) -> String {
    let timestamp = now.format("%Y%m%d_%H%M%S");
    match filter.and_then(filename_slug) {
        Some(slug) => format!("rss_export_{}_{}.{}", slug, timestamp, format.extension()),
        None => format!("rss_export_{}.{}", timestamp, format.extension()),
    }
}

/// Filter keywords are user input; only a lowercased alphanumeric slug makes
/// it into the attachment filename.
fn filename_slug(filter: &str) -> Option<String> {
    let slug: String = filter
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(30)
        .collect::<String>()
        .to_lowercase();
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}
