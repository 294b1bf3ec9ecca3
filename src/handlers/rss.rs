use axum::{
    body::Body,
    extract::{Query, State},
    http::header,
    response::{Json, Response},
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{clamped_top_limit, export_limit, validate_filter};
use crate::models::{Headline, TopHeadlinesResponse};
use crate::services::export::{self, ExportFormat};
use crate::AppState;

#[derive(Deserialize)]
pub struct LatestQuery {
    pub filter: Option<String>,
}

/// GET /api/rss/spiegel/latest
pub async fn latest(
    State(state): State<AppState>,
    Query(query): Query<LatestQuery>,
) -> AppResult<Json<Headline>> {
    let filter = validate_filter(query.filter.as_deref())?;
    let headline = state.rss.latest(filter).await?;
    Ok(Json(headline))
}

#[derive(Deserialize)]
pub struct TopQuery {
    pub limit: Option<String>,
    pub filter: Option<String>,
}

/// GET /api/rss/spiegel/top5
pub async fn top(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> AppResult<Json<TopHeadlinesResponse>> {
    let filter = validate_filter(query.filter.as_deref())?;
    let limit = clamped_top_limit(query.limit.as_deref());

    let (headlines, total_count) = state.rss.top(limit, filter).await?;
    Ok(Json(TopHeadlinesResponse {
        headlines,
        total_count,
    }))
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
    pub filter: Option<String>,
    pub limit: Option<String>,
}

/// GET /api/rss/spiegel/export
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = match query.format.as_deref() {
        None | Some("") => {
            return Err(AppError::validation(
                "missing format parameter (expected json or csv)",
            ))
        }
        Some(raw) => ExportFormat::parse(raw).ok_or_else(|| {
            AppError::validation(format!(
                "invalid format parameter '{}' (expected json or csv)",
                raw
            ))
        })?,
    };
    let filter = validate_filter(query.filter.as_deref())?;
    let limit = export_limit(query.limit.as_deref())?;

    let headlines = state.rss.export_set(limit, filter).await?;
    let file = export::render(format, headlines, filter)?;

    // Exported content is feed-controlled text; it ships as a download with
    // sniffing and framing disabled.
    Response::builder()
        .header(header::CONTENT_TYPE, file.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        )
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .header(header::X_FRAME_OPTIONS, "DENY")
        .header(header::CONTENT_SECURITY_POLICY, "default-src 'none'")
        .body(Body::from(file.body))
        .map_err(|err| AppError::internal(format!("failed to build export response: {}", err)))
}
