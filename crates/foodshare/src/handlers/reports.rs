//! Canned report queries with their charts.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use foodshare_core::reports::{find_report, render_visualization, Rendered, Report, REPORTS};
use foodshare_core::storage::{RepositoryError, TableData};

use super::flash::{Flash, FlashMessage};
use super::pages::HtmlTemplate;
use crate::{handlers::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub query: Option<String>,
}

#[derive(Template)]
#[template(path = "reports.html")]
struct ReportsTemplate {
    active_nav: &'static str,
    flash: Option<FlashMessage>,
    reports: &'static [Report],
    selected: &'static Report,
    data: Option<TableData>,
    visuals: Vec<Rendered>,
    error: Option<String>,
}

/// Handler for the reporting view (GET /reports?query=).
///
/// Runs the selected report, defaulting to the first one. A failing query
/// is shown on the page instead of the results.
pub async fn reports(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
    flash: Flash,
) -> Result<Response, AppError> {
    let selected = match query.query.as_deref() {
        None | Some("") => &REPORTS[0],
        Some(slug) => find_report(slug).ok_or_else(|| RepositoryError::NotFound {
            entity_type: "Report",
            id: slug.to_string(),
        })?,
    };

    let mut page = ReportsTemplate {
        active_nav: "reports",
        flash: flash.0.clone(),
        reports: REPORTS,
        selected,
        data: None,
        visuals: Vec::new(),
        error: None,
    };

    match state.report_repo.run_query(selected.sql).await {
        Ok(data) => {
            page.visuals = selected
                .visualizations
                .iter()
                .map(|visualization| render_visualization(visualization, &data))
                .collect();
            page.data = Some(data);
        }
        Err(e) => {
            tracing::error!(report = selected.slug, error = %e, "Report query failed");
            page.error = Some(format!("Error executing query: {e}"));
        }
    }

    Ok(flash.consume(HtmlTemplate(page)))
}
