use askama::Template;
use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use foodshare_core::reports::{find_learner_query, LearnerQuery, LEARNER_QUERIES};
use foodshare_core::storage::TableData;

use super::flash::{Flash, FlashMessage};
use super::pages::HtmlTemplate;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LearnerParams {
    pub run: Option<String>,
}

#[derive(Template)]
#[template(path = "learner.html")]
struct LearnerTemplate {
    active_nav: &'static str,
    flash: Option<FlashMessage>,
    queries: &'static [LearnerQuery],
    running: Option<&'static LearnerQuery>,
    result: Option<TableData>,
    error: Option<String>,
}

impl LearnerTemplate {
    fn running_slug(&self) -> &str {
        self.running.map(|query| query.slug).unwrap_or_default()
    }
}

/// Handler for the learner queries (GET /learner?run=).
///
/// Lists every query with its SQL; only the one named by `run` is executed.
/// Failures render inline as "Error executing query: ...".
pub async fn learner(
    State(state): State<AppState>,
    Query(params): Query<LearnerParams>,
    flash: Flash,
) -> Response {
    let mut page = LearnerTemplate {
        active_nav: "learner",
        flash: flash.0.clone(),
        queries: LEARNER_QUERIES,
        running: None,
        result: None,
        error: None,
    };

    if let Some(slug) = params.run.as_deref().filter(|slug| !slug.is_empty()) {
        match find_learner_query(slug) {
            Some(query) => {
                page.running = Some(query);
                match state.report_repo.run_query(query.sql).await {
                    Ok(data) => page.result = Some(data),
                    Err(e) => {
                        tracing::warn!(query = query.slug, error = %e, "Learner query failed");
                        page.error = Some(format!("Error executing query: {e}"));
                    }
                }
            }
            None => tracing::debug!(slug, "Unknown learner query"),
        }
    }

    flash.consume(HtmlTemplate(page))
}
