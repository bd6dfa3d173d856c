use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use foodshare_core::reports::{bar_chart_svg, ChartPoint};
use foodshare_core::storage::DashboardSummary;

use super::flash::{Flash, FlashMessage};
use crate::{handlers::AppError, state::AppState};

/// Template wrapper that converts Askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

/// Project introduction with headline metrics and providers per city.
#[derive(Template)]
#[template(path = "introduction.html")]
struct IntroductionTemplate {
    active_nav: &'static str,
    flash: Option<FlashMessage>,
    summary: DashboardSummary,
    chart: Option<String>,
}

/// Handler for the introduction page (GET /).
pub async fn introduction(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<Response, AppError> {
    let summary = state.report_repo.dashboard_summary().await?;
    let chart = providers_by_city_chart(&summary);

    Ok(flash.consume(HtmlTemplate(IntroductionTemplate {
        active_nav: "introduction",
        flash: flash.0.clone(),
        summary,
        chart,
    })))
}

fn providers_by_city_chart(summary: &DashboardSummary) -> Option<String> {
    if summary.providers_by_city.is_empty() {
        return None;
    }
    let points: Vec<ChartPoint> = summary
        .providers_by_city
        .iter()
        .map(|(city, count)| ChartPoint::new(city.clone(), *count as f64))
        .collect();
    Some(bar_chart_svg("Providers by City", "City", "Count", &points))
}

/// Static help page describing who uses the system.
#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate {
    active_nav: &'static str,
    flash: Option<FlashMessage>,
}

/// Handler for the user introduction page (GET /about).
pub async fn about(flash: Flash) -> Response {
    flash.consume(HtmlTemplate(AboutTemplate {
        active_nav: "about",
        flash: flash.0.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_chart_without_providers() {
        let summary = DashboardSummary::default();
        assert!(providers_by_city_chart(&summary).is_none());
    }

    #[test]
    fn test_chart_lists_every_city() {
        let summary = DashboardSummary {
            providers_by_city: vec![("Springfield".to_string(), 3), ("Shelbyville".to_string(), 1)],
            ..DashboardSummary::default()
        };
        let svg = providers_by_city_chart(&summary).unwrap();
        assert!(svg.contains("Providers by City"));
        assert!(svg.contains("Springfield"));
        assert!(svg.contains("Shelbyville"));
    }

    #[test]
    fn test_about_page_names_the_roles() {
        let html = AboutTemplate {
            active_nav: "about",
            flash: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("For Food Providers"));
        assert!(html.contains("For Food Receivers"));
        assert!(html.contains("For Administrators"));
    }
}
