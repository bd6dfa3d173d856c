use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        crud,
        health::{healthz, livez},
        learner::learner,
        pages::{about, introduction},
        reports::reports,
        tables::{browse, download_csv},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let timeout = state.config.request_timeout();

    let crud_routes = Router::new()
        .route("/{table}", post(crud::create))
        .route("/{table}/delete", post(crud::delete_by_form))
        .route("/{table}/{id}", post(crud::update))
        .route("/{table}/{id}/edit", get(crud::edit))
        .route("/{table}/{id}/delete", post(crud::delete));

    Router::new()
        .route("/", get(introduction))
        .route("/tables", get(browse))
        .route("/tables/{table}/csv", get(download_csv))
        .route("/crud", get(crud::page))
        .nest("/crud", crud_routes)
        .route("/reports", get(reports))
        .route("/learner", get(learner))
        .route("/about", get(about))
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::demo_data::DemoData;
    use crate::storage::SqliteRepository;

    async fn test_app(seed: bool) -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let repo = SqliteRepository::new(&path).await.unwrap();
        if seed {
            repo.seed_if_empty(DemoData::generate()).await.unwrap();
        }
        let config = Config {
            database_path: path.display().to_string(),
            request_timeout_seconds: 10,
            seed_demo_data: seed,
        };
        (dir, create_app(AppState::new(repo, config)))
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    /// The flash message carried by a redirect's Set-Cookie header.
    fn flash_of(response: &Response) -> String {
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        let value = cookie
            .split(';')
            .next()
            .unwrap()
            .trim_start_matches("flash_message=");
        urlencoding::decode(value).unwrap().into_owned()
    }

    #[tokio::test]
    async fn test_introduction_shows_metrics() {
        let (_dir, app) = test_app(true).await;

        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Total Food Listings"));
        assert!(html.contains("Completed Claims"));
        assert!(html.contains("Providers by City"));
        assert!(html.contains("Project Introduction"));
        assert!(html.contains("User Introduction"));
    }

    #[tokio::test]
    async fn test_introduction_on_empty_database() {
        let (_dir, app) = test_app(false).await;

        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No providers yet."));
    }

    #[tokio::test]
    async fn test_tables_default_to_providers() {
        let (_dir, app) = test_app(true).await;

        let response = get(&app, "/tables").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("<th>Provider_ID</th>"));
        assert!(html.contains("Green Bistro"));
    }

    #[tokio::test]
    async fn test_unknown_table_is_rejected() {
        let (_dir, app) = test_app(true).await;

        let response = get(&app, "/tables?table=sqlite_master").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get(&app, "/tables/users/csv").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_csv_download() {
        let (_dir, app) = test_app(true).await;

        let response = get(&app, "/tables/receivers/csv").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"receivers.csv\""
        );

        let csv = body_text(response).await;
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Receiver_ID,Name,Type,City,Contact")
        );
        assert_eq!(lines.count(), DemoData::generate().receivers.len());
    }

    #[tokio::test]
    async fn test_add_provider_redirects_with_flash() {
        let (_dir, app) = test_app(false).await;

        let response = post_form(
            &app,
            "/crud/providers",
            "name=Green+Bistro&provider_type=Restaurant&address=12+Elm+St&city=Springfield&contact=555-0100",
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/crud?op=add&table=providers"
        );
        assert!(flash_of(&response).contains("Provider added successfully!"));

        let html = body_text(get(&app, "/tables?table=providers").await).await;
        assert!(html.contains("Green Bistro"));
    }

    #[tokio::test]
    async fn test_add_food_with_bad_quantity_is_reported() {
        let (_dir, app) = test_app(false).await;

        let response = post_form(
            &app,
            "/crud/food",
            "food_name=Rice&quantity=lots&expiry_date=2025-03-20&provider_id=1",
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let flash = flash_of(&response);
        assert!(flash.contains("\"type\":\"error\""));
        assert!(flash.contains("Quantity must be a whole number"));
    }

    #[tokio::test]
    async fn test_food_may_reference_a_missing_provider() {
        let (_dir, app) = test_app(false).await;

        let response = post_form(
            &app,
            "/crud/food",
            "food_name=Rice&quantity=5&expiry_date=2025-03-20&provider_id=999",
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(flash_of(&response).contains("Food added successfully!"));

        let response = post_form(
            &app,
            "/crud/claims",
            "food_id=77&receiver_id=88&status=Pending&timestamp=",
        )
        .await;
        assert!(flash_of(&response).contains("Claim added successfully!"));
    }

    #[tokio::test]
    async fn test_flash_is_shown_once_and_cleared() {
        let (_dir, app) = test_app(false).await;
        let value = crate::handlers::flash::FlashMessage::success("Claim added successfully!")
            .to_cookie_value();
        let pair = format!("flash_message={}", urlencoding::encode(&value));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/crud")
                    .header(header::COOKIE, pair)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cleared = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cleared.to_str().unwrap().contains("Max-Age=0"));
        assert!(body_text(response).await.contains("Claim added successfully!"));
    }

    #[tokio::test]
    async fn test_update_form_is_prefilled() {
        let (_dir, app) = test_app(true).await;

        let response = get(&app, "/crud/receivers/1/edit").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("action=\"/crud/receivers/1\""));
        assert!(html.contains("value=\"Helping Hands\""));
    }

    #[tokio::test]
    async fn test_update_claim_status() {
        let (_dir, app) = test_app(true).await;

        let response = post_form(
            &app,
            "/crud/claims/4",
            "food_id=4&receiver_id=3&status=Completed&timestamp=2025-03-05+05%3A26%3A00",
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(flash_of(&response).contains("Claim 4 updated successfully!"));

        let html = body_text(get(&app, "/crud?op=update&table=claims&id=4").await).await;
        assert!(html.contains("value=\"2025-03-05 05:26:00\""));
    }

    #[tokio::test]
    async fn test_unreadable_row_still_opens_for_editing() {
        let (dir, app) = test_app(false).await;
        let conn = rusqlite::Connection::open(dir.path().join("test.db")).unwrap();
        conn.execute(
            "INSERT INTO claims (Claim_ID, Food_ID, Receiver_ID, Status, Timestamp) VALUES (1, 1, 1, 'Pending', NULL)",
            [],
        )
        .unwrap();

        let response = get(&app, "/crud/claims/1/edit").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("could not be read"));
        assert!(html.contains("action=\"/crud/claims/1\""));

        let response = post_form(
            &app,
            "/crud/claims/1",
            "food_id=1&receiver_id=1&status=Completed&timestamp=2025-03-05+05%3A26%3A00",
        )
        .await;
        assert!(flash_of(&response).contains("Claim 1 updated successfully!"));
    }

    #[tokio::test]
    async fn test_non_numeric_path_id_redirects_with_flash() {
        let (_dir, app) = test_app(true).await;

        let response = post_form(&app, "/crud/receivers/abc", "name=Nobody").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/crud?op=update&table=receivers"
        );
        assert!(flash_of(&response).contains("\"type\":\"error\""));

        let response = post_form(&app, "/crud/claims/abc/delete", "").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/crud?op=delete&table=claims"
        );
    }

    #[tokio::test]
    async fn test_update_missing_row_reports_not_found() {
        let (_dir, app) = test_app(false).await;

        let response = post_form(&app, "/crud/receivers/42", "name=Nobody").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/crud/receivers/42/edit"
        );
        assert!(flash_of(&response).contains("Receiver not found: 42"));
    }

    #[tokio::test]
    async fn test_delete_provider_with_food_is_refused() {
        let (_dir, app) = test_app(true).await;

        let response = post_form(&app, "/crud/providers/delete", "id=1").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(flash_of(&response).contains("Cannot delete Provider 1"));

        let html = body_text(get(&app, "/tables?table=providers").await).await;
        assert!(html.contains("Green Bistro"));
    }

    #[tokio::test]
    async fn test_delete_claim_by_path() {
        let (_dir, app) = test_app(true).await;

        let response = post_form(&app, "/crud/claims/1/delete", "").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(flash_of(&response).contains("Claim 1 deleted successfully!"));
    }

    #[tokio::test]
    async fn test_reports_default_to_first_query() {
        let (_dir, app) = test_app(true).await;

        let response = get(&app, "/reports").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Food Providers by City"));
        assert!(html.contains("Query Results"));
        assert!(html.contains("<svg"));
    }

    #[tokio::test]
    async fn test_claim_status_report_has_breakdown() {
        let (_dir, app) = test_app(true).await;

        let html = body_text(get(&app, "/reports?query=claim-status").await).await;
        assert!(html.contains("Percentage Breakdown:"));
        assert!(html.contains("Completed: "));
    }

    #[tokio::test]
    async fn test_unknown_report_is_not_found() {
        let (_dir, app) = test_app(true).await;

        let response = get(&app, "/reports?query=nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_learner_query_runs_on_demand() {
        let (_dir, app) = test_app(true).await;

        let html = body_text(get(&app, "/learner").await).await;
        assert!(!html.contains("row(s)"));

        let html = body_text(get(&app, "/learner?run=city-most-listings").await).await;
        assert!(html.contains("<th>Listings</th>"));
        assert!(html.contains("1 row(s)"));
    }

    #[tokio::test]
    async fn test_unknown_learner_query_shows_the_menu() {
        let (_dir, app) = test_app(true).await;

        let response = get(&app, "/learner?run=nope").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Learner SQL Queries"));
        assert!(!html.contains("row(s)"));
        assert!(!html.contains("Error executing query"));
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (_dir, app) = test_app(false).await;

        assert_eq!(get(&app, "/livez").await.status(), StatusCode::OK);

        let response = get(&app, "/healthz").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["healthy"], true);
    }
}
