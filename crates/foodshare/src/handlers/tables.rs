//! Table browser and CSV download.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use foodshare_core::donation::Table;
use foodshare_core::export::{csv_file_name, to_csv};
use foodshare_core::storage::TableData;

use super::flash::{Flash, FlashMessage};
use super::pages::HtmlTemplate;
use crate::{handlers::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct TableQuery {
    pub table: Option<String>,
}

#[derive(Template)]
#[template(path = "tables.html")]
struct TablesTemplate {
    active_nav: &'static str,
    flash: Option<FlashMessage>,
    tables: [Table; 4],
    table: Table,
    data: TableData,
    file_name: String,
}

/// Handler for the table browser (GET /tables?table=).
///
/// Defaults to `providers`. Names outside the allow-list are a 400.
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
    flash: Flash,
) -> Result<Response, AppError> {
    let table = match query.table.as_deref() {
        None | Some("") => Table::Providers,
        Some(name) => Table::parse(name)?,
    };
    let data = state.report_repo.fetch_table(table).await?;
    tracing::debug!(table = %table, rows = data.rows.len(), "Fetched table");

    Ok(flash.consume(HtmlTemplate(TablesTemplate {
        active_nav: "tables",
        flash: flash.0.clone(),
        tables: Table::ALL,
        table,
        data,
        file_name: csv_file_name(table.as_str()),
    })))
}

/// Handler for the CSV download (GET /tables/{table}/csv).
pub async fn download_csv(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Response, AppError> {
    let table = Table::parse(&table)?;
    let data = state.report_repo.fetch_table(table).await?;
    let body = to_csv(&data)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        csv_file_name(table.as_str())
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
