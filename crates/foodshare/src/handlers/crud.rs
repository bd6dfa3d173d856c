//! Insert, update and delete forms for the four tables.
//!
//! Every mutation answers with a 303 redirect back to the CRUD page and a
//! flash cookie describing the outcome, so a refresh never resubmits.

use askama::Template;
use axum::{
    extract::{FromRequest, Path, Query, Request, State},
    response::Response,
    Form,
};
use chrono::Local;
use serde::{de::DeserializeOwned, Deserialize};

use foodshare_core::donation::{
    ClaimForm, ClaimStatus, FoodForm, ProviderForm, ReceiverForm, Table, ValidationError,
};
use foodshare_core::storage::{self, RepositoryError, TableData};

use super::flash::{redirect_with_flash, Flash, FlashMessage};
use super::pages::HtmlTemplate;
use crate::{handlers::AppError, state::AppState};

/// The three CRUD sub-views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudOp {
    Add,
    Update,
    Delete,
}

impl CrudOp {
    pub const ALL: [CrudOp; 3] = [CrudOp::Add, CrudOp::Update, CrudOp::Delete];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "add" => Some(CrudOp::Add),
            "update" => Some(CrudOp::Update),
            "delete" => Some(CrudOp::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrudOp::Add => "add",
            CrudOp::Update => "update",
            CrudOp::Delete => "delete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrudOp::Add => "Add Record",
            CrudOp::Update => "Update Record",
            CrudOp::Delete => "Delete Record",
        }
    }
}

/// A form for one table, as raw text.
#[derive(Debug, Clone, PartialEq)]
enum RecordForm {
    Provider(ProviderForm),
    Food(FoodForm),
    Receiver(ReceiverForm),
    Claim(ClaimForm),
}

impl RecordForm {
    fn blank(table: Table) -> Self {
        match table {
            Table::Providers => RecordForm::Provider(ProviderForm::default()),
            Table::Food => RecordForm::Food(FoodForm::default()),
            Table::Receivers => RecordForm::Receiver(ReceiverForm::default()),
            Table::Claims => RecordForm::Claim(ClaimForm {
                status: ClaimStatus::Pending.to_string(),
                ..ClaimForm::default()
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CrudQuery {
    pub op: Option<String>,
    pub table: Option<String>,
    pub id: Option<String>,
}

#[derive(Template)]
#[template(path = "crud.html")]
struct CrudTemplate {
    active_nav: &'static str,
    flash: Option<FlashMessage>,
    ops: [CrudOp; 3],
    op: CrudOp,
    tables: [Table; 4],
    table: Table,
    statuses: [ClaimStatus; 3],
    /// Where the record form posts to.
    action: String,
    editing_id: Option<i64>,
    notice: Option<String>,
    provider_form: Option<ProviderForm>,
    food_form: Option<FoodForm>,
    receiver_form: Option<ReceiverForm>,
    claim_form: Option<ClaimForm>,
    rows: Option<TableData>,
}

impl CrudTemplate {
    fn new(op: CrudOp, table: Table, flash: Option<FlashMessage>) -> Self {
        Self {
            active_nav: "crud",
            flash,
            ops: CrudOp::ALL,
            op,
            tables: Table::ALL,
            table,
            statuses: ClaimStatus::ALL,
            action: String::new(),
            editing_id: None,
            notice: None,
            provider_form: None,
            food_form: None,
            receiver_form: None,
            claim_form: None,
            rows: None,
        }
    }

    fn set_form(&mut self, form: RecordForm, action: String) {
        self.action = action;
        match form {
            RecordForm::Provider(f) => self.provider_form = Some(f),
            RecordForm::Food(f) => self.food_form = Some(f),
            RecordForm::Receiver(f) => self.receiver_form = Some(f),
            RecordForm::Claim(f) => self.claim_form = Some(f),
        }
    }

    fn has_form(&self) -> bool {
        self.provider_form.is_some()
            || self.food_form.is_some()
            || self.receiver_form.is_some()
            || self.claim_form.is_some()
    }
}

/// URL of a CRUD sub-view.
fn crud_url(op: CrudOp, table: Table) -> String {
    format!("/crud?op={}&table={}", op.as_str(), table.as_str())
}

/// Decodes the submitted form body into one of the form types.
///
/// Every form field is a `String` with a default, so missing fields come
/// through empty and extra fields are ignored.
async fn decode<T: DeserializeOwned>(request: Request) -> anyhow::Result<T> {
    let Form(form) = Form::<T>::from_request(request, &()).await?;
    Ok(form)
}

fn parse_id(value: &str) -> Result<i64, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidInteger {
            field: "ID",
            value: value.to_string(),
        })
}

async fn load_form(
    state: &AppState,
    table: Table,
    id: i64,
) -> storage::Result<Option<RecordForm>> {
    let form = match table {
        Table::Providers => state
            .provider_repo
            .get_provider(id)
            .await?
            .map(|row| RecordForm::Provider(ProviderForm::from(&row))),
        Table::Food => state
            .food_repo
            .get_food(id)
            .await?
            .map(|row| RecordForm::Food(FoodForm::from(&row))),
        Table::Receivers => state
            .receiver_repo
            .get_receiver(id)
            .await?
            .map(|row| RecordForm::Receiver(ReceiverForm::from(&row))),
        Table::Claims => state
            .claim_repo
            .get_claim(id)
            .await?
            .map(|row| RecordForm::Claim(ClaimForm::from(&row))),
    };
    Ok(form)
}

async fn render_page(
    state: &AppState,
    op: CrudOp,
    table: Table,
    edit_id: Option<&str>,
    flash: Flash,
) -> Result<Response, AppError> {
    let mut page = CrudTemplate::new(op, table, flash.0.clone());

    match op {
        CrudOp::Add => page.set_form(RecordForm::blank(table), format!("/crud/{table}")),
        CrudOp::Update => {
            if let Some(raw_id) = edit_id.filter(|id| !id.trim().is_empty()) {
                match parse_id(raw_id) {
                    Ok(id) => match load_form(state, table, id).await {
                        Ok(Some(form)) => {
                            page.set_form(form, format!("/crud/{table}/{id}"));
                            page.editing_id = Some(id);
                        }
                        Ok(None) => page.notice = Some(format!("{} {id} not found", table.entity())),
                        // Unreadable stored values: offer a blank form that overwrites them.
                        Err(RepositoryError::InvalidData(reason)) => {
                            tracing::warn!(table = %table, id, reason = %reason, "Stored row is unreadable");
                            page.set_form(
                                RecordForm::blank(table),
                                format!("/crud/{table}/{id}"),
                            );
                            page.editing_id = Some(id);
                            page.notice = Some(format!(
                                "{} {id} has values that could not be read ({reason}). Saving replaces them.",
                                table.entity()
                            ));
                        }
                        Err(e) => return Err(e.into()),
                    },
                    Err(e) => page.notice = Some(e.to_string()),
                }
            }
            page.rows = Some(state.report_repo.fetch_table(table).await?);
        }
        CrudOp::Delete => page.rows = Some(state.report_repo.fetch_table(table).await?),
    }

    Ok(flash.consume(HtmlTemplate(page)))
}

/// Handler for the CRUD page (GET /crud?op=&table=&id=).
pub async fn page(
    State(state): State<AppState>,
    Query(query): Query<CrudQuery>,
    flash: Flash,
) -> Result<Response, AppError> {
    let op = query
        .op
        .as_deref()
        .and_then(CrudOp::parse)
        .unwrap_or(CrudOp::Add);
    let table = match query.table.as_deref() {
        None | Some("") => Table::Providers,
        Some(name) => Table::parse(name)?,
    };

    render_page(&state, op, table, query.id.as_deref(), flash).await
}

/// Handler for the prefilled update form (GET /crud/{table}/{id}/edit).
pub async fn edit(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
    flash: Flash,
) -> Result<Response, AppError> {
    let table = Table::parse(&table)?;
    render_page(&state, CrudOp::Update, table, Some(&id), flash).await
}

async fn insert_record(state: &AppState, table: Table, request: Request) -> anyhow::Result<i64> {
    let id = match table {
        Table::Providers => {
            let provider = decode::<ProviderForm>(request).await?.validate()?;
            state.provider_repo.create_provider(&provider).await?
        }
        Table::Food => {
            let food = decode::<FoodForm>(request).await?.validate()?;
            state.food_repo.create_food(&food).await?
        }
        Table::Receivers => {
            let receiver = decode::<ReceiverForm>(request).await?.validate()?;
            state.receiver_repo.create_receiver(&receiver).await?
        }
        Table::Claims => {
            let claim = decode::<ClaimForm>(request).await?.validate(Local::now().naive_local())?;
            state.claim_repo.create_claim(&claim).await?
        }
    };
    Ok(id)
}

async fn update_record(
    state: &AppState,
    table: Table,
    id: i64,
    request: Request,
) -> anyhow::Result<()> {
    match table {
        Table::Providers => {
            let provider = decode::<ProviderForm>(request).await?.validate()?.with_id(id);
            state.provider_repo.update_provider(&provider).await?
        }
        Table::Food => {
            let food = decode::<FoodForm>(request).await?.validate()?.with_id(id);
            state.food_repo.update_food(&food).await?
        }
        Table::Receivers => {
            let receiver = decode::<ReceiverForm>(request).await?.validate()?.with_id(id);
            state.receiver_repo.update_receiver(&receiver).await?
        }
        Table::Claims => {
            let claim = decode::<ClaimForm>(request)
                .await?
                .validate(Local::now().naive_local())?
                .with_id(id);
            state.claim_repo.update_claim(&claim).await?
        }
    }
    Ok(())
}

async fn delete_record(state: &AppState, table: Table, id: i64) -> anyhow::Result<()> {
    match table {
        Table::Providers => state.provider_repo.delete_provider(id).await?,
        Table::Food => state.food_repo.delete_food(id).await?,
        Table::Receivers => state.receiver_repo.delete_receiver(id).await?,
        Table::Claims => state.claim_repo.delete_claim(id).await?,
    }
    Ok(())
}

/// Resolves the table from the path or sends the user back to the CRUD page.
fn table_or_redirect(name: &str) -> Result<Table, Response> {
    Table::parse(name).map_err(|e| redirect_with_flash("/crud", FlashMessage::error(e.to_string())))
}

/// Parses a row id or sends the user back to the given sub-view.
fn id_or_redirect(value: &str, op: CrudOp, table: Table) -> Result<i64, Response> {
    parse_id(value).map_err(|e| {
        redirect_with_flash(&crud_url(op, table), FlashMessage::error(e.to_string()))
    })
}

/// Handler for inserts (POST /crud/{table}).
pub async fn create(
    State(state): State<AppState>,
    Path(table): Path<String>,
    request: Request,
) -> Response {
    let table = match table_or_redirect(&table) {
        Ok(table) => table,
        Err(response) => return response,
    };
    let back = crud_url(CrudOp::Add, table);

    match insert_record(&state, table, request).await {
        Ok(id) => {
            tracing::info!(table = %table, id, "Record added");
            redirect_with_flash(
                &back,
                FlashMessage::success(format!("{} added successfully!", table.entity())),
            )
        }
        Err(e) => {
            tracing::warn!(table = %table, error = %e, "Insert rejected");
            redirect_with_flash(
                &back,
                FlashMessage::error(format!("Error adding {}: {e}", table.entity())),
            )
        }
    }
}

/// Handler for updates (POST /crud/{table}/{id}).
pub async fn update(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
    request: Request,
) -> Response {
    let table = match table_or_redirect(&table) {
        Ok(table) => table,
        Err(response) => return response,
    };
    let id = match id_or_redirect(&id, CrudOp::Update, table) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match update_record(&state, table, id, request).await {
        Ok(()) => {
            tracing::info!(table = %table, id, "Record updated");
            redirect_with_flash(
                &crud_url(CrudOp::Update, table),
                FlashMessage::success(format!("{} {id} updated successfully!", table.entity())),
            )
        }
        Err(e) => {
            tracing::warn!(table = %table, id, error = %e, "Update rejected");
            redirect_with_flash(
                &format!("/crud/{table}/{id}/edit"),
                FlashMessage::error(format!("Error updating {} {id}: {e}", table.entity())),
            )
        }
    }
}

async fn delete_and_redirect(state: &AppState, table: Table, id: i64) -> Response {
    let back = crud_url(CrudOp::Delete, table);

    match delete_record(state, table, id).await {
        Ok(()) => {
            tracing::info!(table = %table, id, "Record deleted");
            redirect_with_flash(
                &back,
                FlashMessage::success(format!("{} {id} deleted successfully!", table.entity())),
            )
        }
        Err(e) => {
            tracing::warn!(table = %table, id, error = %e, "Delete refused");
            redirect_with_flash(&back, FlashMessage::error(e.to_string()))
        }
    }
}

/// Handler for deletes addressed by path (POST /crud/{table}/{id}/delete).
pub async fn delete(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> Response {
    let table = match table_or_redirect(&table) {
        Ok(table) => table,
        Err(response) => return response,
    };

    match id_or_redirect(&id, CrudOp::Delete, table) {
        Ok(id) => delete_and_redirect(&state, table, id).await,
        Err(response) => response,
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub id: String,
}

/// Handler for the delete form (POST /crud/{table}/delete).
pub async fn delete_by_form(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let table = match table_or_redirect(&table) {
        Ok(table) => table,
        Err(response) => return response,
    };

    match id_or_redirect(&form.id, CrudOp::Delete, table) {
        Ok(id) => delete_and_redirect(&state, table, id).await,
        Err(response) => response,
    }
}
