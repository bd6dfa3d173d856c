//! SQLite repository implementation.
//!
//! Implements the repository traits from `foodshare_core::storage` using SQLite.
//! Every call opens its own connection and drops it when done; nothing is
//! pooled or kept between requests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::Row;
use tokio_rusqlite::Connection;

use foodshare_core::donation::{
    ensure_no_dependents, Claim, FoodListing, NewClaim, NewFoodListing, NewProvider, NewReceiver,
    Provider, Receiver, Table,
};
use foodshare_core::storage::{
    Cell, ClaimRepository, DashboardSummary, FoodRepository, ProviderRepository,
    ReceiverRepository, ReportRepository, RepositoryError, Result, TableData,
};

use super::conversions::{
    date_value, datetime_value, row_to_claim, row_to_food, row_to_provider, row_to_receiver,
    value_ref_to_cell,
};
use super::error::{map_open_error, map_tokio_rusqlite_error};
use super::schema;
use crate::demo_data::DemoData;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Helper to carry a repository error out of a tokio_rusqlite closure.
fn wrap_repo_err(e: RepositoryError) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Other(Box::new(e))
}

/// A row that other tables may still reference.
struct Dependents {
    count_sql: &'static str,
    table: &'static str,
}

/// SQLite-based repository implementation.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    path: PathBuf,
}

impl SqliteRepository {
    /// Creates a repository for the database file at `path`.
    ///
    /// The file is created if it doesn't exist, and missing tables are
    /// created. Existing tables and rows are left untouched.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Self {
            path: path.as_ref().to_path_buf(),
        };

        let conn = repo.connect().await?;
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(repo)
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh connection for a single operation.
    ///
    /// Bundled SQLite enforces foreign keys by default; they are switched off
    /// so rows may reference ids that don't exist (yet).
    async fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).await.map_err(map_open_error)?;
        conn.call(|conn| {
            conn.execute_batch(schema::CONNECTION_PRAGMAS)
                .map_err(wrap_err)
        })
        .await
        .map_err(map_open_error)?;
        Ok(conn)
    }

    async fn fetch_one<T, F>(
        &self,
        sql: &'static str,
        id: i64,
        entity_type: &'static str,
        map_row: F,
    ) -> Result<Option<T>>
    where
        T: Send + 'static,
        F: Fn(&Row) -> rusqlite::Result<T> + Send + 'static,
    {
        self.connect()
            .await?
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                match stmt.query_row([id], |row| map_row(row)) {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type, id.to_string()))
    }

    async fn insert(
        &self,
        sql: &'static str,
        params: Vec<Value>,
        entity_type: &'static str,
    ) -> Result<i64> {
        self.connect()
            .await?
            .call(move |conn| {
                conn.execute(sql, rusqlite::params_from_iter(params))
                    .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type, "new"))
    }

    /// Runs an UPDATE whose first parameter is the row id.
    async fn update(
        &self,
        sql: &'static str,
        params: Vec<Value>,
        entity_type: &'static str,
        id: i64,
    ) -> Result<()> {
        self.connect()
            .await?
            .call(move |conn| {
                let rows = conn
                    .execute(sql, rusqlite::params_from_iter(params))
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type, id.to_string()))
    }

    /// Deletes a row after checking nothing references it.
    async fn delete(
        &self,
        sql: &'static str,
        entity_type: &'static str,
        id: i64,
        dependents: Option<Dependents>,
    ) -> Result<()> {
        self.connect()
            .await?
            .call(move |conn| {
                if let Some(dependents) = dependents {
                    let count: i64 = conn
                        .query_row(dependents.count_sql, [id], |row| row.get(0))
                        .map_err(wrap_err)?;
                    ensure_no_dependents(entity_type, id, dependents.table, count)
                        .map_err(wrap_repo_err)?;
                }

                let rows = conn.execute(sql, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type, id.to_string()))
    }

    async fn query_table(&self, sql: String) -> Result<TableData> {
        self.connect()
            .await?
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let columns: Vec<String> = stmt
                    .column_names()
                    .into_iter()
                    .map(String::from)
                    .collect();
                let column_count = columns.len();

                let rows = stmt
                    .query_map([], |row| {
                        (0..column_count)
                            .map(|index| row.get_ref(index).map(value_ref_to_cell))
                            .collect::<rusqlite::Result<Vec<Cell>>>()
                    })
                    .map_err(wrap_err)?;

                let mut data = Vec::new();
                for row_result in rows {
                    data.push(row_result.map_err(wrap_err)?);
                }
                Ok(TableData::new(columns, data))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Query", "unknown"))
    }

    /// Loads the demo dataset if the database has no providers yet.
    ///
    /// Returns `true` when rows were inserted. All inserts run in one
    /// transaction, so a failure leaves the database empty.
    pub async fn seed_if_empty(&self, demo: DemoData) -> Result<bool> {
        self.connect()
            .await?
            .call(move |conn| {
                let existing: i64 = conn
                    .query_row(schema::COUNT_PROVIDERS, [], |row| row.get(0))
                    .map_err(wrap_err)?;
                if existing > 0 {
                    return Ok(false);
                }

                let tx = conn.transaction().map_err(wrap_err)?;
                for provider in &demo.providers {
                    tx.execute(
                        schema::INSERT_PROVIDER,
                        rusqlite::params_from_iter(provider_params(provider)),
                    )
                    .map_err(wrap_err)?;
                }
                for receiver in &demo.receivers {
                    tx.execute(
                        schema::INSERT_RECEIVER,
                        rusqlite::params_from_iter(receiver_params(receiver)),
                    )
                    .map_err(wrap_err)?;
                }
                for food in &demo.food {
                    tx.execute(
                        schema::INSERT_FOOD,
                        rusqlite::params_from_iter(food_params(food)),
                    )
                    .map_err(wrap_err)?;
                }
                for claim in &demo.claims {
                    tx.execute(
                        schema::INSERT_CLAIM,
                        rusqlite::params_from_iter(claim_params(claim)),
                    )
                    .map_err(wrap_err)?;
                }
                tx.commit().map_err(wrap_err)?;
                Ok(true)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "DemoData", "seed"))
    }
}

// ============================================================================
// Parameter lists, in the column order of the INSERT statements
// ============================================================================

fn provider_params(provider: &NewProvider) -> Vec<Value> {
    vec![
        Value::Text(provider.name.clone()),
        Value::Text(provider.provider_type.clone()),
        Value::Text(provider.address.clone()),
        Value::Text(provider.city.clone()),
        Value::Text(provider.contact.clone()),
    ]
}

fn food_params(food: &NewFoodListing) -> Vec<Value> {
    vec![
        Value::Text(food.food_name.clone()),
        Value::Integer(food.quantity),
        date_value(&food.expiry_date),
        Value::Integer(food.provider_id),
        Value::Text(food.provider_type.clone()),
        Value::Text(food.location.clone()),
        Value::Text(food.food_type.clone()),
        Value::Text(food.meal_type.clone()),
    ]
}

fn receiver_params(receiver: &NewReceiver) -> Vec<Value> {
    vec![
        Value::Text(receiver.name.clone()),
        Value::Text(receiver.receiver_type.clone()),
        Value::Text(receiver.city.clone()),
        Value::Text(receiver.contact.clone()),
    ]
}

fn claim_params(claim: &NewClaim) -> Vec<Value> {
    vec![
        Value::Integer(claim.food_id),
        Value::Integer(claim.receiver_id),
        Value::Text(claim.status.to_string()),
        datetime_value(&claim.timestamp),
    ]
}

/// Prepends the row id, matching the `?1` placeholder of the UPDATE statements.
fn with_id(id: i64, mut params: Vec<Value>) -> Vec<Value> {
    params.insert(0, Value::Integer(id));
    params
}

// ============================================================================
// ProviderRepository implementation
// ============================================================================

#[async_trait]
impl ProviderRepository for SqliteRepository {
    async fn get_provider(&self, id: i64) -> Result<Option<Provider>> {
        self.fetch_one(schema::SELECT_PROVIDER_BY_ID, id, "Provider", row_to_provider)
            .await
    }

    async fn create_provider(&self, provider: &NewProvider) -> Result<i64> {
        self.insert(schema::INSERT_PROVIDER, provider_params(provider), "Provider")
            .await
    }

    async fn update_provider(&self, provider: &Provider) -> Result<()> {
        let params = vec![
            Value::Integer(provider.id),
            Value::Text(provider.name.clone()),
            Value::Text(provider.provider_type.clone()),
            Value::Text(provider.address.clone()),
            Value::Text(provider.city.clone()),
            Value::Text(provider.contact.clone()),
        ];
        self.update(schema::UPDATE_PROVIDER, params, "Provider", provider.id)
            .await
    }

    async fn delete_provider(&self, id: i64) -> Result<()> {
        let dependents = Dependents {
            count_sql: schema::COUNT_FOOD_FOR_PROVIDER,
            table: "food",
        };
        self.delete(schema::DELETE_PROVIDER, "Provider", id, Some(dependents))
            .await
    }
}

// ============================================================================
// FoodRepository implementation
// ============================================================================

#[async_trait]
impl FoodRepository for SqliteRepository {
    async fn get_food(&self, id: i64) -> Result<Option<FoodListing>> {
        self.fetch_one(schema::SELECT_FOOD_BY_ID, id, "Food", row_to_food)
            .await
    }

    async fn create_food(&self, food: &NewFoodListing) -> Result<i64> {
        self.insert(schema::INSERT_FOOD, food_params(food), "Food").await
    }

    async fn update_food(&self, food: &FoodListing) -> Result<()> {
        let params = with_id(
            food.id,
            vec![
                Value::Text(food.food_name.clone()),
                Value::Integer(food.quantity),
                date_value(&food.expiry_date),
                Value::Integer(food.provider_id),
                Value::Text(food.provider_type.clone()),
                Value::Text(food.location.clone()),
                Value::Text(food.food_type.clone()),
                Value::Text(food.meal_type.clone()),
            ],
        );
        self.update(schema::UPDATE_FOOD, params, "Food", food.id).await
    }

    async fn delete_food(&self, id: i64) -> Result<()> {
        let dependents = Dependents {
            count_sql: schema::COUNT_CLAIMS_FOR_FOOD,
            table: "claims",
        };
        self.delete(schema::DELETE_FOOD, "Food", id, Some(dependents))
            .await
    }
}

// ============================================================================
// ReceiverRepository implementation
// ============================================================================

#[async_trait]
impl ReceiverRepository for SqliteRepository {
    async fn get_receiver(&self, id: i64) -> Result<Option<Receiver>> {
        self.fetch_one(schema::SELECT_RECEIVER_BY_ID, id, "Receiver", row_to_receiver)
            .await
    }

    async fn create_receiver(&self, receiver: &NewReceiver) -> Result<i64> {
        self.insert(schema::INSERT_RECEIVER, receiver_params(receiver), "Receiver")
            .await
    }

    async fn update_receiver(&self, receiver: &Receiver) -> Result<()> {
        let params = with_id(
            receiver.id,
            vec![
                Value::Text(receiver.name.clone()),
                Value::Text(receiver.receiver_type.clone()),
                Value::Text(receiver.city.clone()),
                Value::Text(receiver.contact.clone()),
            ],
        );
        self.update(schema::UPDATE_RECEIVER, params, "Receiver", receiver.id)
            .await
    }

    async fn delete_receiver(&self, id: i64) -> Result<()> {
        let dependents = Dependents {
            count_sql: schema::COUNT_CLAIMS_FOR_RECEIVER,
            table: "claims",
        };
        self.delete(schema::DELETE_RECEIVER, "Receiver", id, Some(dependents))
            .await
    }
}

// ============================================================================
// ClaimRepository implementation
// ============================================================================

#[async_trait]
impl ClaimRepository for SqliteRepository {
    async fn get_claim(&self, id: i64) -> Result<Option<Claim>> {
        self.fetch_one(schema::SELECT_CLAIM_BY_ID, id, "Claim", row_to_claim)
            .await
    }

    async fn create_claim(&self, claim: &NewClaim) -> Result<i64> {
        self.insert(schema::INSERT_CLAIM, claim_params(claim), "Claim")
            .await
    }

    async fn update_claim(&self, claim: &Claim) -> Result<()> {
        let params = with_id(
            claim.id,
            vec![
                Value::Integer(claim.food_id),
                Value::Integer(claim.receiver_id),
                Value::Text(claim.status.to_string()),
                datetime_value(&claim.timestamp),
            ],
        );
        self.update(schema::UPDATE_CLAIM, params, "Claim", claim.id)
            .await
    }

    async fn delete_claim(&self, id: i64) -> Result<()> {
        self.delete(schema::DELETE_CLAIM, "Claim", id, None).await
    }
}

// ============================================================================
// ReportRepository implementation
// ============================================================================

#[async_trait]
impl ReportRepository for SqliteRepository {
    async fn fetch_table(&self, table: Table) -> Result<TableData> {
        // The name comes from the allow-list enum, never from request text.
        self.query_table(format!("SELECT * FROM {}", table.as_str()))
            .await
    }

    async fn run_query(&self, sql: &'static str) -> Result<TableData> {
        self.query_table(sql.to_string()).await
    }

    async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        self.connect()
            .await?
            .call(|conn| {
                let count = |sql: &str| -> tokio_rusqlite::Result<i64> {
                    conn.query_row(sql, [], |row| row.get(0)).map_err(wrap_err)
                };
                let total_food = count(schema::COUNT_FOOD)?;
                let total_claims = count(schema::COUNT_CLAIMS)?;
                let completed_claims = count(schema::COUNT_COMPLETED_CLAIMS)?;

                let mut stmt = conn.prepare(schema::PROVIDERS_BY_CITY).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([], |row| {
                        let city: Option<String> = row.get(0)?;
                        let providers: i64 = row.get(1)?;
                        Ok((city.unwrap_or_default(), providers))
                    })
                    .map_err(wrap_err)?;

                let mut providers_by_city = Vec::new();
                for row_result in rows {
                    providers_by_city.push(row_result.map_err(wrap_err)?);
                }

                Ok(DashboardSummary {
                    total_food,
                    total_claims,
                    completed_claims,
                    providers_by_city,
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Summary", "unknown"))
    }

    async fn ping(&self) -> Result<()> {
        self.connect()
            .await?
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Database", "ping"))
    }
}
