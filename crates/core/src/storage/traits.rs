use async_trait::async_trait;

use crate::donation::{
    Claim, FoodListing, NewClaim, NewFoodListing, NewProvider, NewReceiver, Provider, Receiver,
    Table,
};

use super::{DashboardSummary, Result, TableData};

/// Repository for provider operations.
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// Gets a provider by its ID.
    async fn get_provider(&self, id: i64) -> Result<Option<Provider>>;

    /// Inserts a provider and returns its new ID.
    async fn create_provider(&self, provider: &NewProvider) -> Result<i64>;

    /// Updates an existing provider.
    async fn update_provider(&self, provider: &Provider) -> Result<()>;

    /// Deletes a provider. Refused while food listings reference it.
    async fn delete_provider(&self, id: i64) -> Result<()>;
}

/// Repository for food listing operations.
#[async_trait]
pub trait FoodRepository: Send + Sync {
    async fn get_food(&self, id: i64) -> Result<Option<FoodListing>>;

    async fn create_food(&self, food: &NewFoodListing) -> Result<i64>;

    async fn update_food(&self, food: &FoodListing) -> Result<()>;

    /// Deletes a food listing. Refused while claims reference it.
    async fn delete_food(&self, id: i64) -> Result<()>;
}

/// Repository for receiver operations.
#[async_trait]
pub trait ReceiverRepository: Send + Sync {
    async fn get_receiver(&self, id: i64) -> Result<Option<Receiver>>;

    async fn create_receiver(&self, receiver: &NewReceiver) -> Result<i64>;

    async fn update_receiver(&self, receiver: &Receiver) -> Result<()>;

    /// Deletes a receiver. Refused while claims reference it.
    async fn delete_receiver(&self, id: i64) -> Result<()>;
}

/// Repository for claim operations.
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    async fn get_claim(&self, id: i64) -> Result<Option<Claim>>;

    async fn create_claim(&self, claim: &NewClaim) -> Result<i64>;

    async fn update_claim(&self, claim: &Claim) -> Result<()>;

    async fn delete_claim(&self, id: i64) -> Result<()>;
}

/// Read-only access for browsing and reporting.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// `SELECT *` from one of the allow-listed tables.
    async fn fetch_table(&self, table: Table) -> Result<TableData>;

    /// Runs one of the catalog's fixed queries.
    async fn run_query(&self, sql: &'static str) -> Result<TableData>;

    /// Counts for the introduction view.
    async fn dashboard_summary(&self) -> Result<DashboardSummary>;

    /// Cheap round trip used by the health check.
    async fn ping(&self) -> Result<()>;
}
