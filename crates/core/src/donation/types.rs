use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// The tables the dashboard is allowed to touch.
///
/// Table names are interpolated into `SELECT *` statements, so every name
/// must come from this enum and never from user input directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Providers,
    Food,
    Receivers,
    Claims,
}

impl Table {
    /// All tables in navigation order.
    pub const ALL: [Table; 4] = [
        Table::Providers,
        Table::Food,
        Table::Receivers,
        Table::Claims,
    ];

    /// Parses a table name from the allow-list.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        match name {
            "providers" => Ok(Table::Providers),
            "food" => Ok(Table::Food),
            "receivers" => Ok(Table::Receivers),
            "claims" => Ok(Table::Claims),
            other => Err(ValidationError::UnknownTable(other.to_string())),
        }
    }

    /// The SQL table name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Providers => "providers",
            Table::Food => "food",
            Table::Receivers => "receivers",
            Table::Claims => "claims",
        }
    }

    /// Singular entity name used in messages ("Provider added successfully!").
    pub fn entity(&self) -> &'static str {
        match self {
            Table::Providers => "Provider",
            Table::Food => "Food",
            Table::Receivers => "Receiver",
            Table::Claims => "Claim",
        }
    }

    /// Human-readable name for headings and menus.
    pub fn label(&self) -> &'static str {
        match self {
            Table::Providers => "Providers",
            Table::Food => "Food Listings",
            Table::Receivers => "Receivers",
            Table::Claims => "Claims",
        }
    }

    /// The primary key column.
    pub fn id_column(&self) -> &'static str {
        match self {
            Table::Providers => "Provider_ID",
            Table::Food => "Food_ID",
            Table::Receivers => "Receiver_ID",
            Table::Claims => "Claim_ID",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Pending,
    Completed,
    Cancelled,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 3] = [
        ClaimStatus::Pending,
        ClaimStatus::Completed,
        ClaimStatus::Cancelled,
    ];

    /// Parses the stored status text. Matching is case-sensitive.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Pending" => Ok(ClaimStatus::Pending),
            "Completed" => Ok(ClaimStatus::Completed),
            "Cancelled" => Ok(ClaimStatus::Cancelled),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Completed => "Completed",
            ClaimStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A restaurant, household or business that lists surplus food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

/// A provider before it has been assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProvider {
    pub name: String,
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

impl NewProvider {
    pub fn with_id(self, id: i64) -> Provider {
        Provider {
            id,
            name: self.name,
            provider_type: self.provider_type,
            address: self.address,
            city: self.city,
            contact: self.contact,
        }
    }
}

/// A surplus food listing offered by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodListing {
    pub id: i64,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    pub provider_id: i64,
    pub provider_type: String,
    pub location: String,
    pub food_type: String,
    pub meal_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFoodListing {
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    pub provider_id: i64,
    pub provider_type: String,
    pub location: String,
    pub food_type: String,
    pub meal_type: String,
}

impl NewFoodListing {
    pub fn with_id(self, id: i64) -> FoodListing {
        FoodListing {
            id,
            food_name: self.food_name,
            quantity: self.quantity,
            expiry_date: self.expiry_date,
            provider_id: self.provider_id,
            provider_type: self.provider_type,
            location: self.location,
            food_type: self.food_type,
            meal_type: self.meal_type,
        }
    }
}

/// An NGO or individual that claims food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub id: i64,
    pub name: String,
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReceiver {
    pub name: String,
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}

impl NewReceiver {
    pub fn with_id(self, id: i64) -> Receiver {
        Receiver {
            id,
            name: self.name,
            receiver_type: self.receiver_type,
            city: self.city,
            contact: self.contact,
        }
    }
}

/// A receiver's claim on a food listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: i64,
    pub food_id: i64,
    pub receiver_id: i64,
    pub status: ClaimStatus,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClaim {
    pub food_id: i64,
    pub receiver_id: i64,
    pub status: ClaimStatus,
    pub timestamp: NaiveDateTime,
}

impl NewClaim {
    pub fn with_id(self, id: i64) -> Claim {
        Claim {
            id,
            food_id: self.food_id,
            receiver_id: self.receiver_id,
            status: self.status,
            timestamp: self.timestamp,
        }
    }
}
