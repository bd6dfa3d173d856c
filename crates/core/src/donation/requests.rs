//! Form payloads for the CRUD view.
//!
//! Browsers submit every field as text. Each form keeps the raw strings, so
//! the same type prefills the update form from a stored row, and `validate`
//! coerces them into the typed `New*` values. Coercion is the only validation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::dates::{format_date, format_datetime, parse_date, parse_datetime};
use super::error::ValidationError;
use super::types::{
    Claim, ClaimStatus, FoodListing, NewClaim, NewFoodListing, NewProvider, NewReceiver, Provider,
    Receiver,
};

fn parse_integer(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderForm {
    pub name: String,
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

impl ProviderForm {
    pub fn validate(self) -> Result<NewProvider, ValidationError> {
        Ok(NewProvider {
            name: self.name,
            provider_type: self.provider_type,
            address: self.address,
            city: self.city,
            contact: self.contact,
        })
    }
}

impl From<&Provider> for ProviderForm {
    fn from(provider: &Provider) -> Self {
        Self {
            name: provider.name.clone(),
            provider_type: provider.provider_type.clone(),
            address: provider.address.clone(),
            city: provider.city.clone(),
            contact: provider.contact.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodForm {
    pub food_name: String,
    pub quantity: String,
    pub expiry_date: String,
    pub provider_id: String,
    pub provider_type: String,
    pub location: String,
    pub food_type: String,
    pub meal_type: String,
}

impl FoodForm {
    pub fn validate(self) -> Result<NewFoodListing, ValidationError> {
        let quantity = parse_integer("Quantity", &self.quantity)?;
        let expiry_date =
            parse_date(&self.expiry_date).ok_or_else(|| ValidationError::InvalidDate {
                field: "Expiry_Date",
                value: self.expiry_date.clone(),
            })?;
        let provider_id = parse_integer("Provider_ID", &self.provider_id)?;

        Ok(NewFoodListing {
            food_name: self.food_name,
            quantity,
            expiry_date,
            provider_id,
            provider_type: self.provider_type,
            location: self.location,
            food_type: self.food_type,
            meal_type: self.meal_type,
        })
    }
}

impl From<&FoodListing> for FoodForm {
    fn from(food: &FoodListing) -> Self {
        Self {
            food_name: food.food_name.clone(),
            quantity: food.quantity.to_string(),
            expiry_date: format_date(&food.expiry_date),
            provider_id: food.provider_id.to_string(),
            provider_type: food.provider_type.clone(),
            location: food.location.clone(),
            food_type: food.food_type.clone(),
            meal_type: food.meal_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverForm {
    pub name: String,
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}

impl ReceiverForm {
    pub fn validate(self) -> Result<NewReceiver, ValidationError> {
        Ok(NewReceiver {
            name: self.name,
            receiver_type: self.receiver_type,
            city: self.city,
            contact: self.contact,
        })
    }
}

impl From<&Receiver> for ReceiverForm {
    fn from(receiver: &Receiver) -> Self {
        Self {
            name: receiver.name.clone(),
            receiver_type: receiver.receiver_type.clone(),
            city: receiver.city.clone(),
            contact: receiver.contact.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimForm {
    pub food_id: String,
    pub receiver_id: String,
    pub status: String,
    pub timestamp: String,
}

impl ClaimForm {
    /// Coerces the form. An empty timestamp means the claim happened `now`.
    pub fn validate(self, now: NaiveDateTime) -> Result<NewClaim, ValidationError> {
        let food_id = parse_integer("Food_ID", &self.food_id)?;
        let receiver_id = parse_integer("Receiver_ID", &self.receiver_id)?;
        let status = ClaimStatus::parse(self.status.trim())?;
        let timestamp = if self.timestamp.trim().is_empty() {
            now
        } else {
            parse_datetime(&self.timestamp).ok_or_else(|| ValidationError::InvalidDateTime {
                field: "Timestamp",
                value: self.timestamp.clone(),
            })?
        };

        Ok(NewClaim {
            food_id,
            receiver_id,
            status,
            timestamp,
        })
    }
}

impl From<&Claim> for ClaimForm {
    fn from(claim: &Claim) -> Self {
        Self {
            food_id: claim.food_id.to_string(),
            receiver_id: claim.receiver_id.to_string(),
            status: claim.status.to_string(),
            timestamp: format_datetime(&claim.timestamp),
        }
    }
}
