//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! Text columns may be NULL in imported datasets and read as empty strings.

use foodshare_core::donation::{
    format_date, format_datetime, parse_date, parse_datetime, Claim, ClaimStatus, FoodListing,
    Provider, Receiver,
};
use foodshare_core::storage::Cell;
use rusqlite::types::{Type, Value, ValueRef};
use rusqlite::Row;

fn text(row: &Row, index: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(index)?.unwrap_or_default())
}

fn conversion_error(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, message.into())
}

/// Convert a SQLite row to a Provider.
///
/// Expected columns: Provider_ID, Name, Type, Address, City, Contact
pub fn row_to_provider(row: &Row) -> rusqlite::Result<Provider> {
    Ok(Provider {
        id: row.get(0)?,
        name: text(row, 1)?,
        provider_type: text(row, 2)?,
        address: text(row, 3)?,
        city: text(row, 4)?,
        contact: text(row, 5)?,
    })
}

/// Convert a SQLite row to a FoodListing.
///
/// Expected columns: Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID,
/// Provider_Type, Location, Food_Type, Meal_Type
pub fn row_to_food(row: &Row) -> rusqlite::Result<FoodListing> {
    let expiry: String = text(row, 3)?;
    let expiry_date = parse_date(&expiry)
        .ok_or_else(|| conversion_error(3, format!("invalid Expiry_Date '{expiry}'")))?;

    Ok(FoodListing {
        id: row.get(0)?,
        food_name: text(row, 1)?,
        quantity: row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
        expiry_date,
        provider_id: row.get(4)?,
        provider_type: text(row, 5)?,
        location: text(row, 6)?,
        food_type: text(row, 7)?,
        meal_type: text(row, 8)?,
    })
}

/// Convert a SQLite row to a Receiver.
///
/// Expected columns: Receiver_ID, Name, Type, City, Contact
pub fn row_to_receiver(row: &Row) -> rusqlite::Result<Receiver> {
    Ok(Receiver {
        id: row.get(0)?,
        name: text(row, 1)?,
        receiver_type: text(row, 2)?,
        city: text(row, 3)?,
        contact: text(row, 4)?,
    })
}

/// Convert a SQLite row to a Claim.
///
/// Expected columns: Claim_ID, Food_ID, Receiver_ID, Status, Timestamp
pub fn row_to_claim(row: &Row) -> rusqlite::Result<Claim> {
    let status_str = text(row, 3)?;
    let status =
        ClaimStatus::parse(&status_str).map_err(|e| conversion_error(3, e.to_string()))?;
    let timestamp_str = text(row, 4)?;
    let timestamp = parse_datetime(&timestamp_str)
        .ok_or_else(|| conversion_error(4, format!("invalid Timestamp '{timestamp_str}'")))?;

    Ok(Claim {
        id: row.get(0)?,
        food_id: row.get(1)?,
        receiver_id: row.get(2)?,
        status,
        timestamp,
    })
}

/// Convert any SQLite value into a display cell.
pub fn value_ref_to_cell(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null => Cell::Null,
        ValueRef::Integer(i) => Cell::Integer(i),
        ValueRef::Real(f) => Cell::Real(f),
        ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Cell::Text(format!("<{} bytes>", bytes.len())),
    }
}

// ============================================================================
// Parameter builders
// ============================================================================

pub fn date_value(date: &chrono::NaiveDate) -> Value {
    Value::Text(format_date(date))
}

pub fn datetime_value(datetime: &chrono::NaiveDateTime) -> Value {
    Value::Text(format_datetime(datetime))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rusqlite::Connection;

    use super::*;
    use crate::storage::sqlite::schema::{
        CONNECTION_PRAGMAS, CREATE_TABLES, SELECT_CLAIM_BY_ID, SELECT_FOOD_BY_ID,
        SELECT_PROVIDER_BY_ID,
    };

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CONNECTION_PRAGMAS).unwrap();
        conn.execute_batch(CREATE_TABLES).unwrap();
        conn
    }

    #[test]
    fn test_provider_with_null_text_columns() {
        let conn = conn();
        conn.execute(
            "INSERT INTO providers (Provider_ID, Name) VALUES (1, 'Green Bistro')",
            [],
        )
        .unwrap();

        let provider = conn
            .query_row(SELECT_PROVIDER_BY_ID, [1], row_to_provider)
            .unwrap();
        assert_eq!(provider.name, "Green Bistro");
        assert_eq!(provider.city, "");
    }

    #[test]
    fn test_food_accepts_us_dates() {
        let conn = conn();
        conn.execute(
            "INSERT INTO food (Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID) VALUES (1, 'Rice', 40, '3/17/2025', 1)",
            [],
        )
        .unwrap();

        let food = conn.query_row(SELECT_FOOD_BY_ID, [1], row_to_food).unwrap();
        assert_eq!(food.expiry_date, NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
        assert_eq!(food.quantity, 40);
    }

    #[test]
    fn test_claim_with_bad_status_fails_conversion() {
        let conn = conn();
        conn.execute(
            "INSERT INTO claims VALUES (1, 1, 1, 'Lost', '2025-03-05 05:26:00')",
            [],
        )
        .unwrap();

        let result = conn.query_row(SELECT_CLAIM_BY_ID, [1], row_to_claim);
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(3, _, _))
        ));
    }

    #[test]
    fn test_value_ref_to_cell() {
        assert_eq!(value_ref_to_cell(ValueRef::Null), Cell::Null);
        assert_eq!(value_ref_to_cell(ValueRef::Integer(3)), Cell::Integer(3));
        assert_eq!(
            value_ref_to_cell(ValueRef::Text(b"Vegan")),
            Cell::Text("Vegan".to_string())
        );
        assert_eq!(
            value_ref_to_cell(ValueRef::Blob(&[1, 2, 3])),
            Cell::Text("<3 bytes>".to_string())
        );
    }
}
