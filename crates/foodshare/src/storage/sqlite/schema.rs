//! SQLite schema definitions and SQL query constants.
//!
//! Table and column names follow the donation dataset, so an existing
//! `food_wastage.db` opens without migration. Foreign keys are declared
//! for documentation only and switched off on every connection;
//! dependent-row checks happen before each delete.

/// Pragmas run on every new connection.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = OFF;";

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS providers (
    Provider_ID INTEGER PRIMARY KEY,
    Name TEXT,
    Type TEXT,
    Address TEXT,
    City TEXT,
    Contact TEXT
);

CREATE TABLE IF NOT EXISTS food (
    Food_ID INTEGER PRIMARY KEY,
    Food_Name TEXT,
    Quantity INTEGER,
    Expiry_Date TEXT,
    Provider_ID INTEGER REFERENCES providers(Provider_ID),
    Provider_Type TEXT,
    Location TEXT,
    Food_Type TEXT,
    Meal_Type TEXT
);

CREATE TABLE IF NOT EXISTS receivers (
    Receiver_ID INTEGER PRIMARY KEY,
    Name TEXT,
    Type TEXT,
    City TEXT,
    Contact TEXT
);

CREATE TABLE IF NOT EXISTS claims (
    Claim_ID INTEGER PRIMARY KEY,
    Food_ID INTEGER REFERENCES food(Food_ID),
    Receiver_ID INTEGER REFERENCES receivers(Receiver_ID),
    Status TEXT,
    Timestamp TEXT
);

CREATE INDEX IF NOT EXISTS idx_food_provider_id ON food(Provider_ID);
CREATE INDEX IF NOT EXISTS idx_claims_food_id ON claims(Food_ID);
CREATE INDEX IF NOT EXISTS idx_claims_receiver_id ON claims(Receiver_ID);
"#;

// Provider queries
pub const SELECT_PROVIDER_BY_ID: &str = r#"
SELECT Provider_ID, Name, Type, Address, City, Contact
FROM providers
WHERE Provider_ID = ?1
"#;

pub const INSERT_PROVIDER: &str = r#"
INSERT INTO providers (Name, Type, Address, City, Contact)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const UPDATE_PROVIDER: &str = r#"
UPDATE providers
SET Name = ?2, Type = ?3, Address = ?4, City = ?5, Contact = ?6
WHERE Provider_ID = ?1
"#;

pub const DELETE_PROVIDER: &str = "DELETE FROM providers WHERE Provider_ID = ?1";

pub const COUNT_FOOD_FOR_PROVIDER: &str = "SELECT COUNT(*) FROM food WHERE Provider_ID = ?1";

// Food queries
pub const SELECT_FOOD_BY_ID: &str = r#"
SELECT Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type
FROM food
WHERE Food_ID = ?1
"#;

pub const INSERT_FOOD: &str = r#"
INSERT INTO food (Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const UPDATE_FOOD: &str = r#"
UPDATE food
SET Food_Name = ?2, Quantity = ?3, Expiry_Date = ?4, Provider_ID = ?5, Provider_Type = ?6,
    Location = ?7, Food_Type = ?8, Meal_Type = ?9
WHERE Food_ID = ?1
"#;

pub const DELETE_FOOD: &str = "DELETE FROM food WHERE Food_ID = ?1";

pub const COUNT_CLAIMS_FOR_FOOD: &str = "SELECT COUNT(*) FROM claims WHERE Food_ID = ?1";

// Receiver queries
pub const SELECT_RECEIVER_BY_ID: &str = r#"
SELECT Receiver_ID, Name, Type, City, Contact
FROM receivers
WHERE Receiver_ID = ?1
"#;

pub const INSERT_RECEIVER: &str = r#"
INSERT INTO receivers (Name, Type, City, Contact)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const UPDATE_RECEIVER: &str = r#"
UPDATE receivers
SET Name = ?2, Type = ?3, City = ?4, Contact = ?5
WHERE Receiver_ID = ?1
"#;

pub const DELETE_RECEIVER: &str = "DELETE FROM receivers WHERE Receiver_ID = ?1";

pub const COUNT_CLAIMS_FOR_RECEIVER: &str = "SELECT COUNT(*) FROM claims WHERE Receiver_ID = ?1";

// Claim queries
pub const SELECT_CLAIM_BY_ID: &str = r#"
SELECT Claim_ID, Food_ID, Receiver_ID, Status, Timestamp
FROM claims
WHERE Claim_ID = ?1
"#;

pub const INSERT_CLAIM: &str = r#"
INSERT INTO claims (Food_ID, Receiver_ID, Status, Timestamp)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const UPDATE_CLAIM: &str = r#"
UPDATE claims
SET Food_ID = ?2, Receiver_ID = ?3, Status = ?4, Timestamp = ?5
WHERE Claim_ID = ?1
"#;

pub const DELETE_CLAIM: &str = "DELETE FROM claims WHERE Claim_ID = ?1";

// Introduction view
pub const COUNT_FOOD: &str = "SELECT COUNT(*) as count FROM food";

pub const COUNT_CLAIMS: &str = "SELECT COUNT(*) as count FROM claims";

pub const COUNT_COMPLETED_CLAIMS: &str =
    "SELECT COUNT(*) as count FROM claims WHERE Status = 'Completed'";

pub const PROVIDERS_BY_CITY: &str = r#"
SELECT City, COUNT(*) as Count
FROM providers
GROUP BY City
ORDER BY Count DESC, City ASC
"#;

pub const COUNT_PROVIDERS: &str = "SELECT COUNT(*) FROM providers";

pub const PING: &str = "SELECT 1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS providers"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS food"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS receivers"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS claims"));
    }

    #[test]
    fn test_dependent_counts_target_the_right_tables() {
        assert!(COUNT_FOOD_FOR_PROVIDER.contains("FROM food"));
        assert!(COUNT_CLAIMS_FOR_FOOD.contains("FROM claims"));
        assert!(COUNT_CLAIMS_FOR_RECEIVER.contains("Receiver_ID"));
    }

    #[test]
    fn test_pragmas_allow_dangling_references() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(CONNECTION_PRAGMAS).unwrap();
        conn.execute_batch(CREATE_TABLES).unwrap();

        conn.execute(
            "INSERT INTO claims (Food_ID, Receiver_ID, Status, Timestamp) VALUES (99, 98, 'Pending', '2025-03-05 05:26:00')",
            [],
        )
        .unwrap();

        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 0);
    }

    #[test]
    fn test_schema_executes_against_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(CONNECTION_PRAGMAS).unwrap();
        conn.execute_batch(CREATE_TABLES).unwrap();
        // Idempotent on an existing database
        conn.execute_batch(CREATE_TABLES).unwrap();
    }
}
