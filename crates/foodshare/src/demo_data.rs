use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use foodshare_core::donation::{ClaimStatus, NewClaim, NewFoodListing, NewProvider, NewReceiver};

/// A small donation dataset for trying the dashboard on an empty database.
///
/// Foreign keys assume a fresh database: the n-th provider, food listing
/// and receiver get id n.
#[derive(Debug, Clone)]
pub struct DemoData {
    pub providers: Vec<NewProvider>,
    pub receivers: Vec<NewReceiver>,
    pub food: Vec<NewFoodListing>,
    pub claims: Vec<NewClaim>,
}

impl DemoData {
    /// Generates the demo rows with expiry dates relative to today.
    pub fn generate() -> Self {
        Self::generate_for(Local::now().date_naive())
    }

    pub fn generate_for(today: NaiveDate) -> Self {
        let providers = vec![
            provider("Green Bistro", "Restaurant", "12 Elm St", "Springfield", "555-0100"),
            provider("Daily Bread Bakery", "Grocery Store", "4 Market Sq", "Springfield", "555-0101"),
            provider("FreshMart", "Supermarket", "200 Commerce Ave", "Shelbyville", "555-0102"),
            provider("The Lopez Family", "Catering Service", "88 Oak Rd", "Capital City", "555-0103"),
            provider("Harvest Kitchen", "Restaurant", "9 River Ln", "Shelbyville", "555-0104"),
            provider("Corner Deli", "Grocery Store", "31 Main St", "Springfield", "555-0105"),
        ];

        let receivers = vec![
            receiver("Helping Hands", "NGO", "Springfield", "555-0200"),
            receiver("St. Mary's Shelter", "Shelter", "Shelbyville", "555-0201"),
            receiver("Community Pantry", "Charity", "Capital City", "555-0202"),
            receiver("Dana Whitfield", "Individual", "Springfield", "555-0203"),
            receiver("Food for All", "NGO", "Shelbyville", "555-0204"),
        ];

        let days = |n: i64| today + Duration::days(n);
        let food = vec![
            food("Rice", 40, days(5), 1, "Restaurant", "Springfield", "Vegetarian", "Lunch"),
            food("Bread", 25, days(2), 2, "Grocery Store", "Springfield", "Vegan", "Breakfast"),
            food("Chicken Curry", 15, days(1), 1, "Restaurant", "Springfield", "Non-Vegetarian", "Dinner"),
            food("Fruit Salad", 30, days(3), 3, "Supermarket", "Shelbyville", "Vegan", "Snacks"),
            food("Pasta", 20, days(4), 5, "Restaurant", "Shelbyville", "Vegetarian", "Dinner"),
            food("Soup", 35, days(2), 4, "Catering Service", "Capital City", "Vegetarian", "Lunch"),
            food("Sandwiches", 18, days(1), 6, "Grocery Store", "Springfield", "Non-Vegetarian", "Lunch"),
            food("Yogurt", 50, days(7), 3, "Supermarket", "Shelbyville", "Vegetarian", "Breakfast"),
            food("Fish Stew", 12, days(1), 5, "Restaurant", "Shelbyville", "Non-Vegetarian", "Dinner"),
            food("Muffins", 24, days(3), 2, "Grocery Store", "Springfield", "Vegan", "Snacks"),
        ];

        let at = |day_offset: i64, hour: u32| -> NaiveDateTime {
            let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default();
            (today - Duration::days(day_offset)).and_time(time)
        };
        use ClaimStatus::{Cancelled, Completed, Pending};
        let claims = vec![
            claim(1, 1, Completed, at(3, 9)),
            claim(2, 1, Completed, at(3, 11)),
            claim(3, 2, Completed, at(2, 18)),
            claim(4, 3, Pending, at(2, 10)),
            claim(5, 2, Cancelled, at(2, 14)),
            claim(6, 3, Completed, at(1, 12)),
            claim(1, 4, Completed, at(1, 13)),
            claim(8, 5, Pending, at(1, 8)),
            claim(9, 5, Completed, at(1, 19)),
            claim(3, 1, Cancelled, at(0, 9)),
            claim(10, 4, Completed, at(0, 15)),
            claim(7, 1, Pending, at(0, 12)),
        ];

        Self {
            providers,
            receivers,
            food,
            claims,
        }
    }
}

fn provider(name: &str, kind: &str, address: &str, city: &str, contact: &str) -> NewProvider {
    NewProvider {
        name: name.to_string(),
        provider_type: kind.to_string(),
        address: address.to_string(),
        city: city.to_string(),
        contact: contact.to_string(),
    }
}

fn receiver(name: &str, kind: &str, city: &str, contact: &str) -> NewReceiver {
    NewReceiver {
        name: name.to_string(),
        receiver_type: kind.to_string(),
        city: city.to_string(),
        contact: contact.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn food(
    name: &str,
    quantity: i64,
    expiry_date: NaiveDate,
    provider_id: i64,
    provider_type: &str,
    location: &str,
    food_type: &str,
    meal_type: &str,
) -> NewFoodListing {
    NewFoodListing {
        food_name: name.to_string(),
        quantity,
        expiry_date,
        provider_id,
        provider_type: provider_type.to_string(),
        location: location.to_string(),
        food_type: food_type.to_string(),
        meal_type: meal_type.to_string(),
    }
}

fn claim(food_id: i64, receiver_id: i64, status: ClaimStatus, timestamp: NaiveDateTime) -> NewClaim {
    NewClaim {
        food_id,
        receiver_id,
        status,
        timestamp,
    }
}
