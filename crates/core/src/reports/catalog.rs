//! The fixed menu of reporting queries.
//!
//! Each report pairs one literal SQL statement with the visualizations drawn
//! from its result. Column names referenced by a visualization must match
//! the aliases in the SQL.

/// How a report's result set is presented below the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visualization {
    /// Bar chart of `y` against `x`, optionally only the first `limit` rows.
    Bar {
        title: &'static str,
        x: &'static str,
        y: &'static str,
        limit: Option<usize>,
    },
    /// Pie chart with slice sizes from `values` and labels from `names`.
    Pie {
        title: &'static str,
        names: &'static str,
        values: &'static str,
    },
    /// A single headline number taken from the first row.
    Metric {
        label: &'static str,
        column: &'static str,
    },
    /// One `"<label>: <value>%"` line per row.
    Breakdown {
        label: &'static str,
        value: &'static str,
    },
}

/// A named canned query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub slug: &'static str,
    pub name: &'static str,
    pub sql: &'static str,
    pub visualizations: &'static [Visualization],
}

pub const REPORTS: &[Report] = &[
    Report {
        slug: "providers-by-city",
        name: "Food Providers by City",
        sql: r#"
SELECT City, COUNT(*) as Count
FROM providers
GROUP BY City
ORDER BY Count DESC
"#,
        visualizations: &[Visualization::Bar {
            title: "Food Providers by City",
            x: "City",
            y: "Count",
            limit: None,
        }],
    },
    Report {
        slug: "receivers-by-city",
        name: "Food Receivers by City",
        sql: r#"
SELECT COUNT(*) AS Receiver_count, City
FROM receivers
GROUP BY City
ORDER BY Receiver_count DESC
"#,
        visualizations: &[Visualization::Bar {
            title: "Food Receivers by City",
            x: "City",
            y: "Receiver_count",
            limit: None,
        }],
    },
    Report {
        slug: "provider-types",
        name: "Provider Types Distribution",
        sql: r#"
SELECT COUNT(*) AS Provider_Count, Type
FROM providers
GROUP BY Type
ORDER BY Provider_Count DESC
"#,
        visualizations: &[Visualization::Pie {
            title: "Provider Types Distribution",
            names: "Type",
            values: "Provider_Count",
        }],
    },
    Report {
        slug: "top-receivers",
        name: "Top Receivers by Claims",
        sql: r#"
SELECT r.Name, r.Type, COUNT(c.Claim_ID) as Claims
FROM receivers r
JOIN claims c ON r.Receiver_ID = c.Receiver_ID
WHERE c.Status = 'Completed'
GROUP BY r.Receiver_ID
ORDER BY Claims DESC
LIMIT 10
"#,
        visualizations: &[Visualization::Bar {
            title: "Top Receivers by Number of Claims",
            x: "Name",
            y: "Claims",
            limit: None,
        }],
    },
    Report {
        slug: "total-food",
        name: "Total Food Available",
        sql: r#"
SELECT SUM(Quantity) Total_Available_Food
FROM food
"#,
        visualizations: &[Visualization::Metric {
            label: "Total Food Available",
            column: "Total_Available_Food",
        }],
    },
    Report {
        slug: "cities-most-listings",
        name: "Cities with Most Food Listings",
        sql: r#"
SELECT COUNT(Food_Name) AS Number_Of_Listing, Location
FROM food
GROUP BY Location
ORDER BY Number_Of_Listing DESC
"#,
        visualizations: &[Visualization::Bar {
            title: "Cities with Most Food Listings",
            x: "Location",
            y: "Number_Of_Listing",
            limit: None,
        }],
    },
    Report {
        slug: "common-food-types",
        name: "Most Common Food Types",
        sql: r#"
SELECT DISTINCT Food_Type AS Food_Type,
    COUNT(*) AS Number_Of_Listings,
    SUM(QUANTITY) AS Total_Quantity
FROM food
GROUP BY Food_Type
ORDER BY Number_Of_Listings DESC
"#,
        visualizations: &[
            Visualization::Bar {
                title: "Most Common Food Types by Listings",
                x: "Food_Type",
                y: "Number_Of_Listings",
                limit: None,
            },
            Visualization::Bar {
                title: "Total Quantity by Food Type",
                x: "Food_Type",
                y: "Total_Quantity",
                limit: None,
            },
        ],
    },
    Report {
        slug: "claims-per-food",
        name: "Claims per Food Item",
        sql: r#"
SELECT f.Food_ID, f.Food_Name, f.Food_Type, COUNT(Food_Name) Claims
FROM claims c
JOIN food f ON c.Food_ID = f.Food_ID
GROUP BY c.Food_ID
ORDER BY Claims DESC
"#,
        visualizations: &[Visualization::Bar {
            title: "Top 10 Most Claimed Food Items",
            x: "Food_Name",
            y: "Claims",
            limit: Some(10),
        }],
    },
    Report {
        slug: "top-providers",
        name: "Top Providers by Successful Claims",
        sql: r#"
SELECT Count(c.Claim_ID) AS Successful_Claims, p.Name, p.Provider_ID, p.Type
FROM food f
JOIN providers p ON f.Provider_ID = p.Provider_ID
JOIN claims c ON c.Food_ID = f.Food_ID
WHERE c.Status = 'Completed'
GROUP BY p.Provider_ID, p.Name, p.Type
ORDER BY Successful_Claims DESC
LIMIT 10
"#,
        visualizations: &[Visualization::Bar {
            title: "Top Providers by Successful Claims",
            x: "Name",
            y: "Successful_Claims",
            limit: None,
        }],
    },
    Report {
        slug: "claim-status",
        name: "Claim Status Distribution",
        sql: r#"
SELECT COUNT(*) Claim_Count,
    (COUNT(*) * 100 / (SELECT COUNT(*) FROM claims)) Percentage,
    Status
FROM claims
GROUP BY Status
"#,
        visualizations: &[
            Visualization::Pie {
                title: "Claim Status Distribution",
                names: "Status",
                values: "Claim_Count",
            },
            Visualization::Breakdown {
                label: "Status",
                value: "Percentage",
            },
        ],
    },
    Report {
        slug: "avg-quantity-per-receiver",
        name: "Average Quantity Claimed per Receiver",
        sql: r#"
SELECT ROUND(AVG(Total_Quantity), 2) AS Avg_Quantity_Per_Receiver
FROM (
    SELECT c.Receiver_ID, SUM(Quantity) AS Total_Quantity
    FROM claims c
    JOIN food f ON c.Food_ID = f.Food_ID
    WHERE c.Status = 'Completed'
    GROUP BY c.Receiver_ID
)
"#,
        visualizations: &[Visualization::Metric {
            label: "Average Quantity Claimed per Receiver",
            column: "Avg_Quantity_Per_Receiver",
        }],
    },
    Report {
        slug: "claimed-meal-types",
        name: "Most Claimed Meal Types",
        sql: r#"
SELECT COUNT(*) AS Total_Claimed, f.Meal_Type
FROM claims c
JOIN food f ON c.Food_ID = f.Food_ID
WHERE c.Status = 'Completed'
GROUP BY f.Meal_Type
ORDER BY Total_Claimed DESC
"#,
        visualizations: &[Visualization::Pie {
            title: "Most Claimed Meal Types",
            names: "Meal_Type",
            values: "Total_Claimed",
        }],
    },
    Report {
        slug: "food-by-provider",
        name: "Food Donated by Provider",
        sql: r#"
SELECT p.Name, p.Type, SUM(Quantity) AS Total_Quantity
FROM food f
JOIN providers p ON f.Provider_ID = p.Provider_ID
GROUP BY p.Provider_ID
ORDER BY Total_Quantity DESC
"#,
        visualizations: &[Visualization::Bar {
            title: "Top 10 Providers by Food Donated",
            x: "Name",
            y: "Total_Quantity",
            limit: Some(10),
        }],
    },
];

/// Looks up a report by its slug.
pub fn find_report(slug: &str) -> Option<&'static Report> {
    REPORTS.iter().find(|report| report.slug == slug)
}

/// A practice query shown with its SQL text and run on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearnerQuery {
    pub slug: &'static str,
    pub name: &'static str,
    pub sql: &'static str,
}

pub const LEARNER_QUERIES: &[LearnerQuery] = &[
    LearnerQuery {
        slug: "city-most-listings",
        name: "City with most food listings",
        sql: r#"SELECT p.City, COUNT(f.Food_ID) as Listings
FROM food f
JOIN providers p ON f.Provider_ID = p.Provider_ID
GROUP BY p.City
ORDER BY Listings DESC
LIMIT 1"#,
    },
    LearnerQuery {
        slug: "common-food-types",
        name: "Most commonly available food types",
        sql: r#"SELECT Food_Type, COUNT(*) as Count
FROM food
GROUP BY Food_Type
ORDER BY Count DESC"#,
    },
    LearnerQuery {
        slug: "avg-quantity-per-receiver",
        name: "Average quantity of food claimed per receiver",
        sql: r#"SELECT ROUND(AVG(total_quantity), 2) as avg_quantity
FROM (
    SELECT c.Receiver_ID, SUM(f.Quantity) as total_quantity
    FROM claims c
    JOIN food f ON c.Food_ID = f.Food_ID
    WHERE c.Status = 'Completed'
    GROUP BY c.Receiver_ID
)"#,
    },
    LearnerQuery {
        slug: "top-provider",
        name: "Provider with the most successful claims",
        sql: r#"SELECT p.Name, p.Type, COUNT(c.Claim_ID) as Claims
FROM providers p
JOIN food f ON p.Provider_ID = f.Provider_ID
JOIN claims c ON f.Food_ID = c.Food_ID
WHERE c.Status = 'Completed'
GROUP BY p.Provider_ID
ORDER BY Claims DESC
LIMIT 1"#,
    },
];

pub fn find_learner_query(slug: &str) -> Option<&'static LearnerQuery> {
    LEARNER_QUERIES.iter().find(|query| query.slug == slug)
}
