//! Canned report queries and how their results are drawn.

mod catalog;
mod chart;

pub use catalog::{
    find_learner_query, find_report, LearnerQuery, Report, Visualization, LEARNER_QUERIES, REPORTS,
};
pub use chart::{bar_chart_svg, escape_xml, format_value, pie_chart_svg, ChartPoint};

use crate::storage::{Cell, TableData};

/// A visualization after it has been applied to a result set.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Inline SVG, already escaped.
    Chart(String),
    /// A single labelled number.
    Metric { label: String, value: String },
    /// Preformatted `"<label>: <value>%"` lines.
    Breakdown(Vec<String>),
    /// Nothing to draw; the message says why.
    Empty(String),
}

/// Extracts `(label, value)` pairs from two columns, skipping rows whose
/// value is not numeric.
pub fn chart_points(
    data: &TableData,
    label_column: &str,
    value_column: &str,
    limit: Option<usize>,
) -> Result<Vec<ChartPoint>, String> {
    let label_index = data
        .column_index(label_column)
        .ok_or_else(|| format!("Column {label_column} is missing from the result"))?;
    let value_index = data
        .column_index(value_column)
        .ok_or_else(|| format!("Column {value_column} is missing from the result"))?;

    let rows = data.rows.iter().take(limit.unwrap_or(usize::MAX));
    Ok(rows
        .filter_map(|row| {
            let value = row.get(value_index)?.as_f64()?;
            let label = row.get(label_index).map(Cell::to_string).unwrap_or_default();
            Some(ChartPoint::new(label, value))
        })
        .collect())
}

/// Applies one visualization to a query result.
pub fn render_visualization(visualization: &Visualization, data: &TableData) -> Rendered {
    match *visualization {
        Visualization::Bar { title, x, y, limit } => match chart_points(data, x, y, limit) {
            Ok(points) if points.is_empty() => Rendered::Empty(format!("{title}: no data")),
            Ok(points) => Rendered::Chart(bar_chart_svg(title, x, y, &points)),
            Err(message) => Rendered::Empty(message),
        },
        Visualization::Pie {
            title,
            names,
            values,
        } => match chart_points(data, names, values, None) {
            Ok(points) => match pie_chart_svg(title, &points) {
                Some(svg) => Rendered::Chart(svg),
                None => Rendered::Empty(format!("{title}: no data")),
            },
            Err(message) => Rendered::Empty(message),
        },
        Visualization::Metric { label, column } => {
            let value = match data.first_value(column) {
                Some(cell) if !cell.is_null() => cell.to_string(),
                _ => "n/a".to_string(),
            };
            Rendered::Metric {
                label: label.to_string(),
                value,
            }
        }
        Visualization::Breakdown { label, value } => {
            let (Some(label_index), Some(value_index)) =
                (data.column_index(label), data.column_index(value))
            else {
                return Rendered::Empty(format!("Columns {label} and {value} are required"));
            };
            let lines = data
                .rows
                .iter()
                .filter_map(|row| {
                    let percent = row.get(value_index)?.as_f64()?;
                    let name = row.get(label_index)?.to_string();
                    Some(format!("{name}: {percent:.2}%"))
                })
                .collect();
            Rendered::Breakdown(lines)
        }
    }
}
