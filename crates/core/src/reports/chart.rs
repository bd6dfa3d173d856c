//! Inline SVG charts.
//!
//! Pure functions from labelled values to an SVG document that can be
//! embedded directly in a page. All text is XML-escaped here, so callers
//! may insert the output without further escaping.

use std::fmt::Write;

/// Plotly's default qualitative palette.
const PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

const BAR_WIDTH: f64 = 720.0;
const BAR_HEIGHT: f64 = 380.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 110.0;
const Y_TICKS: usize = 5;

const PIE_RADIUS: f64 = 140.0;
const PIE_CX: f64 = 170.0;
const PIE_CY: f64 = 190.0;

/// One bar or slice.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Escapes text for use in SVG/XML content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats a value for axis ticks and tooltips: integers without decimals,
/// everything else with up to two.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{value:.2}");
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Rounds the axis maximum up to a "nice" number (1, 2, 2.5 or 5 times a
/// power of ten) so tick labels stay readable.
fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let normalized = value / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Renders a vertical bar chart.
///
/// Negative values are drawn as zero-height bars.
pub fn bar_chart_svg(title: &str, x_label: &str, y_label: &str, points: &[ChartPoint]) -> String {
    let plot_width = BAR_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = BAR_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let max_value = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let axis_max = nice_ceiling(max_value);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart bar-chart" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {BAR_WIDTH} {BAR_HEIGHT}" role="img" aria-label="{title}">"#,
        title = escape_xml(title),
    );
    let _ = write!(
        svg,
        r#"<text class="chart-title" x="{x}" y="24" text-anchor="middle" font-size="16" font-weight="600">{title}</text>"#,
        x = BAR_WIDTH / 2.0,
        title = escape_xml(title),
    );

    // Gridlines and y-axis tick labels
    for tick in 0..=Y_TICKS {
        let value = axis_max * tick as f64 / Y_TICKS as f64;
        let y = MARGIN_TOP + plot_height - plot_height * tick as f64 / Y_TICKS as f64;
        let _ = write!(
            svg,
            r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="#e5e7eb"/><text x="{tx}" y="{ty:.1}" text-anchor="end" font-size="11">{label}</text>"##,
            x2 = BAR_WIDTH - MARGIN_RIGHT,
            tx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
            label = format_value(value),
        );
    }

    if !points.is_empty() {
        let slot = plot_width / points.len() as f64;
        let bar_width = slot * 0.7;
        for (index, point) in points.iter().enumerate() {
            let height = plot_height * point.value.max(0.0) / axis_max;
            let x = MARGIN_LEFT + slot * index as f64 + (slot - bar_width) / 2.0;
            let y = MARGIN_TOP + plot_height - height;
            let label_x = x + bar_width / 2.0;
            let label_y = MARGIN_TOP + plot_height + 14.0;
            let _ = write!(
                svg,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{height:.1}" fill="{fill}"><title>{label}: {value}</title></rect>"#,
                fill = PALETTE[0],
                label = escape_xml(&point.label),
                value = format_value(point.value),
            );
            let _ = write!(
                svg,
                r#"<text x="{label_x:.1}" y="{label_y:.1}" text-anchor="end" font-size="11" transform="rotate(-35 {label_x:.1} {label_y:.1})">{label}</text>"#,
                label = escape_xml(&point.label),
            );
        }
    }

    // Axis titles
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="12">{label}</text>"#,
        x = MARGIN_LEFT + plot_width / 2.0,
        y = BAR_HEIGHT - 8.0,
        label = escape_xml(x_label),
    );
    let _ = write!(
        svg,
        r#"<text x="14" y="{y}" text-anchor="middle" font-size="12" transform="rotate(-90 14 {y})">{label}</text>"#,
        y = MARGIN_TOP + plot_height / 2.0,
        label = escape_xml(y_label),
    );

    svg.push_str("</svg>");
    svg
}

/// Renders a pie chart with a legend showing each slice's share.
///
/// Slices with a non-positive value are left out. Returns `None` when
/// nothing remains to draw.
pub fn pie_chart_svg(title: &str, points: &[ChartPoint]) -> Option<String> {
    let slices: Vec<&ChartPoint> = points.iter().filter(|p| p.value > 0.0).collect();
    let total: f64 = slices.iter().map(|p| p.value).sum();
    if slices.is_empty() || total <= 0.0 {
        return None;
    }

    let legend_height = 24.0 * slices.len() as f64 + 60.0;
    let height = (PIE_CY + PIE_RADIUS + 20.0).max(legend_height);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart pie-chart" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 620 {height}" role="img" aria-label="{title}">"#,
        title = escape_xml(title),
    );
    let _ = write!(
        svg,
        r#"<text class="chart-title" x="310" y="24" text-anchor="middle" font-size="16" font-weight="600">{}</text>"#,
        escape_xml(title),
    );

    let mut start_angle = -std::f64::consts::FRAC_PI_2;
    for (index, point) in slices.iter().enumerate() {
        let fill = PALETTE[index % PALETTE.len()];
        let fraction = point.value / total;
        let label = escape_xml(&point.label);

        if slices.len() == 1 {
            let _ = write!(
                svg,
                r#"<circle cx="{PIE_CX}" cy="{PIE_CY}" r="{PIE_RADIUS}" fill="{fill}"><title>{label}: 100%</title></circle>"#,
            );
        } else {
            let end_angle = start_angle + fraction * std::f64::consts::TAU;
            let (x1, y1) = polar(start_angle);
            let (x2, y2) = polar(end_angle);
            let large_arc = u8::from(fraction > 0.5);
            let _ = write!(
                svg,
                r#"<path d="M{PIE_CX},{PIE_CY} L{x1:.2},{y1:.2} A{PIE_RADIUS},{PIE_RADIUS} 0 {large_arc} 1 {x2:.2},{y2:.2} Z" fill="{fill}" stroke="white" stroke-width="1"><title>{label}: {percent:.1}%</title></path>"#,
                percent = fraction * 100.0,
            );
            start_angle = end_angle;
        }

        let legend_y = 60.0 + 24.0 * index as f64;
        let _ = write!(
            svg,
            r#"<rect x="350" y="{ry}" width="14" height="14" fill="{fill}"/><text x="372" y="{ty}" font-size="12">{label} ({percent:.1}%)</text>"#,
            ry = legend_y - 11.0,
            ty = legend_y,
            percent = fraction * 100.0,
        );
    }

    svg.push_str("</svg>");
    Some(svg)
}

fn polar(angle: f64) -> (f64, f64) {
    (
        PIE_CX + PIE_RADIUS * angle.cos(),
        PIE_CY + PIE_RADIUS * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"Tom & Jerry's <"Deli">"#),
            "Tom &amp; Jerry&#39;s &lt;&quot;Deli&quot;&gt;"
        );
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(12.0), "12");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(1.239), "1.24");
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(7.0), 10.0);
        assert_eq!(nice_ceiling(18.0), 20.0);
        assert_eq!(nice_ceiling(240.0), 250.0);
        assert_eq!(nice_ceiling(100.0), 100.0);
    }

    #[test]
    fn test_bar_chart_has_one_rect_per_point() {
        let points = vec![
            ChartPoint::new("Springfield", 3.0),
            ChartPoint::new("Shelbyville", 1.0),
        ];
        let svg = bar_chart_svg("Providers by City", "City", "Count", &points);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains("Springfield"));
        assert!(svg.contains("Providers by City"));
    }

    #[test]
    fn test_bar_chart_escapes_labels() {
        let points = vec![ChartPoint::new("<script>", 1.0)];
        let svg = bar_chart_svg("t", "x", "y", &points);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_pie_chart_slices_and_legend() {
        let points = vec![
            ChartPoint::new("Completed", 2.0),
            ChartPoint::new("Pending", 1.0),
            ChartPoint::new("Cancelled", 1.0),
        ];
        let svg = pie_chart_svg("Claim Status", &points).unwrap();

        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains("Completed (50.0%)"));
        assert!(svg.contains("Pending (25.0%)"));
    }

    #[test]
    fn test_pie_chart_single_slice_is_a_circle() {
        let points = vec![ChartPoint::new("Restaurant", 5.0)];
        let svg = pie_chart_svg("Types", &points).unwrap();
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_pie_chart_without_positive_values() {
        assert!(pie_chart_svg("Empty", &[]).is_none());
        assert!(pie_chart_svg("Zero", &[ChartPoint::new("a", 0.0)]).is_none());
    }

    #[test]
    fn test_large_slice_uses_large_arc_flag() {
        let points = vec![ChartPoint::new("big", 3.0), ChartPoint::new("small", 1.0)];
        let svg = pie_chart_svg("Arcs", &points).unwrap();
        assert!(svg.contains(" 0 1 1 "));
        assert!(svg.contains(" 0 0 1 "));
    }
}
