// Chart Figures - what the page script hands to Plotly
// Pie, scatter, and the placeholder shown when there is nothing to draw

use crate::aggregation::{ScatterPoint, ScatterSelection, SiteBreakdown};
use crate::error::AggregationError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Figure {
    Pie(PieFigure),
    Scatter(ScatterFigure),
    Placeholder(PlaceholderFigure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieFigure {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

/// One trace per booster version category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub category: String,
    pub x: Vec<f64>,
    pub y: Vec<u8>,
    pub hover: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderFigure {
    pub title: String,
    pub message: String,
}

impl Figure {
    pub fn placeholder(title: &str, message: &str) -> Self {
        Figure::Placeholder(PlaceholderFigure {
            title: title.to_string(),
            message: message.to_string(),
        })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Figure::Placeholder(_))
    }

    pub fn title(&self) -> &str {
        match self {
            Figure::Pie(pie) => &pie.title,
            Figure::Scatter(scatter) => &scatter.title,
            Figure::Placeholder(placeholder) => &placeholder.title,
        }
    }
}

/// Pie figure, or a placeholder when every slice is zero
pub fn pie_chart(breakdown: &SiteBreakdown) -> Figure {
    if breakdown.total() == 0 {
        return Figure::placeholder(&breakdown.title, "No launches to show for this selection");
    }

    Figure::Pie(PieFigure {
        title: breakdown.title.clone(),
        labels: breakdown.slices.iter().map(|s| s.label.clone()).collect(),
        values: breakdown.slices.iter().map(|s| s.value).collect(),
    })
}

/// Scatter figure grouped by booster category, or a placeholder when empty
pub fn scatter_chart(selection: &ScatterSelection) -> Figure {
    if selection.points.is_empty() {
        return Figure::placeholder(
            &selection.title,
            "No launches with a payload in the selected range",
        );
    }

    let series = selection
        .categories
        .iter()
        .map(|category| {
            let mut series = ScatterSeries {
                category: category.clone(),
                x: Vec::new(),
                y: Vec::new(),
                hover: Vec::new(),
            };
            for point in selection
                .points
                .iter()
                .filter(|p| &p.booster_version_category == category)
            {
                series.x.push(point.payload_mass_kg);
                series.y.push(point.class.code());
                series.hover.push(hover_text(point));
            }
            series
        })
        .collect();

    Figure::Scatter(ScatterFigure {
        title: selection.title.clone(),
        x_label: "Payload Mass (kg)".to_string(),
        y_label: "class".to_string(),
        series,
    })
}

fn hover_text(point: &ScatterPoint) -> String {
    let mut text = point.launch_site.clone();
    if let Some(flight) = point.flight_number {
        text.push_str(&format!(" | flight {}", flight));
    }
    if let Some(version) = &point.booster_version {
        text.push_str(&format!(" | {}", version));
    }
    text
}

/// Placeholder for a failed aggregation, titled after the chart it replaces
pub fn error_chart(chart_title: &str, err: &AggregationError) -> Figure {
    Figure::placeholder(chart_title, &err.to_string())
}
