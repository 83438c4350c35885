#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Figure builders.
//!
//! Turns aggregated series into [`Figure`] descriptions: a zoomable line
//! chart for each trend and a donut chart for the age distribution.

use zurich_pop_analytics_models::{AgeSlice, TrendPoint};
use zurich_pop_figure_models::{
    Anchor, Axis, Figure, Layout, Legend, LineTrace, Orientation, PieTrace, Title, Trace,
};

/// Hover label of trend charts: the y value with two decimals.
pub const TREND_HOVER_TEMPLATE: &str = "%{y:.2f}<extra></extra>";

/// Relative hole size of the age distribution donut.
pub const DONUT_HOLE: f64 = 0.4;

/// Builds a line chart with one point per trend entry, in the given order.
#[must_use]
pub fn trend_figure(points: &[TrendPoint], title: &str, color: &str) -> Figure {
    let trace = LineTrace {
        x: points.iter().map(|p| p.date.format("%Y-%m-%d").to_string()).collect(),
        y: points.iter().map(|p| p.value).collect(),
        mode: "lines".to_string(),
        hovertemplate: TREND_HOVER_TEMPLATE.to_string(),
    };

    let mut layout = Layout::titled(Title {
        text: title.to_string(),
        x: 0.05,
        xanchor: Anchor::Left,
    });
    layout.xaxis = Some(Axis { fixedrange: false });
    layout.yaxis = Some(Axis { fixedrange: false });
    layout.colorway = Some(vec![color.to_string()]);

    Figure {
        data: vec![Trace::Scatter(trace)],
        layout,
    }
}

/// Builds a donut chart with one slice per age band, showing the value and
/// percentage on each slice.
#[must_use]
pub fn age_distribution_figure(slices: &[AgeSlice], title: &str) -> Figure {
    let trace = PieTrace {
        labels: slices.iter().map(|s| s.age_band.clone()).collect(),
        values: slices.iter().map(|s| s.population).collect(),
        hole: DONUT_HOLE,
        hoverinfo: "label+percent".to_string(),
        textinfo: "value+percent".to_string(),
    };

    let mut layout = Layout::titled(Title {
        text: title.to_string(),
        x: 0.5,
        xanchor: Anchor::Center,
    });
    layout.showlegend = Some(true);
    layout.legend = Some(Legend {
        orientation: Orientation::Horizontal,
        yanchor: Anchor::Bottom,
        y: -0.2,
        xanchor: Anchor::Center,
        x: 0.5,
    });

    Figure {
        data: vec![Trace::Pie(trace)],
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(date: &str, value: Option<f64>) -> TrendPoint {
        TrendPoint {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            value,
        }
    }

    #[test]
    fn trend_figure_keeps_point_order_and_gaps() {
        let figure = trend_figure(
            &[
                point("2020-01-31", Some(0.375)),
                point("2021-01-31", None),
                point("2022-01-31", Some(0.4)),
            ],
            "Foreigners percentage in Kreis 1",
            "#E12D39",
        );

        let json = serde_json::to_value(&figure).unwrap();
        let trace = &json["data"][0];
        assert_eq!(trace["type"], "scatter");
        assert_eq!(trace["mode"], "lines");
        assert_eq!(
            trace["x"],
            serde_json::json!(["2020-01-31", "2021-01-31", "2022-01-31"])
        );
        assert_eq!(trace["y"], serde_json::json!([0.375, null, 0.4]));
        assert_eq!(trace["hovertemplate"], TREND_HOVER_TEMPLATE);
        assert_eq!(json["layout"]["colorway"], serde_json::json!(["#E12D39"]));
        assert_eq!(json["layout"]["xaxis"]["fixedrange"], false);
    }

    #[test]
    fn empty_trend_renders_empty_series() {
        let figure = trend_figure(&[], "Population in Kreis 1", "#17B897");
        let Trace::Scatter(trace) = &figure.data[0] else {
            panic!("expected a line trace");
        };
        assert!(trace.x.is_empty());
        assert!(trace.y.is_empty());
        assert_eq!(figure.layout.title.text, "Population in Kreis 1");
    }

    #[test]
    fn age_figure_is_a_donut_with_legend_below() {
        let figure = age_distribution_figure(
            &[
                AgeSlice {
                    age_band: "0-19".to_string(),
                    population: 500,
                },
                AgeSlice {
                    age_band: "20-39".to_string(),
                    population: 300,
                },
            ],
            "Age Distribution in Kreis 1 in 2020",
        );

        let json = serde_json::to_value(&figure).unwrap();
        let trace = &json["data"][0];
        assert_eq!(trace["type"], "pie");
        assert_eq!(trace["labels"], serde_json::json!(["0-19", "20-39"]));
        assert_eq!(trace["values"], serde_json::json!([500, 300]));
        assert_eq!(trace["hole"], DONUT_HOLE);
        assert_eq!(trace["textinfo"], "value+percent");
        assert_eq!(json["layout"]["title"]["xanchor"], "center");
        assert_eq!(json["layout"]["legend"]["orientation"], "h");
        assert_eq!(json["layout"]["showlegend"], true);
    }
}
