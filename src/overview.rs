// Tax Dashboard - Master Chart
// Static 2022 snapshot per neighborhood; hovering it drives everything else

use crate::charts::{bold, Axis, ChartSpec, Font, Layout, Marker, Title, Trace, TraceKind, TraceX, Y_AXIS_LABEL};
use serde::{Deserialize, Serialize};

/// Largest marker diameter in pixels
const MAX_MARKER_SIZE: f64 = 20.0;

/// One neighborhood in the master chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub place: String,
    pub amount: f64,
    pub exits: u32,
}

impl PlaceSummary {
    pub fn new(place: &str, amount: f64, exits: u32) -> Self {
        PlaceSummary {
            place: place.to_string(),
            amount,
            exits,
        }
    }
}

/// The 2022 residential snapshot shown in the master chart
pub fn sample_2022() -> Vec<PlaceSummary> {
    vec![
        PlaceSummary::new("Downtown", 29805.12, 3),
        PlaceSummary::new("Burnside", 61483.46, 1),
        PlaceSummary::new("Victoria West", 66089.22, 2),
        PlaceSummary::new("James Bay", 24817.28, 5),
        PlaceSummary::new("Rock Bay", 84286.51, 1),
    ]
}

/// Render the master scatter chart
///
/// Marker area is proportional to `exits`, scaled so the largest value is
/// drawn at [`MAX_MARKER_SIZE`] pixels across.
pub fn render_overview(places: &[PlaceSummary]) -> ChartSpec {
    let sizes: Vec<f64> = places.iter().map(|p| p.exits as f64).collect();
    let max_size = sizes.iter().cloned().fold(0.0_f64, f64::max);
    let sizeref = if max_size > 0.0 {
        2.0 * max_size / (MAX_MARKER_SIZE * MAX_MARKER_SIZE)
    } else {
        1.0
    };

    let names: Vec<String> = places.iter().map(|p| p.place.clone()).collect();

    let trace = Trace {
        kind: TraceKind::Scatter,
        mode: Some("markers".to_string()),
        x: TraceX::Labels(names.clone()),
        y: places.iter().map(|p| p.amount).collect(),
        hovertext: Some(names),
        marker: Some(Marker {
            size: sizes,
            sizemode: "area".to_string(),
            sizeref,
        }),
    };

    let axis = |text: &str| Axis {
        title: Title {
            text: text.to_string(),
            x: None,
            y: None,
            font: Font {
                family: None,
                size: 13,
                color: Some("red".to_string()),
            },
        },
        tickfont: Font::sized(13),
        axis_type: None,
        showgrid: None,
        dtick: None,
        range: None,
    };

    let mut yaxis = axis(Y_AXIS_LABEL);
    yaxis.range = Some([0.0, 100_000.0]);

    ChartSpec {
        data: vec![trace],
        layout: Layout {
            title: Title {
                text: bold("Residential"),
                x: Some(0.50),
                y: Some(0.93),
                font: Font {
                    family: Some("Arial".to_string()),
                    size: 16,
                    color: Some("#000000".to_string()),
                },
            },
            height: 600,
            width: Some(700),
            margin: None,
            xaxis: axis("Neighborhood"),
            yaxis,
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_plots_every_place() {
        let spec = render_overview(&sample_2022());
        let trace = &spec.data[0];

        assert_eq!(spec.point_count(), 5);
        assert_eq!(
            trace.x,
            TraceX::Labels(
                ["Downtown", "Burnside", "Victoria West", "James Bay", "Rock Bay"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            )
        );
        assert_eq!(trace.y[3], 24817.28);
    }

    #[test]
    fn test_marker_size_follows_exits() {
        let spec = render_overview(&sample_2022());
        let marker = spec.data[0].marker.as_ref().unwrap();

        assert_eq!(marker.size, vec![3.0, 1.0, 2.0, 5.0, 1.0]);
        assert_eq!(marker.sizemode, "area");
        assert!((marker.sizeref - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_overview_layout() {
        let spec = render_overview(&sample_2022());

        assert_eq!(spec.layout.yaxis.range, Some([0.0, 100_000.0]));
        assert_eq!(spec.layout.width, Some(700));
        assert_eq!(spec.layout.height, 600);
        assert_eq!(spec.layout.xaxis.title.text, "Neighborhood");
    }

    #[test]
    fn test_empty_overview_does_not_divide_by_zero() {
        let spec = render_overview(&[]);
        assert_eq!(spec.data[0].marker.as_ref().unwrap().sizeref, 1.0);
    }
}
