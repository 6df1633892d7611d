// Tax Dashboard - Core Library
// Exposes the data layer and hover pipeline for the server binary and tests

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod overview;
pub mod records;
pub mod selection;
pub mod series;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use charts::{render_chart, ChartSlot, ChartSpec, ChartStyle, StyleBook};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DependentCharts};
pub use error::DataUnavailable;
pub use overview::{render_overview, sample_2022, PlaceSummary};
pub use records::{load_records_from_reader, Category, CsvRecordSource, Record, RecordSource};
pub use selection::{resolve_selection, HoverEvent, HoverPoint, SelectionKey, DEFAULT_SELECTION};
pub use series::{filter_series, ChartSeries, SeriesPoint};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    /// Two Downtown residential rows; hovering Downtown shows them, Burnside shows nothing
    #[test]
    fn test_downtown_burnside_scenario() {
        let csv = "place,type,year,amt\n\
                   Downtown,residential,2020,5000\n\
                   Downtown,residential,2021,6000\n";
        let records = load_records_from_reader(csv.as_bytes()).unwrap();
        let styles = StyleBook::default();

        let downtown = HoverEvent::over(&["Downtown"]);
        let selection = resolve_selection(Some(&downtown));
        let series = filter_series(&records, &selection, Category::Residential);
        assert_eq!(
            series.points,
            vec![
                SeriesPoint { year: 2020, amount: 5000.0 },
                SeriesPoint { year: 2021, amount: 6000.0 },
            ]
        );

        let burnside = HoverEvent::over(&["Burnside"]);
        let selection = resolve_selection(Some(&burnside));
        let series = filter_series(&records, &selection, Category::Residential);
        assert!(series.is_empty());

        let spec = render_chart(&series, &styles.residential);
        assert_eq!(spec.point_count(), 0);
        assert_eq!(spec.layout.yaxis.range, Some([0.0, 8_000.0]));
    }
}
