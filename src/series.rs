// Tax Dashboard - Series Filter
// (records, selection, category) → ChartSeries

use crate::records::{Category, Record};
use crate::selection::SelectionKey;
use serde::{Deserialize, Serialize};

/// One (year, amount) pair in a chart series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub amount: f64,
}

/// ChartSeries - ordered points for one selection/category pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn amounts(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.amount).collect()
    }

    /// Copy of the series ordered by year (stable for equal years)
    pub fn sorted_by_year(&self) -> ChartSeries {
        let mut points = self.points.clone();
        points.sort_by_key(|p| p.year);
        ChartSeries { points }
    }
}

impl FromIterator<SeriesPoint> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = SeriesPoint>>(iter: I) -> Self {
        ChartSeries {
            points: iter.into_iter().collect(),
        }
    }
}

/// Keep records for exactly this place and category, in source order
///
/// Matching is exact and case-sensitive. No match gives an empty series.
pub fn filter_series(records: &[Record], selection: &SelectionKey, category: Category) -> ChartSeries {
    records
        .iter()
        .filter(|r| r.place == selection.as_str() && r.category == category)
        .map(|r| SeriesPoint {
            year: r.year,
            amount: r.amount,
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
