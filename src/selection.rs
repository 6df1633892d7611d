// Tax Dashboard - Selection
// Hover event on the master chart → neighborhood key

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Neighborhood shown before the user has hovered anything
pub const DEFAULT_SELECTION: &str = "Downtown";

/// SelectionKey - the neighborhood currently driving every dependent chart
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionKey(String);

impl SelectionKey {
    pub fn new(place: impl Into<String>) -> Self {
        SelectionKey(place.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SelectionKey {
    fn default() -> Self {
        SelectionKey::new(DEFAULT_SELECTION)
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One point reported by the plotting front-end under the pointer
///
/// Only `x` matters for selection; the rest is kept so the payload the page
/// sends round-trips without loss. `x` is whatever the front-end reported,
/// string or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverPoint {
    pub x: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,

    #[serde(rename = "pointIndex", default, skip_serializing_if = "Option::is_none")]
    pub point_index: Option<usize>,

    #[serde(rename = "curveNumber", default, skip_serializing_if = "Option::is_none")]
    pub curve_number: Option<usize>,

    #[serde(rename = "hovertext", default, skip_serializing_if = "Option::is_none")]
    pub hover_text: Option<String>,
}

impl HoverPoint {
    pub fn at(x: &str) -> Self {
        HoverPoint {
            x: Value::String(x.to_string()),
            y: None,
            point_index: None,
            curve_number: None,
            hover_text: None,
        }
    }

    /// Selection key for this point; non-string `x` uses its JSON text
    pub fn key(&self) -> SelectionKey {
        match &self.x {
            Value::String(s) => SelectionKey::new(s.clone()),
            other => SelectionKey::new(other.to_string()),
        }
    }
}

/// HoverEvent - pointer hover over the master chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoverEvent {
    #[serde(default)]
    pub points: Vec<HoverPoint>,
}

impl HoverEvent {
    pub fn over(places: &[&str]) -> Self {
        HoverEvent {
            points: places.iter().map(|p| HoverPoint::at(p)).collect(),
        }
    }
}

/// Resolve the selection for an (optional) hover event
///
/// No event or no points falls back to [`DEFAULT_SELECTION`]; otherwise the
/// first point wins. The key is not checked against the dataset.
pub fn resolve_selection(event: Option<&HoverEvent>) -> SelectionKey {
    resolve_selection_or(event, &SelectionKey::default())
}

/// Same as [`resolve_selection`] with a caller-chosen fallback
pub fn resolve_selection_or(event: Option<&HoverEvent>, fallback: &SelectionKey) -> SelectionKey {
    match event.and_then(|e| e.points.first()) {
        Some(point) => point.key(),
        None => fallback.clone(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_event_uses_default() {
        assert_eq!(resolve_selection(None).as_str(), "Downtown");
    }

    #[test]
    fn test_empty_event_uses_default() {
        let event = HoverEvent::default();
        assert_eq!(resolve_selection(Some(&event)), resolve_selection(None));
    }

    #[test]
    fn test_first_point_wins() {
        let event = HoverEvent::over(&["Harris Green", "James Bay", "Rock Bay"]);
        assert_eq!(resolve_selection(Some(&event)).as_str(), "Harris Green");

        let single = HoverEvent::over(&["Harris Green"]);
        assert_eq!(resolve_selection(Some(&single)), resolve_selection(Some(&event)));
    }

    #[test]
    fn test_unknown_place_is_passed_through() {
        let event = HoverEvent::over(&["Atlantis"]);
        assert_eq!(resolve_selection(Some(&event)).as_str(), "Atlantis");
    }

    #[test]
    fn test_custom_fallback() {
        let fallback = SelectionKey::new("James Bay");
        assert_eq!(resolve_selection_or(None, &fallback), fallback);
    }

    #[test]
    fn test_deserialize_plotly_hover_data() {
        let json = r#"{"points":[{"curveNumber":0,"pointNumber":2,"pointIndex":2,
            "x":"Victoria West","y":66089.22,"hovertext":"Victoria West","marker.size":2}]}"#;
        let event: HoverEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.points.len(), 1);
        assert_eq!(event.points[0].point_index, Some(2));
        assert_eq!(event.points[0].y, Some(66089.22));
        assert_eq!(resolve_selection(Some(&event)).as_str(), "Victoria West");
    }

    #[test]
    fn test_numeric_x_becomes_key() {
        let event: HoverEvent = serde_json::from_str(r#"{"points":[{"x":2020}]}"#).unwrap();
        assert_eq!(resolve_selection(Some(&event)).as_str(), "2020");

        let event: HoverEvent = serde_json::from_str(r#"{"points":[{"x":true}]}"#).unwrap();
        assert_eq!(resolve_selection(Some(&event)).as_str(), "true");
    }

    #[test]
    fn test_deserialize_event_without_points() {
        let event: HoverEvent = serde_json::from_str("{}").unwrap();
        assert!(event.points.is_empty());
    }
}
