// Tax Dashboard - Chart Rendering
// ChartSeries + fixed ChartStyle → Plotly-compatible figure JSON

use crate::records::Category;
use crate::series::ChartSeries;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const X_AXIS_LABEL: &str = "Year";
pub const Y_AXIS_LABEL: &str = "Amount in CAD";

const TITLE_FONT_FAMILY: &str = "Arial";
const TITLE_FONT_COLOR: &str = "#000000";
const SERIES_AXIS_COLOR: &str = "green";

// ============================================================================
// CHART SLOTS
// ============================================================================

/// ChartSlot - the four dependent chart positions on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartSlot {
    #[serde(rename = "residential")]
    Residential,
    #[serde(rename = "business")]
    Business,
    #[serde(rename = "lightindustry")]
    LightIndustry,
    #[serde(rename = "lightindustry-bar")]
    LightIndustryBar,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 4] = [
        ChartSlot::Residential,
        ChartSlot::Business,
        ChartSlot::LightIndustry,
        ChartSlot::LightIndustryBar,
    ];

    /// Category whose records feed this slot
    pub fn category(&self) -> Category {
        match self {
            ChartSlot::Residential => Category::Residential,
            ChartSlot::Business => Category::Business,
            ChartSlot::LightIndustry | ChartSlot::LightIndustryBar => Category::LightIndustry,
        }
    }

    /// Short code used in URLs and element ids
    pub fn code(&self) -> &'static str {
        match self {
            ChartSlot::Residential => "residential",
            ChartSlot::Business => "business",
            ChartSlot::LightIndustry => "lightindustry",
            ChartSlot::LightIndustryBar => "lightindustry-bar",
        }
    }
}

impl FromStr for ChartSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartSlot::ALL
            .into_iter()
            .find(|slot| slot.code() == s)
            .ok_or_else(|| format!("unknown chart slot `{}`", s))
    }
}

// ============================================================================
// STYLE CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}

/// ChartStyle - fixed presentation parameters for one slot
///
/// Axis ranges are set by hand so every neighborhood is drawn on the same
/// scale; they are never derived from the series being drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub title: String,
    pub title_x: f64,
    pub title_y: f64,
    pub height: u32,
    pub margin: Margin,
    pub kind: TraceKind,
    /// Draw lines between markers (time-series slots)
    pub lines: bool,
    pub x_dtick: Option<f64>,
    pub y_range: [f64; 2],
    pub y_dtick: f64,
    /// Colour of the axis titles, if any
    pub axis_title_color: Option<String>,
    /// Hover label attached to every point
    pub hover_label: Option<String>,
}

impl ChartStyle {
    fn time_series(category: Category, title_y: f64, height: u32, margin: Margin, y_max: f64, y_dtick: f64) -> Self {
        ChartStyle {
            title: category.name().to_string(),
            title_x: 0.60,
            title_y,
            height,
            margin,
            kind: TraceKind::Scatter,
            lines: true,
            x_dtick: Some(2.0),
            y_range: [0.0, y_max],
            y_dtick,
            axis_title_color: Some(SERIES_AXIS_COLOR.to_string()),
            hover_label: Some(category.code().to_string()),
        }
    }

    /// Style the dashboard ships with for `slot`
    pub fn for_slot(slot: ChartSlot) -> Self {
        match slot {
            ChartSlot::Residential => ChartStyle::time_series(
                Category::Residential,
                0.97,
                250,
                Margin { l: 20, r: 10, b: 30, t: 20 },
                8_000.0,
                2_000.0,
            ),
            ChartSlot::Business => ChartStyle::time_series(
                Category::Business,
                0.93,
                250,
                Margin { l: 20, r: 10, b: 30, t: 30 },
                50_000.0,
                20_000.0,
            ),
            ChartSlot::LightIndustry => ChartStyle::time_series(
                Category::LightIndustry,
                0.98,
                255,
                Margin { l: 20, r: 10, b: 50, t: 10 },
                350_000.0,
                50_000.0,
            ),
            ChartSlot::LightIndustryBar => ChartStyle {
                title: "Bar Chart".to_string(),
                title_x: 0.55,
                title_y: 0.97,
                height: 230,
                margin: Margin { l: 20, r: 20, b: 0, t: 20 },
                kind: TraceKind::Bar,
                lines: false,
                x_dtick: None,
                y_range: [50_000.0, 400_000.0],
                y_dtick: 50_000.0,
                axis_title_color: None,
                hover_label: None,
            },
        }
    }
}

/// StyleBook - the four slot styles, built once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleBook {
    pub residential: ChartStyle,
    pub business: ChartStyle,
    pub light_industry: ChartStyle,
    pub light_industry_bar: ChartStyle,
}

impl StyleBook {
    pub fn get(&self, slot: ChartSlot) -> &ChartStyle {
        match slot {
            ChartSlot::Residential => &self.residential,
            ChartSlot::Business => &self.business,
            ChartSlot::LightIndustry => &self.light_industry,
            ChartSlot::LightIndustryBar => &self.light_industry_bar,
        }
    }
}

impl Default for StyleBook {
    fn default() -> Self {
        StyleBook {
            residential: ChartStyle::for_slot(ChartSlot::Residential),
            business: ChartStyle::for_slot(ChartSlot::Business),
            light_industry: ChartStyle::for_slot(ChartSlot::LightIndustry),
            light_industry_bar: ChartStyle::for_slot(ChartSlot::LightIndustryBar),
        }
    }
}

// ============================================================================
// FIGURE SPEC (Plotly JSON shape)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Font {
    pub fn sized(size: u32) -> Self {
        Font {
            family: None,
            size,
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
    pub tickfont: Font,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

/// X values of a trace: years for dependent charts, names for the master chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceX {
    Years(Vec<i32>),
    Labels(Vec<String>),
}

impl TraceX {
    pub fn len(&self) -> usize {
        match self {
            TraceX::Years(v) => v.len(),
            TraceX::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub size: Vec<f64>,
    pub sizemode: String,
    pub sizeref: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    pub x: TraceX,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

/// ChartSpec - a renderable figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl ChartSpec {
    /// Number of plotted points across all traces
    pub fn point_count(&self) -> usize {
        self.data.iter().map(|t| t.x.len()).sum()
    }
}

pub(crate) fn bold(text: &str) -> String {
    format!("<b>{}</b>", text)
}

// ============================================================================
// RENDERING
// ============================================================================

/// Render one dependent chart
///
/// Total: an empty series gives an empty trace inside the fixed axis range.
pub fn render_chart(series: &ChartSeries, style: &ChartStyle) -> ChartSpec {
    let sorted = series.sorted_by_year();
    let years = sorted.years();
    let amounts = sorted.amounts();

    let mode = match (style.kind, style.lines) {
        (TraceKind::Scatter, true) => Some("lines+markers".to_string()),
        (TraceKind::Scatter, false) => Some("markers".to_string()),
        (TraceKind::Bar, _) => None,
    };

    let hovertext = style
        .hover_label
        .as_ref()
        .map(|label| vec![label.clone(); years.len()]);

    let trace = Trace {
        kind: style.kind,
        mode,
        x: TraceX::Years(years),
        y: amounts,
        hovertext,
        marker: None,
    };

    let axis_title = |text: &str| Title {
        text: text.to_string(),
        x: None,
        y: None,
        font: Font {
            family: None,
            size: 10,
            color: style.axis_title_color.clone(),
        },
    };

    let layout = Layout {
        title: Title {
            text: bold(&style.title),
            x: Some(style.title_x),
            y: Some(style.title_y),
            font: Font {
                family: Some(TITLE_FONT_FAMILY.to_string()),
                size: 13,
                color: Some(TITLE_FONT_COLOR.to_string()),
            },
        },
        height: style.height,
        width: None,
        margin: Some(style.margin),
        xaxis: Axis {
            title: axis_title(X_AXIS_LABEL),
            tickfont: Font::sized(10),
            axis_type: None,
            showgrid: Some(false),
            dtick: style.x_dtick,
            range: None,
        },
        yaxis: Axis {
            title: axis_title(Y_AXIS_LABEL),
            tickfont: Font::sized(10),
            axis_type: Some("linear".to_string()),
            showgrid: None,
            dtick: Some(style.y_dtick),
            range: Some(style.y_range),
        },
    };

    ChartSpec {
        data: vec![trace],
        layout,
    }
}

// ============================================================================
// TESTS
// ============================================================================
