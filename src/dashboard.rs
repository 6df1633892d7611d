// Tax Dashboard - Selection-Filter-Render Pipeline
// Hover event → reload → four independent dependent charts

use crate::charts::{render_chart, ChartSlot, ChartSpec, StyleBook};
use crate::error::DataUnavailable;
use crate::records::{Record, RecordSource};
use crate::selection::{resolve_selection_or, HoverEvent, SelectionKey};
use crate::series::filter_series;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// The four dependent charts derived from one hover event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependentCharts {
    pub selection: SelectionKey,
    pub residential: ChartSpec,
    pub business: ChartSpec,
    pub light_industry: ChartSpec,
    pub light_industry_bar: ChartSpec,
}

impl DependentCharts {
    pub fn get(&self, slot: ChartSlot) -> &ChartSpec {
        match slot {
            ChartSlot::Residential => &self.residential,
            ChartSlot::Business => &self.business,
            ChartSlot::LightIndustry => &self.light_industry,
            ChartSlot::LightIndustryBar => &self.light_industry_bar,
        }
    }
}

/// Render one slot from an already-loaded snapshot
pub fn render_slot(records: &[Record], selection: &SelectionKey, slot: ChartSlot, styles: &StyleBook) -> ChartSpec {
    let series = filter_series(records, selection, slot.category());
    render_chart(&series, styles.get(slot))
}

/// Dashboard - record source plus the immutable style configuration
///
/// Holds no per-event state; every call reloads from the source.
pub struct Dashboard<S: RecordSource> {
    source: S,
    styles: StyleBook,
    default_selection: SelectionKey,
}

impl<S: RecordSource> Dashboard<S> {
    pub fn new(source: S, styles: StyleBook) -> Self {
        Dashboard {
            source,
            styles,
            default_selection: SelectionKey::default(),
        }
    }

    /// Builder pattern: override the selection shown before any hover
    pub fn with_default_selection(mut self, selection: SelectionKey) -> Self {
        self.default_selection = selection;
        self
    }

    pub fn resolve(&self, event: Option<&HoverEvent>) -> SelectionKey {
        resolve_selection_or(event, &self.default_selection)
    }

    fn load(&self) -> Result<Vec<Record>, DataUnavailable> {
        self.source.load_records().map_err(|e| {
            error!("Error loading records: {}", e);
            e
        })
    }

    /// Re-derive all four dependent charts for a hover event
    pub fn update(&self, event: Option<&HoverEvent>) -> Result<DependentCharts, DataUnavailable> {
        let selection = self.resolve(event);
        let records = self.load()?;
        info!(selection = %selection, rows = records.len(), "updating dependent charts");

        let render = |slot| render_slot(&records, &selection, slot, &self.styles);

        Ok(DependentCharts {
            residential: render(ChartSlot::Residential),
            business: render(ChartSlot::Business),
            light_industry: render(ChartSlot::LightIndustry),
            light_industry_bar: render(ChartSlot::LightIndustryBar),
            selection,
        })
    }

    /// Re-derive a single slot; reloads on its own like every other slot
    pub fn update_slot(&self, slot: ChartSlot, event: Option<&HoverEvent>) -> Result<ChartSpec, DataUnavailable> {
        let selection = self.resolve(event);
        let records = self.load()?;
        info!(selection = %selection, slot = slot.code(), "updating chart");

        Ok(render_slot(&records, &selection, slot, &self.styles))
    }
}

// ============================================================================
// TESTS
// ============================================================================
