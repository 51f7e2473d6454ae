use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::core::{Bar, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{NullRenderer, Renderer};

use super::{ChartView, ChartViewConfig};

/// One chunk of the host's data feed; each dataset becomes one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Unix seconds of the chunk start.
    pub chunk_start: i64,
    pub bars: Vec<Bar>,
}

/// Host-side place where chart surfaces are created and laid out.
pub trait ChartContainer {
    type Surface: Renderer;

    /// Creates and attaches a new surface identified by `chart_id`.
    fn create_surface(&mut self, chart_id: &str) -> ChartResult<(Self::Surface, Viewport)>;
}

/// Identifier assigned to the chart built from the `index`-th dataset.
#[must_use]
pub fn chart_id(index: usize) -> String {
    format!("chart-{index}")
}

/// Builds one `ChartView` per dataset and paints each once.
///
/// A missing container is logged and yields no charts. A dataset whose surface
/// or view cannot be created is logged and skipped; the remaining charts are
/// still mounted. Returned views are keyed by chart id in dataset order.
pub fn mount_charts<C: ChartContainer>(
    container: Option<&mut C>,
    datasets: Vec<Dataset>,
    config: ChartViewConfig,
) -> IndexMap<String, ChartView<C::Surface>> {
    let mut charts = IndexMap::new();
    let Some(container) = container else {
        error!(
            datasets = datasets.len(),
            "chart container not found; no charts created"
        );
        return charts;
    };

    for (index, dataset) in datasets.into_iter().enumerate() {
        let id = chart_id(index);
        match mount_one(container, &id, dataset, config) {
            Ok(view) => {
                charts.insert(id, view);
            }
            Err(err) => warn!(chart_id = %id, error = %err, "skipping chart"),
        }
    }

    debug!(mounted = charts.len(), "charts mounted");
    charts
}

fn mount_one<C: ChartContainer>(
    container: &mut C,
    id: &str,
    dataset: Dataset,
    config: ChartViewConfig,
) -> ChartResult<ChartView<C::Surface>> {
    let (surface, viewport) = container.create_surface(id)?;
    debug!(
        chart_id = id,
        chunk_start = dataset.chunk_start,
        bars = dataset.bars.len(),
        "mounting chart"
    );
    let mut view = ChartView::new(surface, viewport, dataset.bars, config)?;
    if let Err(err) = view.render() {
        // Keep the chart; the next gesture repaints it.
        warn!(chart_id = id, error = %err, "initial render failed");
    }
    Ok(view)
}

/// Container for hosts without a display, backed by `NullRenderer` surfaces.
#[derive(Debug, Clone)]
pub struct HeadlessContainer {
    viewport: Viewport,
    chart_ids: Vec<String>,
}

impl HeadlessContainer {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            chart_ids: Vec::new(),
        }
    }

    /// Ids of every surface created so far, in creation order.
    #[must_use]
    pub fn chart_ids(&self) -> &[String] {
        &self.chart_ids
    }
}

impl ChartContainer for HeadlessContainer {
    type Surface = NullRenderer;

    fn create_surface(&mut self, chart_id: &str) -> ChartResult<(NullRenderer, Viewport)> {
        if self.chart_ids.iter().any(|id| id == chart_id) {
            return Err(ChartError::SurfaceUnavailable {
                id: chart_id.to_owned(),
                reason: "duplicate chart id".to_owned(),
            });
        }
        self.chart_ids.push(chart_id.to_owned());
        Ok((NullRenderer::default(), self.viewport))
    }
}
