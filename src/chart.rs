use crate::models::AggregatedSeries;
use serde::Serialize;
use std::collections::BTreeMap;

pub const VELOCITY_SURFACE: &str = "velocityChart";
pub const STRIKE_SURFACE: &str = "strikeChart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Velocity,
    Strikes,
}

impl Metric {
    fn values<'a>(&self, series: &'a AggregatedSeries) -> &'a [f64] {
        match self {
            Self::Velocity => &series.velo,
            Self::Strikes => &series.strikes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_max: Option<f64>,
}

/// Static look of one presenter's chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub surface: &'static str,
    pub metric: Metric,
    pub label: &'static str,
    pub y_title: &'static str,
    pub y_bounds: AxisBounds,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub point_color: &'static str,
}

pub fn velocity_chart() -> ChartConfig {
    ChartConfig {
        surface: VELOCITY_SURFACE,
        metric: Metric::Velocity,
        label: "Avg Effective Velocity (MPH)",
        y_title: "Velocity (MPH)",
        y_bounds: AxisBounds {
            min: None,
            max: None,
            suggested_min: Some(70.0),
            suggested_max: Some(100.0),
        },
        border_color: "#d22d49",
        background_color: "rgba(210, 45, 73, 0.2)",
        point_color: "#ae4545",
    }
}

pub fn strike_chart() -> ChartConfig {
    ChartConfig {
        surface: STRIKE_SURFACE,
        metric: Metric::Strikes,
        label: "Strike Percentage (%)",
        y_title: "Strike %",
        y_bounds: AxisBounds {
            min: Some(0.0),
            max: Some(100.0),
            suggested_min: None,
            suggested_max: None,
        },
        border_color: "#1d4ed8",
        background_color: "rgba(29, 78, 216, 0.2)",
        point_color: "#1d4ed8",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub point_background_color: String,
    pub border_width: u32,
    pub point_radius: u32,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    #[serde(flatten)]
    pub bounds: AxisBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

/// Declarative description handed to the chart backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub scales: Scales,
}

impl ChartConfig {
    pub fn build(&self, series: &AggregatedSeries) -> ChartSpec {
        ChartSpec {
            kind: "line",
            labels: series.labels.clone(),
            datasets: vec![Dataset {
                label: self.label.to_string(),
                data: self.metric.values(series).to_vec(),
                border_color: self.border_color.to_string(),
                background_color: self.background_color.to_string(),
                point_background_color: self.point_color.to_string(),
                border_width: 3,
                point_radius: 5,
                fill: true,
                tension: 0.2,
            }],
            scales: Scales {
                x: Axis {
                    title: "Date".to_string(),
                    bounds: AxisBounds {
                        min: None,
                        max: None,
                        suggested_min: None,
                        suggested_max: None,
                    },
                },
                y: Axis {
                    title: self.y_title.to_string(),
                    bounds: self.y_bounds,
                },
            },
        }
    }
}

/// Rendering library seam: creates charts on named surfaces and tears them down.
pub trait ChartBackend {
    type Handle;

    fn has_surface(&self, surface: &str) -> bool;
    fn create(&mut self, surface: &str, spec: ChartSpec) -> Self::Handle;
    fn dispose(&mut self, handle: Self::Handle);
}

/// Owns at most one live chart on its surface.
#[derive(Debug)]
pub struct ChartPresenter<H> {
    config: ChartConfig,
    handle: Option<H>,
}

impl<H> ChartPresenter<H> {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            handle: None,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Replaces the live chart. Returns false when the surface is absent.
    pub fn render<B>(&mut self, backend: &mut B, series: &AggregatedSeries) -> bool
    where
        B: ChartBackend<Handle = H>,
    {
        if !backend.has_surface(self.config.surface) {
            return false;
        }
        if let Some(previous) = self.handle.take() {
            backend.dispose(previous);
        }
        let spec = self.config.build(series);
        self.handle = Some(backend.create(self.config.surface, spec));
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartHandle {
    id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveChart {
    pub id: u64,
    pub spec: ChartSpec,
}

/// In-process chart backend: named surfaces, each with zero or one live chart.
#[derive(Debug, Default)]
pub struct ChartBoard {
    surfaces: BTreeMap<String, Option<LiveChart>>,
    next_id: u64,
    created: u64,
    disposed: u64,
}

impl ChartBoard {
    pub fn new<I, S>(surfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            surfaces: surfaces.into_iter().map(|s| (s.into(), None)).collect(),
            ..Self::default()
        }
    }

    pub fn live_count(&self) -> usize {
        self.surfaces.values().filter(|slot| slot.is_some()).count()
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn disposed(&self) -> u64 {
        self.disposed
    }

    pub fn chart(&self, surface: &str) -> Option<&ChartSpec> {
        self.surfaces
            .get(surface)
            .and_then(|slot| slot.as_ref())
            .map(|live| &live.spec)
    }

    pub fn snapshot(&self) -> BTreeMap<String, Option<ChartSpec>> {
        self.surfaces
            .iter()
            .map(|(name, slot)| (name.clone(), slot.as_ref().map(|live| live.spec.clone())))
            .collect()
    }
}

impl ChartBackend for ChartBoard {
    type Handle = ChartHandle;

    fn has_surface(&self, surface: &str) -> bool {
        self.surfaces.contains_key(surface)
    }

    fn create(&mut self, surface: &str, spec: ChartSpec) -> ChartHandle {
        self.next_id += 1;
        self.created += 1;
        let id = self.next_id;
        self.surfaces
            .insert(surface.to_string(), Some(LiveChart { id, spec }));
        ChartHandle { id }
    }

    fn dispose(&mut self, handle: ChartHandle) {
        for slot in self.surfaces.values_mut() {
            if slot.as_ref().is_some_and(|live| live.id == handle.id) {
                *slot = None;
                self.disposed += 1;
                return;
            }
        }
    }
}
