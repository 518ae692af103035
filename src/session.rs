use crate::aggregate::aggregate;
use crate::chart::{
    strike_chart, velocity_chart, ChartBoard, ChartHandle, ChartPresenter, ChartSpec, STRIKE_SURFACE,
    VELOCITY_SURFACE,
};
use crate::errors::SourceError;
use crate::models::{AggregatedSeries, PitchEvent};
use crate::normalize::normalize_all;
use crate::selection::{PitcherFilter, SelectionState};
use crate::source::PitchSource;
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::{error, info};

pub type Presenter = ChartPresenter<ChartHandle>;

/// Tags one history fetch so only the newest one is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Serialize)]
pub struct ChartsView {
    pub pitcher: Option<String>,
    pub filter: PitcherFilter,
    pub series: AggregatedSeries,
    pub charts: BTreeMap<String, Option<ChartSpec>>,
}

/// Page session: fetched pitches, active filter, and both chart presenters.
///
/// Updates are two explicit steps. Store data or change the filter, then call
/// `refresh` to aggregate and render.
#[derive(Debug)]
pub struct Session {
    selection: SelectionState,
    velocity: Presenter,
    strikes: Presenter,
    board: ChartBoard,
    series: AggregatedSeries,
    pitcher: Option<String>,
    latest_request: u64,
}

impl Session {
    pub fn new(strike_chart_enabled: bool) -> Self {
        let mut surfaces = vec![VELOCITY_SURFACE];
        if strike_chart_enabled {
            surfaces.push(STRIKE_SURFACE);
        }
        Self {
            selection: SelectionState::new(),
            velocity: ChartPresenter::new(velocity_chart()),
            strikes: ChartPresenter::new(strike_chart()),
            board: ChartBoard::new(surfaces),
            series: AggregatedSeries::default(),
            pitcher: None,
            latest_request: 0,
        }
    }

    pub fn begin_request(&mut self) -> RequestTicket {
        self.latest_request += 1;
        RequestTicket(self.latest_request)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest_request
    }

    /// Stores a fetched history and renders it. Superseded tickets are dropped.
    pub fn apply_history(
        &mut self,
        ticket: RequestTicket,
        pitcher: &str,
        events: Vec<PitchEvent>,
    ) -> bool {
        if !self.is_current(ticket) {
            info!(pitcher, "discarding history from superseded request");
            return false;
        }
        self.selection.set_dataset(events);
        self.selection.set_filter(PitcherFilter::All);
        self.pitcher = Some(pitcher.to_string());
        self.refresh();
        true
    }

    /// Narrows the stored data and re-renders. Nothing happens before a load.
    pub fn select(&mut self, filter: PitcherFilter) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.selection.set_filter(filter);
        self.refresh();
        true
    }

    pub fn refresh(&mut self) {
        self.series = aggregate(self.selection.filtered_view());
        self.velocity.render(&mut self.board, &self.series);
        self.strikes.render(&mut self.board, &self.series);
        info!(
            days = self.series.len(),
            live_charts = self.board.live_count(),
            "charts rendered"
        );
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn board(&self) -> &ChartBoard {
        &self.board
    }

    pub fn charts(&self) -> ChartsView {
        ChartsView {
            pitcher: self.pitcher.clone(),
            filter: self.selection.filter().clone(),
            series: self.series.clone(),
            charts: self.board.snapshot(),
        }
    }
}

/// Fetch, normalize, store and render one pitcher's history.
///
/// The session lock is released while the fetch is in flight. On failure the
/// session is left as it was.
pub async fn load_pitcher(
    session: &Mutex<Session>,
    source: &dyn PitchSource,
    pitcher: &str,
) -> Result<ChartsView, SourceError> {
    let ticket = session.lock().await.begin_request();

    let rows = source.history(pitcher).await.map_err(|err| {
        error!(pitcher, "failed to fetch pitch history: {err}");
        err
    })?;
    let events = normalize_all(rows);
    info!(pitcher, pitches = events.len(), "fetched pitch history");

    let mut session = session.lock().await;
    session.apply_history(ticket, pitcher, events);
    Ok(session.charts())
}
