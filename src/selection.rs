use crate::models::PitchEvent;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "pitcher", rename_all = "lowercase")]
pub enum PitcherFilter {
    #[default]
    All,
    Pitcher(String),
}

impl PitcherFilter {
    /// Blank input and "all" (any case) disable filtering.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Pitcher(value.to_string())
        }
    }

    pub fn matches(&self, event: &PitchEvent) -> bool {
        match self {
            Self::All => true,
            Self::Pitcher(wanted) => {
                event.pitcher_id.as_deref() == Some(wanted.as_str())
                    || event.pitcher_name.as_deref() == Some(wanted.as_str())
            }
        }
    }
}

/// Full fetched dataset plus the active pitcher filter.
///
/// The history source already filters by pitcher, so `filtered_view` is a
/// second narrowing over whatever was stored. Changing the filter never
/// recomputes anything; callers aggregate and render afterwards.
#[derive(Debug, Default)]
pub struct SelectionState {
    dataset: Vec<PitchEvent>,
    filter: PitcherFilter,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dataset(&mut self, events: Vec<PitchEvent>) {
        self.dataset = events;
    }

    pub fn set_filter(&mut self, filter: PitcherFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &PitcherFilter {
        &self.filter
    }

    pub fn dataset(&self) -> &[PitchEvent] {
        &self.dataset
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn filtered_view(&self) -> Vec<&PitchEvent> {
        self.dataset
            .iter()
            .filter(|event| self.filter.matches(event))
            .collect()
    }
}
