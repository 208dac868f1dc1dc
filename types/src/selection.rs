//! View state shared by the web page and the terminal browser: the era
//! filter, the detail overlay and the display mode.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{Dataset, PandemicRecord};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no record has era {0:?}")]
    UnknownEra(String),
    #[error("no record with id {0:?}")]
    UnknownRecord(String),
}

// ── Era filter ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EraFilter {
    #[default]
    All,
    Era(String),
}

impl EraFilter {
    pub const ALL_LABEL: &'static str = "all";

    /// Resolve a label against the dataset; `"all"` is always valid.
    pub fn parse(dataset: &Dataset, label: &str) -> Result<Self, SelectionError> {
        let filter = if label == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Era(label.to_string())
        };
        filter.check(dataset)?;
        Ok(filter)
    }

    /// `All` always holds; an era must appear on at least one record.
    pub fn check(&self, dataset: &Dataset) -> Result<(), SelectionError> {
        match self {
            Self::Era(era) if !dataset.iter().any(|r| r.era == *era) => {
                Err(SelectionError::UnknownEra(era.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Wire label: `"all"` or the era itself.
    pub fn label(&self) -> &str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Era(era) => era.as_str(),
        }
    }

    /// Badge text on the page.
    pub fn display_label(&self) -> &str {
        match self {
            Self::All => "Все периоды",
            Self::Era(era) => era.as_str(),
        }
    }

    pub fn matches(&self, record: &PandemicRecord) -> bool {
        match self {
            Self::All => true,
            Self::Era(era) => record.era == *era,
        }
    }
}

// ── Detail overlay ───────────────────────────────────────────────────────

/// Where an overlay click started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRegion {
    /// The detail panel itself.
    Panel,
    /// The dimmed area around the panel.
    Backdrop,
}

/// A click travelling outward through the overlay: panel first, then the
/// backdrop. The panel handler consumes it so the backdrop does not close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayClick {
    consumed: bool,
}

impl OverlayClick {
    pub fn new() -> Self {
        Self::default()
    }

    /// The click after it has passed every handler between `origin` and the
    /// backdrop.
    pub fn from_origin(origin: OverlayRegion) -> Self {
        let mut click = Self::new();
        if origin == OverlayRegion::Panel {
            click.consume();
        }
        click
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Closed,
    /// Id of the record shown in the panel.
    Open(String),
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn selected<'a>(&self, dataset: &'a Dataset) -> Option<&'a PandemicRecord> {
        match self {
            Self::Closed => None,
            Self::Open(id) => dataset.get(id),
        }
    }

    /// Open the panel on `id`. Unknown ids leave the state as it was.
    pub fn select(&mut self, dataset: &Dataset, id: &str) -> Result<(), SelectionError> {
        if dataset.get(id).is_none() {
            return Err(SelectionError::UnknownRecord(id.to_string()));
        }
        *self = Self::Open(id.to_string());
        Ok(())
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Backdrop handler: closes unless the panel already consumed the click.
    pub fn on_backdrop_click(&mut self, click: OverlayClick) {
        if !click.is_consumed() {
            self.close();
        }
    }
}

// ── Display mode ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    List,
    Timeline,
}

impl DisplayMode {
    pub fn tab_label(&self) -> &'static str {
        match self {
            Self::List => "Болезни",
            Self::Timeline => "Хронология",
        }
    }
}

// ── View state ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    SelectEra(EraFilter),
    SelectRecord(String),
    CloseDetail,
    OverlayClick(OverlayClick),
    ShowMode(DisplayMode),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    active_era: EraFilter,
    detail: DetailState,
    mode: DisplayMode,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_era(&self) -> &EraFilter {
        &self.active_era
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Apply one user action. A rejected action leaves the state unchanged.
    pub fn apply(&mut self, dataset: &Dataset, action: ViewAction) -> Result<(), SelectionError> {
        match action {
            ViewAction::SelectEra(filter) => {
                filter.check(dataset)?;
                self.active_era = filter;
            }
            ViewAction::SelectRecord(id) => self.detail.select(dataset, &id)?,
            ViewAction::CloseDetail => self.detail.close(),
            ViewAction::OverlayClick(click) => self.detail.on_backdrop_click(click),
            ViewAction::ShowMode(mode) => self.mode = mode,
        }
        Ok(())
    }

    /// Records in the cards grid under the active filter.
    pub fn visible<'a>(&self, dataset: &'a Dataset) -> Vec<&'a PandemicRecord> {
        crate::views::filtered(dataset, &self.active_era)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::six_records;

    fn builtin() -> Dataset {
        Dataset::builtin().unwrap()
    }

    // ── EraFilter ────────────────────────────────────────────────────

    #[test]
    fn test_era_filter_parse() {
        let d = builtin();
        assert_eq!(EraFilter::parse(&d, "all"), Ok(EraFilter::All));
        assert_eq!(
            EraFilter::parse(&d, "14 век"),
            Ok(EraFilter::Era("14 век".into()))
        );
        assert_eq!(
            EraFilter::parse(&d, "3 век"),
            Err(SelectionError::UnknownEra("3 век".into()))
        );
    }

    #[test]
    fn test_era_check_agrees_with_parse_and_apply() {
        let d = six_records();
        let mut s = ViewState::new();
        for label in ["all", "14 век", "2 век", "3 век"] {
            let filter = if label == "all" {
                EraFilter::All
            } else {
                EraFilter::Era(label.into())
            };
            let checked = filter.check(&d);
            assert_eq!(EraFilter::parse(&d, label).map(|_| ()), checked.clone());
            assert_eq!(s.apply(&d, ViewAction::SelectEra(filter)), checked);
        }
        assert!(EraFilter::All.check(&Dataset::default()).is_ok());
    }

    #[test]
    fn test_era_filter_labels() {
        assert_eq!(EraFilter::All.label(), "all");
        assert_eq!(EraFilter::All.display_label(), "Все периоды");
        let e = EraFilter::Era("2 век".into());
        assert_eq!(e.label(), "2 век");
        assert_eq!(e.display_label(), "2 век");
    }

    // ── DetailState ──────────────────────────────────────────────────

    #[test]
    fn test_detail_starts_closed() {
        let d = builtin();
        let state = DetailState::default();
        assert!(!state.is_open());
        assert!(state.selected(&d).is_none());
    }

    #[test]
    fn test_select_then_close() {
        let d = builtin();
        let mut state = DetailState::default();
        state.select(&d, "18").unwrap();
        assert_eq!(state.selected(&d).map(|r| r.name.as_str()), Some("COVID-19"));
        state.close();
        assert_eq!(state, DetailState::Closed);
    }

    #[test]
    fn test_select_unknown_keeps_state() {
        let d = builtin();
        let mut state = DetailState::Open("5".into());
        assert_eq!(
            state.select(&d, "99"),
            Err(SelectionError::UnknownRecord("99".into()))
        );
        assert_eq!(state, DetailState::Open("5".into()));
    }

    #[test]
    fn test_panel_click_does_not_close() {
        let mut state = DetailState::Open("5".into());
        state.on_backdrop_click(OverlayClick::from_origin(OverlayRegion::Panel));
        assert_eq!(state, DetailState::Open("5".into()));
    }

    #[test]
    fn test_backdrop_click_closes() {
        let mut state = DetailState::Open("5".into());
        state.on_backdrop_click(OverlayClick::from_origin(OverlayRegion::Backdrop));
        assert_eq!(state, DetailState::Closed);
    }

    #[test]
    fn test_manual_consume() {
        let mut click = OverlayClick::new();
        assert!(!click.is_consumed());
        click.consume();
        assert!(click.is_consumed());
    }

    // ── ViewState ────────────────────────────────────────────────────

    #[test]
    fn test_view_state_initial() {
        let s = ViewState::new();
        assert_eq!(s.active_era(), &EraFilter::All);
        assert_eq!(s.detail(), &DetailState::Closed);
        assert_eq!(s.mode(), DisplayMode::List);
    }

    #[test]
    fn test_select_era_narrows_visible() {
        let d = six_records();
        let mut s = ViewState::new();
        s.apply(&d, ViewAction::SelectEra(EraFilter::Era("14 век".into())))
            .unwrap();
        let visible: Vec<&str> = s.visible(&d).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(visible, vec!["Чёрная смерть"]);

        s.apply(&d, ViewAction::SelectEra(EraFilter::All)).unwrap();
        assert_eq!(s.visible(&d).len(), 6);
    }

    #[test]
    fn test_select_unknown_era_rejected() {
        let d = six_records();
        let mut s = ViewState::new();
        s.apply(&d, ViewAction::SelectEra(EraFilter::Era("14 век".into())))
            .unwrap();
        let before = s.clone();
        // present in the full dataset but not in the six-record one
        let err = s
            .apply(&d, ViewAction::SelectEra(EraFilter::Era("2 век".into())))
            .unwrap_err();
        assert_eq!(err, SelectionError::UnknownEra("2 век".into()));
        assert_eq!(s, before);
    }

    #[test]
    fn test_covid_open_then_close() {
        let d = six_records();
        let covid = d.find("COVID-19").unwrap().id.clone();
        let mut s = ViewState::new();
        s.apply(&d, ViewAction::SelectRecord(covid.clone())).unwrap();
        assert_eq!(s.detail(), &DetailState::Open(covid));
        assert_eq!(
            s.detail().selected(&d).map(|r| r.name.as_str()),
            Some("COVID-19")
        );
        s.apply(&d, ViewAction::CloseDetail).unwrap();
        assert_eq!(s.detail(), &DetailState::Closed);
    }

    #[test]
    fn test_overlay_clicks_through_view_state() {
        let d = builtin();
        let mut s = ViewState::new();
        s.apply(&d, ViewAction::SelectRecord("3".into())).unwrap();
        s.apply(
            &d,
            ViewAction::OverlayClick(OverlayClick::from_origin(OverlayRegion::Panel)),
        )
        .unwrap();
        assert!(s.detail().is_open());
        s.apply(
            &d,
            ViewAction::OverlayClick(OverlayClick::from_origin(OverlayRegion::Backdrop)),
        )
        .unwrap();
        assert!(!s.detail().is_open());
    }

    #[test]
    fn test_era_change_keeps_detail_and_mode() {
        let d = builtin();
        let mut s = ViewState::new();
        s.apply(&d, ViewAction::ShowMode(DisplayMode::Timeline)).unwrap();
        s.apply(&d, ViewAction::SelectRecord("1".into())).unwrap();
        s.apply(&d, ViewAction::SelectEra(EraFilter::Era("21 век".into())))
            .unwrap();
        assert_eq!(s.mode(), DisplayMode::Timeline);
        assert_eq!(s.detail(), &DetailState::Open("1".into()));
    }
}
