use leptos::logging::warn;
use leptos::prelude::*;

use pandemic_types::{Dataset, ViewAction, ViewState};

/// The injected dataset and the page's view state, provided as context to
/// every component below `App`.
#[derive(Clone, Copy)]
pub struct AtlasContext {
    pub dataset: StoredValue<Dataset>,
    pub view: RwSignal<ViewState>,
}

impl AtlasContext {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: StoredValue::new(dataset),
            view: RwSignal::new(ViewState::new()),
        }
    }

    /// Apply a user action; rejected actions are logged and change nothing.
    pub fn dispatch(&self, action: ViewAction) {
        let dataset = self.dataset;
        self.view.update(|state| {
            dataset.with_value(|d| {
                if let Err(e) = state.apply(d, action) {
                    warn!("{e}");
                }
            })
        });
    }
}
