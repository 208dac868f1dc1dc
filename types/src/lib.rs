//! Shared model for the pandemics atlas: the dataset, the views derived from
//! it and the view state both the web page and the CLI drive.

pub mod format;
pub mod record;
pub mod selection;
pub mod views;

pub use record::{Dataset, DatasetError, PandemicRecord};
pub use selection::{
    DetailState, DisplayMode, EraFilter, OverlayClick, OverlayRegion, SelectionError, ViewAction,
    ViewState,
};
pub use views::{RankedEntry, Stats, TimelinePoint};
