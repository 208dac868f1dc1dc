mod app;
mod chart;
mod detail;
mod pages;
mod state;

use leptos::logging::{error, log};
use leptos::prelude::*;
use pandemic_types::Dataset;

use crate::app::App;

fn main() {
    console_error_panic_hook::set_once();

    match Dataset::builtin() {
        Ok(dataset) => {
            log!("loaded {} pandemic records", dataset.len());
            leptos::mount::mount_to_body(move || view! { <App dataset=dataset/> });
        }
        Err(e) => {
            error!("cannot load dataset: {e}");
            let message = e.to_string();
            leptos::mount::mount_to_body(move || view! { <p class="error">{message}</p> });
        }
    }
}
