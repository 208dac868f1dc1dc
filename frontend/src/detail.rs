use leptos::prelude::*;
use pandemic_types::format::detail_deaths_label;
use pandemic_types::{OverlayClick, PandemicRecord, ViewAction};

use crate::state::AtlasContext;

/// Detail panel over a dimmed backdrop. A click inside the panel is marked
/// consumed before it bubbles to the backdrop, which only closes the panel
/// for unconsumed clicks.
#[component]
pub fn DetailOverlay() -> impl IntoView {
    let ctx = expect_context::<AtlasContext>();
    let click = StoredValue::new(OverlayClick::new());
    let selected = Memo::new(move |_| {
        ctx.view
            .with(|s| ctx.dataset.with_value(|d| s.detail().selected(d).cloned()))
    });

    let on_backdrop = move |_: leptos::ev::MouseEvent| {
        let c = click.get_value();
        click.set_value(OverlayClick::new());
        ctx.dispatch(ViewAction::OverlayClick(c));
    };

    move || {
        selected.get().map(|record| {
            view! {
                <div class="overlay" on:click=on_backdrop>
                    <div
                        class="card detail-panel"
                        on:click=move |_| click.update_value(|c| c.consume())
                    >
                        <DetailBody record=record/>
                    </div>
                </div>
            }
        })
    }
}

#[component]
fn DetailBody(record: PandemicRecord) -> impl IntoView {
    let ctx = expect_context::<AtlasContext>();

    view! {
        <div class="detail-header">
            <div>
                <h2>{record.name.clone()}</h2>
                <p class="muted">{format!("{} • {} год", record.era, record.year)}</p>
            </div>
            <button class="close" on:click=move |_| ctx.dispatch(ViewAction::CloseDetail)>
                "✕"
            </button>
        </div>
        <section>
            <h3>"Описание"</h3>
            <p class="muted">{record.description.clone()}</p>
        </section>
        <section>
            <h3>"Статистика"</h3>
            <p class="deaths big">{detail_deaths_label(record.deaths)}</p>
        </section>
        <section>
            <h3>"Регионы распространения"</h3>
            <div class="badges">
                {record
                    .regions
                    .iter()
                    .map(|r| view! { <span class="badge secondary">{r.clone()}</span> })
                    .collect_view()}
            </div>
        </section>
        <section>
            <h3>"Основные симптомы"</h3>
            <div class="badges">
                {record
                    .symptoms
                    .iter()
                    .map(|s| view! { <span class="badge outline">{s.clone()}</span> })
                    .collect_view()}
            </div>
        </section>
    }
}
