use leptos::prelude::*;
use pandemic_types::format::card_deaths_label;
use pandemic_types::{DisplayMode, EraFilter, PandemicRecord, ViewAction, views};

use crate::state::AtlasContext;

#[component]
pub fn ListPage() -> impl IntoView {
    let ctx = expect_context::<AtlasContext>();
    ctx.dispatch(ViewAction::ShowMode(DisplayMode::List));

    let eras = ctx.dataset.with_value(views::era_filters);
    let active = Memo::new(move |_| ctx.view.with(|s| s.active_era().clone()));

    view! {
        <div>
            <div class="era-badges">
                {eras
                    .into_iter()
                    .map(|filter| view! { <EraBadge filter=filter active=active/> })
                    .collect_view()}
            </div>
            <div class="cards-grid">
                {move || {
                    let visible: Vec<PandemicRecord> = ctx
                        .dataset
                        .with_value(|d| ctx.view.with(|s| s.visible(d).into_iter().cloned().collect()));
                    visible
                        .into_iter()
                        .enumerate()
                        .map(|(index, record)| view! { <DiseaseCard record=record index=index/> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn EraBadge(filter: EraFilter, active: Memo<EraFilter>) -> impl IntoView {
    let ctx = expect_context::<AtlasContext>();
    let label = filter.display_label().to_string();
    let selected = filter.clone();

    view! {
        <button
            class=move || if active.get() == filter { "badge active" } else { "badge outline" }
            on:click=move |_| ctx.dispatch(ViewAction::SelectEra(selected.clone()))
        >
            {label}
        </button>
    }
}

#[component]
fn DiseaseCard(record: PandemicRecord, index: usize) -> impl IntoView {
    let ctx = expect_context::<AtlasContext>();
    let id = record.id.clone();

    view! {
        <div
            class="card disease-card"
            style=format!("animation-delay:{}ms", index * 100)
            on:click=move |_| ctx.dispatch(ViewAction::SelectRecord(id.clone()))
        >
            <div class="card-top">
                <span class="dot" style=format!("background-color:{}", record.color)></span>
                <span class="badge secondary">{record.year}</span>
            </div>
            <h3>{record.name.clone()}</h3>
            <p class="era">{record.era.clone()}</p>
            <p class="deaths">"☠ " {card_deaths_label(record.deaths)}</p>
            <p class="regions">"📍 " {record.regions.join(", ")}</p>
            <p class="description">{record.description.clone()}</p>
        </div>
    }
}
