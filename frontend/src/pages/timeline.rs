use leptos::prelude::*;
use pandemic_types::{DisplayMode, PandemicRecord, ViewAction, views};

use crate::chart::TimelineChart;
use crate::state::AtlasContext;

#[component]
pub fn TimelinePage() -> impl IntoView {
    let ctx = expect_context::<AtlasContext>();
    ctx.dispatch(ViewAction::ShowMode(DisplayMode::Timeline));

    // Neither view follows the era filter.
    let points = ctx.dataset.with_value(views::timeline);
    let ranked: Vec<(PandemicRecord, f64, String)> = ctx.dataset.with_value(|d| {
        views::ranking_with_bars(d)
            .into_iter()
            .map(|e| (e.record.clone(), e.bar_percent(), e.deaths_label()))
            .collect()
    });

    view! {
        <div>
            <div class="card">
                <h3>"Хронология пандемий по числу жертв"</h3>
                <p class="muted">"График показывает количество погибших в миллионах человек"</p>
                <TimelineChart points=points/>
            </div>
            <div class="ranking-grid">
                {ranked
                    .into_iter()
                    .map(|(record, percent, deaths)| {
                        view! { <RankingCard record=record percent=percent deaths=deaths/> }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn RankingCard(record: PandemicRecord, percent: f64, deaths: String) -> impl IntoView {
    let ctx = expect_context::<AtlasContext>();
    let id = record.id.clone();

    view! {
        <div
            class="card ranking-card"
            on:click=move |_| ctx.dispatch(ViewAction::SelectRecord(id.clone()))
        >
            <div class="card-top">
                <h4>{record.name.clone()}</h4>
                <span class="badge">{record.year}</span>
            </div>
            <div class="ranking-deaths">
                <span class="muted">"Жертвы"</span>
                <span class="deaths">{deaths}</span>
            </div>
            <div class="bar-track">
                <div
                    class="bar-fill"
                    style=format!("width:{percent:.2}%;background-color:{}", record.color)
                ></div>
            </div>
            <div class="symptoms">
                {record
                    .symptoms
                    .iter()
                    .map(|s| view! { <span class="badge outline">{s.clone()}</span> })
                    .collect_view()}
            </div>
        </div>
    }
}
