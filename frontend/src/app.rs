use leptos::prelude::*;
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};
use pandemic_types::format::format_total_millions;
use pandemic_types::{Dataset, DisplayMode, Stats};

use crate::detail::DetailOverlay;
use crate::pages::{list::ListPage, timeline::TimelinePage};
use crate::state::AtlasContext;

#[component]
pub fn App(dataset: Dataset) -> impl IntoView {
    provide_context(AtlasContext::new(dataset));

    view! {
        <Router>
            <div id="app">
                <header>
                    <h1>"Исторические пандемии"</h1>
                    <p class="subtitle">
                        "Хронология крупнейших эпидемий и пандемий в истории человечества"
                    </p>
                </header>
                <StatsCards/>
                <nav class="tabs">
                    <A href="/">{DisplayMode::List.tab_label()}</A>
                    <A href="/timeline">{DisplayMode::Timeline.tab_label()}</A>
                </nav>
                <main>
                    <Routes fallback=|| {
                        view! { <p class="error">"Страница не найдена"</p> }
                    }>
                        <Route path=path!("/") view=ListPage/>
                        <Route path=path!("/timeline") view=TimelinePage/>
                    </Routes>
                </main>
                <DetailOverlay/>
            </div>
        </Router>
    }
}

#[component]
fn StatsCards() -> impl IntoView {
    let ctx = expect_context::<AtlasContext>();
    let stats = ctx.dataset.with_value(Stats::compute);

    view! {
        <div class="stats-grid">
            <div class="stat-card">
                <div class="label">"Всего эпидемий"</div>
                <div class="num">{stats.record_count}</div>
                <div class="hint">"За последние 1500 лет"</div>
            </div>
            <div class="stat-card">
                <div class="label">"Общие потери"</div>
                <div class="num">{format_total_millions(stats.total_deaths)}</div>
                <div class="hint">"Приблизительное число жертв"</div>
            </div>
            <div class="stat-card">
                <div class="label">"Охват территорий"</div>
                <div class="num">{stats.unique_regions}</div>
                <div class="hint">"Уникальных регионов"</div>
            </div>
        </div>
    }
}
