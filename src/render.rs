//! Plain-text rendering of the derived views for the terminal.

use std::fmt::Write;

use pandemic_types::format::{
    card_deaths_label, detail_deaths_label, format_fixed, format_total_millions,
};
use pandemic_types::views::{self, RankedEntry, Stats, TimelinePoint};
use pandemic_types::{Dataset, DisplayMode, EraFilter, PandemicRecord, ViewState};

const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Default bar width in characters for the timeline and ranking charts.
pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Widest bar drawn; larger widths are clamped.
pub const MAX_BAR_WIDTH: usize = 200;

/// A bar of `width` cells (at most [`MAX_BAR_WIDTH`]) with `fraction` of them filled.
pub fn bar(fraction: f64, width: usize) -> String {
    let width = width.min(MAX_BAR_WIDTH);
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let mut s = String::with_capacity(width * 3);
    s.extend(std::iter::repeat_n(BAR_FULL, filled));
    s.extend(std::iter::repeat_n(BAR_EMPTY, width - filled));
    s
}

pub fn render_stats(stats: &Stats) -> String {
    format!(
        "Epidemics: {}\nTotal deaths: {} ({})\nUnique regions: {}\n",
        stats.record_count,
        format_total_millions(stats.total_deaths),
        stats.total_deaths,
        stats.unique_regions
    )
}

/// Era badges on one line; the active one is bracketed.
pub fn render_eras(filters: &[EraFilter], active: &EraFilter) -> String {
    let badges: Vec<String> = filters
        .iter()
        .map(|f| {
            if f == active {
                format!("[{}]", f.display_label())
            } else {
                f.display_label().to_string()
            }
        })
        .collect();
    format!("{}\n", badges.join(" · "))
}

pub fn render_card(record: &PandemicRecord) -> String {
    format!(
        "{:>5}  {}  ({})  #{}\n       {}\n       {}\n",
        record.year,
        record.name,
        record.era,
        record.id,
        card_deaths_label(record.deaths),
        record.regions.join(", "),
    )
}

pub fn render_cards(records: &[&PandemicRecord]) -> String {
    if records.is_empty() {
        return "No records.\n".to_string();
    }
    records
        .iter()
        .map(|r| render_card(r))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Horizontal bar per timeline point, scaled to the largest toll.
pub fn render_timeline(points: &[TimelinePoint], width: usize) -> String {
    let max = points
        .iter()
        .map(|p| p.deaths_millions)
        .fold(0.0_f64, f64::max);
    let mut out = String::new();
    for p in points {
        let fraction = if max > 0.0 {
            p.deaths_millions / max
        } else {
            0.0
        };
        let _ = writeln!(
            out,
            "{:>5}  {:<24} {} {}M",
            p.year,
            p.name,
            bar(fraction, width),
            format_fixed(p.deaths_millions, 1)
        );
    }
    out
}

pub fn render_ranking(entries: &[RankedEntry<'_>], width: usize) -> String {
    let mut out = String::new();
    for (i, e) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<24} {:>5}  {} {}",
            i + 1,
            e.record.name,
            e.record.year,
            bar(e.bar, width),
            e.deaths_label()
        );
        let _ = writeln!(out, "    {}", e.record.symptoms.join(", "));
    }
    out
}

pub fn render_detail(record: &PandemicRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "┌─ {}", record.name);
    let _ = writeln!(out, "│  {} • {} год", record.era, record.year);
    let _ = writeln!(out, "│");
    let _ = writeln!(out, "│  Описание: {}", record.description);
    let _ = writeln!(out, "│  Статистика: {}", detail_deaths_label(record.deaths));
    let _ = writeln!(out, "│  Регионы: {}", record.regions.join(", "));
    let _ = writeln!(out, "│  Симптомы: {}", record.symptoms.join(", "));
    out.push_str("└─\n");
    out
}

/// The whole screen for the current state: tabs, the active tab's content,
/// and the detail panel on top when open.
pub fn render_view(dataset: &Dataset, state: &ViewState, width: usize) -> String {
    let mut out = String::new();
    for mode in [DisplayMode::List, DisplayMode::Timeline] {
        if mode == state.mode() {
            let _ = write!(out, "[{}] ", mode.tab_label());
        } else {
            let _ = write!(out, " {}  ", mode.tab_label());
        }
    }
    out.push('\n');
    out.push('\n');

    match state.mode() {
        DisplayMode::List => {
            out.push_str(&render_eras(&views::era_filters(dataset), state.active_era()));
            out.push('\n');
            out.push_str(&render_cards(&state.visible(dataset)));
        }
        DisplayMode::Timeline => {
            out.push_str(&render_timeline(&views::timeline(dataset), width));
            out.push('\n');
            out.push_str(&render_ranking(&views::ranking_with_bars(dataset), width));
        }
    }

    if let Some(record) = state.detail().selected(dataset) {
        out.push('\n');
        out.push_str(&render_detail(record));
    }
    out
}
